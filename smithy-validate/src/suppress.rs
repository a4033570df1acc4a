//! `@suppress` trait and `metadata.suppressions` handling: downgrades
//! matching events to `SUPPRESSED` (or `DANGER` for errors) in place,
//! rather than dropping them, so a suppressed finding is still visible
//! to a caller that wants the full list.

use smithy_core::model::diagnostics::Event;
use smithy_core::model::Model;
use smithy_core::prelude::trait_ids;

pub(crate) fn apply_suppressions(model: &Model, events: &mut [Event]) {
    let metadata_ids = metadata_suppression_ids(model);
    for event in events.iter_mut() {
        let shape_suppressed = event
            .shape_id()
            .and_then(|id| model.shape(&id.to_shape_id()))
            .and_then(|shape| shape.get_trait(&trait_ids::suppress()))
            .and_then(|t| t.value().as_array().ok())
            .map(|ids| ids.iter().any(|n| matches_prefix(event, n.as_string().ok())))
            .unwrap_or(false);
        if shape_suppressed || metadata_ids.iter().any(|id| matches_prefix(event, Some(id.as_str()))) {
            event.suppress();
        }
    }
}

fn matches_prefix(event: &Event, prefix: Option<&str>) -> bool {
    match prefix {
        Some(p) => event.id_matches_prefix(p),
        None => false,
    }
}

fn metadata_suppression_ids(model: &Model) -> Vec<String> {
    model
        .metadata()
        .get("suppressions")
        .and_then(|n| n.as_array().ok())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("id").and_then(|id| id.as_string().ok()).map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
