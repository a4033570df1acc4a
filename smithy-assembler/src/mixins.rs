/*!
Mixin resolution: flattens each shape's declared mixins into its own
trait map and (for aggregate shapes) member list, in mixin declaration
order, detecting cycles along the way.
*/

use indexmap::IndexMap;
use smithy_core::identity::ShapeID;
use smithy_core::model::diagnostics::Event;
use smithy_core::model::shape::ShapeKind;
use smithy_core::model::Model;
use std::collections::HashSet;

/// Copy down every mixin's members and traits into the shapes that
/// declare them, processing mixins before their dependents so that
/// transitive mixins (`A with [B]`, `B with [C]`) cascade correctly.
/// Shapes caught in a mixin cycle are reported via `MIXIN_CYCLE` and
/// skipped, rather than expanded into an infinite structure.
pub fn apply_mixins(model: &mut Model, mixins_by_shape: &IndexMap<ShapeID, Vec<ShapeID>>, events: &mut Vec<Event>) {
    let mut visited = HashSet::new();
    let mut in_progress = HashSet::new();
    let mut cyclic = HashSet::new();
    for id in mixins_by_shape.keys() {
        mark_cycles(id, mixins_by_shape, &mut visited, &mut in_progress, &mut cyclic, events);
    }

    let mut order = Vec::new();
    let mut ordered = HashSet::new();
    for id in mixins_by_shape.keys() {
        push_topo(id, mixins_by_shape, &cyclic, &mut ordered, &mut order);
    }

    for id in &order {
        if let Some(mixin_ids) = mixins_by_shape.get(id) {
            for mixin_id in mixin_ids {
                merge_mixin_into(model, id, mixin_id, events);
            }
        }
    }
}

fn mark_cycles(
    id: &ShapeID,
    mixins_by_shape: &IndexMap<ShapeID, Vec<ShapeID>>,
    visited: &mut HashSet<ShapeID>,
    in_progress: &mut HashSet<ShapeID>,
    cyclic: &mut HashSet<ShapeID>,
    events: &mut Vec<Event>,
) {
    if visited.contains(id) {
        return;
    }
    if in_progress.contains(id) {
        cyclic.insert(id.clone());
        events.push(Event::error("MIXIN_CYCLE", format!("mixin cycle detected at '{}'", id)).with_shape(id.clone()));
        return;
    }
    in_progress.insert(id.clone());
    if let Some(mixins) = mixins_by_shape.get(id) {
        for m in mixins {
            mark_cycles(m, mixins_by_shape, visited, in_progress, cyclic, events);
            if cyclic.contains(m) {
                cyclic.insert(id.clone());
            }
        }
    }
    in_progress.remove(id);
    visited.insert(id.clone());
}

fn push_topo(
    id: &ShapeID,
    mixins_by_shape: &IndexMap<ShapeID, Vec<ShapeID>>,
    cyclic: &HashSet<ShapeID>,
    ordered: &mut HashSet<ShapeID>,
    order: &mut Vec<ShapeID>,
) {
    if cyclic.contains(id) || ordered.contains(id) {
        return;
    }
    ordered.insert(id.clone());
    if let Some(mixins) = mixins_by_shape.get(id) {
        for m in mixins {
            push_topo(m, mixins_by_shape, cyclic, ordered, order);
        }
    }
    order.push(id.clone());
}

fn merge_mixin_into(model: &mut Model, target_id: &ShapeID, mixin_id: &ShapeID, events: &mut Vec<Event>) {
    let mixin_shape = match model.shape(mixin_id) {
        Some(s) => s.clone(),
        None => {
            events.push(
                Event::error("UNKNOWN_SHAPE_TARGET", format!("mixin '{}' not found", mixin_id)).with_shape(target_id.clone()),
            );
            return;
        }
    };

    let target = match model.shape_mut(target_id) {
        Some(s) => s,
        None => return,
    };

    for (trait_id, a_trait) in mixin_shape.traits() {
        if !target.has_trait(trait_id) {
            target.add_trait(a_trait.clone());
        }
    }

    match (target.kind_mut(), mixin_shape.kind()) {
        (ShapeKind::Structure { members: target_members }, ShapeKind::Structure { members: mixin_members })
        | (ShapeKind::Union { members: target_members }, ShapeKind::Union { members: mixin_members }) => {
            for (name, mixin_member) in mixin_members {
                match target_members.get(name) {
                    Some(existing) if existing.target() != mixin_member.target() => {
                        events.push(
                            Event::error(
                                "MIXIN_TARGET_CONFLICT",
                                format!(
                                    "member '{}' targets '{}' locally but '{}' via mixin '{}'",
                                    name,
                                    existing.target(),
                                    mixin_member.target(),
                                    mixin_id
                                ),
                            )
                            .with_shape(target_id.clone()),
                        );
                    }
                    Some(_) => {}
                    None => {
                        let _ = target_members.insert(name.clone(), mixin_member.clone());
                    }
                }
            }
        }
        _ => {}
    }
}
