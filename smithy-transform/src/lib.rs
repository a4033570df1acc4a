/*!
Model-to-model transforms: each takes an owned [`Model`] and produces a
new one, or a list of `ERROR` events explaining why it refused to
(`changeTypes`'s incompatible conversions, mainly). A build projection
runs a sequence of these; per the build pipeline's failure semantics, a
transform failure aborts only the projection it belongs to.
*/

#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

#[macro_use]
extern crate log;

mod transforms;

pub use transforms::{
    ChangeTypes, ExcludeByTag, ExcludeShapesByTrait, FilterSuppressions, FlattenAndRemoveMixins,
    FlattenNamespaces, IncludeByTag, IncludeNamespaces, MemberOrdering, RemoveTraitDefinitions,
    RemoveUnreferencedShapes, RenameShapes, SortMembers,
};

use smithy_core::model::diagnostics::Event;
use smithy_core::model::Model;

/// Outcome of applying a single transform: a new model on success, or the
/// `ERROR` events that explain why the transform refused to run.
pub type TransformResult = Result<Model, Vec<Event>>;

/// A named, model-to-model transform.
pub trait Transform {
    /// The transform's name, as used in build configuration (e.g. `"includeByTag"`).
    fn name(&self) -> &'static str;

    /// Apply this transform, consuming `model` and returning the result.
    fn apply(&self, model: Model) -> TransformResult;
}

/// Runs a fixed sequence of transforms, stopping at the first failure —
/// the per-projection failure semantics a build pipeline relies on.
pub fn apply_all(transforms: &[Box<dyn Transform>], mut model: Model) -> TransformResult {
    for transform in transforms {
        debug!("applying transform '{}'", transform.name());
        model = transform.apply(model)?;
    }
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pipeline_returns_model_unchanged() {
        let model = Model::new();
        let result = apply_all(&[], model.clone());
        assert_eq!(result.unwrap().len(), model.len());
    }
}
