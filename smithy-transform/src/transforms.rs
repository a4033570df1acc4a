//! The standard transform library. Each transform struct implements
//! [`crate::Transform`]; construction takes the transform's settings
//! directly (build-config deserialization lives in `smithy-build`).

use crate::Transform;
use indexmap::{IndexMap, IndexSet};
use smithy_core::identity::{Identifier, Namespace, ShapeID};
use smithy_core::model::diagnostics::Event;
use smithy_core::model::shape::{Member, Shape, ShapeKind, SimpleKind};
use smithy_core::model::Model;
use smithy_core::prelude::{trait_ids, PRELUDE_NAMESPACE};
use std::collections::HashSet;

fn has_any_tag(shape: &Shape, tags: &[String]) -> bool {
    match shape.get_trait(&trait_ids::tags()) {
        Some(t) => match t.value().as_array() {
            Ok(values) => values.iter().any(|v| match v.as_string() {
                Ok(s) => tags.iter().any(|tag| tag == s),
                Err(_) => false,
            }),
            Err(_) => false,
        },
        None => false,
    }
}

fn is_trait_definition(shape: &Shape) -> bool {
    shape.has_trait(&trait_ids::trait_def())
}

/// `includeByTag(tags)`: retain only shapes whose `@tags` intersects
/// `tags`, plus every shape transitively reachable from one of them.
pub struct IncludeByTag {
    pub tags: Vec<String>,
}

impl Transform for IncludeByTag {
    fn name(&self) -> &'static str {
        "includeByTag"
    }

    fn apply(&self, model: Model) -> crate::TransformResult {
        let seeds: Vec<ShapeID> = model
            .shapes_sorted()
            .into_iter()
            .filter(|s| has_any_tag(s, &self.tags))
            .map(|s| s.id().clone())
            .collect();
        let mut keep: HashSet<ShapeID> = HashSet::new();
        for seed in &seeds {
            keep.extend(model.closure(seed));
        }
        let mut result = Model::new();
        *result.metadata_mut() = model.metadata().clone();
        for id in keep {
            if let Some(shape) = model.shape(&id) {
                result.add_shape(shape.clone());
            }
        }
        Ok(result)
    }
}

/// `excludeByTag(tags)`: the symmetric exclusion — drop shapes whose
/// `@tags` intersects `tags`, with no transitive expansion.
pub struct ExcludeByTag {
    pub tags: Vec<String>,
}

impl Transform for ExcludeByTag {
    fn name(&self) -> &'static str {
        "excludeByTag"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        let drop: Vec<ShapeID> = model
            .shapes_sorted()
            .into_iter()
            .filter(|s| has_any_tag(s, &self.tags))
            .map(|s| s.id().clone())
            .collect();
        for id in drop {
            model.remove_shape(&id);
        }
        Ok(model)
    }
}

/// `includeNamespaces(ns)`: retain only shapes in one of `namespaces`,
/// plus the prelude (always required for resolution).
pub struct IncludeNamespaces {
    pub namespaces: Vec<String>,
}

impl Transform for IncludeNamespaces {
    fn name(&self) -> &'static str {
        "includeNamespaces"
    }

    fn apply(&self, model: Model) -> crate::TransformResult {
        let mut result = Model::new();
        *result.metadata_mut() = model.metadata().clone();
        for shape in model.shapes_sorted() {
            let ns = shape.id().namespace().to_string();
            if ns == PRELUDE_NAMESPACE || self.namespaces.iter().any(|n| n == &ns) {
                result.add_shape(shape.clone());
            }
        }
        Ok(result)
    }
}

/// `excludeShapesByTrait(traitId...)`: drop every shape carrying any of
/// the named traits.
pub struct ExcludeShapesByTrait {
    pub trait_ids: Vec<ShapeID>,
}

impl Transform for ExcludeShapesByTrait {
    fn name(&self) -> &'static str {
        "excludeShapesByTrait"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        let drop: Vec<ShapeID> = model
            .shapes_sorted()
            .into_iter()
            .filter(|s| self.trait_ids.iter().any(|t| s.has_trait(t)))
            .map(|s| s.id().clone())
            .collect();
        for id in drop {
            model.remove_shape(&id);
        }
        Ok(model)
    }
}

/// `removeUnreferencedShapes(exportTags?)`: iteratively remove shapes
/// with no incoming reference and no `@trait` marker, to a fixed point.
/// Service/operation/resource shapes are never pruned by this rule —
/// they are the graph's roots and, being entrypoints, legitimately have
/// no incoming reference.
pub struct RemoveUnreferencedShapes {
    pub export_tags: Option<Vec<String>>,
}

impl Transform for RemoveUnreferencedShapes {
    fn name(&self) -> &'static str {
        "removeUnreferencedShapes"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        loop {
            let to_remove: Vec<ShapeID> = model
                .shapes_sorted()
                .into_iter()
                .filter(|s| {
                    !matches!(s.kind(), ShapeKind::Operation(_) | ShapeKind::Resource(_) | ShapeKind::Service(_))
                        && !is_trait_definition(s)
                        && model.reverse_neighbors(s.id()).is_empty()
                        && !self.export_tags.as_ref().is_some_and(|tags| has_any_tag(s, tags))
                })
                .map(|s| s.id().clone())
                .collect();
            if to_remove.is_empty() {
                break;
            }
            for id in to_remove {
                model.remove_shape(&id);
            }
        }
        Ok(model)
    }
}

/// `removeTraitDefinitions(exportTags?)`: remove trait-definition shapes
/// (those carrying `smithy.api#trait`), leaving every *application* of
/// those traits on other shapes untouched — applications are separate
/// `Trait` entries on their host shapes, not shapes of their own.
pub struct RemoveTraitDefinitions {
    pub export_tags: Option<Vec<String>>,
}

impl Transform for RemoveTraitDefinitions {
    fn name(&self) -> &'static str {
        "removeTraitDefinitions"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        let drop: Vec<ShapeID> = model
            .shapes_sorted()
            .into_iter()
            .filter(|s| is_trait_definition(s) && !self.export_tags.as_ref().is_some_and(|tags| has_any_tag(s, tags)))
            .map(|s| s.id().clone())
            .collect();
        for id in drop {
            model.remove_shape(&id);
        }
        Ok(model)
    }
}

/// `renameShapes(mapping)`: rename shapes and rewrite every reference to
/// them, following the replacement discipline: (a) the old shape is
/// pulled out of the map, (b) re-inserted under its new ID, (c) every
/// remaining shape's outgoing references are rewritten.
pub struct RenameShapes {
    pub mapping: IndexMap<ShapeID, ShapeID>,
}

impl Transform for RenameShapes {
    fn name(&self) -> &'static str {
        "renameShapes"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        for (old, new) in &self.mapping {
            if let Some(mut shape) = model.remove_shape(old) {
                shape.set_id(new.clone());
                model.add_shape(shape);
            }
        }
        let ids: Vec<ShapeID> = model.shape_ids_sorted().into_iter().cloned().collect();
        for id in ids {
            if let Some(shape) = model.shape_mut(&id) {
                rewrite_references(shape, &self.mapping);
            }
        }
        Ok(model)
    }
}

fn rewrite_references(shape: &mut Shape, mapping: &IndexMap<ShapeID, ShapeID>) {
    let rewrite = |target: &mut ShapeID| {
        if let Some(new) = mapping.get(target) {
            *target = new.clone();
        }
    };
    match shape.kind_mut() {
        ShapeKind::List { member } => rewrite(member.target_mut()),
        ShapeKind::Map { key, value } => {
            rewrite(key.target_mut());
            rewrite(value.target_mut());
        }
        ShapeKind::Structure { members } | ShapeKind::Union { members } => {
            for member in members.values_mut() {
                rewrite(member.target_mut());
            }
        }
        ShapeKind::Enum { members } | ShapeKind::IntEnum { members } => {
            for (member, _) in members.values_mut() {
                rewrite(member.target_mut());
            }
        }
        ShapeKind::Operation(op) => {
            if let Some(t) = &mut op.input {
                rewrite(t);
            }
            if let Some(t) = &mut op.output {
                rewrite(t);
            }
            for t in &mut op.errors {
                rewrite(t);
            }
        }
        ShapeKind::Resource(r) => {
            for t in r.identifiers.values_mut() {
                rewrite(t);
            }
            for t in r.properties.values_mut() {
                rewrite(t);
            }
            for t in [&mut r.create, &mut r.put, &mut r.read, &mut r.update, &mut r.delete, &mut r.list] {
                if let Some(t) = t {
                    rewrite(t);
                }
            }
            for t in r.operations.iter_mut().chain(r.collection_operations.iter_mut()).chain(r.resources.iter_mut()) {
                rewrite(t);
            }
        }
        ShapeKind::Service(s) => {
            for t in s.operations.iter_mut().chain(s.resources.iter_mut()).chain(s.errors.iter_mut()) {
                rewrite(t);
            }
        }
        ShapeKind::Simple(_) => {}
    }
}

/// `changeTypes(mapping)`: replace a simple shape's `SimpleKind`,
/// failing with an `ERROR` event for conversions between incompatible
/// families (string-like vs. numeric vs. boolean vs. blob/timestamp).
pub struct ChangeTypes {
    pub mapping: IndexMap<ShapeID, SimpleKind>,
}

impl Transform for ChangeTypes {
    fn name(&self) -> &'static str {
        "changeTypes"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        let mut errors = Vec::new();
        for (id, new_kind) in &self.mapping {
            match model.shape(id).map(|s| s.kind().clone()) {
                Some(ShapeKind::Simple(old_kind)) => {
                    if !is_compatible_conversion(old_kind, *new_kind) {
                        errors.push(
                            Event::error(
                                "Transform.IncompatibleTypeChange",
                                format!("cannot change '{}' from {} to {}", id, old_kind.type_name(), new_kind.type_name()),
                            )
                            .with_shape(id.clone()),
                        );
                        continue;
                    }
                    if let Some(shape) = model.shape_mut(id) {
                        *shape.kind_mut() = ShapeKind::Simple(*new_kind);
                    }
                }
                Some(other) => {
                    errors.push(
                        Event::error(
                            "Transform.IncompatibleTypeChange",
                            format!("'{}' is a {} shape, not a simple type", id, other.type_name()),
                        )
                        .with_shape(id.clone()),
                    );
                }
                None => errors.push(Event::error("Transform.IncompatibleTypeChange", format!("'{}' is not defined", id)).with_shape(id.clone())),
            }
        }
        if errors.is_empty() {
            Ok(model)
        } else {
            Err(errors)
        }
    }
}

fn is_compatible_conversion(from: SimpleKind, to: SimpleKind) -> bool {
    fn family(kind: SimpleKind) -> u8 {
        match kind {
            SimpleKind::Byte | SimpleKind::Short | SimpleKind::Integer | SimpleKind::Long | SimpleKind::Float | SimpleKind::Double | SimpleKind::BigInteger | SimpleKind::BigDecimal => 0,
            SimpleKind::String => 1,
            SimpleKind::Boolean => 2,
            SimpleKind::Blob => 3,
            SimpleKind::Timestamp => 4,
            SimpleKind::Document => 5,
        }
    }
    family(from) == family(to)
}

/// `flattenAndRemoveMixins()`: for every shape with mixins, copy in its
/// mixins' members and traits directly, then drop the mixin relation.
/// Mixin-only shapes (ones marked with `@mixin` and never otherwise
/// referenced) become unreachable once every use is flattened, so this
/// finishes by running `removeUnreferencedShapes` to prune them.
pub struct FlattenAndRemoveMixins;

impl Transform for FlattenAndRemoveMixins {
    fn name(&self) -> &'static str {
        "flattenAndRemoveMixins"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        let ids: Vec<ShapeID> = model.shape_ids_sorted().into_iter().cloned().collect();
        for id in ids {
            let mixins = model.shape(&id).map(|s| s.mixins().to_vec()).unwrap_or_default();
            if mixins.is_empty() {
                continue;
            }
            let mut inherited_traits = Vec::new();
            let mut inherited_members: IndexMap<Identifier, Member> = IndexMap::new();
            for mixin_id in &mixins {
                if let Some(mixin_shape) = model.shape(mixin_id) {
                    for t in mixin_shape.traits().values() {
                        inherited_traits.push(t.clone());
                    }
                    if let ShapeKind::Structure { members } | ShapeKind::Union { members } = mixin_shape.kind() {
                        for (name, member) in members {
                            inherited_members.entry(name.clone()).or_insert_with(|| member.clone());
                        }
                    }
                }
            }
            if let Some(shape) = model.shape_mut(&id) {
                for t in inherited_traits {
                    if !shape.has_trait(t.id()) {
                        shape.add_trait(t);
                    }
                }
                if let ShapeKind::Structure { members } | ShapeKind::Union { members } = shape.kind_mut() {
                    for (name, member) in inherited_members {
                        members.entry(name).or_insert(member);
                    }
                }
            }
        }
        drop_mixin_relations(&mut model);
        RemoveUnreferencedShapes { export_tags: None }.apply(model)
    }
}

fn drop_mixin_relations(model: &mut Model) {
    let ids: Vec<ShapeID> = model.shape_ids_sorted().into_iter().cloned().collect();
    for id in ids {
        if let Some(shape) = model.shape_mut(&id) {
            clear_mixins(shape);
        }
    }
}

fn clear_mixins(shape: &mut Shape) {
    // `Shape` exposes `add_mixin` but no bulk clear; rebuild in place by
    // replacing the shape with an equivalent one carrying no mixins.
    let mut rebuilt = Shape::new(shape.id().clone(), shape.kind().clone());
    for t in shape.traits().values() {
        rebuilt.add_trait(t.clone());
    }
    rebuilt.set_source_location(shape.source_location().clone());
    *shape = rebuilt;
}

/// `filterSuppressions(config)`: drop `@suppress`/`metadata.suppressions`
/// entries whose rule IDs are not in `keep_ids` — used by build
/// projections that want to bake in only a subset of suppressions.
pub struct FilterSuppressions {
    pub keep_ids: HashSet<String>,
}

impl Transform for FilterSuppressions {
    fn name(&self) -> &'static str {
        "filterSuppressions"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        let suppress_trait = trait_ids::suppress();
        let ids: Vec<ShapeID> = model.shape_ids_sorted().into_iter().cloned().collect();
        for id in ids {
            if let Some(shape) = model.shape_mut(&id) {
                if let Some(t) = shape.get_trait(&suppress_trait) {
                    if let Ok(values) = t.value().as_array() {
                        let kept: Vec<smithy_core::node::Node> = values
                            .iter()
                            .filter(|v| v.as_string().map(|s| self.keep_ids.contains(s)).unwrap_or(false))
                            .cloned()
                            .collect();
                        if kept.is_empty() {
                            shape.remove_trait(&suppress_trait);
                        } else {
                            shape.add_trait(smithy_core::traits::Trait::new(suppress_trait.clone(), smithy_core::node::Node::array(kept)));
                        }
                    }
                }
            }
        }
        Ok(model)
    }
}

/// Member ordering used by `sortMembers`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberOrdering {
    Alphabetical,
}

/// `sortMembers(ordering)`: reorder every aggregate shape's members.
pub struct SortMembers {
    pub ordering: MemberOrdering,
}

impl Transform for SortMembers {
    fn name(&self) -> &'static str {
        "sortMembers"
    }

    fn apply(&self, mut model: Model) -> crate::TransformResult {
        let ids: Vec<ShapeID> = model.shape_ids_sorted().into_iter().cloned().collect();
        for id in ids {
            if let Some(shape) = model.shape_mut(&id) {
                if let ShapeKind::Structure { members } | ShapeKind::Union { members } = shape.kind_mut() {
                    members.sort_keys();
                }
            }
        }
        Ok(model)
    }
}

/// `flattenNamespaces(target, service)`: move every shape transitively
/// referenced by `service` into a single `target` namespace, rewriting
/// every reference accordingly. Shapes in the prelude namespace are
/// left untouched, since they resolve globally regardless of namespace.
pub struct FlattenNamespaces {
    pub target: Namespace,
    pub service: ShapeID,
}

impl Transform for FlattenNamespaces {
    fn name(&self) -> &'static str {
        "flattenNamespaces"
    }

    fn apply(&self, model: Model) -> crate::TransformResult {
        let closure = model.closure(&self.service);
        let mut mapping = IndexMap::new();
        for id in &closure {
            if id.namespace().to_string() == PRELUDE_NAMESPACE {
                continue;
            }
            let new_id = ShapeID::new(self.target.clone(), id.shape_name().clone());
            if &new_id != id {
                mapping.insert(id.clone(), new_id);
            }
        }
        RenameShapes { mapping }.apply(model)
    }
}
