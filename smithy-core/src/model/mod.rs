/*!
`Model`: an immutable aggregation of shapes keyed by shape ID, plus
derived indexes.

A `Model` exclusively owns its `Shape`s; shapes reference each other
only by `ShapeID`. This means a transformed model can share unchanged
`Shape` values with its predecessor with no lifetime or cycle concerns.

Iteration exposed to callers is always deterministic: sorted by shape
ID, even though the backing map is a plain `HashMap`.
*/

use crate::identity::ShapeID;
use crate::model::shape::{Shape, ShapeKind};
use std::collections::HashMap;

pub mod diagnostics;

pub mod shape;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// The Smithy IDL dialect a textual source was written against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdlVersion {
    /// IDL 1.0.
    V1_0,
    /// IDL 2.0.
    V2_0,
}

impl Default for IdlVersion {
    fn default() -> Self {
        IdlVersion::V2_0
    }
}

/// An immutable aggregation of shapes, plus the metadata and control data
/// merged in from every source that contributed to it.
#[derive(Clone, Debug, Default)]
pub struct Model {
    shapes: HashMap<ShapeID, Shape>,
    metadata: crate::node::NodeObject,
}

// ------------------------------------------------------------------------------------------------
// Implementations — Model
// ------------------------------------------------------------------------------------------------

impl Model {
    /// An empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `shape_id` is defined in this model.
    pub fn has_shape(&self, shape_id: &ShapeID) -> bool {
        self.shapes.contains_key(shape_id)
    }

    /// The shape with `shape_id`, if defined.
    pub fn shape(&self, shape_id: &ShapeID) -> Option<&Shape> {
        self.shapes.get(shape_id)
    }

    /// Mutable access to the shape with `shape_id`, if defined.
    pub fn shape_mut(&mut self, shape_id: &ShapeID) -> Option<&mut Shape> {
        self.shapes.get_mut(shape_id)
    }

    /// Insert or replace `shape`, keyed by its own ID.
    pub fn add_shape(&mut self, shape: Shape) {
        let _ = self.shapes.insert(shape.id().clone(), shape);
    }

    /// Remove the shape with `shape_id`, if present.
    pub fn remove_shape(&mut self, shape_id: &ShapeID) -> Option<Shape> {
        self.shapes.remove(shape_id)
    }

    /// The number of shapes in this model.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// `true` if this model has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate over shapes in unspecified (hash-map) order. Prefer
    /// [`Model::shapes_sorted`] for anything user-visible.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Iterate over shapes sorted by shape ID — the only iteration order
    /// that may be exposed to a caller.
    pub fn shapes_sorted(&self) -> Vec<&Shape> {
        let mut v: Vec<&Shape> = self.shapes.values().collect();
        v.sort_by(|a, b| a.id().cmp(b.id()));
        v
    }

    /// Shape IDs in this model, sorted.
    pub fn shape_ids_sorted(&self) -> Vec<&ShapeID> {
        let mut v: Vec<&ShapeID> = self.shapes.keys().collect();
        v.sort();
        v
    }

    /// This model's metadata object (merged `metadata` statements / AST
    /// `metadata` object).
    pub fn metadata(&self) -> &crate::node::NodeObject {
        &self.metadata
    }

    /// Mutable access to this model's metadata object, used by the
    /// loader to merge per-file metadata.
    pub fn metadata_mut(&mut self) -> &mut crate::node::NodeObject {
        &mut self.metadata
    }

    // ---------------------------------------------------------------------------------------
    // Derived indexes (computed on demand; spec calls these "lazily computed" — here they are
    // plain on-demand computations over the shape map rather than a cached field, since the
    // model is immutable from a caller's perspective for the lifetime of any one computation).
    // ---------------------------------------------------------------------------------------

    /// The shape IDs directly referenced by `shape_id` (the forward
    /// neighbor index).
    pub fn neighbors(&self, shape_id: &ShapeID) -> Vec<ShapeID> {
        match self.shape(shape_id) {
            Some(shape) => shape.all_referenced_shapes().into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// The shape IDs that directly reference `shape_id` (the reverse
    /// neighbor index).
    pub fn reverse_neighbors(&self, shape_id: &ShapeID) -> Vec<ShapeID> {
        self.shapes
            .values()
            .filter(|s| s.all_referenced_shapes().contains(shape_id))
            .map(|s| s.id().clone())
            .collect()
    }

    /// Shapes reachable from `shape_id` by following neighbor edges,
    /// including `shape_id` itself. Used by `removeUnreferencedShapes`
    /// and recursive selector neighbors.
    pub fn closure(&self, shape_id: &ShapeID) -> std::collections::HashSet<ShapeID> {
        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![shape_id.clone()];
        while let Some(id) = stack.pop() {
            if seen.insert(id.clone()) {
                stack.extend(self.neighbors(&id));
            }
        }
        seen
    }

    /// All shapes of kind `operation`.
    pub fn operations(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .values()
            .filter(|s| matches!(s.kind(), ShapeKind::Operation(_)))
    }

    /// All shapes of kind `resource`.
    pub fn resources(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .values()
            .filter(|s| matches!(s.kind(), ShapeKind::Resource(_)))
    }

    /// All shapes of kind `service`.
    pub fn services(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .values()
            .filter(|s| matches!(s.kind(), ShapeKind::Service(_)))
    }

    /// Operations annotated `@paginated` (directly or via an applied
    /// trait).
    pub fn paginated_operations<'a>(&'a self, paginated_trait: &'a ShapeID) -> impl Iterator<Item = &'a Shape> + 'a {
        self.operations().filter(move |s| s.has_trait(paginated_trait))
    }
}
