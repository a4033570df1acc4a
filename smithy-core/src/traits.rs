/*!
Traits: typed annotations attached to shapes.

A [`Trait`] is an immutable pair `(id, value)`. Construction from a
[`Node`] is performed by a registered factory keyed on the trait's
`ShapeID`, expressed here as a plain dispatch table
([`TraitFactoryRegistry`]) rather than a process-wide singleton: a
loader carries its own registry instance.
*/

use crate::identity::ShapeID;
use crate::node::Node;
use std::collections::HashMap;
use std::fmt::Debug;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A typed annotation attached to a shape or member.
#[derive(Clone, Debug, PartialEq)]
pub struct Trait {
    id: ShapeID,
    value: Node,
}

/// An ordered mapping of trait ID to `Trait`, preserving application order.
pub type TraitMap = indexmap::IndexMap<ShapeID, Trait>;

/// A constructor `Node -> Trait`, registered against a trait's `ShapeID`.
/// Returning `Err` signals `TRAIT_CONSTRUCTION_FAILED` to the loader,
/// which converts it into an `ERROR` event rather than letting it
/// escape as a panic or exception.
pub type TraitFactory = fn(ShapeID, Node) -> Result<Trait, String>;

/// An open, value-carried registry mapping trait ID to its factory.
/// Unknown trait IDs fall back to [`dynamic_trait`], selectable by the
/// caller as either an `ERROR` or (lenient mode) a tolerated dynamic
/// trait.
#[derive(Clone, Default)]
pub struct TraitFactoryRegistry {
    factories: HashMap<ShapeID, TraitFactory>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Trait {
    /// Construct a trait directly, bypassing factory validation. Used by
    /// builders and by the prelude's own bootstrap traits.
    pub fn new(id: ShapeID, value: Node) -> Self {
        Self { id, value }
    }

    /// Construct an annotation trait (empty-object payload).
    pub fn annotation(id: ShapeID) -> Self {
        Self::new(id, Node::empty_object())
    }

    /// The trait's shape ID.
    pub fn id(&self) -> &ShapeID {
        &self.id
    }

    /// The trait's value.
    pub fn value(&self) -> &Node {
        &self.value
    }
}

impl Debug for TraitFactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraitFactoryRegistry")
            .field("known", &self.factories.len())
            .finish()
    }
}

impl TraitFactoryRegistry {
    /// Register `factory` for `id`, replacing any prior registration.
    pub fn register(&mut self, id: ShapeID, factory: TraitFactory) {
        let _ = self.factories.insert(id, factory);
    }

    /// `true` if a factory is registered for `id`.
    pub fn is_known(&self, id: &ShapeID) -> bool {
        self.factories.contains_key(id)
    }

    /// Construct a `Trait` for `id` from `value`, using the registered
    /// factory if one exists, else [`dynamic_trait`].
    pub fn construct(&self, id: ShapeID, value: Node) -> Result<Trait, String> {
        match self.factories.get(&id) {
            Some(factory) => factory(id, value),
            None => Ok(dynamic_trait(id, value)),
        }
    }
}

/// The fallback factory for unknown trait IDs in lenient loader mode: the
/// raw `Node` is carried through unchanged.
pub fn dynamic_trait(id: ShapeID, value: Node) -> Trait {
    Trait::new(id, value)
}
