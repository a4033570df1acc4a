/*!
`Shape`: a node in the model graph. A `Shape` carries its ID, a `mixin`
list, a `source_location`, a `traits` map, and a `ShapeKind`-specific
payload. Aggregate and service shapes reference other shapes by
`ShapeID`, never by pointer: this is what lets a transformed `Model`
share unchanged `Shape` values with its predecessor with no lifetime
entanglement.
*/

use crate::identity::{Identifier, ShapeID};
use crate::node::{Node, SourceLocation};
use crate::traits::{Trait, TraitMap};
use indexmap::{IndexMap, IndexSet};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A member of an aggregate or service shape: its own `ShapeID` (with a
/// `$member` part), a `target` shape ID, traits, and a source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    id: ShapeID,
    target: ShapeID,
    traits: TraitMap,
    source_location: SourceLocation,
}

/// Ordered members of an aggregate shape, keyed by member name.
pub type Members = IndexMap<Identifier, Member>;

/// The simple (scalar) shape kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    Blob,
    Boolean,
    String,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Timestamp,
    Document,
}

/// An operation's declared identifiers: input, output, and error shapes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OperationShape {
    pub input: Option<ShapeID>,
    pub output: Option<ShapeID>,
    pub errors: Vec<ShapeID>,
}

/// A resource's identifier bindings, property bindings, lifecycle
/// operations, and sub-resources.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceShape {
    pub identifiers: IndexMap<Identifier, ShapeID>,
    pub properties: IndexMap<Identifier, ShapeID>,
    pub create: Option<ShapeID>,
    pub put: Option<ShapeID>,
    pub read: Option<ShapeID>,
    pub update: Option<ShapeID>,
    pub delete: Option<ShapeID>,
    pub list: Option<ShapeID>,
    pub operations: Vec<ShapeID>,
    pub collection_operations: Vec<ShapeID>,
    pub resources: Vec<ShapeID>,
}

/// A service's version, operation/resource/error closure, and rename map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceShape {
    pub version: Option<String>,
    pub operations: Vec<ShapeID>,
    pub resources: Vec<ShapeID>,
    pub errors: Vec<ShapeID>,
    /// Maps a conflicting shape ID's absolute form to the disambiguated
    /// simple name used within this service's closure.
    pub rename: IndexMap<ShapeID, Identifier>,
}

/// An enum member's literal value: a string for `enum`, an integer for `intEnum`.
#[derive(Clone, Debug, PartialEq)]
pub enum EnumValue {
    String(String),
    Integer(i64),
}

/// The shape-kind-specific payload of a `Shape`.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Simple(SimpleKind),
    List { member: Member },
    Map { key: Member, value: Member },
    Structure { members: Members },
    Union { members: Members },
    Enum { members: IndexMap<Identifier, (Member, EnumValue)> },
    IntEnum { members: IndexMap<Identifier, (Member, EnumValue)> },
    Operation(OperationShape),
    Resource(ResourceShape),
    Service(ServiceShape),
}

/// A node in the model graph: ID, traits, mixins, source location, and a
/// kind-specific payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    id: ShapeID,
    kind: ShapeKind,
    traits: TraitMap,
    mixins: Vec<ShapeID>,
    source_location: SourceLocation,
}

// ------------------------------------------------------------------------------------------------
// Implementations — Member
// ------------------------------------------------------------------------------------------------

impl Member {
    /// Construct a member `id` (already carrying its `$member` part)
    /// targeting `target`.
    pub fn new(id: ShapeID, target: ShapeID) -> Self {
        Self {
            id,
            target,
            traits: TraitMap::new(),
            source_location: SourceLocation::none(),
        }
    }

    /// The member's own shape ID.
    pub fn id(&self) -> &ShapeID {
        &self.id
    }

    /// The shape ID this member targets.
    pub fn target(&self) -> &ShapeID {
        &self.target
    }

    /// Mutable access to the shape ID this member targets, for
    /// transforms that rewrite references (e.g. `renameShapes`).
    pub fn target_mut(&mut self) -> &mut ShapeID {
        &mut self.target
    }

    /// This member's traits.
    pub fn traits(&self) -> &TraitMap {
        &self.traits
    }

    /// `true` if `trait_id` is applied to this member.
    pub fn has_trait(&self, trait_id: &ShapeID) -> bool {
        self.traits.contains_key(trait_id)
    }

    /// Add (or replace) a trait application.
    pub fn add_trait(&mut self, a_trait: Trait) {
        let _ = self.traits.insert(a_trait.id().clone(), a_trait);
    }

    /// This member's source location.
    pub fn source_location(&self) -> &SourceLocation {
        &self.source_location
    }

    /// Set this member's source location.
    pub fn set_source_location(&mut self, location: SourceLocation) {
        self.source_location = location;
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — SimpleKind
// ------------------------------------------------------------------------------------------------

impl SimpleKind {
    /// The lower-camel-case name used in the JSON AST `type` field and IDL shape keyword.
    pub fn type_name(&self) -> &'static str {
        match self {
            SimpleKind::Blob => "blob",
            SimpleKind::Boolean => "boolean",
            SimpleKind::String => "string",
            SimpleKind::Byte => "byte",
            SimpleKind::Short => "short",
            SimpleKind::Integer => "integer",
            SimpleKind::Long => "long",
            SimpleKind::Float => "float",
            SimpleKind::Double => "double",
            SimpleKind::BigInteger => "bigInteger",
            SimpleKind::BigDecimal => "bigDecimal",
            SimpleKind::Timestamp => "timestamp",
            SimpleKind::Document => "document",
        }
    }

    /// Parse a `type_name` back into a `SimpleKind`.
    pub fn from_type_name(s: &str) -> Option<Self> {
        Some(match s {
            "blob" => SimpleKind::Blob,
            "boolean" => SimpleKind::Boolean,
            "string" => SimpleKind::String,
            "byte" => SimpleKind::Byte,
            "short" => SimpleKind::Short,
            "integer" => SimpleKind::Integer,
            "long" => SimpleKind::Long,
            "float" => SimpleKind::Float,
            "double" => SimpleKind::Double,
            "bigInteger" => SimpleKind::BigInteger,
            "bigDecimal" => SimpleKind::BigDecimal,
            "timestamp" => SimpleKind::Timestamp,
            "document" => SimpleKind::Document,
            _ => return None,
        })
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — ShapeKind
// ------------------------------------------------------------------------------------------------

impl ShapeKind {
    /// The kind name as used in IDL shape statements / JSON AST `type`.
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Simple(s) => s.type_name(),
            ShapeKind::List { .. } => "list",
            ShapeKind::Map { .. } => "map",
            ShapeKind::Structure { .. } => "structure",
            ShapeKind::Union { .. } => "union",
            ShapeKind::Enum { .. } => "enum",
            ShapeKind::IntEnum { .. } => "intEnum",
            ShapeKind::Operation(_) => "operation",
            ShapeKind::Resource(_) => "resource",
            ShapeKind::Service(_) => "service",
        }
    }

    /// `true` if this shape kind may carry mixins and own members that
    /// participate in recursion (structure/union/list/map), i.e. is an
    /// aggregate "box".
    pub fn is_recursion_boundary(&self) -> bool {
        matches!(
            self,
            ShapeKind::List { .. }
                | ShapeKind::Map { .. }
                | ShapeKind::Structure { .. }
                | ShapeKind::Union { .. }
        )
    }

    /// `true` for `enum`/`intEnum`, which can never be a recursion point.
    pub fn is_enum(&self) -> bool {
        matches!(self, ShapeKind::Enum { .. } | ShapeKind::IntEnum { .. })
    }

    /// Iterate over this shape's direct member targets (for neighbor
    /// computation and reference resolution); does not include
    /// operation/resource/service shape-ID references, see
    /// [`Shape::all_referenced_shapes`].
    pub fn member_targets(&self) -> Vec<&ShapeID> {
        match self {
            ShapeKind::Simple(_) => vec![],
            ShapeKind::List { member } => vec![member.target()],
            ShapeKind::Map { key, value } => vec![key.target(), value.target()],
            ShapeKind::Structure { members } | ShapeKind::Union { members } => {
                members.values().map(Member::target).collect()
            }
            ShapeKind::Enum { members } | ShapeKind::IntEnum { members } => {
                members.values().map(|(m, _)| m.target()).collect()
            }
            ShapeKind::Operation(_) | ShapeKind::Resource(_) | ShapeKind::Service(_) => vec![],
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — Shape
// ------------------------------------------------------------------------------------------------

impl Shape {
    /// Construct a new shape with no traits, mixins, or source location.
    pub fn new(id: ShapeID, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            traits: TraitMap::new(),
            mixins: Vec::new(),
            source_location: SourceLocation::none(),
        }
    }

    /// The shape's ID.
    pub fn id(&self) -> &ShapeID {
        &self.id
    }

    /// Change this shape's ID, for transforms that rename shapes
    /// (`renameShapes`, `flattenNamespaces`). Does not rewrite other
    /// shapes' references to the old ID; callers are responsible for
    /// that separately.
    pub fn set_id(&mut self, id: ShapeID) {
        self.id = id;
    }

    /// The shape's kind-specific payload.
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Mutable access to the shape's kind-specific payload.
    pub fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    /// This shape's traits.
    pub fn traits(&self) -> &TraitMap {
        &self.traits
    }

    /// `true` if `trait_id` is applied to this shape.
    pub fn has_trait(&self, trait_id: &ShapeID) -> bool {
        self.traits.contains_key(trait_id)
    }

    /// This shape's trait with `trait_id`, if applied.
    pub fn get_trait(&self, trait_id: &ShapeID) -> Option<&Trait> {
        self.traits.get(trait_id)
    }

    /// Add (or replace) a trait application.
    pub fn add_trait(&mut self, a_trait: Trait) {
        let _ = self.traits.insert(a_trait.id().clone(), a_trait);
    }

    /// Remove a trait application by ID.
    pub fn remove_trait(&mut self, trait_id: &ShapeID) {
        let _ = self.traits.shift_remove(trait_id);
    }

    /// The shapes mixed into this one, in application order.
    pub fn mixins(&self) -> &[ShapeID] {
        &self.mixins
    }

    /// Add a mixin relationship.
    pub fn add_mixin(&mut self, mixin: ShapeID) {
        self.mixins.push(mixin);
    }

    /// This shape's source location.
    pub fn source_location(&self) -> &SourceLocation {
        &self.source_location
    }

    /// Set this shape's source location.
    pub fn set_source_location(&mut self, location: SourceLocation) {
        self.source_location = location;
    }

    /// All shape IDs directly referenced by this shape: member targets,
    /// plus (for service constructs) operation/resource/error/input/
    /// output references. Used to build the neighbor index and drive
    /// `removeUnreferencedShapes`.
    pub fn all_referenced_shapes(&self) -> IndexSet<ShapeID> {
        let mut refs: IndexSet<ShapeID> = self
            .kind
            .member_targets()
            .into_iter()
            .cloned()
            .collect();
        match &self.kind {
            ShapeKind::Operation(op) => {
                refs.extend(op.input.iter().cloned());
                refs.extend(op.output.iter().cloned());
                refs.extend(op.errors.iter().cloned());
            }
            ShapeKind::Resource(r) => {
                refs.extend(r.identifiers.values().cloned());
                refs.extend(r.properties.values().cloned());
                refs.extend(r.create.iter().cloned());
                refs.extend(r.put.iter().cloned());
                refs.extend(r.read.iter().cloned());
                refs.extend(r.update.iter().cloned());
                refs.extend(r.delete.iter().cloned());
                refs.extend(r.list.iter().cloned());
                refs.extend(r.operations.iter().cloned());
                refs.extend(r.collection_operations.iter().cloned());
                refs.extend(r.resources.iter().cloned());
            }
            ShapeKind::Service(s) => {
                refs.extend(s.operations.iter().cloned());
                refs.extend(s.resources.iter().cloned());
                refs.extend(s.errors.iter().cloned());
            }
            _ => {}
        }
        refs.extend(self.mixins.iter().cloned());
        refs
    }
}
