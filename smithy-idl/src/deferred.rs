/*!
The loader's "deferred representation": the result of parsing one IDL
file, before forward references have been resolved
against the merged shape pool. [`smithy_assembler`] consumes these.

A bare identifier (`Date`, `required`) cannot be turned into an absolute
[`ShapeID`] until the whole pool is known — the same namespace might
define it later in this file, another file might define it, or it might
be a prelude shape. [`ShapeRef::Relative`] carries the bare identifier
forward until that point.
*/

use indexmap::IndexMap;
use smithy_core::identity::{Identifier, Namespace, ShapeID};
use smithy_core::node::{Node, SourceLocation};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A shape-ID-shaped reference that may still need namespace resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeRef {
    /// Already namespace-qualified (`namespace#name[$member]`).
    Absolute(ShapeID),
    /// A bare identifier, to be resolved against the declaring file's
    /// namespace, its `use` imports, then the prelude.
    Relative(Identifier),
}

/// One `@trait(value)` application, not yet resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredTrait {
    pub trait_id: ShapeRef,
    pub value: Node,
    pub location: SourceLocation,
}

/// One member of an aggregate/operation/resource/service shape.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredMember {
    pub name: Identifier,
    pub target: ShapeRef,
    pub traits: Vec<DeferredTrait>,
    pub value: Option<Node>,
    pub location: SourceLocation,
}

/// The kind-specific payload of a parsed shape, mirroring
/// `smithy_core::model::shape::ShapeKind` but with unresolved references.
#[derive(Clone, Debug, PartialEq)]
pub enum DeferredKind {
    Simple(smithy_core::model::shape::SimpleKind),
    List { member: DeferredMember },
    Map { key: DeferredMember, value: DeferredMember },
    Structure { members: Vec<DeferredMember> },
    Union { members: Vec<DeferredMember> },
    Enum { members: Vec<DeferredMember> },
    IntEnum { members: Vec<DeferredMember> },
    Operation {
        input: Option<ShapeRef>,
        inline_input: Option<Vec<DeferredMember>>,
        output: Option<ShapeRef>,
        inline_output: Option<Vec<DeferredMember>>,
        errors: Vec<ShapeRef>,
    },
    Resource {
        identifiers: IndexMap<Identifier, ShapeRef>,
        properties: IndexMap<Identifier, ShapeRef>,
        create: Option<ShapeRef>,
        put: Option<ShapeRef>,
        read: Option<ShapeRef>,
        update: Option<ShapeRef>,
        delete: Option<ShapeRef>,
        list: Option<ShapeRef>,
        operations: Vec<ShapeRef>,
        collection_operations: Vec<ShapeRef>,
        resources: Vec<ShapeRef>,
    },
    Service {
        version: Option<String>,
        operations: Vec<ShapeRef>,
        resources: Vec<ShapeRef>,
        errors: Vec<ShapeRef>,
        rename: IndexMap<ShapeRef, Identifier>,
    },
}

/// One parsed, not-yet-resolved shape.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredShape {
    pub name: Identifier,
    pub kind: DeferredKind,
    pub traits: Vec<DeferredTrait>,
    pub mixins: Vec<ShapeRef>,
    pub location: SourceLocation,
}

/// One `apply <id> @trait...` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredApply {
    pub target: ShapeRef,
    pub traits: Vec<DeferredTrait>,
}

/// Everything parsed from one source file or JSON AST document.
#[derive(Clone, Debug, Default)]
pub struct ParsedSource {
    pub idl_version: Option<smithy_core::model::IdlVersion>,
    pub namespace: Option<Namespace>,
    pub uses: Vec<ShapeID>,
    pub metadata: Vec<(String, Node)>,
    pub shapes: Vec<DeferredShape>,
    pub applies: Vec<DeferredApply>,
    pub file: Option<String>,
}

impl ShapeRef {
    /// The source text that would reproduce this reference, useful for
    /// diagnostics before resolution has happened.
    pub fn display_text(&self) -> String {
        match self {
            ShapeRef::Absolute(id) => id.to_string(),
            ShapeRef::Relative(id) => id.to_string(),
        }
    }
}
