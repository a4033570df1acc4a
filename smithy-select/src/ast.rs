//! The parsed selector AST, independent of the `pest` grammar that
//! produces it.

use smithy_core::identity::ShapeID;

#[derive(Clone, Debug, PartialEq)]
pub struct SelectorList {
    pub first: Component,
    pub rest: Vec<(Combinator, Component)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Combinator {
    /// `>`: a direct neighbor.
    Direct,
    /// `~>`: any shape reachable by one or more neighbor edges.
    AnyDepth,
    /// `<`: a direct reverse neighbor (something that references the
    /// current shape).
    Reverse,
    /// `-[name]->`: a direct neighbor, tagged with a relationship name.
    /// The name is carried through for readability but not used to
    /// discriminate the edge — the underlying model does not record a
    /// relationship kind per neighbor, only the target shape ID.
    Typed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// A shape-kind keyword, or `*` for any shape.
    ShapeType(String),
    /// An `[attribute]` test against a trait or the shape ID itself.
    Attribute {
        key: AttributeKey,
        /// Comparator, right-hand side text, and whether it was
        /// `i`-suffixed for a case-insensitive string compare.
        test: Option<(Comparator, String, bool)>,
    },
    /// `:name(arg, arg, ...)`.
    Function { name: String, args: Vec<SelectorList> },
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeKey {
    /// `[trait|<id>]` or the `[@<id>]` shorthand.
    Trait(ShapeID),
    /// `[id]`: the shape's own full ID.
    Id,
    /// `[id|namespace]`.
    IdNamespace,
    /// `[id|name]`.
    IdName,
    /// `[id|member]`.
    IdMember,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparator {
    /// `?=`: existence test, independent of the right-hand side's text.
    Exists,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
    Contains,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}
