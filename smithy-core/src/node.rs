/*!
The `Node` tree: an untyped, source-located JSON-like value.

A `Node` is the common carrier for trait payloads, IDL/AST literal
values, and metadata.
Every `Node` is immutable once constructed and carries a
[`SourceLocation`]. Numbers preserve the integer/fractional distinction
and arbitrary precision (so that `1e400` and `0.1` round-trip losslessly)
by keeping both the original text and a parsed [`bigdecimal::BigDecimal`].
*/

use crate::error::{ErrorKind, Result};
use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// Where a `Node` (or other model element) came from, for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default, Hash)]
pub struct SourceLocation {
    /// The source file, if the node came from a file (vs. being built in memory).
    pub file: Option<String>,
    /// 1-based line number, 0 if unknown.
    pub line: u32,
    /// 1-based column number, 0 if unknown.
    pub column: u32,
}

/// An arbitrary-precision number, preserving whether it was written as an
/// integer or a fractional/exponential literal.
#[derive(Clone, Debug)]
pub struct NodeNumber {
    text: String,
    value: BigDecimal,
    is_integer: bool,
}

/// An ordered mapping of string keys to `Node` values. Declaration order
/// is preserved because trait authors rely on it for deterministic
/// serialization.
pub type NodeObject = IndexMap<String, Node>;

/// The untyped value tree used throughout the model.
#[derive(Clone, Debug)]
pub enum Node {
    /// `null`
    Null(SourceLocation),
    /// `true` / `false`
    Bool(bool, SourceLocation),
    /// An arbitrary precision number.
    Number(NodeNumber, SourceLocation),
    /// A quoted or text-block string.
    String(String, SourceLocation),
    /// An ordered sequence of nodes.
    Array(Vec<Node>, SourceLocation),
    /// An ordered mapping of string keys to nodes.
    Object(NodeObject, SourceLocation),
}

// ------------------------------------------------------------------------------------------------
// Implementations — SourceLocation
// ------------------------------------------------------------------------------------------------

impl SourceLocation {
    /// A location with no known file/line/column.
    pub fn none() -> Self {
        Self::default()
    }

    /// Construct a location for `file` at `line`:`column`.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "<unknown>"),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — NodeNumber
// ------------------------------------------------------------------------------------------------

impl NodeNumber {
    /// Parse `text` (in JSON number syntax) preserving full precision.
    pub fn parse(text: &str) -> Result<Self> {
        let value = BigDecimal::from_str(text)
            .map_err(|_| ErrorKind::InvalidNumber(text.to_string()))?;
        let is_integer = !text.contains(['.', 'e', 'E']);
        Ok(Self {
            text: text.to_string(),
            value,
            is_integer,
        })
    }

    /// Construct from an `i64`.
    pub fn from_i64(n: i64) -> Self {
        Self {
            text: n.to_string(),
            value: BigDecimal::from(n),
            is_integer: true,
        }
    }

    /// Construct from an `f64`.
    pub fn from_f64(n: f64) -> Self {
        let text = n.to_string();
        let is_integer = !text.contains(['.', 'e', 'E']);
        Self {
            text: text.clone(),
            value: BigDecimal::from_str(&text).unwrap_or_else(|_| BigDecimal::from(0)),
            is_integer,
        }
    }

    /// The original textual representation.
    pub fn as_text(&self) -> &str {
        &self.text
    }

    /// The exact value.
    pub fn value(&self) -> &BigDecimal {
        &self.value
    }

    /// `true` if the literal had no `.`, `e`, or `E` (an integer literal).
    pub fn is_integer(&self) -> bool {
        self.is_integer
    }

    /// Best-effort narrowing to `i64` (lossy for out-of-range/fractional values).
    pub fn to_i64(&self) -> Option<i64> {
        use bigdecimal::ToPrimitive;
        self.value.to_i64()
    }

    /// Best-effort narrowing to `f64`.
    pub fn to_f64(&self) -> Option<f64> {
        use bigdecimal::ToPrimitive;
        self.value.to_f64()
    }
}

impl PartialEq for NodeNumber {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.is_integer == other.is_integer
    }
}

impl Display for NodeNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — Node
// ------------------------------------------------------------------------------------------------

impl PartialEq for Node {
    /// Deep structural equality, ignoring `SourceLocation`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null(_), Node::Null(_)) => true,
            (Node::Bool(a, _), Node::Bool(b, _)) => a == b,
            (Node::Number(a, _), Node::Number(b, _)) => a == b,
            (Node::String(a, _), Node::String(b, _)) => a == b,
            (Node::Array(a, _), Node::Array(b, _)) => a == b,
            (Node::Object(a, _), Node::Object(b, _)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            _ => false,
        }
    }
}

impl Node {
    /// `true` for an empty object `{}`, which is the canonical payload
    /// for an annotation trait.
    pub fn is_empty_object(&self) -> bool {
        matches!(self, Node::Object(m, _) if m.is_empty())
    }

    /// This node's source location.
    pub fn source_location(&self) -> &SourceLocation {
        match self {
            Node::Null(l)
            | Node::Bool(_, l)
            | Node::Number(_, l)
            | Node::String(_, l)
            | Node::Array(_, l)
            | Node::Object(_, l) => l,
        }
    }

    /// A human-readable type name, used in `NODE_TYPE_MISMATCH` diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null(_) => "null",
            Node::Bool(_, _) => "boolean",
            Node::Number(_, _) => "number",
            Node::String(_, _) => "string",
            Node::Array(_, _) => "array",
            Node::Object(_, _) => "object",
        }
    }

    /// Construct a `null` node with no source location.
    pub fn null() -> Self {
        Node::Null(SourceLocation::none())
    }

    /// Construct a boolean node with no source location.
    pub fn bool(v: bool) -> Self {
        Node::Bool(v, SourceLocation::none())
    }

    /// Construct a string node with no source location.
    pub fn string(v: impl Into<String>) -> Self {
        Node::String(v.into(), SourceLocation::none())
    }

    /// Construct an integer node with no source location.
    pub fn integer(v: i64) -> Self {
        Node::Number(NodeNumber::from_i64(v), SourceLocation::none())
    }

    /// Construct an empty object node, the canonical annotation-trait value.
    pub fn empty_object() -> Self {
        Node::Object(NodeObject::new(), SourceLocation::none())
    }

    /// Construct an object node with no source location.
    pub fn object(fields: NodeObject) -> Self {
        Node::Object(fields, SourceLocation::none())
    }

    /// Construct an array node with no source location.
    pub fn array(items: Vec<Node>) -> Self {
        Node::Array(items, SourceLocation::none())
    }

    /// Get as `&str`, or `NODE_TYPE_MISMATCH`.
    pub fn as_string(&self) -> Result<&str> {
        match self {
            Node::String(s, _) => Ok(s),
            other => Err(ErrorKind::InvalidNodeVariant(other.type_name().to_string()).into()),
        }
    }

    /// Get as `bool`, or `NODE_TYPE_MISMATCH`.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Node::Bool(b, _) => Ok(*b),
            other => Err(ErrorKind::InvalidNodeVariant(other.type_name().to_string()).into()),
        }
    }

    /// Get as `&NodeNumber`, or `NODE_TYPE_MISMATCH`.
    pub fn as_number(&self) -> Result<&NodeNumber> {
        match self {
            Node::Number(n, _) => Ok(n),
            other => Err(ErrorKind::InvalidNodeVariant(other.type_name().to_string()).into()),
        }
    }

    /// Get as `&[Node]`, or `NODE_TYPE_MISMATCH`.
    pub fn as_array(&self) -> Result<&[Node]> {
        match self {
            Node::Array(a, _) => Ok(a),
            other => Err(ErrorKind::InvalidNodeVariant(other.type_name().to_string()).into()),
        }
    }

    /// Get as `&NodeObject`, or `NODE_TYPE_MISMATCH`.
    pub fn as_object(&self) -> Result<&NodeObject> {
        match self {
            Node::Object(o, _) => Ok(o),
            other => Err(ErrorKind::InvalidNodeVariant(other.type_name().to_string()).into()),
        }
    }

    /// Field lookup on an `Object`, preserving declaration order for
    /// iteration; returns `None` for non-objects or missing keys.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(o, _) => o.get(key),
            _ => None,
        }
    }
}

impl Display for Node {
    /// Render as JSON text.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null(_) => write!(f, "null"),
            Node::Bool(b, _) => write!(f, "{}", b),
            Node::Number(n, _) => write!(f, "{}", n),
            Node::String(s, _) => write!(f, "{}", json_quote(s)),
            Node::Array(items, _) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Node::Object(fields, _) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", json_quote(k), v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn json_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
