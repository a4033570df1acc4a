/*!
Identity types: `Identifier`, `Namespace`, and `ShapeID`.

A shape ID is a triple `(namespace, name, member?)` with textual form
`namespace#name` or `namespace#name$member`.

Unlike some Smithy implementations, equality here is always exactly
case-sensitive; case-insensitive uniqueness (service closures have
case-insensitively unique simple names) is a single, narrowly scoped
concern of the service-closure validator
(`smithy_validate::builtins::service_closure`), not a property of
identifier equality itself. Folding case-insensitivity into `Eq`/`Hash`
would make every `HashMap<ShapeID, _>` silently merge distinct shapes.
*/

use crate::error::{Error, ErrorKind, Result};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A single dotted-identifier-free name component: `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

/// A non-empty, dot-separated sequence of `Identifier`s, e.g. `smithy.example`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

/// A canonical shape identifier: `namespace#name[$member]`.
///
/// ```abnf
/// com.foo.baz#ShapeName$memberName
/// \_________/ \_______/ \________/
///      |          |          |
///  Namespace  Shape name  Member name
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeID {
    namespace: Namespace,
    shape_name: Identifier,
    member_name: Option<Identifier>,
}

// ------------------------------------------------------------------------------------------------
// Implementations — Identifier
// ------------------------------------------------------------------------------------------------

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ErrorKind::InvalidShapeID(s.to_string()).into())
        }
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Identifier {
    /// `true` if `s` matches the identifier grammar: first code point a
    /// letter or `_`, subsequent code points letters, digits, or `_`.
    pub fn is_valid(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || c == '_')
    }

    /// The textual form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — Namespace
// ------------------------------------------------------------------------------------------------

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ErrorKind::InvalidShapeID(s.to_string()).into())
        }
    }
}

impl Namespace {
    /// `true` if every dot-separated component of `s` is a valid `Identifier`.
    pub fn is_valid(s: &str) -> bool {
        !s.is_empty() && s.split('.').all(Identifier::is_valid)
    }

    /// The textual form of the namespace.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The prelude namespace, `smithy.api`.
    pub fn prelude() -> Self {
        Self("smithy.api".to_string())
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — ShapeID
// ------------------------------------------------------------------------------------------------

impl Display for ShapeID {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.namespace, self.shape_name)?;
        if let Some(member_name) = &self.member_name {
            write!(f, "${}", member_name)?;
        }
        Ok(())
    }
}

impl FromStr for ShapeID {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (head, member_name) = match s.split_once('$') {
            Some((h, m)) => (h, Some(Identifier::from_str(m)?)),
            None => (s, None),
        };
        let (namespace, shape_name) = match head.split_once('#') {
            Some((ns, name)) => (Namespace::from_str(ns)?, Identifier::from_str(name)?),
            None => return Err(ErrorKind::InvalidShapeID(s.to_string()).into()),
        };
        Ok(Self {
            namespace,
            shape_name,
            member_name,
        })
    }
}

impl ShapeID {
    /// Construct a new, non-member, shape ID.
    pub fn new(namespace: Namespace, shape_name: Identifier) -> Self {
        Self {
            namespace,
            shape_name,
            member_name: None,
        }
    }

    /// Return a new `ShapeID` that addresses `member_name` within this shape.
    pub fn to_member(&self, member_name: Identifier) -> Self {
        Self {
            namespace: self.namespace.clone(),
            shape_name: self.shape_name.clone(),
            member_name: Some(member_name),
        }
    }

    /// Return the shape-level ID, dropping any member component.
    pub fn to_shape_id(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            shape_name: self.shape_name.clone(),
            member_name: None,
        }
    }

    /// The namespace component.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The shape-name component.
    pub fn shape_name(&self) -> &Identifier {
        &self.shape_name
    }

    /// The optional member-name component.
    pub fn member_name(&self) -> Option<&Identifier> {
        self.member_name.as_ref()
    }

    /// `true` if this ID addresses a member (has a `$member` part).
    pub fn is_member(&self) -> bool {
        self.member_name.is_some()
    }

    /// The case-insensitive "simple name" used by the service-closure
    /// uniqueness check: the shape name, lower-cased.
    pub fn case_insensitive_simple_name(&self) -> String {
        self.shape_name.as_str().to_lowercase()
    }
}
