/*!
Reads and writes the Smithy [JSON AST](https://smithy.io/2.0/spec/json-ast.html)
representation.

Unlike the textual IDL format, JSON AST shape IDs are always absolute, so
[`reader::read_model`] resolves directly into a [`smithy_core::model::Model`]
with no intermediate deferred/forward-reference representation.

# Example

```no_run
use smithy_core::traits::TraitFactoryRegistry;
use smithy_json::read_model;

let registry = TraitFactoryRegistry::default();
let json = r#"{"smithy": "2.0", "shapes": {}}"#;
let (model, events) = read_model(json, &registry).unwrap();
assert!(events.is_empty());
assert!(model.is_empty());
```
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

use serde_json::Value;
use smithy_core::node::{Node, NodeNumber, NodeObject, SourceLocation};
use std::str::FromStr;

/// This crate's result type: de/serialization failures are genuine
/// caller-facing errors, not accumulated model diagnostics.
pub type ModelResult<T> = smithy_core::error::Result<T>;

mod syntax;

#[doc(hidden)]
pub mod io;
pub mod reader;
pub mod writer;

pub use io::{JsonReader, JsonWriter};
pub use reader::read_model;
pub use writer::write_model;

/// Convert a `serde_json::Value` into a `Node`, losing only source
/// location (JSON AST text carries none we track).
pub(crate) fn json_to_node(value: &Value) -> Node {
    match value {
        Value::Null => Node::null(),
        Value::Bool(b) => Node::bool(*b),
        Value::Number(n) => match NodeNumber::parse(&n.to_string()) {
            Ok(number) => Node::Number(number, SourceLocation::none()),
            Err(_) => Node::null(),
        },
        Value::String(s) => Node::string(s.clone()),
        Value::Array(items) => Node::array(items.iter().map(json_to_node).collect()),
        Value::Object(fields) => {
            let mut object = NodeObject::new();
            for (k, v) in fields {
                object.insert(k.clone(), json_to_node(v));
            }
            Node::object(object)
        }
    }
}

/// Convert a `Node` back into a `serde_json::Value`, the inverse of
/// [`json_to_node`].
pub(crate) fn node_to_json(node: &Node) -> Value {
    match node {
        Node::Null(_) => Value::Null,
        Node::Bool(b, _) => Value::Bool(*b),
        Node::Number(n, _) => serde_json::Number::from_str(n.as_text())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Node::String(s, _) => Value::String(s.clone()),
        Node::Array(items, _) => Value::Array(items.iter().map(node_to_json).collect()),
        Node::Object(fields, _) => {
            let mut map = serde_json::Map::new();
            for (k, v) in fields {
                map.insert(k.clone(), node_to_json(v));
            }
            Value::Object(map)
        }
    }
}
