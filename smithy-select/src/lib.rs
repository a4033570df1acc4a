/*!
Smithy selector expressions: a small query language over a [`Model`]'s
shape graph, built the same way `smithy-idl` builds the IDL grammar — a
`pest` grammar ([`parser`]) producing an AST ([`ast`]), evaluated by
[`eval::select`] against a resolved model.

# Example

```no_run
use smithy_select::Selector;

let selector = Selector::parse("operation [@readonly] > structure").unwrap();
# let model = smithy_core::model::Model::new();
let matches = selector.select(&model);
```

Neighbor traversal follows [`Model::neighbors`]/[`Model::reverse_neighbors`]/
[`Model::closure`], which jump straight from an aggregate shape to its
members' *targets* — there is no separate traversable node for a
member itself, so a selector component can match `structure`, `string`,
`list`, and so on, but never `member`.
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
extern crate pest_derive;

pub mod ast;
mod eval;
mod parser;

use smithy_core::error::Result;
use smithy_core::identity::ShapeID;
use smithy_core::model::Model;
use std::collections::HashSet;

/// A parsed, ready-to-evaluate selector expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    list: ast::SelectorList,
}

impl Selector {
    /// Parse `text` into a `Selector`, or `SelectorParse`/`SelectorUnknownFunction`
    /// on malformed input.
    pub fn parse(text: &str) -> Result<Self> {
        let list = parser::parse_selector(text)?;
        validate_functions(&list)?;
        Ok(Self { list })
    }

    /// Evaluate this selector against `model`, returning every matching shape ID.
    pub fn select(&self, model: &Model) -> HashSet<ShapeID> {
        eval::select(model, &self.list)
    }
}

const KNOWN_FUNCTIONS: &[&str] = &["root", "not", "is", "each", "in", "test"];

fn validate_functions(list: &ast::SelectorList) -> Result<()> {
    validate_component(&list.first)?;
    for (_, component) in &list.rest {
        validate_component(component)?;
    }
    Ok(())
}

fn validate_component(component: &ast::Component) -> Result<()> {
    if let ast::Component::Function { name, args } = component {
        if !KNOWN_FUNCTIONS.contains(&name.as_str()) {
            return Err(smithy_core::error::ErrorKind::SelectorUnknownFunction(name.clone()).into());
        }
        for arg in args {
            validate_functions(arg)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_function_is_rejected() {
        let err = Selector::parse(":bogus(structure)").unwrap_err();
        assert!(err.to_string().contains("unknown function"));
    }

    #[test]
    fn selects_all_shapes_with_star() {
        let selector = Selector::parse("*").unwrap();
        let model = Model::new();
        assert!(selector.select(&model).is_empty());
    }
}
