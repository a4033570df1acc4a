//! Turns `pest`'s parse tree for `selector.pest` into [`crate::ast`] values.

use crate::ast::{AttributeKey, Combinator, Comparator, Component, SelectorList};
use pest::iterators::Pair;
use pest::Parser;
use smithy_core::error::{ErrorKind, Result};
use smithy_core::identity::{Namespace, ShapeID};
use smithy_core::prelude::PRELUDE_NAMESPACE;
use std::str::FromStr;

#[derive(Parser)]
#[grammar = "selector.pest"]
struct SelectorParser;

/// Parse a selector expression into a [`SelectorList`].
pub fn parse_selector(text: &str) -> Result<SelectorList> {
    let mut pairs = SelectorParser::parse(Rule::selector, text)
        .map_err(|e| ErrorKind::SelectorParse(e.to_string()))?;
    let selector = pairs.next().unwrap();
    let list = selector
        .into_inner()
        .find(|p| p.as_rule() == Rule::selector_list)
        .unwrap();
    parse_selector_list(list)
}

fn parse_selector_list(pair: Pair<'_, Rule>) -> Result<SelectorList> {
    let mut inner = pair.into_inner();
    let first = parse_component(inner.next().unwrap())?;
    let mut rest = Vec::new();
    while let Some(combinator_pair) = inner.next() {
        let combinator = parse_combinator(combinator_pair);
        let component = parse_component(inner.next().unwrap())?;
        rest.push((combinator, component));
    }
    Ok(SelectorList { first, rest })
}

fn parse_combinator(pair: Pair<'_, Rule>) -> Combinator {
    match pair.as_str() {
        ">" => Combinator::Direct,
        "<" => Combinator::Reverse,
        "~>" => Combinator::AnyDepth,
        _ => {
            // relationship_combinator: "-[" ~ ident ~ "]->"
            let name = pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::ident)
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            Combinator::Typed(name)
        }
    }
}

fn parse_component(pair: Pair<'_, Rule>) -> Result<Component> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::shape_type_selector => Ok(Component::ShapeType(inner.as_str().to_string())),
        Rule::attribute_selector => parse_attribute_selector(inner),
        Rule::function_selector => parse_function_selector(inner),
        other => Err(ErrorKind::SelectorParse(format!("unexpected selector component: {:?}", other)).into()),
    }
}

fn parse_attribute_selector(pair: Pair<'_, Rule>) -> Result<Component> {
    let mut inner = pair.into_inner();
    let key_pair = inner.next().unwrap();
    let key = parse_attribute_key(key_pair)?;
    let test = match (inner.next(), inner.next()) {
        (Some(cmp), Some(value)) => {
            let raw = cmp.as_str();
            let case_insensitive = raw.ends_with('i') && raw != "i";
            let symbol = if case_insensitive { &raw[..raw.len() - 1] } else { raw };
            let comparator = match symbol {
                "?=" => Comparator::Exists,
                "!=" => Comparator::NotEquals,
                "^=" => Comparator::StartsWith,
                "$=" => Comparator::EndsWith,
                "*=" => Comparator::Contains,
                ">=" => Comparator::GreaterOrEqual,
                "<=" => Comparator::LessOrEqual,
                ">" => Comparator::GreaterThan,
                "<" => Comparator::LessThan,
                _ => Comparator::Equals,
            };
            Some((comparator, unquote(value.as_str()), case_insensitive))
        }
        _ => None,
    };
    Ok(Component::Attribute { key, test })
}

fn parse_attribute_key(pair: Pair<'_, Rule>) -> Result<AttributeKey> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::trait_key => {
            let text = inner.as_str();
            let ident = text
                .strip_prefix("trait|")
                .or_else(|| text.strip_prefix('@'))
                .unwrap_or(text);
            Ok(AttributeKey::Trait(trait_id_from_ident(ident)?))
        }
        Rule::id_key => match inner.as_str() {
            "id|namespace" => Ok(AttributeKey::IdNamespace),
            "id|name" => Ok(AttributeKey::IdName),
            "id|member" => Ok(AttributeKey::IdMember),
            _ => Ok(AttributeKey::Id),
        },
        other => Err(ErrorKind::SelectorParse(format!("unexpected attribute key: {:?}", other)).into()),
    }
}

fn parse_function_selector(pair: Pair<'_, Rule>) -> Result<Component> {
    let mut inner = pair.into_inner();
    let name = inner.next().unwrap().as_str().to_string();
    let args = inner.map(parse_selector_list).collect::<Result<Vec<_>>>()?;
    Ok(Component::Function { name, args })
}

fn trait_id_from_ident(ident: &str) -> Result<ShapeID> {
    if ident.contains('#') {
        ShapeID::from_str(ident)
    } else {
        let name = ident
            .parse()
            .map_err(|_| ErrorKind::SelectorParse(format!("invalid trait name: {}", ident)))?;
        Ok(ShapeID::new(Namespace::from_str(PRELUDE_NAMESPACE).unwrap(), name))
    }
}

fn unquote(s: &str) -> String {
    s.trim_matches('\'').to_string()
}
