//! Evaluates a parsed selector against a [`Model`], returning the set of
//! shapes it matches.
//!
//! A selector is a chain of components joined by neighbor combinators:
//! the first component's matches seed the result set, and each
//! subsequent `(combinator, component)` pair narrows it to neighbors of
//! the current set (forward, reverse, or any-depth, via
//! [`Model::neighbors`]/[`Model::reverse_neighbors`]/[`Model::closure`])
//! that also satisfy that component. `:not`/`:is`/`:in`/`:each`/`:test`
//! evaluate their arguments independently against the whole model and
//! test membership, rather than truly scoping to the current shape's
//! own sub-selector result — a simplification over the full selector
//! language, noted in this crate's own design notes. `-[name]->` parses
//! a relationship name but, like `>`, simply follows every neighbor
//! edge: the underlying model has no per-edge relationship kind to
//! filter on.

use crate::ast::{AttributeKey, Combinator, Comparator, Component, SelectorList};
use smithy_core::identity::ShapeID;
use smithy_core::model::shape::{Shape, ShapeKind, SimpleKind};
use smithy_core::model::Model;
use std::collections::HashSet;

/// Evaluate `selector` against `model`, returning every shape ID it matches.
pub fn select(model: &Model, selector: &SelectorList) -> HashSet<ShapeID> {
    let mut current: HashSet<ShapeID> = model
        .shapes_sorted()
        .into_iter()
        .filter(|s| matches_component(model, s, &selector.first))
        .map(|s| s.id().clone())
        .collect();

    for (combinator, component) in &selector.rest {
        let mut next = HashSet::new();
        for id in &current {
            let candidates: Vec<ShapeID> = match combinator {
                Combinator::Direct | Combinator::Typed(_) => model.neighbors(id),
                Combinator::Reverse => model.reverse_neighbors(id),
                Combinator::AnyDepth => {
                    let mut closure = model.closure(id);
                    closure.remove(id);
                    closure.into_iter().collect()
                }
            };
            for candidate in candidates {
                if let Some(shape) = model.shape(&candidate) {
                    if matches_component(model, shape, component) {
                        next.insert(candidate);
                    }
                }
            }
        }
        current = next;
    }
    current
}

fn matches_component(model: &Model, shape: &Shape, component: &Component) -> bool {
    match component {
        Component::ShapeType(name) => shape_type_matches(shape.kind(), name),
        Component::Attribute { key, test } => matches_attribute(shape, key, test),
        Component::Function { name, args } => match name.as_str() {
            "root" => model.reverse_neighbors(shape.id()).is_empty(),
            "not" => args.iter().all(|a| !select(model, a).contains(shape.id())),
            "is" | "each" | "in" => args.iter().any(|a| select(model, a).contains(shape.id())),
            "test" => args.iter().all(|a| select(model, a).contains(shape.id())),
            _ => false,
        },
    }
}

fn matches_attribute(shape: &Shape, key: &AttributeKey, test: &Option<(Comparator, String, bool)>) -> bool {
    match key {
        AttributeKey::Trait(trait_id) => match test {
            None => shape.has_trait(trait_id),
            Some((Comparator::Exists, expected, _)) => {
                let present = shape.has_trait(trait_id);
                match expected.as_str() {
                    "false" => !present,
                    _ => present,
                }
            }
            Some((comparator, expected, ci)) => match shape.get_trait(trait_id) {
                Some(t) => {
                    let rendered = t.value().as_string().map(str::to_string).unwrap_or_else(|_| t.value().to_string());
                    compare(&rendered, expected, *comparator, *ci)
                }
                None => false,
            },
        },
        AttributeKey::Id => match test {
            None => true,
            Some((comparator, expected, ci)) => compare(&shape.id().to_string(), expected, *comparator, *ci),
        },
        AttributeKey::IdNamespace => match test {
            None => true,
            Some((comparator, expected, ci)) => compare(&shape.id().namespace().to_string(), expected, *comparator, *ci),
        },
        AttributeKey::IdName => match test {
            None => true,
            Some((comparator, expected, ci)) => compare(shape.id().shape_name().as_ref(), expected, *comparator, *ci),
        },
        AttributeKey::IdMember => match test {
            None => shape.id().is_member(),
            Some((comparator, expected, ci)) => match shape.id().member_name() {
                Some(member) => compare(member.as_ref(), expected, *comparator, *ci),
                None => false,
            },
        },
    }
}

fn compare(actual: &str, expected: &str, comparator: Comparator, case_insensitive: bool) -> bool {
    let (actual_owned, expected_owned);
    let (actual, expected) = if case_insensitive {
        actual_owned = actual.to_lowercase();
        expected_owned = expected.to_lowercase();
        (actual_owned.as_str(), expected_owned.as_str())
    } else {
        (actual, expected)
    };
    match comparator {
        Comparator::Exists => true,
        Comparator::Equals => actual == expected,
        Comparator::NotEquals => actual != expected,
        Comparator::StartsWith => actual.starts_with(expected),
        Comparator::EndsWith => actual.ends_with(expected),
        Comparator::Contains => actual.contains(expected),
        Comparator::GreaterThan => numeric_or_lexical(actual, expected, |a, b| a > b, |a, b| a > b),
        Comparator::GreaterOrEqual => numeric_or_lexical(actual, expected, |a, b| a >= b, |a, b| a >= b),
        Comparator::LessThan => numeric_or_lexical(actual, expected, |a, b| a < b, |a, b| a < b),
        Comparator::LessOrEqual => numeric_or_lexical(actual, expected, |a, b| a <= b, |a, b| a <= b),
    }
}

fn numeric_or_lexical(
    actual: &str,
    expected: &str,
    numeric: impl Fn(f64, f64) -> bool,
    lexical: impl Fn(&str, &str) -> bool,
) -> bool {
    match (actual.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(b)) => numeric(a, b),
        _ => lexical(actual, expected),
    }
}

fn shape_type_matches(kind: &ShapeKind, name: &str) -> bool {
    match name {
        "*" => true,
        "simpleType" => matches!(kind, ShapeKind::Simple(_)),
        "number" => matches!(
            kind,
            ShapeKind::Simple(
                SimpleKind::Byte
                    | SimpleKind::Short
                    | SimpleKind::Integer
                    | SimpleKind::Long
                    | SimpleKind::Float
                    | SimpleKind::Double
                    | SimpleKind::BigInteger
                    | SimpleKind::BigDecimal
            )
        ),
        "collection" => matches!(kind, ShapeKind::List { .. } | ShapeKind::Map { .. }),
        other => kind.type_name() == other,
    }
}
