use pretty_assertions::assert_eq;
use smithy_core::identity::{Identifier, Namespace, ShapeID};
use std::str::FromStr;

#[test]
fn parses_shape_id_without_member() {
    let id = ShapeID::from_str("foo.bar#Baz").unwrap();
    assert_eq!(id.namespace().as_str(), "foo.bar");
    assert_eq!(id.shape_name().as_str(), "Baz");
    assert_eq!(id.member_name(), None);
    assert_eq!(id.to_string(), "foo.bar#Baz");
}

#[test]
fn parses_shape_id_with_member() {
    let id = ShapeID::from_str("foo.bar#Baz$member").unwrap();
    assert_eq!(id.member_name().unwrap().as_str(), "member");
    assert_eq!(id.to_string(), "foo.bar#Baz$member");
}

#[test]
fn rejects_shape_id_without_namespace_separator() {
    assert!(ShapeID::from_str("Baz").is_err());
}

#[test]
fn rejects_invalid_identifier_start() {
    assert!(Identifier::from_str("1abc").is_err());
    assert!(Identifier::from_str("_abc").is_ok());
}

#[test]
fn namespace_requires_every_segment_valid() {
    assert!(Namespace::from_str("foo.bar.baz").is_ok());
    assert!(Namespace::from_str("foo..baz").is_err());
    assert!(Namespace::from_str("foo.1bar").is_err());
}

#[test]
fn shape_id_equality_is_case_sensitive() {
    let a = ShapeID::from_str("foo#Bar").unwrap();
    let b = ShapeID::from_str("foo#bar").unwrap();
    assert_ne!(a, b);
    assert_eq!(a.case_insensitive_simple_name(), b.case_insensitive_simple_name());
}

#[test]
fn to_member_and_to_shape_id_round_trip() {
    let shape_id = ShapeID::from_str("foo#Bar").unwrap();
    let member_id = shape_id.to_member(Identifier::from_str("baz").unwrap());
    assert_eq!(member_id.to_string(), "foo#Bar$baz");
    assert_eq!(member_id.to_shape_id(), shape_id);
}
