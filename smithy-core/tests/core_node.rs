use pretty_assertions::assert_eq;
use smithy_core::node::{Node, NodeNumber};

#[test]
fn round_trips_arbitrary_precision_integers() {
    let n = NodeNumber::parse("1e400").unwrap();
    assert!(!n.is_integer());
    assert_eq!(n.as_text(), "1e400");
}

#[test]
fn round_trips_small_fractions() {
    let n = NodeNumber::parse("0.1").unwrap();
    assert!(!n.is_integer());
    assert_eq!(n.as_text(), "0.1");
}

#[test]
fn distinguishes_integer_from_fractional_literals() {
    let i = NodeNumber::parse("42").unwrap();
    let f = NodeNumber::parse("42.0").unwrap();
    assert!(i.is_integer());
    assert!(!f.is_integer());
}

#[test]
fn deep_structural_equality_ignores_source_location() {
    let a = Node::String("hello".to_string(), Default::default());
    let b = Node::String("hello".to_string(), smithy_core::node::SourceLocation::new("a.smithy", 3, 1));
    assert_eq!(a, b);
}

#[test]
fn object_preserves_declaration_order() {
    let mut fields = smithy_core::node::NodeObject::new();
    fields.insert("z".to_string(), Node::integer(1));
    fields.insert("a".to_string(), Node::integer(2));
    let obj = Node::object(fields);
    let keys: Vec<&str> = obj.as_object().unwrap().keys().map(|s| s.as_str()).collect();
    assert_eq!(keys, vec!["z", "a"]);
}

#[test]
fn get_as_type_mismatch_is_an_error() {
    let n = Node::integer(1);
    assert!(n.as_string().is_err());
}

#[test]
fn empty_object_is_recognized_as_annotation_payload() {
    assert!(Node::empty_object().is_empty_object());
    assert!(!Node::integer(0).is_empty_object());
}
