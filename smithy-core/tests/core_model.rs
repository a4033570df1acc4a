use pretty_assertions::assert_eq;
use smithy_core::identity::{Identifier, ShapeID};
use smithy_core::model::diagnostics::{sort_events, Event, Severity};
use smithy_core::model::shape::{Member, Shape, ShapeKind, SimpleKind};
use smithy_core::model::Model;
use std::str::FromStr;

fn sid(s: &str) -> ShapeID {
    ShapeID::from_str(s).unwrap()
}

#[test]
fn neighbors_follow_member_targets() {
    let mut model = Model::new();
    model.add_shape(Shape::new(sid("foo#Name"), ShapeKind::Simple(SimpleKind::String)));
    let member = Member::new(sid("foo#Person$name"), sid("foo#Name"));
    let mut members = smithy_core::model::shape::Members::new();
    members.insert(Identifier::from_str("name").unwrap(), member);
    model.add_shape(Shape::new(sid("foo#Person"), ShapeKind::Structure { members }));

    let neighbors = model.neighbors(&sid("foo#Person"));
    assert_eq!(neighbors, vec![sid("foo#Name")]);

    let reverse = model.reverse_neighbors(&sid("foo#Name"));
    assert_eq!(reverse, vec![sid("foo#Person")]);
}

#[test]
fn closure_reaches_transitive_references() {
    let mut model = Model::new();
    model.add_shape(Shape::new(sid("foo#Leaf"), ShapeKind::Simple(SimpleKind::String)));
    let mut mid_members = smithy_core::model::shape::Members::new();
    mid_members.insert(
        Identifier::from_str("leaf").unwrap(),
        Member::new(sid("foo#Mid$leaf"), sid("foo#Leaf")),
    );
    model.add_shape(Shape::new(sid("foo#Mid"), ShapeKind::Structure { members: mid_members }));
    let mut root_members = smithy_core::model::shape::Members::new();
    root_members.insert(
        Identifier::from_str("mid").unwrap(),
        Member::new(sid("foo#Root$mid"), sid("foo#Mid")),
    );
    model.add_shape(Shape::new(sid("foo#Root"), ShapeKind::Structure { members: root_members }));

    let closure = model.closure(&sid("foo#Root"));
    assert!(closure.contains(&sid("foo#Root")));
    assert!(closure.contains(&sid("foo#Mid")));
    assert!(closure.contains(&sid("foo#Leaf")));
}

#[test]
fn shapes_sorted_is_deterministic() {
    let mut model = Model::new();
    model.add_shape(Shape::new(sid("foo#Zeta"), ShapeKind::Simple(SimpleKind::String)));
    model.add_shape(Shape::new(sid("foo#Alpha"), ShapeKind::Simple(SimpleKind::String)));
    let ids: Vec<String> = model.shapes_sorted().iter().map(|s| s.id().to_string()).collect();
    assert_eq!(ids, vec!["foo#Alpha".to_string(), "foo#Zeta".to_string()]);
}

#[test]
fn events_sort_errors_first_then_by_location() {
    let mut events = vec![
        Event::warning("Model.Foo", "a warning"),
        Event::error("Model.Bar", "an error"),
        Event::note("Model.Baz", "a note"),
    ];
    sort_events(&mut events);
    assert_eq!(events[0].severity(), Severity::Error);
    assert_eq!(events[2].severity(), Severity::Note);
}

#[test]
fn error_events_suppress_to_danger_not_below() {
    let mut event = Event::error("Model.Foo", "bad");
    event.suppress();
    assert_eq!(event.severity(), Severity::Danger);
}

#[test]
fn non_error_events_suppress_fully() {
    let mut event = Event::warning("Model.Foo", "meh");
    event.suppress();
    assert_eq!(event.severity(), Severity::Suppressed);
}
