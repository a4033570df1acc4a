use smithy_core::identity::ShapeID;
use smithy_core::model::shape::ShapeKind;
use smithy_core::prelude::{prelude_trait_factories, trait_ids};
use smithy_json::read_model;
use std::str::FromStr;

#[test]
fn empty_document() {
    let (model, events) = read_model(r#"{"smithy": "2.0"}"#, &prelude_trait_factories()).unwrap();
    assert!(events.is_empty());
    assert!(model.is_empty());
}

#[test]
fn simple_shape_with_traits() {
    let json = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#CityId": {
                "type": "string",
                "traits": {
                    "smithy.api#documentation": "A city identifier."
                }
            }
        }
    }"#;
    let (model, events) = read_model(json, &prelude_trait_factories()).unwrap();
    assert!(events.is_empty());
    let id = ShapeID::from_str("example.weather#CityId").unwrap();
    let shape = model.shape(&id).unwrap();
    assert!(matches!(shape.kind(), ShapeKind::Simple(smithy_core::model::shape::SimpleKind::String)));
    assert!(shape.has_trait(&trait_ids::documentation()));
}

#[test]
fn structure_with_members_and_required() {
    let json = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#City": {
                "type": "structure",
                "members": {
                    "cityId": {
                        "target": "example.weather#CityId",
                        "traits": { "smithy.api#required": {} }
                    },
                    "name": { "target": "smithy.api#String" }
                }
            }
        }
    }"#;
    let (model, events) = read_model(json, &prelude_trait_factories()).unwrap();
    assert!(events.is_empty());
    let id = ShapeID::from_str("example.weather#City").unwrap();
    let shape = model.shape(&id).unwrap();
    match shape.kind() {
        ShapeKind::Structure { members } => {
            assert_eq!(members.len(), 2);
            let city_id = &members[&smithy_core::identity::Identifier::from_str("cityId").unwrap()];
            assert!(city_id.has_trait(&trait_ids::required()));
            assert_eq!(city_id.target().to_string(), "example.weather#CityId");
        }
        other => panic!("expected structure, got {:?}", other),
    }
}

#[test]
fn operation_with_errors() {
    let json = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#GetCurrentTime": {
                "type": "operation",
                "input": { "target": "example.weather#GetCurrentTimeInput" },
                "output": { "target": "example.weather#GetCurrentTimeOutput" },
                "errors": [ { "target": "example.weather#NoSuchResource" } ]
            }
        }
    }"#;
    let (model, events) = read_model(json, &prelude_trait_factories()).unwrap();
    assert!(events.is_empty());
    let id = ShapeID::from_str("example.weather#GetCurrentTime").unwrap();
    match model.shape(&id).unwrap().kind() {
        ShapeKind::Operation(op) => {
            assert!(op.input.is_some());
            assert!(op.output.is_some());
            assert_eq!(op.errors.len(), 1);
        }
        other => panic!("expected operation, got {:?}", other),
    }
}

#[test]
fn unknown_trait_falls_back_to_dynamic() {
    // No factory registered for this trait ID: construct_trait falls back
    // to `dynamic_trait` rather than failing the read.
    let json = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#CityId": {
                "type": "string",
                "traits": { "example.weather#custom": { "a": 1 } }
            }
        }
    }"#;
    let (model, events) = read_model(json, &prelude_trait_factories()).unwrap();
    assert!(events.is_empty());
    let id = ShapeID::from_str("example.weather#CityId").unwrap();
    let shape = model.shape(&id).unwrap();
    assert!(shape.has_trait(&ShapeID::from_str("example.weather#custom").unwrap()));
}

#[test]
fn malformed_trait_value_is_reported_as_event_not_error() {
    // `required` only accepts an empty object; a non-empty payload should
    // surface as a TRAIT_CONSTRUCTION_FAILED event, not abort the read.
    let json = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#City": {
                "type": "structure",
                "members": {
                    "cityId": {
                        "target": "smithy.api#String",
                        "traits": { "smithy.api#required": { "oops": true } }
                    }
                }
            }
        }
    }"#;
    let (model, events) = read_model(json, &prelude_trait_factories()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id(), "TRAIT_CONSTRUCTION_FAILED");
    let id = ShapeID::from_str("example.weather#City").unwrap();
    assert!(model.shape(&id).is_some());
}

#[test]
fn round_trips_through_writer() {
    let json = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#CityId": { "type": "string" }
        }
    }"#;
    let (model, events) = read_model(json, &prelude_trait_factories()).unwrap();
    assert!(events.is_empty());
    let written = smithy_json::write_model(&model);
    let (reparsed, events) = read_model(&written, &prelude_trait_factories()).unwrap();
    assert!(events.is_empty());
    assert_eq!(model.len(), reparsed.len());
}
