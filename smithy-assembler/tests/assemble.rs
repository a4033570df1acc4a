use smithy_assembler::Assembler;
use smithy_core::identity::{Identifier, ShapeID};
use smithy_core::model::shape::ShapeKind;
use std::str::FromStr;

#[test]
fn merges_idl_and_json_sources() {
    pretty_env_logger::try_init().ok();

    let idl = r#"
        namespace example.weather

        string CityId

        structure City {
            @required
            cityId: CityId
        }
    "#;
    let json = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#CityName": { "type": "string" }
        }
    }"#;

    let mut assembler = Assembler::default();
    assembler.add_idl(idl, Some("weather.smithy")).unwrap();
    assembler.add_json(json).unwrap();
    let (model, events) = assembler.assemble().unwrap();

    assert!(events.is_empty(), "unexpected events: {:?}", events);
    assert!(model.shape(&ShapeID::from_str("example.weather#CityId").unwrap()).is_some());
    assert!(model.shape(&ShapeID::from_str("example.weather#CityName").unwrap()).is_some());
    let city = model.shape(&ShapeID::from_str("example.weather#City").unwrap()).unwrap();
    match city.kind() {
        ShapeKind::Structure { members } => assert_eq!(members.len(), 1),
        other => panic!("expected structure, got {:?}", other),
    }
}

#[test]
fn materializes_inline_operation_io() {
    let idl = r#"
        namespace example.weather

        operation GetCurrentTime {
            input: {
                cityId: String
            }
            output: {
                time: String
            }
        }
    "#;
    let mut assembler = Assembler::default();
    assembler.add_idl(idl, None).unwrap();
    let (model, events) = assembler.assemble().unwrap();

    assert!(events.is_empty(), "unexpected events: {:?}", events);
    let op = model.shape(&ShapeID::from_str("example.weather#GetCurrentTime").unwrap()).unwrap();
    match op.kind() {
        ShapeKind::Operation(op) => {
            let input_id = op.input.clone().unwrap();
            assert_eq!(input_id.to_string(), "example.weather#GetCurrentTimeInput");
            let output_id = op.output.clone().unwrap();
            assert_eq!(output_id.to_string(), "example.weather#GetCurrentTimeOutput");
        }
        other => panic!("expected operation, got {:?}", other),
    }
    assert!(model.shape(&ShapeID::from_str("example.weather#GetCurrentTimeInput").unwrap()).is_some());
}

#[test]
fn flattens_mixins_in_declaration_order() {
    let idl = r#"
        namespace example.weather

        @mixin
        structure HasId {
            id: String
        }

        @mixin
        structure HasName {
            name: String
        }

        structure City with [HasId, HasName] {
            population: Integer
        }
    "#;
    let mut assembler = Assembler::default();
    assembler.add_idl(idl, None).unwrap();
    let (model, events) = assembler.assemble().unwrap();

    assert!(events.is_empty(), "unexpected events: {:?}", events);
    let city = model.shape(&ShapeID::from_str("example.weather#City").unwrap()).unwrap();
    match city.kind() {
        ShapeKind::Structure { members } => {
            assert_eq!(members.len(), 3);
            assert!(members.contains_key(&Identifier::from_str("id").unwrap()));
            assert!(members.contains_key(&Identifier::from_str("name").unwrap()));
            assert!(members.contains_key(&Identifier::from_str("population").unwrap()));
        }
        other => panic!("expected structure, got {:?}", other),
    }
}

#[test]
fn mixin_cycle_is_reported_and_does_not_hang() {
    let idl = r#"
        namespace example.weather

        structure A with [B] {
        }

        structure B with [A] {
        }
    "#;
    let mut assembler = Assembler::default();
    assembler.add_idl(idl, None).unwrap();
    let (_model, events) = assembler.assemble().unwrap();

    assert!(events.iter().any(|e| e.id() == "MIXIN_CYCLE"));
}

#[test]
fn unresolved_target_is_reported_not_fatal() {
    let idl = r#"
        namespace example.weather

        structure City {
            cityId: DoesNotExist
        }
    "#;
    let mut assembler = Assembler::default();
    assembler.add_idl(idl, None).unwrap();
    let (model, events) = assembler.assemble().unwrap();

    assert!(events.iter().any(|e| e.id() == "UNKNOWN_SHAPE_TARGET"));
    assert!(model.shape(&ShapeID::from_str("example.weather#City").unwrap()).is_some());
}

#[test]
fn conflicting_duplicate_shape_is_reported() {
    let idl = r#"
        namespace example.weather

        string CityId
    "#;
    let json = r#"{
        "smithy": "2.0",
        "shapes": {
            "example.weather#CityId": { "type": "integer" }
        }
    }"#;
    let mut assembler = Assembler::default();
    assembler.add_json(json).unwrap();
    assembler.add_idl(idl, None).unwrap();
    let (_model, events) = assembler.assemble().unwrap();

    assert!(events.iter().any(|e| e.id() == "SHAPE_CONFLICT"));
}
