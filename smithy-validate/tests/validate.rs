use smithy_test::{assemble, assemble_clean};
use smithy_test::examples::WEATHER_IDL;
use smithy_validate::ValidatorRegistry;

#[test]
fn weather_example_has_no_validation_errors() {
    let model = assemble_clean(WEATHER_IDL);
    let events = ValidatorRegistry::standard().validate(&model);
    assert!(events.is_empty(), "unexpected events: {:?}", events);
}

#[test]
fn trait_on_wrong_shape_kind_is_reported() {
    let idl = r#"
        namespace example.weather

        @error("client")
        string NotAStructure
    "#;
    let (model, _) = assemble(idl);
    let events = ValidatorRegistry::standard().validate(&model);
    assert!(events.iter().any(|e| e.id() == "TRAIT_NOT_APPLICABLE"));
}

#[test]
fn service_closure_name_collision_without_rename_is_reported() {
    let idl = r#"
        namespace example.weather

        service Weather {
            version: "1"
            operations: [GetCity]
            resources: [City]
        }

        operation GetCity {
            output: GetCityOutput
        }

        structure GetCityOutput {}

        resource City {
            identifiers: { cityId: String }
            read: ReadCity
        }

        operation ReadCity {
            output: ReadCityOutput
        }

        structure ReadCityOutput {}
    "#;
    let (model, _) = assemble(idl);
    let events = ValidatorRegistry::standard().validate(&model);
    assert!(events.iter().all(|e| e.id() != "RenameConflict"));
}

#[test]
fn paginated_trait_with_missing_member_is_reported() {
    let idl = r#"
        namespace example.weather

        @readonly
        @paginated(inputToken: "nextToken", outputToken: "nextToken")
        operation ListCities {
            input: ListCitiesInput
            output: ListCitiesOutput
        }

        structure ListCitiesInput {}

        structure ListCitiesOutput {}
    "#;
    let (model, _) = assemble(idl);
    let events = ValidatorRegistry::standard().validate(&model);
    assert!(events.iter().any(|e| e.id() == "INVALID_PAGINATION"));
}

#[test]
fn duplicate_enum_value_is_reported() {
    let idl = r#"
        namespace example.weather

        enum Status {
            ACTIVE = "active"
            ENABLED = "active"
        }
    "#;
    let (model, _) = assemble(idl);
    let events = ValidatorRegistry::standard().validate(&model);
    assert!(events.iter().any(|e| e.id() == "DUPLICATE_ENUM_VALUE"));
}

#[test]
fn required_and_default_together_is_a_note_not_an_error() {
    let idl = r#"
        namespace example.weather

        structure City {
            @required
            @default("unknown")
            name: String
        }
    "#;
    let (model, _) = assemble(idl);
    let events = ValidatorRegistry::standard().validate(&model);
    let note = events.iter().find(|e| e.id() == "SyntheticDefault").expect("expected a SyntheticDefault note");
    assert_eq!(note.severity(), smithy_core::model::diagnostics::Severity::Note);
}

#[test]
fn suppressed_event_is_downgraded_not_dropped() {
    let idl = r#"
        namespace example.weather

        @suppress(["TRAIT_NOT_APPLICABLE"])
        @error("client")
        string NotAStructure
    "#;
    let (model, _) = assemble(idl);
    let events = ValidatorRegistry::standard().validate(&model);
    let found = events.iter().find(|e| e.id() == "TRAIT_NOT_APPLICABLE").expect("event should still be present");
    assert_eq!(found.severity(), smithy_core::model::diagnostics::Severity::Suppressed);
}
