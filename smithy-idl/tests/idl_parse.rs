use smithy_idl::deferred::{DeferredKind, ShapeRef};
use smithy_idl::parse_source;

#[test]
fn parses_namespace_and_simple_shape() {
    let source = r#"
        $version: "2.0"

        namespace example.weather

        string CityId
    "#;
    let parsed = parse_source(source, Some("weather.smithy")).unwrap();
    assert_eq!(parsed.namespace.unwrap().as_str(), "example.weather");
    assert_eq!(parsed.shapes.len(), 1);
    assert_eq!(parsed.shapes[0].name.as_str(), "CityId");
    assert!(matches!(parsed.shapes[0].kind, DeferredKind::Simple(_)));
}

#[test]
fn parses_structure_with_traits_and_members() {
    let source = r#"
        namespace example.weather

        /// A city summary.
        structure City {
            @required
            cityId: CityId

            name: String
        }
    "#;
    let parsed = parse_source(source, None).unwrap();
    let shape = &parsed.shapes[0];
    assert_eq!(shape.name.as_str(), "City");
    assert_eq!(shape.traits.len(), 1);
    match &shape.kind {
        DeferredKind::Structure { members } => {
            assert_eq!(members.len(), 2);
            assert_eq!(members[0].name.as_str(), "cityId");
            assert_eq!(members[0].traits.len(), 1);
            assert!(matches!(members[0].target, ShapeRef::Relative(_)));
        }
        other => panic!("expected structure, got {:?}", other),
    }
}

#[test]
fn parses_trait_with_bare_value_argument() {
    let source = r#"
        namespace example.weather

        @error("client")
        structure NoSuchResource {
            @pattern("^[A-Za-z0-9 ]+$")
            resourceType: String
        }
    "#;
    let parsed = parse_source(source, None).unwrap();
    let shape = &parsed.shapes[0];
    assert_eq!(shape.traits.len(), 1);
    assert_eq!(shape.traits[0].value.as_string().unwrap(), "client");
    match &shape.kind {
        DeferredKind::Structure { members } => {
            assert_eq!(members[0].traits[0].value.as_string().unwrap(), "^[A-Za-z0-9 ]+$");
        }
        other => panic!("expected structure, got {:?}", other),
    }
}

#[test]
fn parses_trait_with_object_and_empty_arguments() {
    let source = r#"
        namespace example.weather

        @paginated(inputToken: "nextToken", pageSize: "pageSize")
        @tags()
        operation ListCities {
        }
    "#;
    let parsed = parse_source(source, None).unwrap();
    let shape = &parsed.shapes[0];
    assert_eq!(shape.traits.len(), 2);
    let object = shape.traits[0].value.as_object().unwrap();
    assert_eq!(object.get("inputToken").unwrap().as_string().unwrap(), "nextToken");
    assert_eq!(object.get("pageSize").unwrap().as_string().unwrap(), "pageSize");
    assert!(shape.traits[1].value.as_object().unwrap().is_empty());
}

#[test]
fn parses_operation_with_inline_errors() {
    let source = r#"
        namespace example.weather

        operation GetCurrentTime {
            input: GetCurrentTimeInput
            output: GetCurrentTimeOutput
            errors: [NoSuchResource]
        }
    "#;
    let parsed = parse_source(source, None).unwrap();
    match &parsed.shapes[0].kind {
        DeferredKind::Operation { input, output, errors, .. } => {
            assert!(input.is_some());
            assert!(output.is_some());
            assert_eq!(errors.len(), 1);
        }
        other => panic!("expected operation, got {:?}", other),
    }
}

#[test]
fn parses_service_with_rename() {
    let source = r#"
        namespace example.weather

        service Weather {
            version: "2006-03-01"
            operations: [GetCurrentTime]
            rename: {
                "example.other#City": "OtherCity"
            }
        }
    "#;
    let parsed = parse_source(source, None).unwrap();
    match &parsed.shapes[0].kind {
        DeferredKind::Service { version, operations, rename, .. } => {
            assert_eq!(version.as_deref(), Some("2006-03-01"));
            assert_eq!(operations.len(), 1);
            assert_eq!(rename.len(), 1);
        }
        other => panic!("expected service, got {:?}", other),
    }
}

#[test]
fn rejects_malformed_source() {
    let source = "namespace 1nvalid\nstring Foo";
    assert!(parse_source(source, None).is_err());
}
