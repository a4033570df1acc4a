use indexmap::IndexMap;
use smithy_core::identity::ShapeID;
use smithy_core::model::shape::{ShapeKind, SimpleKind};
use smithy_test::assemble_clean;
use smithy_test::examples::{MESSAGE_OF_THE_DAY_IDL, WEATHER_IDL};
use smithy_transform::{
    ChangeTypes, ExcludeByTag, ExcludeShapesByTrait, FilterSuppressions, FlattenAndRemoveMixins,
    FlattenNamespaces, IncludeByTag, IncludeNamespaces, RemoveTraitDefinitions,
    RemoveUnreferencedShapes, RenameShapes, SortMembers, Transform,
};

fn id(s: &str) -> ShapeID {
    s.parse().unwrap()
}

#[test]
fn include_by_tag_keeps_only_tagged_shapes_and_their_closure() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.tags

@tags(["keep"])
structure Kept {
    @required
    ref: Referenced
}

structure Referenced {}

structure Dropped {}
"#,
    );
    let result = IncludeByTag { tags: vec!["keep".to_string()] }.apply(model).unwrap();
    assert!(result.shape(&id("example.tags#Kept")).is_some());
    assert!(result.shape(&id("example.tags#Referenced")).is_some());
    assert!(result.shape(&id("example.tags#Dropped")).is_none());
}

#[test]
fn exclude_by_tag_drops_only_the_tagged_shape() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.tags

@tags(["drop"])
structure Dropped {}

structure Kept {}
"#,
    );
    let result = ExcludeByTag { tags: vec!["drop".to_string()] }.apply(model).unwrap();
    assert!(result.shape(&id("example.tags#Dropped")).is_none());
    assert!(result.shape(&id("example.tags#Kept")).is_some());
}

#[test]
fn include_namespaces_keeps_prelude_and_named_namespaces_only() {
    let model = assemble_clean(WEATHER_IDL);
    let result = IncludeNamespaces { namespaces: vec!["example.weather".to_string()] }.apply(model).unwrap();
    assert!(result.shape(&id("example.weather#Weather")).is_some());
    assert!(result.shape(&id("smithy.api#String")).is_some());
}

#[test]
fn exclude_shapes_by_trait_drops_every_error_structure() {
    let model = assemble_clean(WEATHER_IDL);
    let result = ExcludeShapesByTrait { trait_ids: vec![id("smithy.api#error")] }.apply(model).unwrap();
    assert!(result.shape(&id("example.weather#NoSuchResource")).is_none());
    assert!(result.shape(&id("example.weather#GetCityOutput")).is_some());
}

#[test]
fn remove_unreferenced_shapes_prunes_dangling_structure_but_keeps_service() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.prune

service Thing {
    version: "1"
    operations: [DoThing]
}

@readonly
operation DoThing {
    output: DoThingOutput
}

structure DoThingOutput {}

structure Unused {}
"#,
    );
    let result = RemoveUnreferencedShapes { export_tags: None }.apply(model).unwrap();
    assert!(result.shape(&id("example.prune#Thing")).is_some());
    assert!(result.shape(&id("example.prune#DoThing")).is_some());
    assert!(result.shape(&id("example.prune#Unused")).is_none());
}

#[test]
fn remove_unreferenced_shapes_honors_export_tags() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.prune

@tags(["exported"])
structure KeptAnyway {}

structure Dropped {}
"#,
    );
    let result = RemoveUnreferencedShapes { export_tags: Some(vec!["exported".to_string()]) }.apply(model).unwrap();
    assert!(result.shape(&id("example.prune#KeptAnyway")).is_some());
    assert!(result.shape(&id("example.prune#Dropped")).is_none());
}

#[test]
fn remove_trait_definitions_drops_the_definition_but_keeps_its_applications() {
    let model = assemble_clean(MESSAGE_OF_THE_DAY_IDL);
    let result = RemoveTraitDefinitions { export_tags: None }.apply(model).unwrap();
    assert!(result.shape(&id("smithy.api#documentation")).is_none());
    let service = result.shape(&id("example.motd#MessageOfTheDay")).unwrap();
    assert!(service.has_trait(&id("smithy.api#documentation")));
}

#[test]
fn rename_shapes_rewrites_member_and_operation_references() {
    let model = assemble_clean(WEATHER_IDL);
    let mut mapping = IndexMap::new();
    mapping.insert(id("example.weather#CityId"), id("example.weather#MunicipalityId"));
    let result = RenameShapes { mapping }.apply(model).unwrap();
    assert!(result.shape(&id("example.weather#CityId")).is_none());
    assert!(result.shape(&id("example.weather#MunicipalityId")).is_some());
    let input = result.shape(&id("example.weather#GetCityInput")).unwrap();
    if let ShapeKind::Structure { members } = input.kind() {
        let member = members.get(&"cityId".parse().unwrap()).unwrap();
        assert_eq!(member.target(), &id("example.weather#MunicipalityId"));
    } else {
        panic!("expected a structure");
    }
}

#[test]
fn change_types_accepts_compatible_numeric_conversion() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.types

integer Count
"#,
    );
    let mut mapping = IndexMap::new();
    mapping.insert(id("example.types#Count"), SimpleKind::Long);
    let result = ChangeTypes { mapping }.apply(model).unwrap();
    let shape = result.shape(&id("example.types#Count")).unwrap();
    assert!(matches!(shape.kind(), ShapeKind::Simple(SimpleKind::Long)));
}

#[test]
fn change_types_rejects_incompatible_family_conversion() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.types

integer Count
"#,
    );
    let mut mapping = IndexMap::new();
    mapping.insert(id("example.types#Count"), SimpleKind::String);
    let errors = ChangeTypes { mapping }.apply(model).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].id(), "Transform.IncompatibleTypeChange");
}

#[test]
fn flatten_and_remove_mixins_copies_members_and_drops_the_mixin_shape() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.mixins

@mixin
structure Identified {
    @required
    id: String
}

structure Widget with [Identified] {
    @required
    name: String
}
"#,
    );
    let result = FlattenAndRemoveMixins.apply(model).unwrap();
    let widget = result.shape(&id("example.mixins#Widget")).unwrap();
    if let ShapeKind::Structure { members } = widget.kind() {
        assert!(members.contains_key(&"id".parse().unwrap()));
        assert!(members.contains_key(&"name".parse().unwrap()));
    } else {
        panic!("expected a structure");
    }
    assert!(result.shape(&id("example.mixins#Identified")).is_none());
}

#[test]
fn filter_suppressions_drops_ids_not_in_the_keep_set() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.suppress

@suppress(["RuleA", "RuleB"])
structure Noisy {}
"#,
    );
    let mut keep = std::collections::HashSet::new();
    keep.insert("RuleA".to_string());
    let result = FilterSuppressions { keep_ids: keep }.apply(model).unwrap();
    let shape = result.shape(&id("example.suppress#Noisy")).unwrap();
    let suppress = shape.get_trait(&id("smithy.api#suppress")).unwrap();
    let values = suppress.value().as_array().unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].as_string().unwrap(), "RuleA");
}

#[test]
fn filter_suppressions_removes_the_trait_entirely_when_nothing_survives() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.suppress

@suppress(["RuleA"])
structure Noisy {}
"#,
    );
    let result = FilterSuppressions { keep_ids: std::collections::HashSet::new() }.apply(model).unwrap();
    let shape = result.shape(&id("example.suppress#Noisy")).unwrap();
    assert!(!shape.has_trait(&id("smithy.api#suppress")));
}

#[test]
fn sort_members_orders_structure_members_alphabetically() {
    let model = assemble_clean(
        r#"
$version: "2.0"
namespace example.order

structure Unsorted {
    zebra: String
    apple: String
    mango: String
}
"#,
    );
    let result = SortMembers { ordering: smithy_transform::MemberOrdering::Alphabetical }.apply(model).unwrap();
    let shape = result.shape(&id("example.order#Unsorted")).unwrap();
    if let ShapeKind::Structure { members } = shape.kind() {
        let names: Vec<String> = members.keys().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["apple".to_string(), "mango".to_string(), "zebra".to_string()]);
    } else {
        panic!("expected a structure");
    }
}

#[test]
fn flatten_namespaces_moves_every_reachable_shape_into_the_target_namespace() {
    let model = assemble_clean(WEATHER_IDL);
    let result = FlattenNamespaces { target: "example.flat".parse().unwrap(), service: id("example.weather#Weather") }
        .apply(model)
        .unwrap();
    assert!(result.shape(&id("example.flat#Weather")).is_some());
    assert!(result.shape(&id("example.flat#GetCity")).is_some());
    assert!(result.shape(&id("example.weather#Weather")).is_none());
    // Prelude shapes are left where they are.
    assert!(result.shape(&id("smithy.api#String")).is_some());
}
