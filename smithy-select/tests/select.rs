use smithy_select::Selector;
use smithy_test::examples::WEATHER_IDL;
use smithy_test::assemble_clean;

fn id(s: &str) -> smithy_core::identity::ShapeID {
    s.parse().unwrap()
}

#[test]
fn shape_type_selects_every_operation() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("operation").unwrap();
    let matches = selector.select(&model);
    assert!(matches.contains(&id("example.weather#GetCity")));
    assert!(matches.contains(&id("example.weather#ListCities")));
    assert!(matches.contains(&id("example.weather#GetCurrentTime")));
    assert!(matches.contains(&id("example.weather#GetForecast")));
    assert!(!matches.contains(&id("example.weather#Weather")));
}

#[test]
fn attribute_presence_selects_readonly_operations() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("operation [@readonly]").unwrap();
    let matches = selector.select(&model);
    assert!(matches.contains(&id("example.weather#GetCity")));
    // ListCities is also @readonly.
    assert!(matches.contains(&id("example.weather#ListCities")));
}

#[test]
fn attribute_value_comparator_matches_error_trait_value() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("structure [@error = 'client']").unwrap();
    let matches = selector.select(&model);
    assert!(matches.contains(&id("example.weather#NoSuchResource")));
}

#[test]
fn direct_combinator_follows_member_targets() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("structure > string").unwrap();
    let matches = selector.select(&model);
    // GetCityOutput.name targets String, GetCityInput.cityId targets CityId (a string).
    assert!(matches.contains(&id("smithy.api#String")) || matches.contains(&id("example.weather#CityId")));
}

#[test]
fn any_depth_combinator_reaches_transitive_neighbors() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("service ~> structure").unwrap();
    let matches = selector.select(&model);
    // Weather -> GetCurrentTime -> GetCurrentTimeOutput, several hops away.
    assert!(matches.contains(&id("example.weather#GetCurrentTimeOutput")));
}

#[test]
fn not_function_excludes_selected_shapes() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("operation :not([@readonly])").unwrap();
    let matches = selector.select(&model);
    assert!(!matches.contains(&id("example.weather#GetCity")));
}

#[test]
fn test_function_requires_all_arguments_to_match() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("structure :test([@error])").unwrap();
    let matches = selector.select(&model);
    assert!(matches.contains(&id("example.weather#NoSuchResource")));
    assert!(!matches.contains(&id("example.weather#CityCoordinates")));
}

#[test]
fn unknown_function_name_is_rejected_at_parse_time() {
    assert!(Selector::parse("structure :bogus()").is_err());
}

#[test]
fn id_namespace_attribute_filters_by_namespace() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("structure [id|namespace = 'example.weather']").unwrap();
    let matches = selector.select(&model);
    assert!(matches.contains(&id("example.weather#NoSuchResource")));
}

#[test]
fn case_insensitive_comparator_ignores_case() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("structure [trait|smithy.api#error ^=i 'CLIENT']").unwrap();
    let matches = selector.select(&model);
    assert!(matches.contains(&id("example.weather#NoSuchResource")));
}

#[test]
fn reverse_combinator_finds_referencing_shapes() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse("string < structure").unwrap();
    let matches = selector.select(&model);
    assert!(matches.contains(&id("example.weather#GetCityInput")));
}

#[test]
fn root_function_selects_shapes_with_no_incoming_references() {
    let model = assemble_clean(WEATHER_IDL);
    let selector = Selector::parse(":root").unwrap();
    let matches = selector.select(&model);
    assert!(matches.contains(&id("example.weather#Weather")));
}
