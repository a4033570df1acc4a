use smithy_build::{run_build, BuildConfig};
use std::fs;

fn write_source(dir: &std::path::Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

const MODEL_IDL: &str = r#"
$version: "2.0"
namespace example.build

@tags(["keep"])
structure Kept {
    @required
    name: String
}

structure Dropped {}
"#;

#[test]
fn build_runs_source_projection_with_no_config() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "model.smithy", MODEL_IDL);
    let config = BuildConfig::parse(r#"{"version": "1.0", "sources": ["model.smithy"]}"#).unwrap();
    let result = run_build(&config, dir.path()).unwrap();
    assert!(result.is_success());
    let source = result.projections.iter().find(|p| p.name == "source").unwrap();
    assert!(source.model.shape(&"example.build#Kept".parse().unwrap()).is_some());
    assert!(source.model.shape(&"example.build#Dropped".parse().unwrap()).is_some());
}

#[test]
fn projection_with_transform_and_model_plugin_writes_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "model.smithy", MODEL_IDL);
    let config_text = r#"{
        "version": "1.0",
        "sources": ["model.smithy"],
        "projections": {
            "tagged": {
                "transforms": [
                    {"name": "includeByTag", "args": {"tags": ["keep"]}}
                ],
                "plugins": {
                    "model": {}
                }
            }
        }
    }"#;
    let config = BuildConfig::parse(config_text).unwrap();
    let result = run_build(&config, dir.path()).unwrap();
    assert!(result.is_success());
    let tagged = result.projections.iter().find(|p| p.name == "tagged").unwrap();
    assert!(tagged.model.shape(&"example.build#Kept".parse().unwrap()).is_some());
    assert!(tagged.model.shape(&"example.build#Dropped".parse().unwrap()).is_none());
    assert_eq!(tagged.artifacts.len(), 1);
    let written = fs::read_to_string(&tagged.artifacts[0]).unwrap();
    assert!(written.contains("example.build#Kept"));
}

#[test]
fn plugin_artifact_name_suffix_scopes_its_own_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "model.smithy", MODEL_IDL);
    let config_text = r#"{
        "version": "1.0",
        "sources": ["model.smithy"],
        "projections": {
            "tagged": {
                "plugins": {
                    "model::ast": {}
                }
            }
        }
    }"#;
    let config = BuildConfig::parse(config_text).unwrap();
    let result = run_build(&config, dir.path()).unwrap();
    assert!(result.is_success());
    let tagged = result.projections.iter().find(|p| p.name == "tagged").unwrap();
    assert_eq!(tagged.artifacts.len(), 1);
    assert!(tagged.artifacts[0].to_string_lossy().contains("/ast/"));
}

#[test]
fn duplicate_plugin_artifact_name_is_rejected_for_that_projection_only() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "model.smithy", MODEL_IDL);
    let config_text = r#"{
        "version": "1.0",
        "sources": ["model.smithy"],
        "projections": {
            "tagged": {
                "plugins": {
                    "model": {},
                    "build-info::model": {}
                }
            }
        }
    }"#;
    let config = BuildConfig::parse(config_text).unwrap();
    let result = run_build(&config, dir.path()).unwrap();
    let tagged = result.projections.iter().find(|p| p.name == "tagged").unwrap();
    assert!(!tagged.success);
    assert!(tagged.events.iter().any(|e| e.id() == "Build.DuplicateArtifact"));
    // The unrelated source projection still ran.
    assert!(result.projections.iter().any(|p| p.name == "source" && p.success));
}

#[test]
fn abstract_projection_is_not_run_directly_but_apply_reaches_it() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "model.smithy", MODEL_IDL);
    let config_text = r#"{
        "version": "1.0",
        "sources": ["model.smithy"],
        "projections": {
            "base": {
                "abstract": true,
                "transforms": [
                    {"name": "includeByTag", "args": {"tags": ["keep"]}}
                ]
            },
            "final": {
                "transforms": [
                    {"name": "apply", "args": {"name": "base"}}
                ]
            }
        }
    }"#;
    let config = BuildConfig::parse(config_text).unwrap();
    let result = run_build(&config, dir.path()).unwrap();
    assert!(result.is_success());
    assert!(!result.projections.iter().any(|p| p.name == "base"));
    let final_projection = result.projections.iter().find(|p| p.name == "final").unwrap();
    assert!(final_projection.model.shape(&"example.build#Dropped".parse().unwrap()).is_none());
}

#[test]
fn apply_cycle_is_rejected_without_aborting_the_whole_build() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "model.smithy", MODEL_IDL);
    let config_text = r#"{
        "version": "1.0",
        "sources": ["model.smithy"],
        "projections": {
            "a": {
                "abstract": true,
                "transforms": [{"name": "apply", "args": {"name": "b"}}]
            },
            "b": {
                "transforms": [{"name": "apply", "args": {"name": "a"}}]
            }
        }
    }"#;
    let config = BuildConfig::parse(config_text).unwrap();
    let result = run_build(&config, dir.path()).unwrap();
    let b = result.projections.iter().find(|p| p.name == "b").unwrap();
    assert!(!b.success);
    assert!(b.events.iter().any(|e| e.id() == "Build.ProjectionCycle"));
    // The unrelated source projection still ran.
    assert!(result.projections.iter().any(|p| p.name == "source" && p.success));
}

#[test]
fn change_types_failure_marks_only_its_own_projection_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path(), "model.smithy", "$version: \"2.0\"\nnamespace example.build\ninteger Count\n");
    let config_text = r#"{
        "version": "1.0",
        "sources": ["model.smithy"],
        "projections": {
            "broken": {
                "transforms": [
                    {"name": "changeTypes", "args": {"shapeTypes": {"example.build#Count": "string"}}}
                ]
            }
        }
    }"#;
    let config = BuildConfig::parse(config_text).unwrap();
    let result = run_build(&config, dir.path()).unwrap();
    let broken = result.projections.iter().find(|p| p.name == "broken").unwrap();
    assert!(!broken.success);
    let source = result.projections.iter().find(|p| p.name == "source").unwrap();
    assert!(source.success);
}
