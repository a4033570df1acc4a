/*!
The build pipeline: reads a build configuration, assembles a base
model, runs each non-abstract projection's transforms and plugins, and
reports per-projection results plus the aggregate diagnostic event
sequence, in the same read-model/run-action/report-result shape used
throughout this workspace's command line tooling, generalized from a
single file-in-file-out command into the full projection/plugin
pipeline.
*/

#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

#[macro_use]
extern crate log;

pub mod config;
pub mod manifest;
pub mod plugin;
mod registry;

pub use config::{BuildConfig, ProjectionConfig, TransformConfig};
pub use manifest::FileManifest;
pub use plugin::{Plugin, PluginContext, PluginResult};

use config::is_valid_name;
use plugin::builtin_plugin;
use registry::{build_transform, APPLY_TRANSFORM_NAME};
use smithy_assembler::Assembler;
use smithy_core::error::{ErrorKind, Result};
use smithy_core::model::diagnostics::{sort_events, Event};
use smithy_core::model::Model;
use smithy_transform::apply_all;
use smithy_validate::ValidatorRegistry;
use std::collections::HashSet;
use std::path::Path;

/// The distinguished projection that always exists, runs no transforms,
/// and surfaces the unmodified base model.
pub const SOURCE_PROJECTION_NAME: &str = "source";

/// The outcome of running a single projection: its name, whether it
/// succeeded, the resulting model (present even on failure, reflecting
/// whatever transform ran last successfully), every file path its
/// plugins wrote, and every diagnostic event raised along the way.
#[derive(Debug)]
pub struct ProjectionResult {
    pub name: String,
    pub success: bool,
    pub model: Model,
    pub artifacts: Vec<std::path::PathBuf>,
    pub events: Vec<Event>,
}

/// The full result of running a build: one [`ProjectionResult`] per
/// non-abstract projection (`source` always included), plus the overall
/// pass/fail verdict — a build with any `ERROR` event anywhere is
/// failed.
#[derive(Debug)]
pub struct BuildResult {
    pub projections: Vec<ProjectionResult>,
}

impl BuildResult {
    /// `true` if no projection's event list contains an `ERROR` or worse.
    pub fn is_success(&self) -> bool {
        self.projections.iter().all(|p| p.success)
    }

    /// Every event across every projection, sorted by severity then
    /// source location.
    pub fn all_events(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self.projections.iter().flat_map(|p| p.events.clone()).collect();
        sort_events(&mut events);
        events
    }
}

/// Runs the full build pipeline described by `config`, relative to
/// `base_dir` (source/import paths in the config are resolved against
/// this directory).
pub fn run_build(config: &BuildConfig, base_dir: &Path) -> Result<BuildResult> {
    let base_model = assemble_base_model(config, base_dir)?;

    let mut projection_names: Vec<String> = config.projections.keys().cloned().collect();
    if !projection_names.iter().any(|n| n == SOURCE_PROJECTION_NAME) {
        projection_names.insert(0, SOURCE_PROJECTION_NAME.to_string());
    }

    let mut serial = Vec::new();
    let mut parallel = Vec::new();
    for name in projection_names {
        if !is_valid_name(&name) {
            return Err(ErrorKind::BuildConfig(format!("invalid projection name '{}'", name)).into());
        }
        let projection = config.projections.get(&name).cloned().unwrap_or_default();
        if name == SOURCE_PROJECTION_NAME && !projection.transforms.is_empty() {
            return Err(ErrorKind::BuildConfig("the 'source' projection may not declare transforms".to_string()).into());
        }
        if projection.r#abstract {
            continue;
        }
        if projection_is_serial(&projection) {
            serial.push((name, projection));
        } else {
            parallel.push((name, projection));
        }
    }

    debug!("run_build() - {} serial, {} parallel projections", serial.len(), parallel.len());

    let mut results = Vec::new();
    for (name, projection) in serial {
        results.push(run_projection(&name, &projection, config, base_dir, &base_model, &mut HashSet::new()));
    }

    if !parallel.is_empty() {
        let parallel_results = std::thread::scope(|scope| {
            let handles: Vec<_> = parallel
                .iter()
                .map(|(name, projection)| scope.spawn(|| run_projection(name, projection, config, base_dir, &base_model, &mut HashSet::new())))
                .collect();
            handles.into_iter().map(|h| h.join().expect("projection thread should not panic")).collect::<Vec<_>>()
        });
        results.extend(parallel_results);
    }

    Ok(BuildResult { projections: results })
}

fn projection_is_serial(projection: &ProjectionConfig) -> bool {
    projection
        .plugins
        .keys()
        .any(|key| builtin_plugin(split_plugin_key(key).0).map(|p| p.is_serial()).unwrap_or(false))
}

/// Splits a plugin config key of the form `plugin[::artifactName]` into
/// its plugin name and artifact name, the latter defaulting to the
/// plugin name when no `::` suffix is present.
fn split_plugin_key(key: &str) -> (&str, &str) {
    match key.split_once("::") {
        Some((plugin, artifact)) => (plugin, artifact),
        None => (key, key),
    }
}

fn assemble_base_model(config: &BuildConfig, base_dir: &Path) -> Result<Model> {
    let mut assembler = Assembler::default();
    for source in config.sources.iter().chain(config.imports.iter()) {
        assembler.push(&base_dir.join(source));
    }
    let (model, events) = assembler.assemble()?;
    for event in &events {
        warn!("{}: {}", event.id(), event.message());
    }
    Ok(model)
}

fn run_projection(
    name: &str,
    projection: &ProjectionConfig,
    config: &BuildConfig,
    base_dir: &Path,
    base_model: &Model,
    visiting: &mut HashSet<String>,
) -> ProjectionResult {
    if !visiting.insert(name.to_string()) {
        return ProjectionResult {
            name: name.to_string(),
            success: false,
            model: base_model.clone(),
            artifacts: Vec::new(),
            events: vec![Event::error("Build.ProjectionCycle", format!("cycle detected re-entering projection '{}'", name))],
        };
    }

    let mut model = base_model.clone();
    let mut events = Vec::new();
    let mut failed = false;

    if !projection.imports.is_empty() {
        let mut extra = Assembler::default();
        for import in &projection.imports {
            extra.push(&base_dir.join(import));
        }
        match extra.assemble() {
            Ok((imported, import_events)) => {
                events.extend(import_events);
                for shape in imported.shapes() {
                    model.add_shape(shape.clone());
                }
            }
            Err(e) => {
                events.push(Event::error("Build.ImportFailed", e.to_string()));
                failed = true;
            }
        }
    }

    if !failed {
        for transform_config in &projection.transforms {
            if transform_config.name == APPLY_TRANSFORM_NAME {
                let target = match transform_config.args.get("name").and_then(|v| v.as_str()) {
                    Some(t) => t,
                    None => {
                        events.push(Event::error("Build.MalformedApply", "'apply' transform requires a 'name' argument".to_string()));
                        failed = true;
                        break;
                    }
                };
                let target_projection = match config.projections.get(target) {
                    Some(p) => p,
                    None => {
                        events.push(Event::error("Build.MalformedApply", format!("'apply' references unknown projection '{}'", target)));
                        failed = true;
                        break;
                    }
                };
                let sub_result = run_projection(target, target_projection, config, base_dir, &model, visiting);
                events.extend(sub_result.events);
                if !sub_result.success {
                    failed = true;
                    break;
                }
                model = sub_result.model;
                continue;
            }

            match build_transform(transform_config) {
                Ok(transform) => match apply_all(&[transform], model.clone()) {
                    Ok(next) => model = next,
                    Err(transform_events) => {
                        events.extend(transform_events);
                        failed = true;
                        break;
                    }
                },
                Err(e) => {
                    events.push(Event::error("Build.MalformedTransform", e.to_string()));
                    failed = true;
                    break;
                }
            }
        }
    }

    visiting.remove(name);

    if !failed {
        let validation_events = ValidatorRegistry::standard().validate(&model);
        failed = validation_events.iter().any(|e| e.severity() >= smithy_core::model::diagnostics::Severity::Error);
        events.extend(validation_events);
    }

    let mut artifacts = Vec::new();
    if !failed {
        let output_root = base_dir.join(config.output_directory()).join(name);
        let mut seen_artifacts = HashSet::new();
        for (plugin_key, settings) in &projection.plugins {
            let (plugin_name, artifact_name) = split_plugin_key(plugin_key);
            if !is_valid_name(plugin_name) || !is_valid_name(artifact_name) {
                events.push(Event::error("Build.MalformedPlugin", format!("invalid plugin identifier '{}'", plugin_key)));
                continue;
            }
            if !seen_artifacts.insert(artifact_name.to_string()) {
                events.push(Event::error(
                    "Build.DuplicateArtifact",
                    format!("projection '{}' has more than one plugin producing artifact '{}'", name, artifact_name),
                ));
                continue;
            }
            let plugin = match builtin_plugin(plugin_name) {
                Some(p) => p,
                None => {
                    if config.ignore_missing_plugins {
                        continue;
                    }
                    events.push(Event::error("Build.UnknownPlugin", format!("unknown plugin '{}'", plugin_name)));
                    continue;
                }
            };
            let mut manifest = FileManifest::new(output_root.join(artifact_name));
            let mut context = PluginContext {
                projected_model: &model,
                original_model: base_model,
                events: &events,
                settings,
                projection_name: name,
                manifest: &mut manifest,
            };
            if let Err(plugin_events) = plugin.execute(&mut context) {
                events.extend(plugin_events);
            } else {
                artifacts.extend(manifest.written_files().iter().cloned());
            }
        }
    }

    let success = !events.iter().any(|e| e.severity() >= smithy_core::model::diagnostics::Severity::Error);
    sort_events(&mut events);
    ProjectionResult {
        name: name.to_string(),
        success,
        model,
        artifacts,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_projection_is_always_present() {
        let config = BuildConfig::parse(r#"{"version": "1.0"}"#).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let result = run_build(&config, dir.path()).unwrap();
        assert!(result.projections.iter().any(|p| p.name == SOURCE_PROJECTION_NAME));
    }
}
