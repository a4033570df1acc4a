/*!
Plugins: artifact-producing steps that consume a projected [`Model`] and
write files through a [`FileManifest`]. Two built-ins are provided —
`model` (writes the projected model as JSON AST) and `build-info`
(writes a small manifest describing the projection that produced it).
*/

use crate::manifest::FileManifest;
use serde_json::Value;
use smithy_core::model::diagnostics::Event;
use smithy_core::model::Model;

/// Everything a plugin needs to produce its artifact.
pub struct PluginContext<'a> {
    /// The model after this projection's transforms have run.
    pub projected_model: &'a Model,
    /// The model as originally assembled, before any projection ran.
    pub original_model: &'a Model,
    /// Every diagnostic event raised assembling and validating the
    /// projected model.
    pub events: &'a [Event],
    /// This plugin's settings object, from the build config.
    pub settings: &'a Value,
    /// The projection this plugin is running under.
    pub projection_name: &'a str,
    /// Scoped file writer for this plugin's artifact.
    pub manifest: &'a mut FileManifest,
}

/// Outcome of running a plugin: success, or the `ERROR` events
/// explaining why it refused to — the same discipline
/// `smithy_transform::TransformResult` uses for transform failures.
pub type PluginResult = Result<(), Vec<Event>>;

/// A named, artifact-producing build step.
pub trait Plugin {
    /// The plugin's name, as used in build configuration and artifact IDs.
    fn name(&self) -> &'static str;

    /// `true` if this plugin needs exclusive access to shared state (e.g.
    /// a single global output directory written by an external tool) and
    /// so must never run concurrently with another serial plugin's
    /// projection. Parallel is the default; most plugins only touch
    /// their own scoped `FileManifest`.
    fn is_serial(&self) -> bool {
        false
    }

    /// Produce this plugin's artifact.
    fn execute(&self, context: &mut PluginContext<'_>) -> PluginResult;
}

/// Writes the projected model as JSON AST to `model.json`.
pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn name(&self) -> &'static str {
        "model"
    }

    fn execute(&self, context: &mut PluginContext<'_>) -> PluginResult {
        let text = smithy_json::write_model(context.projected_model);
        context
            .manifest
            .write("model.json", text)
            .map_err(|e| vec![Event::error("Plugin.WriteFailed", e.to_string())])
    }
}

/// Writes `build-info.json`: the projection name, shape count, and
/// validation event count, for tooling that inspects build output
/// without re-running the pipeline.
pub struct BuildInfoPlugin;

impl Plugin for BuildInfoPlugin {
    fn name(&self) -> &'static str {
        "build-info"
    }

    fn execute(&self, context: &mut PluginContext<'_>) -> PluginResult {
        let info = serde_json::json!({
            "projectionName": context.projection_name,
            "shapeCount": context.projected_model.len(),
            "eventCount": context.events.len(),
        });
        let text = serde_json::to_string_pretty(&info).unwrap_or_else(|_| "{}".to_string());
        context
            .manifest
            .write("build-info.json", text)
            .map_err(|e| vec![Event::error("Plugin.WriteFailed", e.to_string())])
    }
}

/// Resolves a plugin by name. `ignore_missing` controls whether an
/// unknown plugin name is tolerated (per `ignoreMissingPlugins` in the
/// build config) or treated as a configuration error by the caller.
pub fn builtin_plugin(name: &str) -> Option<Box<dyn Plugin>> {
    match name {
        "model" => Some(Box::new(ModelPlugin)),
        "build-info" => Some(Box::new(BuildInfoPlugin)),
        _ => None,
    }
}
