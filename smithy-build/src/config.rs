/*!
The JSON build configuration: `version`, `sources`, `imports`,
`outputDirectory`, named `projections`, and `plugins`, read with `serde`
the way `smithy-json` reads the JSON AST. Settings objects (transform
arguments, plugin settings) are kept as raw [`serde_json::Value`] and
parsed lazily by the transform/plugin registries, since their shape
depends on which transform or plugin they belong to.
*/

use serde::Deserialize;
use serde_json::Value;
use smithy_core::error::{ErrorKind, Result};
use std::collections::BTreeMap;
use std::env;

/// A parsed `smithy-build.json` document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub version: String,
    #[serde(default)]
    pub output_directory: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub projections: BTreeMap<String, ProjectionConfig>,
    #[serde(default)]
    pub plugins: BTreeMap<String, Value>,
    #[serde(default)]
    pub ignore_missing_plugins: bool,
    /// Opaque to the core; carried through untouched for tooling that reads it.
    #[serde(default)]
    pub maven: Option<Value>,
}

/// One named pipeline: an ordered transform list plus per-plugin settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectionConfig {
    #[serde(default)]
    pub r#abstract: bool,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub transforms: Vec<TransformConfig>,
    #[serde(default)]
    pub plugins: BTreeMap<String, Value>,
}

/// A single transform's name and its settings object, exactly as it
/// appears in the config (`{"name": "...", "args": {...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    pub name: String,
    #[serde(default = "default_args")]
    pub args: Value,
}

fn default_args() -> Value {
    Value::Object(serde_json::Map::new())
}

impl BuildConfig {
    /// Parse a build configuration document, applying `${NAME}`
    /// environment interpolation to every string value first.
    pub fn parse(text: &str) -> Result<Self> {
        let interpolated = interpolate_env(text)?;
        serde_json::from_str(&interpolated).map_err(|e| ErrorKind::BuildConfig(e.to_string()).into())
    }

    /// The directory every projection's artifacts are written under.
    pub fn output_directory(&self) -> &str {
        self.output_directory.as_deref().unwrap_or("build/smithy")
    }
}

/// Expands `${NAME}` references against the process environment and
/// unescapes `$$` to a literal `$`. An unresolved `${NAME}` (the
/// variable isn't set) is a `BuildConfig` error rather than being left
/// in place or silently emptied, since a build config that depends on
/// an unset variable is effectively malformed.
pub fn interpolate_env(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(ErrorKind::BuildConfig(format!("unterminated '${{{}'", name)).into());
                }
                let value = env::var(&name).map_err(|_| ErrorKind::BuildConfig(format!("environment variable '{}' is not set", name)))?;
                out.push_str(&value);
            }
            _ => out.push('$'),
        }
    }
    Ok(out)
}

/// Naming constraint shared by projection names, plugin names, and
/// artifact names: `[A-Za-z0-9][A-Za-z0-9_.-]*`.
pub fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_env_substitutes_and_escapes() {
        std::env::set_var("SMITHY_BUILD_TEST_VAR", "value");
        let result = interpolate_env("prefix-${SMITHY_BUILD_TEST_VAR}-$$literal").unwrap();
        assert_eq!(result, "prefix-value-$literal");
    }

    #[test]
    fn interpolate_env_rejects_unset_variable() {
        assert!(interpolate_env("${SMITHY_BUILD_DEFINITELY_UNSET}").is_err());
    }

    #[test]
    fn parses_minimal_config() {
        let config = BuildConfig::parse(r#"{"version": "1.0"}"#).unwrap();
        assert_eq!(config.version, "1.0");
        assert!(config.projections.is_empty());
    }

    #[test]
    fn validates_projection_plugin_artifact_names() {
        assert!(is_valid_name("my-projection"));
        assert!(is_valid_name("a"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("-leading-dash"));
        assert!(!is_valid_name("has space"));
    }
}
