//! Layered configuration property source.
//!
//! Properties reach Cairn through three layers, lowest to highest priority:
//! an optional `cairn.yml` mapping file in the working directory, process
//! environment variables (`CAIRN_SERVER_URL` binds to `cairn.server.url`),
//! and `--cairn.key=value` command-line tokens. The winning layer is
//! recorded so options can report where their value came from.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::error::{CairnError, Result};

/// Where a property value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyOrigin {
    /// Built-in default (no layer supplied a value).
    Default,
    /// The `cairn.yml` property file.
    File,
    /// A `CAIRN_*` environment variable.
    Environment,
    /// A `--cairn.key=value` command-line token.
    CommandLine,
    /// Set during interactive configuration editing.
    Interactive,
}

impl PropertyOrigin {
    /// Short label used when printing the configuration.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyOrigin::Default => "default",
            PropertyOrigin::File => "file",
            PropertyOrigin::Environment => "env",
            PropertyOrigin::CommandLine => "cmd",
            PropertyOrigin::Interactive => "interactive",
        }
    }
}

/// One layer of properties.
#[derive(Debug, Clone)]
struct PropertyLayer {
    origin: PropertyOrigin,
    values: HashMap<String, String>,
}

/// Layered property lookup with origin tracking.
///
/// Layers are ordered lowest to highest priority; the highest layer that
/// contains a key wins.
#[derive(Debug, Clone, Default)]
pub struct PropertySource {
    layers: Vec<PropertyLayer>,
}

impl PropertySource {
    /// Create an empty source (defaults only).
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a layer. Later layers have higher priority.
    pub fn push_layer(&mut self, origin: PropertyOrigin, values: HashMap<String, String>) {
        self.layers.push(PropertyLayer { origin, values });
    }

    /// Resolve a key to its value and winning origin.
    pub fn get(&self, key: &str) -> Option<(&str, PropertyOrigin)> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.values.get(key).map(|v| (v.as_str(), layer.origin)))
    }

    /// All keys present in any layer.
    pub fn keys(&self) -> BTreeSet<String> {
        self.layers
            .iter()
            .flat_map(|layer| layer.values.keys().cloned())
            .collect()
    }

    /// Build the process-level source: `cairn.yml` (if present), the
    /// process environment, and the argument list, in that priority order.
    pub fn from_process<S: AsRef<str>>(working_dir: &Path, args: &[S]) -> Result<Self> {
        let mut source = PropertySource::new();

        let file = working_dir.join("cairn.yml");
        if file.exists() {
            source.push_layer(PropertyOrigin::File, load_property_file(&file)?);
        }
        source.push_layer(PropertyOrigin::Environment, environment_properties());
        source.push_layer(PropertyOrigin::CommandLine, argument_properties(args));

        Ok(source)
    }
}

/// Load a flat `key: value` mapping from a YAML property file.
fn load_property_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)?;
    let parsed: HashMap<String, serde_yaml::Value> =
        serde_yaml::from_str(&content).map_err(|e| CairnError::ConfigProcessing {
            message: format!("failed to parse {}: {}", path.display(), e),
        })?;

    let mut values = HashMap::new();
    for (key, value) in parsed {
        let value = match value {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Null => String::new(),
            other => {
                return Err(CairnError::ConfigProcessing {
                    message: format!(
                        "property '{}' in {} must be a scalar, got {:?}",
                        key,
                        path.display(),
                        other
                    ),
                })
            }
        };
        values.insert(key, value);
    }
    Ok(values)
}

/// Collect `CAIRN_*` environment variables under relaxed binding:
/// `CAIRN_SERVER_URL` becomes `cairn.server.url`. `CAIRN_LOG` belongs to
/// the logging setup, not the option registry.
fn environment_properties() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("CAIRN_") && key != "CAIRN_LOG")
        .map(|(key, value)| (key.to_lowercase().replace('_', "."), value))
        .collect()
}

/// Collect `--cairn.key=value` tokens from the argument list.
///
/// Everything else (boot flags, stray tokens) belongs to other layers and
/// is ignored here.
fn argument_properties<S: AsRef<str>>(args: &[S]) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for arg in args {
        let arg = arg.as_ref();
        if let Some(rest) = arg.strip_prefix("--cairn.") {
            if let Some((key, value)) = rest.split_once('=') {
                values.insert(format!("cairn.{}", key), value.to_string());
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn higher_layers_override_lower() {
        let mut source = PropertySource::new();
        source.push_layer(PropertyOrigin::File, layer(&[("cairn.server.url", "file")]));
        source.push_layer(
            PropertyOrigin::Environment,
            layer(&[("cairn.server.url", "env")]),
        );

        assert_eq!(
            source.get("cairn.server.url"),
            Some(("env", PropertyOrigin::Environment))
        );
    }

    #[test]
    fn lower_layer_still_visible_for_other_keys() {
        let mut source = PropertySource::new();
        source.push_layer(
            PropertyOrigin::File,
            layer(&[("cairn.project.name", "api")]),
        );
        source.push_layer(
            PropertyOrigin::CommandLine,
            layer(&[("cairn.offline.mode", "true")]),
        );

        assert_eq!(
            source.get("cairn.project.name"),
            Some(("api", PropertyOrigin::File))
        );
        assert_eq!(source.get("missing"), None);
    }

    #[test]
    fn keys_span_all_layers() {
        let mut source = PropertySource::new();
        source.push_layer(PropertyOrigin::File, layer(&[("a", "1")]));
        source.push_layer(PropertyOrigin::Environment, layer(&[("b", "2")]));

        let keys = source.keys();
        assert!(keys.contains("a"));
        assert!(keys.contains("b"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn argument_properties_parse_key_value_tokens() {
        let values = argument_properties(&[
            "--cairn.server.url=https://cairn.example.com",
            "--help",
            "--cairn.offline.mode=true",
            "not-a-property",
        ]);

        assert_eq!(
            values.get("cairn.server.url").map(String::as_str),
            Some("https://cairn.example.com")
        );
        assert_eq!(
            values.get("cairn.offline.mode").map(String::as_str),
            Some("true")
        );
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn argument_properties_keep_equals_in_value() {
        let values = argument_properties(&["--cairn.server.api.token=abc=def"]);
        assert_eq!(
            values.get("cairn.server.api.token").map(String::as_str),
            Some("abc=def")
        );
    }

    #[test]
    fn property_file_scalars_are_stringified() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("cairn.yml");
        std::fs::write(
            &path,
            "cairn.server.url: https://cairn.example.com\ncairn.offline.mode: true\ncairn.server.timeout: 30\n",
        )
        .unwrap();

        let values = load_property_file(&path).unwrap();
        assert_eq!(
            values.get("cairn.offline.mode").map(String::as_str),
            Some("true")
        );
        assert_eq!(
            values.get("cairn.server.timeout").map(String::as_str),
            Some("30")
        );
    }

    #[test]
    fn property_file_rejects_nested_values() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("cairn.yml");
        std::fs::write(&path, "cairn.server:\n  url: nested\n").unwrap();

        let err = load_property_file(&path).unwrap_err();
        assert!(matches!(err, CairnError::ConfigProcessing { .. }));
    }

    #[test]
    fn from_process_without_file_has_env_and_args() {
        let temp = tempfile::TempDir::new().unwrap();
        let source =
            PropertySource::from_process(temp.path(), &["--cairn.project.name=demo"]).unwrap();
        assert_eq!(
            source.get("cairn.project.name"),
            Some(("demo", PropertyOrigin::CommandLine))
        );
    }
}
