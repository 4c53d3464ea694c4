//! Override file text format
//!
//! The override file is relaxed JSON: unquoted keys, comments and trailing
//! commas are accepted when reading. It is always written back as plain
//! pretty-printed JSON with opening braces kept on the key's line, which
//! the relaxed reader accepts as well.

use crate::merge::deep_merge;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use types::ConfigError;

/// File name of the override file inside the base directory
pub const CONFIG_FILE_NAME: &str = "survev-config.hjson";

/// A partial configuration: any subset of the configuration keys
///
/// Keys unknown to the schema are kept so they survive a save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialConfig(Map<String, Value>);

impl PartialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON tree, which must be an object
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(ConfigError::ParseError(format!(
                "expected a mapping at the top level, found {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set a top-level key
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Look up a nested value by key path
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.0.get(*first)?, |value, key| value.get(key))
    }

    /// Deep merge another partial config on top of this one
    pub fn merge(&mut self, patch: &PartialConfig) {
        let mut merged = Value::Object(std::mem::take(&mut self.0));
        deep_merge(&mut merged, &Value::Object(patch.0.clone()));
        if let Value::Object(map) = merged {
            self.0 = map;
        }
    }
}

impl From<Map<String, Value>> for PartialConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Parse override file text
pub fn parse(text: &str) -> Result<PartialConfig, ConfigError> {
    if text.trim().is_empty() {
        return Ok(PartialConfig::default());
    }

    let value: Value =
        json5::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    PartialConfig::from_value(value)
}

/// Serialize a partial config to override file text
pub fn serialize(config: &PartialConfig) -> Result<String, ConfigError> {
    let mut text = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize override: {}", e)))?;
    text.push('\n');
    Ok(text)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
