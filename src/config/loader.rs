//! Render-config loading from disk and from the command line.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ConfigEntry, ConfigValue, RenderConfig};
use crate::config::validation::{validate_entries, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{key}`: unsupported override value ({kind})")]
    UnsupportedValue { key: String, kind: &'static str },

    #[error("invalid assignment {0:?}, expected key=value or key+=unit")]
    Assignment(String),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a render config from a TOML file and check its overrides.
pub fn load_config(path: &Path) -> Result<RenderConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RenderConfig = toml::from_str(&content)?;

    let overrides = overrides_from_table(&config.overrides)?;
    validate_entries(&overrides).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Convert the `[overrides]` table into entries, in file order.
pub fn overrides_from_table(table: &toml::Table) -> Result<Vec<ConfigEntry>, ConfigError> {
    table
        .iter()
        .map(|(key, value)| value_from_toml(key, value).map(|v| ConfigEntry::new(key.clone(), v)))
        .collect()
}

/// Map a TOML value onto a directive value.
///
/// Strings, numbers and booleans (as `yes`/`no`) become scalars. Arrays
/// become lists, and a nested array such as `[0, 3]` becomes the single
/// unit `"0 3"`.
pub fn value_from_toml(key: &str, value: &toml::Value) -> Result<ConfigValue, ConfigError> {
    match value {
        toml::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                toml::Value::Array(parts) => parts
                    .iter()
                    .map(|part| token(key, part))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|parts| parts.join(" ")),
                other => token(key, other),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ConfigValue::List),
        other => token(key, other).map(ConfigValue::Scalar),
    }
}

fn token(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    let unsupported = |kind| ConfigError::UnsupportedValue {
        key: key.to_string(),
        kind,
    };

    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(true) => Ok("yes".to_string()),
        toml::Value::Boolean(false) => Ok("no".to_string()),
        toml::Value::Datetime(_) => Err(unsupported("datetime")),
        toml::Value::Array(_) => Err(unsupported("array nested too deep")),
        toml::Value::Table(_) => Err(unsupported("table")),
    }
}

/// A command line override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// `key=value`: replace the directive with a scalar.
    Set(ConfigEntry),
    /// `key+=unit`: add one unit to a list directive.
    Append { key: String, unit: String },
}

impl Assignment {
    pub fn key(&self) -> &str {
        match self {
            Assignment::Set(entry) => &entry.key,
            Assignment::Append { key, .. } => key,
        }
    }
}

/// Parse a `key=value` or `key+=unit` command line override. The value is
/// everything after the first `=`, trimmed; inner spaces are kept.
pub fn parse_assignment(raw: &str) -> Result<Assignment, ConfigError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::Assignment(raw.to_string()))?;

    let (key, append) = match key.strip_suffix('+') {
        Some(key) => (key.trim(), true),
        None => (key.trim(), false),
    };
    if key.is_empty() {
        return Err(ConfigError::Assignment(raw.to_string()));
    }

    let value = value.trim();
    if append {
        Ok(Assignment::Append {
            key: key.to_string(),
            unit: value.to_string(),
        })
    } else {
        Ok(Assignment::Set(ConfigEntry::new(key, value)))
    }
}

/// Value of `key` after appending `unit`. A scalar becomes the first unit
/// of the new list; an absent key starts a one-unit list.
pub fn appended(current: Option<&ConfigValue>, unit: &str) -> ConfigValue {
    let mut units = match current {
        Some(ConfigValue::List(units)) => units.clone(),
        Some(ConfigValue::Scalar(value)) => vec![value.clone()],
        None => Vec::new(),
    };
    units.push(unit.to_string());
    ConfigValue::List(units)
}
