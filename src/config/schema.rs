//! Configuration schema definitions.
//!
//! Two families of types live here:
//! - `ConfigEntry` / `ConfigValue`: one Redis directive and its value
//! - `RenderConfig`: the optional TOML file that drives the `redis-conf` CLI
//!
//! All types derive Serde traits so the table can be exported as JSON and the
//! render settings can be read from disk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a single directive.
///
/// Scalars are written verbatim, so any quoting the target parser needs
/// (for instance `""` for an empty value) is part of the string itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// One literal token, e.g. `everysec`.
    Scalar(String),
    /// Several literal units, e.g. the three `client-output-buffer-limit` classes.
    List(Vec<String>),
}

impl ConfigValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        ConfigValue::Scalar(value.into())
    }

    pub fn list<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigValue::List(units.into_iter().map(Into::into).collect())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ConfigValue::Scalar(s) => Some(s),
            ConfigValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::Scalar(_) => None,
            ConfigValue::List(units) => Some(units),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Scalar(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Scalar(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(units: Vec<String>) -> Self {
        ConfigValue::List(units)
    }
}

/// A named directive of the target store's configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ConfigEntry {
    /// Directive name, case-sensitive (e.g. `slowlog-max-len`).
    pub key: String,

    /// Default value.
    pub value: ConfigValue,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(self))
    }
}

/// Root of the render-config file read by the CLI.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// Where and how the rendered file is written.
    pub output: OutputConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Directive overrides, applied over the defaults in file order.
    pub overrides: toml::Table,
}

/// Output format of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `redis.conf` text.
    #[default]
    Conf,
    /// JSON array of entries.
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file. `None` writes to stdout.
    pub path: Option<String>,

    /// Prefix conf output with a generated-file comment.
    pub header: bool,

    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            header: true,
            format: OutputFormat::Conf,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}
