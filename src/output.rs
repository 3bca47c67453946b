//! Render pipeline behind the `redis-conf` commands.
//!
//! # Responsibilities
//! - Merge file overrides, then command line assignments, over the defaults
//! - Resolve format, header and destination (command line beats file)
//! - Produce the final text; writing it is left to the caller
//!
//! # Design Decisions
//! - Assignments apply in order, so a later `key+=unit` sees an earlier `key=value`
//! - No I/O here, so every precedence rule is testable without a filesystem

use std::path::PathBuf;

use thiserror::Error;

use crate::config::defaults::{ConfigDefaults, DefaultsError};
use crate::config::loader::{appended, overrides_from_table, Assignment, ConfigError};
use crate::config::schema::{ConfigEntry, OutputFormat, RenderConfig};
use crate::render::{render, render_document};

pub const HEADER: &str =
    "# Generated by redis-conf. Local edits are overwritten on the next render.\n";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Defaults(#[from] DefaultsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Command line options of a render, each overriding the render config.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub assignments: Vec<Assignment>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub no_header: bool,
}

/// Result of a render: the text and where it should go (`None` = stdout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub text: String,
    pub destination: Option<PathBuf>,
    pub entries: usize,
}

/// Defaults with the file's `[overrides]` and then `assignments` applied.
pub fn build_table(
    config: &RenderConfig,
    assignments: &[Assignment],
) -> Result<ConfigDefaults, OutputError> {
    let mut table = ConfigDefaults::shared()?.clone();

    let overrides = overrides_from_table(&config.overrides)?;
    if !overrides.is_empty() {
        table = merge(&table, overrides)?;
    }

    for assignment in assignments {
        let entry = match assignment {
            Assignment::Set(entry) => entry.clone(),
            Assignment::Append { key, unit } => {
                let current = table.lookup(key).map(|e| &e.value);
                ConfigEntry::new(key.clone(), appended(current, unit))
            }
        };
        table = merge(&table, [entry])?;
    }

    Ok(table)
}

fn merge<I>(table: &ConfigDefaults, overrides: I) -> Result<ConfigDefaults, ConfigError>
where
    I: IntoIterator<Item = ConfigEntry>,
{
    table.with_overrides(overrides).map_err(ConfigError::Validation)
}

pub fn render_output(
    config: &RenderConfig,
    request: &RenderRequest,
) -> Result<RenderedOutput, OutputError> {
    let table = build_table(config, &request.assignments)?;

    let text = match request.format.unwrap_or(config.output.format) {
        OutputFormat::Conf => {
            let body = render_document(&table);
            if config.output.header && !request.no_header {
                format!("{HEADER}{body}")
            } else {
                body
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = table.entries().collect();
            let mut json = serde_json::to_string_pretty(&entries)?;
            json.push('\n');
            json
        }
    };

    let destination = request
        .output
        .clone()
        .or_else(|| config.output.path.as_ref().map(PathBuf::from));

    Ok(RenderedOutput {
        text,
        destination,
        entries: table.len(),
    })
}

/// Rendered directive for `key` after overrides, `None` if absent.
pub fn render_directive(config: &RenderConfig, key: &str) -> Result<Option<String>, OutputError> {
    let table = build_table(config, &[])?;
    Ok(table.lookup(key).map(render))
}
