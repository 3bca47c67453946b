//! Structural validation of directive entries.
//!
//! # Responsibilities
//! - Reject entries the target parser could not read back as one directive
//! - Collect every violation instead of stopping at the first
//!
//! Whether a value makes sense for Redis (e.g. `hz 0`) is not checked here.

use thiserror::Error;

use crate::config::schema::{ConfigEntry, ConfigValue};

/// A structural defect in a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("entry #{index}: empty key")]
    EmptyKey { index: usize },

    #[error("entry #{index}: key {key:?} contains whitespace or control characters")]
    InvalidKey { index: usize, key: String },

    #[error("entry #{index}: key {key:?} starts with `#` and would render as a comment")]
    CommentKey { index: usize, key: String },

    #[error("`{key}`: empty scalar, write it as \"\"")]
    EmptyScalar { key: String },

    #[error("`{key}`: list has no values")]
    EmptyList { key: String },

    #[error("`{key}`: list value #{position} is empty")]
    EmptyListItem { key: String, position: usize },

    #[error("`{key}`: value contains a line break")]
    LineBreak { key: String },

    #[error("`{key}`: value {value:?} has leading or trailing whitespace")]
    SurroundingWhitespace { key: String, value: String },
}

/// Validate one entry at `index`, appending any violations to `errors`.
pub fn check_entry(index: usize, entry: &ConfigEntry, errors: &mut Vec<ValidationError>) {
    let key = &entry.key;

    if key.is_empty() {
        errors.push(ValidationError::EmptyKey { index });
    } else if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        errors.push(ValidationError::InvalidKey {
            index,
            key: key.clone(),
        });
    } else if key.starts_with('#') {
        errors.push(ValidationError::CommentKey {
            index,
            key: key.clone(),
        });
    }

    match &entry.value {
        ConfigValue::Scalar(value) => {
            if value.trim().is_empty() {
                errors.push(ValidationError::EmptyScalar { key: key.clone() });
            } else {
                check_token(key, value, errors);
            }
        }
        ConfigValue::List(units) => {
            if units.is_empty() {
                errors.push(ValidationError::EmptyList { key: key.clone() });
            }
            for (position, unit) in units.iter().enumerate() {
                if unit.trim().is_empty() {
                    errors.push(ValidationError::EmptyListItem {
                        key: key.clone(),
                        position,
                    });
                } else {
                    check_token(key, unit, errors);
                }
            }
        }
    }
}

/// Validate a sequence of entries. Pure: reports, never repairs.
pub fn validate_entries(entries: &[ConfigEntry]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        check_entry(index, entry, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// Only single spaces may separate key and value on the rendered line.
fn check_token(key: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.contains('\n') || value.contains('\r') {
        errors.push(ValidationError::LineBreak { key: key.to_string() });
    } else if value.trim() != value {
        errors.push(ValidationError::SurroundingWhitespace {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}
