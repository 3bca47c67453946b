//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! embedded table
//!     → defaults.rs (build ConfigDefaults, reject duplicates)
//!     → validation.rs (structural checks)
//!     → ConfigDefaults (immutable, shared via OnceLock)
//!
//! render config file (TOML) / --set key=value
//!     → loader.rs (parse, convert overrides)
//!     → ConfigDefaults::with_overrides (new table)
//!     → render.rs
//! ```
//!
//! # Design Decisions
//! - The table is immutable once loaded; overrides produce a new table
//! - All render-config fields have defaults to allow minimal files
//! - Validation is structural only; Redis semantics are the server's concern

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::{ConfigDefaults, DefaultsError};
pub use loader::ConfigError;
pub use schema::{ConfigEntry, ConfigValue, RenderConfig};
pub use validation::ValidationError;
