//! Default Redis configuration for nBase-ARC nodes.
//!
//! Holds the default directive table, merges per-node overrides into it and
//! renders the result as `redis.conf` text.

pub mod config;
pub mod observability;
pub mod output;
pub mod render;

pub use config::{ConfigDefaults, ConfigEntry, ConfigValue};
pub use render::render;
