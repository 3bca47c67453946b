//! Default directive table for an nBase-ARC Redis server.
//!
//! # Responsibilities
//! - Hold the canonical default directives in declaration order
//! - Build an immutable, indexed `ConfigDefaults` from them
//! - Merge per-node overrides into a new table
//!
//! # Design Decisions
//! - Duplicate keys fail the load instead of picking a winner
//! - Declaration order is output order
//! - The process-wide instance is initialized once via `OnceLock`

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use crate::config::schema::{ConfigEntry, ConfigValue};
use crate::config::validation::{check_entry, ValidationError};

/// Embedded value shape, before conversion to owned entries.
enum Raw {
    Scalar(&'static str),
    List(&'static [&'static str]),
}

use Raw::{List, Scalar};

const DEFAULTS: &[(&str, Raw)] = &[
    ("smr-local-port", Scalar("-1")),
    ("port", Scalar("-1")),
    ("cronsave", List(&["0 3"])),
    // general
    ("daemonize", Scalar("yes")),
    ("pidfile", Scalar("redis.pid")),
    ("timeout", Scalar("0")),
    ("tcp-keepalive", Scalar("60")),
    ("loglevel", Scalar("notice")),
    ("logfile", Scalar("redis.log")),
    ("databases", Scalar("1")),
    // snapshotting, point-in-time saves disabled
    ("save", Scalar("\"\"")),
    ("seqsave", Scalar("500")),
    ("stop-writes-on-bgsave-error", Scalar("no")),
    ("rdbcompression", Scalar("yes")),
    ("rdbchecksum", Scalar("yes")),
    ("dbfilename", Scalar("dump.rdb")),
    ("number-of-rdb-backups", Scalar("0")),
    ("dir", Scalar("./")),
    // replication
    ("slave-serve-stale-data", Scalar("yes")),
    ("slave-read-only", Scalar("yes")),
    ("repl-disable-tcp-nodelay", Scalar("no")),
    ("slave-priority", Scalar("100")),
    // append only mode
    ("appendonly", Scalar("no")),
    ("appendfilename", Scalar("\"appendonly.aof\"")),
    ("appendfsync", Scalar("everysec")),
    ("no-appendfsync-on-rewrite", Scalar("no")),
    ("auto-aof-rewrite-percentage", Scalar("100")),
    ("auto-aof-rewrite-min-size", Scalar("64mb")),
    // lua
    ("lua-time-limit", Scalar("5000")),
    // slow log
    ("slowlog-log-slower-than", Scalar("10000")),
    ("slowlog-max-len", Scalar("128")),
    // keyspace notifications
    ("notify-keyspace-events", Scalar("\"\"")),
    // advanced
    ("hash-max-ziplist-entries", Scalar("512")),
    ("hash-max-ziplist-value", Scalar("64")),
    ("list-max-ziplist-entries", Scalar("512")),
    ("list-max-ziplist-value", Scalar("64")),
    ("set-max-intset-entries", Scalar("512")),
    ("zset-max-ziplist-entries", Scalar("128")),
    ("zset-max-ziplist-value", Scalar("64")),
    ("activerehashing", Scalar("yes")),
    (
        "client-output-buffer-limit",
        List(&["normal 0 0 0", "pubsub 32mb 8mb 60", "slave 256mb 64mb 60"]),
    ),
    ("hz", Scalar("10")),
    ("aof-rewrite-incremental-fsync", Scalar("yes")),
];

/// Errors raised while building a directive table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefaultsError {
    /// One or more entries are structurally invalid.
    #[error("malformed defaults: {}", join_errors(.0))]
    Malformed(Vec<ValidationError>),

    /// The same key is declared twice.
    #[error("duplicate key `{key}` at entries #{first} and #{second}")]
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

static SHARED: OnceLock<ConfigDefaults> = OnceLock::new();

/// Immutable, ordered table of default directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDefaults {
    entries: Vec<ConfigEntry>,
    index: HashMap<String, usize>,
}

impl ConfigDefaults {
    /// Build the table from the embedded defaults.
    pub fn load() -> Result<Self, DefaultsError> {
        let entries = DEFAULTS.iter().map(|(key, raw)| {
            let value = match raw {
                Scalar(value) => ConfigValue::scalar(*value),
                List(units) => ConfigValue::list(units.iter().copied()),
            };
            ConfigEntry::new(*key, value)
        });

        let defaults = Self::from_entries(entries)?;
        tracing::debug!(entries = defaults.len(), "Default directive table loaded");
        Ok(defaults)
    }

    /// Process-wide table, loaded on first use.
    pub fn shared() -> Result<&'static Self, DefaultsError> {
        if let Some(defaults) = SHARED.get() {
            return Ok(defaults);
        }
        let loaded = Self::load()?;
        Ok(SHARED.get_or_init(|| loaded))
    }

    /// Build a table from arbitrary entries, rejecting malformed entries and
    /// duplicate keys.
    pub fn from_entries<I>(entries: I) -> Result<Self, DefaultsError>
    where
        I: IntoIterator<Item = ConfigEntry>,
    {
        let entries: Vec<ConfigEntry> = entries.into_iter().collect();

        let mut errors = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            check_entry(i, entry, &mut errors);
        }
        if !errors.is_empty() {
            return Err(DefaultsError::Malformed(errors));
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if let Some(&first) = index.get(&entry.key) {
                return Err(DefaultsError::DuplicateKey {
                    key: entry.key.clone(),
                    first,
                    second: i,
                });
            }
            index.insert(entry.key.clone(), i);
        }

        Ok(Self { entries, index })
    }

    /// Entries in declaration order. Every call starts from the first entry.
    pub fn entries(&self) -> std::slice::Iter<'_, ConfigEntry> {
        self.entries.iter()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn lookup(&self, key: &str) -> Option<&ConfigEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return a new table with `overrides` applied.
    ///
    /// An override of a known key replaces its value in place; unknown keys
    /// are appended in the order given. When a key is overridden more than
    /// once, the last value wins.
    pub fn with_overrides<I>(&self, overrides: I) -> Result<Self, Vec<ValidationError>>
    where
        I: IntoIterator<Item = ConfigEntry>,
    {
        let mut merged = self.clone();
        let mut errors = Vec::new();

        for (i, entry) in overrides.into_iter().enumerate() {
            check_entry(i, &entry, &mut errors);
            if !errors.is_empty() {
                continue;
            }

            match merged.index.get(&entry.key) {
                Some(&pos) => {
                    tracing::debug!(key = %entry.key, "Override replaces directive");
                    merged.entries[pos].value = entry.value;
                }
                None => {
                    tracing::debug!(key = %entry.key, "Override appends directive");
                    merged.index.insert(entry.key.clone(), merged.entries.len());
                    merged.entries.push(entry);
                }
            }
        }

        if errors.is_empty() {
            Ok(merged)
        } else {
            Err(errors)
        }
    }
}

impl<'a> IntoIterator for &'a ConfigDefaults {
    type Item = &'a ConfigEntry;
    type IntoIter = std::slice::Iter<'a, ConfigEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}
