//! Rendering of directive entries to `redis.conf` text.
//!
//! # Responsibilities
//! - Serialize one entry as `<key> <value>` line(s)
//! - Decide, per directive, how list values are expanded
//! - Assemble a complete configuration file
//!
//! # Design Decisions
//! - Scalars are written verbatim; quoting lives in the data
//! - Repeatable directives get one line per value, everything else one line
//! - Output is deterministic: same entry, same bytes

use crate::config::schema::{ConfigEntry, ConfigValue};

/// How a list-valued directive is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// One `<key> <unit>` line per unit.
    Repeated,
    /// A single `<key> <unit> <unit> ...` line.
    Composite,
}

/// Directives the server accepts several times, each occurrence adding
/// a rule rather than replacing the previous one.
const REPEATED_DIRECTIVES: &[&str] = &[
    "cronsave",
    "client-output-buffer-limit",
    "save",
    "rename-command",
    "include",
];

pub fn list_style(key: &str) -> ListStyle {
    if REPEATED_DIRECTIVES.contains(&key) {
        ListStyle::Repeated
    } else {
        ListStyle::Composite
    }
}

/// Render one entry. Repeated directives produce `\n`-separated lines
/// without a trailing newline.
pub fn render(entry: &ConfigEntry) -> String {
    match &entry.value {
        ConfigValue::Scalar(value) => format!("{} {}", entry.key, value),
        ConfigValue::List(units) => match list_style(&entry.key) {
            ListStyle::Repeated => units
                .iter()
                .map(|unit| format!("{} {}", entry.key, unit))
                .collect::<Vec<_>>()
                .join("\n"),
            ListStyle::Composite => format!("{} {}", entry.key, units.join(" ")),
        },
    }
}

/// Render a whole configuration file, one directive per line, ending in a
/// newline. An empty sequence renders as an empty string.
pub fn render_document<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a ConfigEntry>,
{
    let mut out = String::new();
    for entry in entries {
        out.push_str(&render(entry));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        assert_eq!(render(&ConfigEntry::new("port", "-1")), "port -1");
    }

    #[test]
    fn test_quoted_empty_kept_literally() {
        assert_eq!(render(&ConfigEntry::new("save", "\"\"")), "save \"\"");
    }

    #[test]
    fn test_repeated_list() {
        let entry = ConfigEntry::new("cronsave", ConfigValue::list(["0 3", "30 4"]));
        assert_eq!(render(&entry), "cronsave 0 3\ncronsave 30 4");
    }

    #[test]
    fn test_composite_list() {
        let entry = ConfigEntry::new("bind", ConfigValue::list(["127.0.0.1", "::1"]));
        assert_eq!(list_style("bind"), ListStyle::Composite);
        assert_eq!(render(&entry), "bind 127.0.0.1 ::1");
    }

    #[test]
    fn test_document() {
        let entries = vec![
            ConfigEntry::new("daemonize", "yes"),
            ConfigEntry::new("save", ConfigValue::list(["900 1", "300 10"])),
        ];
        assert_eq!(
            render_document(&entries),
            "daemonize yes\nsave 900 1\nsave 300 10\n"
        );
        assert_eq!(render_document(&[] as &[ConfigEntry]), "");
    }
}
