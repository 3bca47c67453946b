//! The render pipeline behind the CLI commands.

use std::path::PathBuf;

use redis_conf::config::loader::{parse_assignment, Assignment, ConfigError};
use redis_conf::config::schema::{OutputFormat, RenderConfig};
use redis_conf::config::{ConfigEntry, ConfigValue, ValidationError};
use redis_conf::output::{
    build_table, render_directive, render_output, OutputError, RenderRequest, HEADER,
};

fn config_with(src: &str) -> RenderConfig {
    toml::from_str(src).unwrap()
}

fn assignments(raw: &[&str]) -> Vec<Assignment> {
    raw.iter().map(|r| parse_assignment(r).unwrap()).collect()
}

#[test]
fn test_default_render_has_header_and_stdout() {
    let rendered = render_output(&RenderConfig::default(), &RenderRequest::default()).unwrap();

    assert!(rendered.text.starts_with(HEADER));
    assert!(rendered.text.ends_with("aof-rewrite-incremental-fsync yes\n"));
    assert_eq!(rendered.destination, None);
    assert_eq!(rendered.entries, 43);
}

#[test]
fn test_header_suppression() {
    let request = RenderRequest {
        no_header: true,
        ..Default::default()
    };
    let rendered = render_output(&RenderConfig::default(), &request).unwrap();
    assert!(rendered.text.starts_with("smr-local-port -1\n"));

    let config = config_with("[output]\nheader = false\n");
    let rendered = render_output(&config, &RenderRequest::default()).unwrap();
    assert!(!rendered.text.starts_with('#'));
}

#[test]
fn test_format_flag_beats_file() {
    let config = config_with("[output]\nformat = \"json\"\n");

    let from_file = render_output(&config, &RenderRequest::default()).unwrap();
    let entries: Vec<ConfigEntry> = serde_json::from_str(&from_file.text).unwrap();
    assert_eq!(entries.len(), 43);
    assert_eq!(entries[2], ConfigEntry::new("cronsave", ConfigValue::list(["0 3"])));

    let request = RenderRequest {
        format: Some(OutputFormat::Conf),
        no_header: true,
        ..Default::default()
    };
    let from_flag = render_output(&config, &request).unwrap();
    assert!(from_flag.text.starts_with("smr-local-port -1\n"));
}

#[test]
fn test_output_flag_beats_file() {
    let config = config_with("[output]\npath = \"/etc/redis/from-file.conf\"\n");

    let rendered = render_output(&config, &RenderRequest::default()).unwrap();
    assert_eq!(rendered.destination, Some(PathBuf::from("/etc/redis/from-file.conf")));

    let request = RenderRequest {
        output: Some(PathBuf::from("/tmp/from-flag.conf")),
        ..Default::default()
    };
    let rendered = render_output(&config, &request).unwrap();
    assert_eq!(rendered.destination, Some(PathBuf::from("/tmp/from-flag.conf")));
}

#[test]
fn test_assignments_apply_after_file() {
    let config = config_with("[overrides]\nport = 7009\ndir = \"/data/7009\"\n");
    let table = build_table(&config, &assignments(&["port=7010", "maxclients=10000"])).unwrap();

    assert_eq!(table.lookup("port").unwrap().value, ConfigValue::scalar("7010"));
    assert_eq!(table.lookup("dir").unwrap().value, ConfigValue::scalar("/data/7009"));
    assert_eq!(table.keys().last(), Some("maxclients"));
}

#[test]
fn test_append_assignment_extends_list() {
    let table = build_table(
        &RenderConfig::default(),
        &assignments(&["client-output-buffer-limit+=replica 512mb 128mb 60"]),
    )
    .unwrap();

    let units = table
        .lookup("client-output-buffer-limit")
        .and_then(|e| e.value.as_list())
        .unwrap();
    assert_eq!(units.len(), 4);
    assert_eq!(units[3], "replica 512mb 128mb 60");
}

#[test]
fn test_set_replaces_whole_list() {
    let table = build_table(
        &RenderConfig::default(),
        &assignments(&["client-output-buffer-limit=normal 0 0 0"]),
    )
    .unwrap();
    assert_eq!(
        table.lookup("client-output-buffer-limit").unwrap().value,
        ConfigValue::scalar("normal 0 0 0")
    );
}

#[test]
fn test_padded_assignment_renders_single_space() {
    let request = RenderRequest {
        assignments: assignments(&["port= 7009"]),
        no_header: true,
        ..Default::default()
    };
    let rendered = render_output(&RenderConfig::default(), &request).unwrap();
    assert!(rendered.text.contains("\nport 7009\n"));
}

#[test]
fn test_blank_assignment_rejected() {
    let err = build_table(&RenderConfig::default(), &assignments(&["dir= "])).unwrap_err();
    match err {
        OutputError::Config(ConfigError::Validation(errors)) => {
            assert_eq!(errors, vec![ValidationError::EmptyScalar { key: "dir".into() }])
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_get_directive() {
    let config = config_with("[overrides]\ncronsave = [[0, 3], [30, 4]]\n");

    assert_eq!(
        render_directive(&config, "cronsave").unwrap().as_deref(),
        Some("cronsave 0 3\ncronsave 30 4")
    );
    assert_eq!(render_directive(&config, "maxmemory").unwrap(), None);
}
