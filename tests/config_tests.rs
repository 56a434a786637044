//! Tests for loading `ServiceConfig` from YAML files on disk

use invoices::config::{DATABASE_URL_ENV, PORT_ENV, ServiceConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(yaml.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
server:
  host: 0.0.0.0
  port: 8080
database:
  url: postgres://postgres:postgres@db/invoices
  max_connections: 10
listing_path: /billing/invoices
event_bus_capacity: 64
"#,
    );

    let config = ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.server.address(), "0.0.0.0:8080");
    assert_eq!(
        config.database.url.as_deref(),
        Some("postgres://postgres:postgres@db/invoices")
    );
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.listing_path, "/billing/invoices");
    assert_eq!(config.event_bus_capacity, 64);
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = write_config("{}\n");

    let config = ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config, ServiceConfig::default());
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    assert!(ServiceConfig::from_yaml_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_malformed_yaml_fails() {
    let file = write_config("server: [not, a, map]\n");

    assert!(ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_invalid_listing_path_in_file_fails() {
    let file = write_config("listing_path: invoices\n");

    let err = ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("listing_path"));
}

#[test]
fn test_overrides_win_over_file() {
    let file = write_config("server:\n  port: 8080\ndatabase:\n  url: postgres://file/db\n");

    let config = ServiceConfig::from_yaml_file(file.path().to_str().unwrap())
        .unwrap()
        .with_overrides(|key| match key {
            k if k == DATABASE_URL_ENV => Some("postgres://env/db".to_string()),
            k if k == PORT_ENV => Some("9090".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.database.url.as_deref(), Some("postgres://env/db"));
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "127.0.0.1");
}
