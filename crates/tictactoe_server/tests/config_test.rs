//! Tests for loading server configuration.

use std::io::Write;
use tictactoe_server::ServerConfig;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(*config.seed(), None);
    assert_eq!(*config.max_sessions(), 1024);
    assert_eq!(config.idle_timeout(), std::time::Duration::from_secs(1800));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("port = 8080\nseed = 7\n");
    let config = ServerConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8080);
    assert_eq!(*config.seed(), Some(7));
    assert_eq!(*config.max_sessions(), 1024);
}

#[test]
fn test_full_file() {
    let file = write_config(
        r#"
host = "0.0.0.0"
port = 9000
seed = 1
max_sessions = 16
idle_timeout_secs = 60
"#,
    );
    let config = ServerConfig::from_file(file.path()).expect("valid config");
    assert_eq!(
        config,
        ServerConfig::default()
            .with_host("0.0.0.0")
            .with_port(9000)
            .with_seed(1)
            .with_max_sessions(16)
            .with_idle_timeout_secs(60)
    );
}

#[test]
fn test_unknown_key_rejected() {
    let file = write_config("prot = 8080\n");
    let err = ServerConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_zero_sessions_rejected() {
    let file = write_config("max_sessions = 0\n");
    assert!(ServerConfig::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_rejected() {
    let err = ServerConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}
