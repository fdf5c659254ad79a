use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{level_to_log_level, log_level_to_level, parse_log_level};
use tempfile::tempdir;

#[test]
fn test_init_is_idempotent() {
    let config = LoggingConfig {
        level: LogLevel::Debug,
        format: LogFormat::Compact,
        file: None,
        stdout: true,
    };

    assert!(crate::logging::init(&config).is_ok());
    assert!(crate::logging::init(&config).is_ok());
}

#[test]
fn test_file_logging_creates_parent_directories() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("nested").join("linkup.log");

    let config = LoggingConfig {
        level: LogLevel::Info,
        format: LogFormat::Json,
        file: Some(log_path.clone()),
        stdout: false,
    };

    assert!(crate::logging::init(&config).is_ok());
    assert!(log_path.parent().unwrap().exists());
}

#[test]
fn test_level_conversion() {
    assert_eq!(parse_log_level("TRACE").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level("debug").unwrap(), LogLevel::Debug);
    assert_eq!(parse_log_level("info").unwrap(), LogLevel::Info);
    assert_eq!(parse_log_level("warn").unwrap(), LogLevel::Warn);
    assert_eq!(parse_log_level("error").unwrap(), LogLevel::Error);
    assert!(parse_log_level("invalid").is_err());

    for level in [
        tracing::Level::TRACE,
        tracing::Level::DEBUG,
        tracing::Level::INFO,
        tracing::Level::WARN,
        tracing::Level::ERROR,
    ] {
        assert_eq!(log_level_to_level(level_to_log_level(level)), level);
    }
}
