//! Integration tests for drack-common crate.

use drack_common::{format_number, truncate_string, DrackError, LogFormat, LoggingConfig, UserId};

#[test]
fn test_user_id_display_and_parse() {
    let user_id = UserId(987654321);
    assert_eq!(format!("{}", user_id), "987654321");
    assert_eq!(" 987654321 ".parse::<UserId>().unwrap(), user_id);
    assert!("not-a-snowflake".parse::<UserId>().is_err());
    assert!(UserId::default().is_unset());
}

#[test]
fn test_user_id_serializes_as_number() {
    let json = serde_json::to_string(&UserId(42)).unwrap();
    assert_eq!(json, "42");
}

#[test]
fn test_error_messages() {
    let error = DrackError::config("OWNER_ID is missing");
    assert_eq!(error.to_string(), "Configuration error: OWNER_ID is missing");
}

#[test]
fn test_logging_config_from_json() {
    let config: LoggingConfig =
        serde_json::from_str(r#"{"level": "debug", "format": "compact", "file_path": "logs/bot.log"}"#)
            .unwrap();
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.file_path.unwrap().to_str(), Some("logs/bot.log"));
}

#[test]
fn test_display_helpers() {
    assert_eq!(format_number(2_500), "2,500");
    assert_eq!(truncate_string("Short", 20), "Short");
}
