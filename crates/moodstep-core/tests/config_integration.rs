//! Integration tests for configuration persistence.

use moodstep_core::{Config, WeekStart};
use tempfile::TempDir;

#[test]
fn test_config_roundtrip_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::load_from(&path).unwrap();
    config.set("week.starts_on", "monday").unwrap();
    config.set("streak.count_today_pending", "false").unwrap();
    config
        .set(
            "resolver.custom_actions",
            r#"{"Practice piano": {"medium": "Play one scale", "low": "Open the piano lid"}}"#,
        )
        .unwrap();
    config.save_to(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("starts_on = \"monday\""));
    assert!(written.contains("Practice piano"));

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.week.starts_on, WeekStart::Monday);
    assert_eq!(loaded.get("streak.count_today_pending").as_deref(), Some("false"));
    assert_eq!(
        loaded.get("resolver.custom_actions.Practice piano.low").as_deref(),
        Some("Open the piano lid")
    );
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[streak]\ncount_today_pending = false\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.streak.count_today_pending);
    assert_eq!(config.week.starts_on, WeekStart::Sunday);
    assert!(config.resolver.custom_actions.is_empty());
}

#[test]
fn test_invalid_toml_is_reported_not_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "week = [").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to load configuration"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "week = [");
}
