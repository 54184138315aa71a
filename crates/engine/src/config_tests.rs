// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn defaults() {
    let config = ManagerConfig::default();
    assert_eq!(config.dedup_window, Duration::from_millis(5000));
    assert_eq!(config.cache_capacity, 50);
    assert_eq!(config.cache_max_age, Duration::from_secs(3600));
    assert_eq!(config.cache_key_prefix, "notifications_cache");
    assert_eq!(config.timer_check_interval, Duration::from_secs(1));
    assert_eq!(config.event_buffer, 256);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_document_keeps_defaults() {
    assert_eq!(
        ManagerConfig::from_toml_str("").unwrap(),
        ManagerConfig::default()
    );
}

#[test]
fn partial_document_overrides_only_given_keys() {
    let config = ManagerConfig::from_toml_str(
        r#"
        dedup_window_ms = 2000
        cache_key_prefix = "inbox"
        "#,
    )
    .unwrap();

    assert_eq!(config.dedup_window, Duration::from_millis(2000));
    assert_eq!(config.cache_key_prefix, "inbox");
    assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
}

#[test]
fn unknown_key_rejected() {
    let err = ManagerConfig::from_toml_str("dedup_window = 5").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[yare::parameterized(
    zero_window   = { "dedup_window_ms = 0" },
    zero_capacity = { "cache_capacity = 0" },
    zero_tick     = { "timer_check_ms = 0" },
    zero_buffer   = { "event_buffer = 0" },
    empty_prefix  = { "cache_key_prefix = \"\"" },
)]
fn invalid_values_rejected(doc: &str) {
    assert!(matches!(
        ManagerConfig::from_toml_str(doc),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
#[serial(env)]
fn load_missing_file_yields_defaults() {
    std::env::remove_var("INBOX_CACHE_CAPACITY");
    let dir = tempdir().unwrap();

    let config = ManagerConfig::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
}

#[test]
#[serial(env)]
fn env_overrides_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inbox.toml");
    std::fs::write(&path, "cache_capacity = 10\ndedup_window_ms = 1000\n").unwrap();
    std::env::set_var("INBOX_CACHE_CAPACITY", "25");

    let config = ManagerConfig::load(&path).unwrap();
    std::env::remove_var("INBOX_CACHE_CAPACITY");

    assert_eq!(config.cache_capacity, 25);
    assert_eq!(config.dedup_window, Duration::from_millis(1000));
}

#[test]
#[serial(env)]
fn env_override_can_invalidate() {
    let dir = tempdir().unwrap();
    std::env::set_var("INBOX_CACHE_CAPACITY", "0");

    let result = ManagerConfig::load(&dir.path().join("absent.toml"));
    std::env::remove_var("INBOX_CACHE_CAPACITY");

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn builders_chain() {
    let config = ManagerConfig::default()
        .with_dedup_window(Duration::from_millis(100))
        .with_cache_capacity(3)
        .with_cache_max_age(Duration::from_secs(5))
        .with_timer_check_interval(Duration::from_millis(10));

    assert_eq!(config.dedup_window, Duration::from_millis(100));
    assert_eq!(config.cache_capacity, 3);
    assert_eq!(config.cache_max_age, Duration::from_secs(5));
    assert_eq!(config.timer_check_interval, Duration::from_millis(10));
}
