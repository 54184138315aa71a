// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manager configuration.
//!
//! Layered as defaults, then an optional TOML document, then `INBOX_*`
//! environment overrides (see [`crate::env`]).

use crate::env;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_millis(5000);
pub const DEFAULT_CACHE_CAPACITY: usize = 50;
pub const DEFAULT_CACHE_MAX_AGE: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_CACHE_KEY_PREFIX: &str = "notifications_cache";
pub const DEFAULT_TIMER_CHECK_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// How long an admitted id suppresses re-admission
    pub dedup_window: Duration,
    /// Records kept in the persisted cache
    pub cache_capacity: usize,
    /// Oldest cache accepted at startup
    pub cache_max_age: Duration,
    /// Cache key prefix; the recipient id is appended
    pub cache_key_prefix: String,
    /// How often the event pump sweeps expired dedup entries
    pub timer_check_interval: Duration,
    /// Capacity of the channel between adapters and the pump
    pub event_buffer: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            dedup_window: DEFAULT_DEDUP_WINDOW,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            cache_key_prefix: DEFAULT_CACHE_KEY_PREFIX.to_string(),
            timer_check_interval: DEFAULT_TIMER_CHECK_INTERVAL,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

/// On-disk shape. Every key is optional; durations are milliseconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    dedup_window_ms: Option<u64>,
    cache_capacity: Option<usize>,
    cache_max_age_ms: Option<u64>,
    cache_key_prefix: Option<String>,
    timer_check_ms: Option<u64>,
    event_buffer: Option<usize>,
}

impl ManagerConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Parse a TOML document over the defaults and validate the result.
    ///
    /// Environment overrides are not applied; see [`ManagerConfig::load`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let config = Self::default().merge_file(file);
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, then apply environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => {
                let file: ConfigFile = toml::from_str(&content)?;
                Self::default().merge_file(file)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(window) = env::dedup_window_ms() {
            self.dedup_window = window;
        }
        if let Some(capacity) = env::cache_capacity() {
            self.cache_capacity = capacity;
        }
        if let Some(max_age) = env::cache_max_age_ms() {
            self.cache_max_age = max_age;
        }
        if let Some(interval) = env::timer_check_ms() {
            self.timer_check_interval = interval;
        }
        self
    }

    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window = window;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_cache_max_age(mut self, max_age: Duration) -> Self {
        self.cache_max_age = max_age;
        self
    }

    pub fn with_timer_check_interval(mut self, interval: Duration) -> Self {
        self.timer_check_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dedup_window.is_zero() {
            return Err(ConfigError::Invalid("dedup window must be non-zero".into()));
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid("cache capacity must be non-zero".into()));
        }
        if self.timer_check_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "timer check interval must be non-zero".into(),
            ));
        }
        if self.event_buffer == 0 {
            return Err(ConfigError::Invalid("event buffer must be non-zero".into()));
        }
        if self.cache_key_prefix.is_empty() {
            return Err(ConfigError::Invalid("cache key prefix must be set".into()));
        }
        Ok(())
    }

    fn merge_file(mut self, file: ConfigFile) -> Self {
        if let Some(ms) = file.dedup_window_ms {
            self.dedup_window = Duration::from_millis(ms);
        }
        if let Some(capacity) = file.cache_capacity {
            self.cache_capacity = capacity;
        }
        if let Some(ms) = file.cache_max_age_ms {
            self.cache_max_age = Duration::from_millis(ms);
        }
        if let Some(prefix) = file.cache_key_prefix {
            self.cache_key_prefix = prefix;
        }
        if let Some(ms) = file.timer_check_ms {
            self.timer_check_interval = Duration::from_millis(ms);
        }
        if let Some(buffer) = file.event_buffer {
            self.event_buffer = buffer;
        }
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
