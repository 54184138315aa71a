// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::time::Duration;

/// Dedup window override
pub fn dedup_window_ms() -> Option<Duration> {
    millis("INBOX_DEDUP_WINDOW_MS")
}

/// Cache capacity override
pub fn cache_capacity() -> Option<usize> {
    std::env::var("INBOX_CACHE_CAPACITY")
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
}

/// Cache freshness threshold override
pub fn cache_max_age_ms() -> Option<Duration> {
    millis("INBOX_CACHE_MAX_AGE_MS")
}

/// Timer check interval override
pub fn timer_check_ms() -> Option<Duration> {
    millis("INBOX_TIMER_CHECK_MS")
}

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
