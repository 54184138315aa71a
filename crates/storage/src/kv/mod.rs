// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent key-value stores

mod file;
mod memory;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from key-value operations
#[derive(Debug, Error)]
pub enum KvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
    #[error("background task failed: {0}")]
    Task(String),
}

/// Durable string-to-string storage.
///
/// Callers scope keys themselves (the manager embeds the recipient id).
#[async_trait]
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), KvError>;

    /// Move an unreadable value out of the way.
    ///
    /// Stores that can keep a backup do so; the default simply removes it.
    async fn quarantine(&self, key: &str) -> Result<(), KvError> {
        self.remove(key).await
    }
}

/// Keys become file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), KvError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(KvError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
