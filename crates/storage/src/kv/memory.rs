// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process key-value store.

use super::{validate_key, KeyValueStore, KvError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct MemoryKvState {
    entries: HashMap<String, String>,
    fail_writes: Option<String>,
    writes: usize,
}

/// Key-value store held in memory.
///
/// For hosts without durable storage, and for tests: clones share entries,
/// and writes can be made to fail.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<Mutex<MemoryKvState>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value without going through the async trait
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.lock().entries.get(key).cloned()
    }

    /// Seed a value without going through the async trait
    pub fn insert(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    /// Make subsequent writes fail with `message`
    pub fn fail_writes(&self, message: &str) {
        self.inner.lock().fail_writes = Some(message.to_string());
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        validate_key(key)?;
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        validate_key(key)?;
        let mut inner = self.inner.lock();
        if let Some(message) = &inner.fail_writes {
            return Err(KvError::Io(std::io::Error::other(message.clone())));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        validate_key(key)?;
        self.inner.lock().entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
