// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for the notification inbox

mod cache;
mod kv;

pub use cache::{cache_key, CacheError, CachedNotifications, CACHE_VERSION};
pub use kv::{FileKvStore, KeyValueStore, KvError, MemoryKvStore};
