// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn missing_key_reads_none() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());

    assert_eq!(store.get("absent").await.unwrap(), None);
}

#[tokio::test]
async fn set_then_get() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());

    store.set("cache_1", r#"{"a":1}"#).await.unwrap();

    assert_eq!(
        store.get("cache_1").await.unwrap().as_deref(),
        Some(r#"{"a":1}"#)
    );
}

#[tokio::test]
async fn set_creates_root_directory() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path().join("nested").join("kv"));

    store.set("k", "v").await.unwrap();

    assert!(store.root().join("k.json").exists());
}

#[tokio::test]
async fn overwrite_leaves_no_tmp_file() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());

    store.set("k", "first").await.unwrap();
    store.set("k", "second").await.unwrap();

    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    assert!(!dir.path().join("k.tmp").exists());
}

#[tokio::test]
async fn values_survive_a_new_handle() {
    let dir = tempdir().unwrap();
    FileKvStore::new(dir.path()).set("k", "v").await.unwrap();

    let reopened = FileKvStore::new(dir.path());

    assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn remove_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());
    store.set("k", "v").await.unwrap();

    store.remove("k").await.unwrap();
    store.remove("k").await.unwrap();

    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn path_traversal_rejected() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());

    let err = store.set("../escape", "v").await.unwrap_err();

    assert!(matches!(err, KvError::InvalidKey(_)));
}

#[tokio::test]
async fn quarantine_moves_value_to_bak() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());
    store.set("k", "{not json").await.unwrap();

    store.quarantine("k").await.unwrap();

    assert_eq!(store.get("k").await.unwrap(), None);
    let bak = std::fs::read_to_string(dir.path().join("k.bak")).unwrap();
    assert_eq!(bak, "{not json");
}

#[tokio::test]
async fn quarantine_rotates_backups() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());

    for value in ["one", "two", "three", "four"] {
        store.set("k", value).await.unwrap();
        store.quarantine("k").await.unwrap();
    }

    let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
    assert_eq!(read("k.bak"), "four");
    assert_eq!(read("k.bak.2"), "three");
    assert_eq!(read("k.bak.3"), "two");
    assert!(!dir.path().join("k.bak.4").exists());
}

#[tokio::test]
async fn quarantine_missing_key_is_noop() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::new(dir.path());

    store.quarantine("absent").await.unwrap();

    assert!(!dir.path().join("absent.bak").exists());
}
