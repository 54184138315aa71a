// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::push::FakePushChannel;
use crate::realtime::FakeRealtimeChannel;
use inbox_core::RecipientId;
use serial_test::serial;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

/// Assert that captured logs contain the expected substring
fn assert_log(logs: &str, label: &str, expected: &str) {
    assert!(logs.contains(expected), "Should log {label}. Logs:\n{logs}",);
}

fn creds() -> Credentials {
    Credentials::new("super-secret-token", RecipientId::new(100))
}

#[test]
#[serial(tracing)]
fn traced_push_logs_success() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedPush::new(FakePushChannel::new());
        let (tx, _rx) = mpsc::channel(1);
        traced.initialize(&creds(), tx).await
    });

    assert!(result.is_ok());
    assert_log(&logs, "span name", "push.initialize");
    assert_log(&logs, "recipient", "recipient_id=100");
    assert_log(&logs, "completion", "push registered");
    assert_log(&logs, "elapsed", "elapsed_ms=");
    assert!(!logs.contains("super-secret-token"), "token leaked:\n{logs}");
}

#[test]
#[serial(tracing)]
fn traced_push_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakePushChannel::new();
        fake.fail_initialize("permission denied by user");
        let traced = TracedPush::new(fake);
        let (tx, _rx) = mpsc::channel(1);
        traced.initialize(&creds(), tx).await
    });

    assert!(result.is_err());
    assert_log(&logs, "failure", "push unavailable");
    assert_log(&logs, "error text", "permission denied by user");
}

#[test]
#[serial(tracing)]
fn traced_realtime_logs_connect_and_disconnect() {
    let (logs, status) = with_tracing(|| async {
        let traced = TracedRealtime::new(FakeRealtimeChannel::new());
        let (tx, _rx) = mpsc::channel(1);
        traced.connect(&creds(), tx).await.unwrap();
        traced.disconnect().await;
        traced.status()
    });

    assert_eq!(status, ConnectionState::Disconnected);
    assert_log(&logs, "connect span", "realtime.connect");
    assert_log(&logs, "connected", "realtime connected");
    assert_log(&logs, "disconnected", "disconnected");
}

#[test]
#[serial(tracing)]
fn traced_realtime_resync_delegates_to_inner() {
    let (logs, connects) = with_tracing(|| async {
        let fake = FakeRealtimeChannel::new();
        let traced = TracedRealtime::new(fake.clone());
        let (tx, _rx) = mpsc::channel(1);
        traced.connect(&creds(), tx.clone()).await.unwrap();
        fake.set_status(ConnectionState::Reconnecting);
        traced.resync(&creds(), tx).await.unwrap();
        fake.connect_count()
    });

    assert_eq!(connects, 2);
    assert_log(&logs, "resync span", "realtime.resync");
    assert_log(&logs, "resynced", "resynced");
}
