// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{Callbacks, ManagerConfig, ManagerDeps, NotificationManager};
use inbox_adapters::{FakeAppLifecycle, FakePushChannel, FakeRealtimeChannel};
use inbox_core::test_support::TEST_RECIPIENT;
use inbox_core::{ConnectionState, Credentials, FakeClock, ManagerError, NotificationId};
use inbox_storage::MemoryKvStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Convenience alias for the fully-typed test manager.
pub(crate) type TestManager = NotificationManager<
    FakePushChannel,
    FakeRealtimeChannel,
    FakeAppLifecycle,
    MemoryKvStore,
    FakeClock,
>;

/// Poll `condition` until it holds, failing the test after two seconds.
pub(crate) async fn eventually(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached within 2s"
        );
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}

/// Everything a subscriber saw, in order
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Observed {
    New(NotificationId),
    Read(NotificationId),
    Count(u32),
    Connection(ConnectionState),
    Error(ManagerError),
}

#[derive(Clone, Default)]
pub(crate) struct Observer {
    log: Arc<Mutex<Vec<Observed>>>,
}

impl Observer {
    pub fn callbacks(&self) -> Callbacks {
        let (a, b, c, d, e) = (
            self.log.clone(),
            self.log.clone(),
            self.log.clone(),
            self.log.clone(),
            self.log.clone(),
        );
        Callbacks::new()
            .on_new_notification(move |r| a.lock().push(Observed::New(r.id)))
            .on_notification_read(move |id| b.lock().push(Observed::Read(id)))
            .on_unread_count_change(move |n| c.lock().push(Observed::Count(n)))
            .on_connection_state_change(move |s| d.lock().push(Observed::Connection(s)))
            .on_error(move |err| e.lock().push(Observed::Error(err.clone())))
    }

    pub fn all(&self) -> Vec<Observed> {
        self.log.lock().clone()
    }

    /// Observations excluding connection-state changes
    pub fn notifications(&self) -> Vec<Observed> {
        self.all()
            .into_iter()
            .filter(|o| !matches!(o, Observed::Connection(_)))
            .collect()
    }

    pub fn count_new(&self) -> usize {
        self.all()
            .iter()
            .filter(|o| matches!(o, Observed::New(_)))
            .count()
    }

    pub fn errors(&self) -> Vec<ManagerError> {
        self.all()
            .into_iter()
            .filter_map(|o| match o {
                Observed::Error(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

/// Test context holding the manager and every fake behind it.
pub(crate) struct TestContext {
    pub manager: TestManager,
    pub push: FakePushChannel,
    pub realtime: FakeRealtimeChannel,
    pub app: FakeAppLifecycle,
    pub kv: MemoryKvStore,
    pub clock: FakeClock,
    pub observer: Observer,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        let push = FakePushChannel::new();
        let realtime = FakeRealtimeChannel::new();
        let app = FakeAppLifecycle::new();
        let kv = MemoryKvStore::new();
        let clock = FakeClock::new();
        let manager = NotificationManager::new(
            ManagerDeps {
                push: push.clone(),
                realtime: realtime.clone(),
                app_lifecycle: app.clone(),
                kv: kv.clone(),
            },
            clock.clone(),
            config,
        );
        Self {
            manager,
            push,
            realtime,
            app,
            kv,
            clock,
            observer: Observer::default(),
        }
    }

    pub fn credentials() -> Credentials {
        Credentials::new("test-token", TEST_RECIPIENT)
    }

    /// Initialize with test credentials and the recording callbacks
    pub async fn initialize(&self) -> bool {
        self.manager
            .initialize(Self::credentials(), self.observer.callbacks(), None)
            .await
    }
}

/// Defaults with a short pump tick so sweeps happen promptly
pub(crate) fn test_config() -> ManagerConfig {
    ManagerConfig::default().with_timer_check_interval(Duration::from_millis(5))
}
