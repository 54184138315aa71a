//! Test helpers for behavioral specifications.
//!
//! A `Device` is one app install: a manager wired to fake channels and a
//! cache directory that outlives the manager, so restarts can be simulated
//! by booting a second device on the same directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use inbox_adapters::{FakeAppLifecycle, FakePushChannel, FakeRealtimeChannel};
use inbox_core::{Credentials, NotificationId, RecipientId, SystemClock};
use inbox_engine::{Callbacks, ManagerConfig, ManagerDeps, NotificationManager};
use inbox_storage::FileKvStore;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 5;
pub const SPEC_WAIT_MAX_MS: u64 = 2000;

pub type Manager = NotificationManager<
    FakePushChannel,
    FakeRealtimeChannel,
    FakeAppLifecycle,
    FileKvStore,
    SystemClock,
>;

pub struct Device {
    pub manager: Manager,
    pub push: FakePushChannel,
    pub realtime: FakeRealtimeChannel,
    pub app: FakeAppLifecycle,
    log: Arc<Mutex<Vec<String>>>,
}

impl Device {
    pub fn boot(cache_dir: &Path) -> Self {
        let push = FakePushChannel::new();
        let realtime = FakeRealtimeChannel::new();
        let app = FakeAppLifecycle::new();
        let config =
            ManagerConfig::default().with_timer_check_interval(Duration::from_millis(10));
        let manager = NotificationManager::new(
            ManagerDeps {
                push: push.clone(),
                realtime: realtime.clone(),
                app_lifecycle: app.clone(),
                kv: FileKvStore::new(cache_dir),
            },
            SystemClock,
            config,
        );
        Self {
            manager,
            push,
            realtime,
            app,
            log: Arc::default(),
        }
    }

    pub async fn sign_in(&self, recipient: i64) -> bool {
        self.manager
            .initialize(
                Credentials::new(format!("token-{recipient}"), RecipientId::new(recipient)),
                self.callbacks(),
                None,
            )
            .await
    }

    /// Subscriber log as `"new:1"`, `"read:1"`, `"count:0"`, `"error"`
    pub fn events(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear_events(&self) {
        self.log.lock().unwrap().clear();
    }

    pub fn ids(&self) -> Vec<i64> {
        self.manager.list().iter().map(|r| r.id.get()).collect()
    }

    fn callbacks(&self) -> Callbacks {
        let record = |log: &Arc<Mutex<Vec<String>>>| {
            let log = log.clone();
            move |entry: String| log.lock().unwrap().push(entry)
        };
        let (new, read, count, error) = (
            record(&self.log),
            record(&self.log),
            record(&self.log),
            record(&self.log),
        );
        Callbacks::new()
            .on_new_notification(move |r| new(format!("new:{}", r.id)))
            .on_notification_read(move |id| read(format!("read:{id}")))
            .on_unread_count_change(move |n| count(format!("count:{n}")))
            .on_error(move |_| error("error".to_string()))
    }
}

pub fn id(n: i64) -> NotificationId {
    NotificationId::new(n)
}

/// Flat string payload as delivered by platform push
pub fn push_payload(id: i64, recipient: i64) -> Value {
    json!({
        "data": {
            "notification_id": id.to_string(),
            "user_id": recipient.to_string(),
            "title": format!("Order {id} shipped"),
            "body": "On its way",
            "priority": "HIGH",
            "type": "order",
            "is_read": "0",
            "created_at": (1_767_225_600_000 + id * 60_000).to_string(),
        }
    })
}

/// Typed payload as delivered over the realtime stream
pub fn realtime_payload(id: i64, recipient: i64) -> Value {
    json!({
        "id": id,
        "recipient_id": recipient,
        "title": format!("Order {id} shipped"),
        "message": "On its way",
        "priority": "high",
        "type": "order",
        "is_read": false,
        "is_delivered": true,
        "created_at": 1_767_225_600_000_i64 + id * 60_000,
    })
}

/// Poll until `condition` holds or the wait limit elapses.
pub async fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(SPEC_WAIT_MAX_MS);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(SPEC_POLL_INTERVAL_MS)).await;
    }
    condition()
}
