// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification manager: session lifecycle and public surface.
//!
//! One manager instance is constructed at application startup and shared by
//! reference. `initialize` establishes a session for one recipient (tearing
//! down any previous one) and `disconnect` ends it.
//!
//! All state sits behind one mutex. A mutation computes its effects under
//! the lock and executes them after releasing it, so subscribers may call
//! back into the manager. Effect batches run in mutation order: a batch
//! produced by a subscriber re-entering the manager is queued behind the
//! batch currently executing.

mod pump;
mod session;

use crate::callbacks::Callbacks;
use crate::config::ManagerConfig;
use crate::executor::Executor;
use crate::ingest::Ingestor;
use crate::persistence::PersistenceGateway;
use crate::store::NotificationStore;
use inbox_adapters::{
    AppLifecycle, PushChannel, RealtimeChannel, TracedPush, TracedRealtime,
};
use inbox_core::{
    Channel, ChannelEvent, Clock, ConnectionState, Credentials, Effect, ManagerError,
    NotificationId, NotificationRecord, RecipientId,
};
use inbox_storage::KeyValueStore;
use parking_lot::{Mutex, ReentrantMutex};
use session::Session;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Instrument};

/// Manager lifecycle.
///
/// `Uninitialized → Initializing → Ready → Disconnected`, and
/// `Disconnected → Initializing` when a new session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Disconnected,
}

/// Which delivery channels came up for the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    Full,
    PushOnly,
    RealtimeOnly,
    /// Neither channel is up; only cached and locally mutated state
    #[default]
    CacheOnly,
}

impl DeliveryMode {
    pub fn from_channels(push: bool, realtime: bool) -> Self {
        match (push, realtime) {
            (true, true) => DeliveryMode::Full,
            (true, false) => DeliveryMode::PushOnly,
            (false, true) => DeliveryMode::RealtimeOnly,
            (false, false) => DeliveryMode::CacheOnly,
        }
    }
}

/// Manager adapter dependencies
pub struct ManagerDeps<P, R, L, K> {
    pub push: P,
    pub realtime: R,
    pub app_lifecycle: L,
    pub kv: K,
}

struct ManagerState<K> {
    lifecycle: Lifecycle,
    /// Bumped whenever a session starts or ends; stale work checks it
    generation: u64,
    callbacks: Callbacks,
    session: Option<Session<K>>,
}

/// Effect batches awaiting execution on the dispatching thread
#[derive(Default)]
struct DispatchQueue {
    running: Cell<bool>,
    batches: RefCell<VecDeque<(Executor, Vec<Effect>)>>,
}

pub(crate) struct Shared<P, R, L, K, C> {
    push: TracedPush<P>,
    realtime: TracedRealtime<R>,
    app_lifecycle: L,
    kv: K,
    clock: C,
    config: ManagerConfig,
    state: Mutex<ManagerState<K>>,
    dispatch: ReentrantMutex<DispatchQueue>,
    /// Serializes initialize, disconnect, and resync
    transitions: tokio::sync::Mutex<()>,
}

/// Reconciles notifications from the push and realtime channels.
///
/// Cheap to clone; clones share one manager.
pub struct NotificationManager<P, R, L, K, C> {
    shared: Arc<Shared<P, R, L, K, C>>,
}

impl<P, R, L, K, C> Clone for NotificationManager<P, R, L, K, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<P, R, L, K, C> NotificationManager<P, R, L, K, C>
where
    P: PushChannel,
    R: RealtimeChannel,
    L: AppLifecycle,
    K: KeyValueStore,
    C: Clock,
{
    /// Create a manager. `config` is used when `initialize` is given none.
    pub fn new(deps: ManagerDeps<P, R, L, K>, clock: C, config: ManagerConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                push: TracedPush::new(deps.push),
                realtime: TracedRealtime::new(deps.realtime),
                app_lifecycle: deps.app_lifecycle,
                kv: deps.kv,
                clock,
                config,
                state: Mutex::new(ManagerState {
                    lifecycle: Lifecycle::Uninitialized,
                    generation: 0,
                    callbacks: Callbacks::default(),
                    session: None,
                }),
                dispatch: ReentrantMutex::new(DispatchQueue::default()),
                transitions: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Start a session for `credentials`.
    ///
    /// Any previous session is torn down first. Returns true when at least
    /// one delivery channel came up. When both fail the manager still
    /// reaches `Ready` in cache-only mode and `on_error` receives an
    /// initialization failure.
    pub async fn initialize(
        &self,
        credentials: Credentials,
        callbacks: Callbacks,
        config: Option<ManagerConfig>,
    ) -> bool {
        let config = config.unwrap_or_else(|| self.shared.config.clone());
        if let Err(e) = config.validate() {
            warn!(error = %e, "rejecting invalid manager config");
            return false;
        }
        let span = tracing::info_span!(
            "manager.initialize",
            recipient_id = %credentials.recipient_id
        );
        let _transition = self.shared.transitions.lock().await;
        self.shared
            .initialize(credentials, callbacks, config)
            .instrument(span)
            .await
    }

    /// End the session: clears the store, dedup window, callbacks, and
    /// credentials, and disconnects the realtime channel. Idempotent.
    ///
    /// Waits for an in-flight `initialize` to finish before tearing down.
    pub async fn disconnect(&self) {
        let _transition = self.shared.transitions.lock().await;
        self.shared.teardown(Lifecycle::Disconnected, true).await;
    }

    /// Locally mark one notification read.
    ///
    /// Returns true when the record is (now or already) read; false when
    /// there is no ready session or the id is not tracked.
    pub fn mark_as_read(&self, id: NotificationId) -> bool {
        let at = self.shared.clock.utc_now();
        self.shared
            .apply(None, |session, _| match session.store.mark_read(id, at) {
                Ok(effects) => (true, effects),
                Err(e) => {
                    debug!(error = %e, "mark_as_read ignored");
                    (false, Vec::new())
                }
            })
            .unwrap_or(false)
    }

    /// Locally mark every notification read. False without a ready session.
    pub fn mark_all_as_read(&self) -> bool {
        let at = self.shared.clock.utc_now();
        self.shared
            .apply(None, |session, _| (true, session.store.mark_all_read(at)))
            .unwrap_or(false)
    }

    /// Feed an event directly, bypassing the adapter channels.
    ///
    /// Ignored unless a session is ready.
    pub async fn handle_event(&self, event: ChannelEvent) {
        match self.shared.ready_generation() {
            Some(generation) => self.shared.process(generation, event),
            None => debug!(event = event.name(), "no ready session, event ignored"),
        }
    }

    /// Merge subscriber callbacks into the registry
    pub fn set_callbacks(&self, callbacks: Callbacks) {
        self.shared.state.lock().callbacks.merge(callbacks);
    }

    /// Write the cache now instead of waiting for the background writer.
    ///
    /// Returns false without a session or when the write fails.
    pub async fn flush_cache(&self) -> bool {
        let now_ms = self.shared.clock.epoch_ms();
        let pending = {
            let state = self.shared.state.lock();
            state
                .session
                .as_ref()
                .map(|s| (s.gateway.clone(), s.capture(now_ms)))
        };
        let Some((gateway, cache)) = pending else {
            return false;
        };
        match gateway.save(&cache).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "cache flush failed");
                false
            }
        }
    }

    // -- queries --

    /// All records, newest first
    pub fn list(&self) -> Vec<NotificationRecord> {
        self.read(|s| s.store.list()).unwrap_or_default()
    }

    /// Unread records, newest first
    pub fn list_unread(&self) -> Vec<NotificationRecord> {
        self.read(|s| s.store.list_unread()).unwrap_or_default()
    }

    pub fn unread_count(&self) -> u32 {
        self.read(|s| s.store.unread_count()).unwrap_or(0)
    }

    pub fn get(&self, id: NotificationId) -> Option<NotificationRecord> {
        self.read(|s| s.store.get(id).cloned()).flatten()
    }

    pub fn len(&self) -> usize {
        self.read(|s| s.store.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.state.lock().lifecycle
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.read(Session::delivery_mode).unwrap_or_default()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.read(|s| s.ingestor.connection()).unwrap_or_default()
    }

    pub fn recipient(&self) -> Option<RecipientId> {
        self.read(|s| s.credentials.recipient_id)
    }

    fn read<T>(&self, f: impl FnOnce(&Session<K>) -> T) -> Option<T> {
        self.shared.state.lock().session.as_ref().map(f)
    }
}

impl<P, R, L, K, C> Shared<P, R, L, K, C>
where
    P: PushChannel,
    R: RealtimeChannel,
    L: AppLifecycle,
    K: KeyValueStore,
    C: Clock,
{
    async fn initialize(
        self: &Arc<Self>,
        credentials: Credentials,
        callbacks: Callbacks,
        config: ManagerConfig,
    ) -> bool {
        self.teardown(Lifecycle::Initializing, false).await;

        let recipient = credentials.recipient_id;
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer);
        let gateway = PersistenceGateway::new(
            self.kv.clone(),
            &config.cache_key_prefix,
            recipient,
            config.cache_max_age,
        );
        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.lifecycle = Lifecycle::Initializing;
            state.callbacks.merge(callbacks);
            state.session = Some(Session {
                generation: state.generation,
                credentials: credentials.clone(),
                store: NotificationStore::new(),
                ingestor: Ingestor::new(recipient, config.dedup_window),
                gateway: gateway.clone(),
                writer: None,
                event_tx: event_tx.clone(),
                push_ready: false,
                realtime_ready: false,
                pump: None,
                subscription: None,
                config: config.clone(),
            });
            state.generation
        };

        // Push: best-effort
        let push_result = self.push.initialize(&credentials, event_tx.clone()).await;

        // Realtime: best-effort
        let connecting = self.apply(Some(generation), |session, _| {
            ((), session.ingestor.set_connection(ConnectionState::Connecting))
        });
        if connecting.is_none() {
            return false;
        }
        let realtime_result = self.realtime.connect(&credentials, event_tx.clone()).await;
        let push_ok = push_result.is_ok();
        let realtime_ok = realtime_result.is_ok();
        let connected = self.apply(Some(generation), |session, _| {
            session.push_ready = push_ok;
            session.realtime_ready = realtime_ok;
            let state = if realtime_ok {
                ConnectionState::Connected
            } else {
                ConnectionState::Failed
            };
            ((), session.ingestor.set_connection(state))
        });
        if connected.is_none() {
            return false;
        }

        // Foreground observer
        let subscription = self.app_lifecycle.subscribe(event_tx);
        let subscribed = self.apply(Some(generation), move |session, _| {
            session.subscription = Some(subscription);
            ((), Vec::new())
        });
        if subscribed.is_none() {
            return false;
        }

        // Warm start from cache
        let cached = gateway.load(self.clock.epoch_ms()).await;

        let weak = Arc::downgrade(self);
        let failure = match (&push_result, &realtime_result) {
            (Err(push), Err(realtime)) => Some(ManagerError::InitializationFailure {
                push: push.to_string(),
                realtime: realtime.to_string(),
            }),
            _ => None,
        };
        let ready = self.apply(Some(generation), |session, lifecycle| {
            let mut effects = Vec::new();
            if let Some(cache) = cached {
                session
                    .store
                    .restore(cache.notifications, cache.unread_count);
                if cache.unread_count > 0 {
                    effects.push(Effect::NotifyUnreadCount {
                        count: cache.unread_count,
                    });
                }
            }
            session.writer = Some(Arc::new(session.gateway.spawn_writer()));
            session.pump = Some(pump::spawn(
                weak,
                generation,
                event_rx,
                session.config.timer_check_interval,
            ));
            *lifecycle = Lifecycle::Ready;
            if let Some(error) = failure.clone() {
                effects.push(Effect::NotifyError { error });
            }
            ((), effects)
        });
        if ready.is_none() {
            return false;
        }

        match failure {
            Some(error) => {
                warn!(error = %error, "no delivery channel available, running from cache");
                false
            }
            None => {
                info!(
                    mode = ?DeliveryMode::from_channels(push_ok, realtime_ok),
                    "notification manager ready"
                );
                true
            }
        }
    }

    /// Drop the current session, if any, and move to `next`.
    ///
    /// Bumping the generation first makes every in-flight task of the old
    /// session a no-op.
    async fn teardown(&self, next: Lifecycle, clear_callbacks: bool) {
        let session = {
            let _dispatch = self.dispatch.lock();
            let mut state = self.state.lock();
            state.generation += 1;
            if state.lifecycle != Lifecycle::Uninitialized {
                state.lifecycle = next;
            }
            if clear_callbacks {
                state.callbacks.clear();
            }
            state.session.take()
        };
        let Some(mut session) = session else {
            return;
        };
        let recipient_id = session.credentials.recipient_id;
        session.close();
        drop(session);
        self.realtime.disconnect().await;
        info!(%recipient_id, "session closed");
    }

    /// Apply one channel event to session `generation`.
    ///
    /// A resync runs on its own task so the pump keeps draining push
    /// deliveries while the realtime channel reconnects.
    pub(crate) fn process(self: &Arc<Self>, generation: u64, event: ChannelEvent) {
        let now = self.clock.now();
        let utc = self.clock.utc_now();
        let resync = self.apply(Some(generation), |session, _| {
            let Session {
                store, ingestor, ..
            } = session;
            let ingested = ingestor.ingest(store, event, now, utc);
            (ingested.resync, ingested.effects)
        });
        if resync == Some(true) {
            let shared = Arc::clone(self);
            let span = tracing::info_span!("manager.resync", generation);
            tokio::spawn(async move { shared.resync(generation).await }.instrument(span));
        }
    }

    /// Sweep expired dedup entries. False once the session is gone.
    pub(crate) fn sweep(&self, generation: u64) -> bool {
        let now = self.clock.now();
        self.apply(Some(generation), |session, _| {
            let expired = session.ingestor.sweep(now);
            if expired > 0 {
                debug!(expired, "dedup entries expired");
            }
            ((), Vec::new())
        })
        .is_some()
    }

    async fn resync(&self, generation: u64) {
        let _transition = self.transitions.lock().await;
        let Some((credentials, event_tx)) = self.apply(Some(generation), |session, _| {
            let effects = session
                .ingestor
                .set_connection(ConnectionState::Reconnecting);
            ((session.credentials.clone(), session.event_tx.clone()), effects)
        }) else {
            return;
        };
        let result = self.realtime.resync(&credentials, event_tx).await;
        self.apply(Some(generation), |session, _| match result {
            Ok(()) => {
                session.realtime_ready = true;
                (
                    (),
                    session.ingestor.set_connection(ConnectionState::Connected),
                )
            }
            Err(e) => {
                let mut effects = session.ingestor.set_connection(ConnectionState::Failed);
                effects.push(Effect::NotifyError {
                    error: ManagerError::Channel {
                        channel: Channel::Realtime,
                        message: e.to_string(),
                    },
                });
                ((), effects)
            }
        });
    }

    fn ready_generation(&self) -> Option<u64> {
        let state = self.state.lock();
        match (&state.session, state.lifecycle) {
            (Some(session), Lifecycle::Ready) => Some(session.generation),
            _ => None,
        }
    }

    /// Run `f` against a session under the state lock, then execute the
    /// effects it returns with the lock released.
    ///
    /// `generation: None` targets the current session and requires `Ready`;
    /// `Some(g)` targets session `g` in any lifecycle. Returns None when the
    /// target does not exist.
    fn apply<T>(
        &self,
        generation: Option<u64>,
        f: impl FnOnce(&mut Session<K>, &mut Lifecycle) -> (T, Vec<Effect>),
    ) -> Option<T> {
        let now_ms = self.clock.epoch_ms();
        let dispatch = self.dispatch.lock();
        let value = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let session = state.session.as_mut()?;
            let targeted = match generation {
                Some(generation) => session.generation == generation,
                None => state.lifecycle == Lifecycle::Ready,
            };
            if !targeted {
                return None;
            }
            let (value, effects) = f(session, &mut state.lifecycle);
            let mut executor = Executor::new(state.callbacks.clone());
            if effects.iter().any(|e| matches!(e, Effect::PersistCache)) {
                if let Some(writer) = &session.writer {
                    executor = executor.with_cache(Arc::clone(writer), session.capture(now_ms));
                }
            }
            dispatch.batches.borrow_mut().push_back((executor, effects));
            value
        };

        // A nested call only enqueues; the outermost call drains.
        if !dispatch.running.replace(true) {
            loop {
                let next = dispatch.batches.borrow_mut().pop_front();
                let Some((executor, effects)) = next else {
                    break;
                };
                executor.execute_all(effects);
            }
            dispatch.running.set(false);
        }
        Some(value)
    }
}

#[cfg(test)]
#[path = "../manager_tests/mod.rs"]
mod tests;
