// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session event pump.
//!
//! Drains the channel shared by the push, realtime, and foreground adapters
//! and sweeps expired dedup entries on a fixed tick. The pump holds only a
//! weak reference to the manager and stops when its session ends.

use super::Shared;
use inbox_adapters::{AppLifecycle, PushChannel, RealtimeChannel};
use inbox_core::{ChannelEvent, Clock};
use inbox_storage::KeyValueStore;
use std::sync::Weak;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub(super) fn spawn<P, R, L, K, C>(
    shared: Weak<Shared<P, R, L, K, C>>,
    generation: u64,
    mut event_rx: mpsc::Receiver<ChannelEvent>,
    timer_check: Duration,
) -> JoinHandle<()>
where
    P: PushChannel,
    R: RealtimeChannel,
    L: AppLifecycle,
    K: KeyValueStore,
    C: Clock,
{
    tokio::spawn(async move {
        // NOTE: Must be created outside the loop - a sleep() inside select!
        // would restart on every event and never fire under load.
        let mut ticker = tokio::time::interval(timer_check);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                event = event_rx.recv() => {
                    let Some(event) = event else { break };
                    let Some(shared) = shared.upgrade() else { break };
                    shared.process(generation, event);
                }
                _ = ticker.tick() => {
                    let Some(shared) = shared.upgrade() else { break };
                    if !shared.sweep(generation) {
                        break;
                    }
                }
            }
        }
        tracing::debug!(generation, "event pump stopped");
    })
}
