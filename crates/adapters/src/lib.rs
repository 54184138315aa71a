// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the external delivery channels and host lifecycle

pub mod app_state;
pub mod push;
pub mod realtime;
pub mod traced;

pub use app_state::{AppLifecycle, NoOpAppLifecycle, Subscription};
pub use push::{NoOpPushChannel, PushChannel, PushError};
pub use realtime::{NoOpRealtimeChannel, RealtimeChannel, RealtimeError};
pub use traced::{TracedPush, TracedRealtime};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use app_state::FakeAppLifecycle;
#[cfg(any(test, feature = "test-support"))]
pub use push::{FakePushChannel, PushCall};
#[cfg(any(test, feature = "test-support"))]
pub use realtime::{FakeRealtimeChannel, RealtimeCall};
