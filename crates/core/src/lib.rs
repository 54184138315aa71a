// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! inbox-core: domain types for the notification reconciliation manager

pub mod clock;
pub mod effect;
pub mod error;
pub mod event;
pub mod id;
pub mod notification;
pub mod payload;
pub mod session;
pub mod time_fmt;
pub mod timer;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use effect::Effect;
pub use error::ManagerError;
pub use event::{AppState, Channel, ChannelEvent, ConnectionState};
pub use id::{NotificationId, RecipientId};
pub use notification::{NotificationRecord, Priority};
pub use payload::{normalize_payload, PayloadError};
pub use session::Credentials;
pub use time_fmt::format_age;
pub use timer::TimerId;
