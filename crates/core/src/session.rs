// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session credentials.
//!
//! A session is scoped to exactly one authenticated recipient. Switching
//! recipients means tearing the session down and starting a new one.

use crate::id::RecipientId;
use std::fmt;

/// Access token and recipient for one authenticated session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub recipient_id: RecipientId,
}

impl Credentials {
    pub fn new(token: impl Into<String>, recipient_id: RecipientId) -> Self {
        Self {
            token: token.into(),
            recipient_id,
        }
    }
}

// Tokens never reach logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("recipient_id", &self.recipient_id)
            .finish()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
