// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload normalization.
//!
//! Push payloads arrive as flat string maps (platform push data only carries
//! strings), optionally wrapped in a `data` envelope. Realtime payloads arrive
//! as typed JSON. Both normalize to the same [`NotificationRecord`].

use crate::id::{NotificationId, RecipientId};
use crate::notification::{NotificationRecord, Priority};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

const DEFAULT_KIND: &str = "general";

/// Errors from payload normalization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Normalize a raw channel payload into a record.
///
/// `now` is used as `created_at` when the payload carries no timestamp.
pub fn normalize_payload(
    payload: &Value,
    now: DateTime<Utc>,
) -> Result<NotificationRecord, PayloadError> {
    let fields = unwrap_envelope(payload)?;

    let id = NotificationId::new(required_int(fields, &["id", "notification_id"], "id")?);
    let recipient_id = RecipientId::new(required_int(
        fields,
        &["recipient_id", "user_id"],
        "recipient_id",
    )?);
    let title = optional_string(fields, "title").ok_or(PayloadError::MissingField("title"))?;
    let message = optional_string(fields, "message")
        .or_else(|| optional_string(fields, "body"))
        .unwrap_or_default();
    let priority = optional_string(fields, "priority")
        .map(|p| Priority::from_tag(&p))
        .unwrap_or_default();
    let kind = optional_string(fields, "type").unwrap_or_else(|| DEFAULT_KIND.to_string());
    let is_read = optional_bool(fields, "is_read")?.unwrap_or(false);
    let is_delivered = optional_bool(fields, "is_delivered")?.unwrap_or(true);
    let created_at = optional_timestamp(fields, "created_at")?.unwrap_or(now);
    let read_at = optional_timestamp(fields, "read_at")?;

    Ok(NotificationRecord {
        id,
        recipient_id,
        title,
        message,
        priority,
        kind,
        action_url: optional_string(fields, "action_url"),
        image_url: optional_string(fields, "image_url"),
        is_read,
        is_delivered,
        created_at,
        read_at: if is_read { read_at } else { None },
    })
}

fn unwrap_envelope(payload: &Value) -> Result<&Map<String, Value>, PayloadError> {
    let fields = payload.as_object().ok_or(PayloadError::NotAnObject)?;
    match fields.get("data") {
        Some(Value::Object(inner)) if !fields.contains_key("id") => Ok(inner),
        _ => Ok(fields),
    }
}

fn required_int(
    fields: &Map<String, Value>,
    keys: &[&str],
    field: &'static str,
) -> Result<i64, PayloadError> {
    let value = keys
        .iter()
        .find_map(|k| fields.get(*k).filter(|v| !v.is_null()))
        .ok_or(PayloadError::MissingField(field))?;
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| PayloadError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn optional_bool(fields: &Map<String, Value>, key: &'static str) -> Result<Option<bool>, PayloadError> {
    let Some(value) = fields.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::Number(n) if n.as_i64() == Some(0) => Ok(Some(false)),
        Value::Number(n) if n.as_i64() == Some(1) => Ok(Some(true)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" | "" => Ok(Some(false)),
            _ => Err(PayloadError::InvalidField {
                field: key,
                value: s.clone(),
            }),
        },
        other => Err(PayloadError::InvalidField {
            field: key,
            value: other.to_string(),
        }),
    }
}

fn optional_timestamp(
    fields: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<DateTime<Utc>>, PayloadError> {
    let invalid = |value: &Value| PayloadError::InvalidField {
        field: key,
        value: value.to_string(),
    };
    let Some(value) = fields.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => {
            if let Ok(ts) = DateTime::parse_from_rfc3339(s.trim()) {
                return Ok(Some(ts.with_timezone(&Utc)));
            }
            s.trim()
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .map(Some)
                .ok_or_else(|| invalid(value))
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(Some)
            .ok_or_else(|| invalid(value)),
        other => Err(invalid(other)),
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
