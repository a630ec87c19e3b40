//! Response shapes the backend is known to produce.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Longest error detail kept from a response body.
const MAX_DETAIL_CHARS: usize = 512;

/// A collection response: either a bare array or an envelope such as
/// `{"success": true, "agents": [...], "count": 2}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "agents", alias = "voices")]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}

/// A single-record response: either the record itself or an envelope such
/// as `{"success": true, "agent_id": "...", "config": {...}}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Record<T> {
    Wrapped {
        #[serde(alias = "agent", alias = "config", alias = "voice")]
        item: T,
    },
    Bare(T),
}

impl<T> Record<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { item } | Self::Bare(item) => item,
        }
    }
}

/// Extracts a human-readable failure detail from an error response.
///
/// Looks for a `detail`, `error` or `message` key in a JSON body, then
/// falls back to the raw body and finally to the status reason.
pub(crate) fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            match map.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => return truncate(s.trim()),
                Some(Value::Null) | None => {}
                Some(Value::String(_)) => {}
                Some(other) => return truncate(&other.to_string()),
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return truncate(trimmed);
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_DETAIL_CHARS {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(MAX_DETAIL_CHARS).collect();
        out.push('…');
        out
    }
}
