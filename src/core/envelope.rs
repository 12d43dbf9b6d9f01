//! Timestamps, event ids and the JSON envelope every CLI command prints.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::{SystemTime, UNIX_EPOCH};
use ulid::Ulid;

pub const ENVELOPE_VERSION: &str = "1.0.0";

/// Unix-epoch seconds with a `Z` suffix, e.g. `1771220592Z`.
pub fn now_epoch_z() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}

pub fn new_event_id() -> String {
    Ulid::new().to_string()
}

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub envelope_version: &'static str,
    pub ts: String,
    pub event_id: String,
    pub cmd: String,
    pub status: &'static str,
    pub data: JsonValue,
}

pub fn ok(cmd: &str, data: JsonValue) -> Envelope {
    Envelope {
        envelope_version: ENVELOPE_VERSION,
        ts: now_epoch_z(),
        event_id: new_event_id(),
        cmd: cmd.to_string(),
        status: "ok",
        data,
    }
}
