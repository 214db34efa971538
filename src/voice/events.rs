//! JSON control messages carried alongside `|`-delimited turns.
//!
//! Turns stay in the compact delimiter format; only out-of-band control
//! traffic is JSON. A text frame is a control message when it is a JSON
//! object whose `type` is a known tag.
//!
//! ```text
//! client ─▸ {"type":"settings","sensitivity":"High","chunkDuration":"20ms"}
//!        ◂─ {"type":"settings_ack","sensitivity":"High","chunkDuration":"20ms"}
//!        ◂─ {"type":"error","kind":"invalid_config","message":"..."}
//! ```

use serde::{Deserialize, Serialize};

use super::capture::{CaptureSettings, ChunkDuration, Sensitivity};
use super::outcome::TurnError;

// ── Client → Server messages ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Replace the session's capture settings. An omitted field keeps its
    /// current value.
    #[serde(rename = "settings")]
    Settings {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sensitivity: Option<String>,
        #[serde(
            rename = "chunkDuration",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        chunk_duration: Option<String>,
    },
}

const CONTROL_TAGS: &[&str] = &["settings"];

impl ClientMessage {
    /// Recognize a control message by shape.
    ///
    /// Returns `None` for anything that is not a JSON object with a known
    /// `type` tag; such frames are turns. A tagged object with bad field
    /// types yields `Some(Err(..))`.
    pub fn detect(raw: &str) -> Option<Result<Self, serde_json::Error>> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('{') {
            return None;
        }
        let value: serde_json::Value = serde_json::from_str(trimmed).ok()?;
        let tag = value.get("type")?.as_str()?;
        if !CONTROL_TAGS.contains(&tag) {
            return None;
        }
        Some(serde_json::from_value(value))
    }
}

// ── Server → Client messages ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Settings were applied; echoes the settings now in effect.
    #[serde(rename = "settings_ack")]
    SettingsAck {
        sensitivity: Sensitivity,
        #[serde(rename = "chunkDuration")]
        chunk_duration: ChunkDuration,
    },

    /// A control message was rejected. Session state is unchanged.
    #[serde(rename = "error")]
    Error { kind: String, message: String },
}

impl ServerMessage {
    pub fn settings_ack(settings: CaptureSettings) -> Self {
        Self::SettingsAck {
            sensitivity: settings.sensitivity,
            chunk_duration: settings.chunk_duration,
        }
    }

    pub fn error(err: &TurnError) -> Self {
        Self::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","kind":"internal","message":"{e}"}}"#)
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────
