//! Per-session capture settings and the recognizer tuning derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Sensitivity ────────────────────────────────────────────────────

/// How eagerly the recognizer treats input energy as speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Exact literal match; `"low"` or `"Loud"` are rejected.
    pub fn from_literal(raw: &str) -> Option<Self> {
        match raw {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    /// Minimum audio energy considered speech. Higher sensitivity means a
    /// lower threshold.
    pub fn energy_threshold(self) -> u32 {
        match self {
            Self::Low => 4000,
            Self::Medium => 2000,
            Self::High => 1000,
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Chunk duration ─────────────────────────────────────────────────

/// Capture chunk length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChunkDuration {
    #[serde(rename = "20ms")]
    Ms20,
    #[default]
    #[serde(rename = "50ms")]
    Ms50,
    #[serde(rename = "100ms")]
    Ms100,
}

impl ChunkDuration {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ms20 => "20ms",
            Self::Ms50 => "50ms",
            Self::Ms100 => "100ms",
        }
    }

    pub fn from_literal(raw: &str) -> Option<Self> {
        match raw {
            "20ms" => Some(Self::Ms20),
            "50ms" => Some(Self::Ms50),
            "100ms" => Some(Self::Ms100),
            _ => None,
        }
    }

    pub fn millis(self) -> u32 {
        match self {
            Self::Ms20 => 20,
            Self::Ms50 => 50,
            Self::Ms100 => 100,
        }
    }

    /// Seconds of silence the recognizer waits before closing a phrase.
    pub fn pause_threshold(self) -> f64 {
        f64::from(self.millis()) / 1000.0
    }
}

impl fmt::Display for ChunkDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Settings ───────────────────────────────────────────────────────

/// Rejected settings update. The previous settings stay in effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidConfig {
    #[error("invalid sensitivity '{0}' (expected Low, Medium or High)")]
    Sensitivity(String),
    #[error("invalid chunk duration '{0}' (expected 20ms, 50ms or 100ms)")]
    ChunkDuration(String),
}

/// Recognizer parameters handed to the recognition port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecognizerTuning {
    pub energy_threshold: u32,
    pub pause_threshold: f64,
}

/// Capture configuration owned by one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSettings {
    pub sensitivity: Sensitivity,
    pub chunk_duration: ChunkDuration,
}

impl CaptureSettings {
    /// Build settings from raw literals, validating both before returning.
    pub fn parse(sensitivity: &str, chunk_duration: &str) -> Result<Self, InvalidConfig> {
        let sensitivity = Sensitivity::from_literal(sensitivity)
            .ok_or_else(|| InvalidConfig::Sensitivity(sensitivity.to_string()))?;
        let chunk_duration = ChunkDuration::from_literal(chunk_duration)
            .ok_or_else(|| InvalidConfig::ChunkDuration(chunk_duration.to_string()))?;
        Ok(Self {
            sensitivity,
            chunk_duration,
        })
    }

    /// Replace these settings with the parsed update, or leave them untouched
    /// on error.
    pub fn apply(&mut self, sensitivity: &str, chunk_duration: &str) -> Result<Self, InvalidConfig> {
        let next = Self::parse(sensitivity, chunk_duration)?;
        *self = next;
        Ok(next)
    }

    pub fn to_recognizer_tuning(&self) -> RecognizerTuning {
        RecognizerTuning {
            energy_threshold: self.sensitivity.energy_threshold(),
            pause_threshold: self.chunk_duration.pause_threshold(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
