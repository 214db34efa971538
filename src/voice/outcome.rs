//! Turn outcomes: the error taxonomy, latency accounting and the response
//! frame written back to the client.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::time::Instant;

use super::capture::InvalidConfig;
use super::language::NotSupported;

/// Pipeline stage that talks to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Recognition,
    Translation,
    Synthesis,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Recognition => "recognition",
            Self::Translation => "translation",
            Self::Synthesis => "synthesis",
        })
    }
}

/// Everything that can go wrong with a single turn.
///
/// Messages are normalized: backend error text is logged, never echoed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("malformed frame")]
    MalformedFrame,
    #[error("audio payload is not valid base64")]
    BadAudioEncoding,
    #[error("unsupported language: {code}")]
    UnsupportedLanguage { code: String },
    #[error("no intelligible speech in audio")]
    Unintelligible,
    #[error("{stage} backend unavailable")]
    BackendUnavailable { stage: Stage },
    #[error("speech recognition failed")]
    RecognitionFailed,
    #[error("translation failed")]
    TranslationFailed,
    #[error("{stage} timed out")]
    Timeout { stage: Stage },
    #[error("{0}")]
    InvalidConfig(#[from] InvalidConfig),
}

impl TurnError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedFrame => "malformed_frame",
            Self::BadAudioEncoding => "bad_audio_encoding",
            Self::UnsupportedLanguage { .. } => "unsupported_language",
            Self::Unintelligible => "unintelligible",
            Self::BackendUnavailable { .. } => "backend_unavailable",
            Self::RecognitionFailed => "recognition_failed",
            Self::TranslationFailed => "translation_failed",
            Self::Timeout { .. } => "timeout",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl From<NotSupported> for TurnError {
    fn from(err: NotSupported) -> Self {
        Self::UnsupportedLanguage { code: err.code }
    }
}

/// Per-stage durations for one turn, in milliseconds. Stages that never ran
/// report zero; recognition is only present for audio turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LatencyReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognition_ms: Option<u64>,
    pub translation_ms: u64,
}

impl LatencyReport {
    /// Zeroed report for a text turn.
    pub fn text() -> Self {
        Self::default()
    }

    /// Zeroed report for an audio turn.
    pub fn audio() -> Self {
        Self {
            recognition_ms: Some(0),
            translation_ms: 0,
        }
    }
}

/// Milliseconds elapsed since `started`, saturating.
pub fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// The response to one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeFrame {
    /// Input text for text turns, recognized text for audio turns.
    pub original_text: String,
    pub translation: Result<String, TurnError>,
    /// Untranslated input kept when the translation stage failed.
    pub fallback: Option<String>,
    pub latency: LatencyReport,
    pub action: String,
}

impl OutcomeFrame {
    pub fn translated(
        original_text: String,
        translated_text: String,
        action: String,
        latency: LatencyReport,
    ) -> Self {
        Self {
            original_text,
            translation: Ok(translated_text),
            fallback: None,
            latency,
            action,
        }
    }

    pub fn failed(
        original_text: String,
        error: TurnError,
        action: String,
        latency: LatencyReport,
    ) -> Self {
        Self {
            original_text,
            translation: Err(error),
            fallback: None,
            latency,
            action,
        }
    }

    /// A frame that could not be parsed into a turn. The action is unknown.
    pub fn rejected(error: TurnError) -> Self {
        Self::failed(String::new(), error, String::new(), LatencyReport::text())
    }

    pub fn with_fallback(mut self, fallback: String) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn error(&self) -> Option<&TurnError> {
        self.translation.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.translation.is_ok()
    }

    /// Text-frame encoding. The first three lines are fixed so clients can
    /// split on newlines; latency lines follow. Line breaks inside a field
    /// are folded into spaces.
    pub fn render(&self) -> String {
        let translated = match &self.translation {
            Ok(text) => one_line(text),
            Err(e) => Cow::Owned(format!("Error - {e}")),
        };
        let mut out = format!(
            "Original: {}\nTranslated: {}\nAction: {}\nMT: {}ms",
            one_line(&self.original_text),
            translated,
            one_line(&self.action),
            self.latency.translation_ms
        );
        if let Some(ms) = self.latency.recognition_ms {
            out.push_str(&format!("\nSTT: {ms}ms"));
        }
        out
    }
}

fn one_line(text: &str) -> Cow<'_, str> {
    let is_break = |c: char| c == '\r' || c == '\n';
    if !text.contains(is_break) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", " ").replace(is_break, " "))
}
