//! Backend capability ports.
//!
//! The pipeline never talks to a speech or translation engine directly. It
//! holds trait objects for three narrow capabilities, injected at startup,
//! so any backend can be swapped without touching orchestration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::capture::RecognizerTuning;
use super::language::{RecognitionLocale, TranslationLocale};

// ── Recognition ──────────────────────────────────────────────────

/// Why a recognition call produced no text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    /// The recognizer ran but understood no speech.
    #[error("no intelligible speech")]
    Unintelligible,
    /// The recognizer could not be reached or failed server-side.
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),
    #[error("recognition failed: {0}")]
    Other(String),
}

/// Speech-to-text capability.
#[async_trait]
pub trait RecognitionPort: Send + Sync {
    /// Transcribe encoded audio (caller-supplied container format).
    async fn recognize(
        &self,
        audio: &[u8],
        locale: RecognitionLocale,
        tuning: RecognizerTuning,
    ) -> Result<String, RecognitionError>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}

// ── Translation ──────────────────────────────────────────────────

/// Machine-translation capability.
#[async_trait]
pub trait TranslationPort: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: TranslationLocale,
        target: TranslationLocale,
    ) -> anyhow::Result<String>;

    fn name(&self) -> &str;
}

// ── Synthesis ────────────────────────────────────────────────────

/// Voice used for synthesized speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceStyle {
    #[default]
    Standard,
    Female,
    Male,
}

/// Text-to-speech capability.
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    /// Returns encoded audio bytes.
    async fn synthesize(
        &self,
        text: &str,
        locale: RecognitionLocale,
        voice: VoiceStyle,
    ) -> anyhow::Result<Vec<u8>>;

    fn name(&self) -> &str;
}

// ── Bundle ───────────────────────────────────────────────────────

/// The three ports, shared by every session.
#[derive(Clone)]
pub struct Ports {
    pub recognition: Arc<dyn RecognitionPort>,
    pub translation: Arc<dyn TranslationPort>,
    pub synthesis: Arc<dyn SynthesisPort>,
}

impl std::fmt::Debug for Ports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ports")
            .field("recognition", &self.recognition.name())
            .field("translation", &self.translation.name())
            .field("synthesis", &self.synthesis.name())
            .finish()
    }
}
