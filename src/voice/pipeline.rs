//! Session pipeline: recognition, translation and response assembly for a
//! single turn.
//!
//! ```text
//! AudioTurn ──▸ recognize ──┐
//!                           ├──▸ translate ──▸ OutcomeFrame
//! TextTurn  ────────────────┘
//! ```
//!
//! Stages run strictly in sequence and every stage is bounded by the stage
//! timeout. `process` never fails: every error is folded into the frame.

use std::future::Future;
use std::time::{Duration, Instant};

use super::capture::{CaptureSettings, RecognizerTuning};
use super::language::LanguageCode;
use super::outcome::{elapsed_ms, LatencyReport, OutcomeFrame, Stage, TurnError};
use super::ports::{Ports, RecognitionError, VoiceStyle};
use super::turn::{AudioTurn, TextTurn, Turn, AUDIO_ACTION};

/// Default upper bound for one backend call.
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of the translation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Translated {
    translation: Result<String, TurnError>,
    elapsed_ms: u64,
}

/// Turn orchestration over the injected ports. Shared by every session;
/// holds no per-session state.
#[derive(Debug, Clone)]
pub struct SessionPipeline {
    ports: Ports,
    stage_timeout: Duration,
}

impl SessionPipeline {
    pub fn new(ports: Ports, stage_timeout: Duration) -> Self {
        Self {
            ports,
            stage_timeout,
        }
    }

    /// Run one turn to completion.
    pub async fn process(&self, turn: Turn, settings: &CaptureSettings) -> OutcomeFrame {
        match turn {
            Turn::Text(turn) => self.process_text(turn).await,
            Turn::Audio(turn) => self.process_audio(turn, settings).await,
        }
    }

    async fn process_text(&self, turn: TextTurn) -> OutcomeFrame {
        let TextTurn {
            text,
            src,
            tgt,
            action,
        } = turn;

        let translated = self.translate(&text, src, tgt).await;
        let latency = LatencyReport {
            recognition_ms: None,
            translation_ms: translated.elapsed_ms,
        };
        assemble(text, translated.translation, action, latency)
    }

    async fn process_audio(&self, turn: AudioTurn, settings: &CaptureSettings) -> OutcomeFrame {
        let AudioTurn { audio, src, tgt } = turn;

        let started = Instant::now();
        let recognized = self
            .recognize(&audio, src, settings.to_recognizer_tuning())
            .await;
        let recognition_ms = elapsed_ms(started);
        drop(audio);

        let text = match recognized {
            Ok(text) => text,
            Err(error) => {
                let latency = LatencyReport {
                    recognition_ms: Some(recognition_ms),
                    translation_ms: 0,
                };
                return OutcomeFrame::failed(String::new(), error, AUDIO_ACTION.into(), latency);
            }
        };

        let translated = self.translate(&text, src, tgt).await;
        let latency = LatencyReport {
            recognition_ms: Some(recognition_ms),
            translation_ms: translated.elapsed_ms,
        };
        assemble(text, translated.translation, AUDIO_ACTION.into(), latency)
    }

    /// Recognition stage. Backend detail is logged and the error normalized.
    pub async fn recognize(
        &self,
        audio: &[u8],
        lang: LanguageCode,
        tuning: RecognizerTuning,
    ) -> Result<String, TurnError> {
        let locale = lang.recognition_locale();
        let call = self.ports.recognition.recognize(audio, locale, tuning);

        match bounded(self.stage_timeout, Stage::Recognition, call).await? {
            Ok(text) => Ok(text),
            Err(err) => {
                tracing::warn!(
                    backend = self.ports.recognition.name(),
                    locale = %locale,
                    audio_bytes = audio.len(),
                    error = %err,
                    "Recognition failed"
                );
                Err(match err {
                    RecognitionError::Unintelligible => TurnError::Unintelligible,
                    RecognitionError::Unavailable(_) => TurnError::BackendUnavailable {
                        stage: Stage::Recognition,
                    },
                    RecognitionError::Other(_) => TurnError::RecognitionFailed,
                })
            }
        }
    }

    /// Translation stage. Blank input short-circuits to an empty
    /// translation without a backend call.
    async fn translate(&self, text: &str, src: LanguageCode, tgt: LanguageCode) -> Translated {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Translated {
                translation: Ok(String::new()),
                elapsed_ms: 0,
            };
        }

        let source = src.translation_locale();
        let target = tgt.translation_locale();
        let started = Instant::now();
        let call = self.ports.translation.translate(trimmed, source, target);
        let outcome = bounded(self.stage_timeout, Stage::Translation, call).await;
        let elapsed_ms = elapsed_ms(started);

        let translation = match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => {
                tracing::warn!(
                    backend = self.ports.translation.name(),
                    src = %source,
                    tgt = %target,
                    error = %err,
                    "Translation failed"
                );
                Err(TurnError::TranslationFailed)
            }
            Err(timeout) => Err(timeout),
        };

        Translated {
            translation,
            elapsed_ms,
        }
    }

    /// One-shot speech synthesis for the REST surface.
    pub async fn synthesize(
        &self,
        text: &str,
        lang: LanguageCode,
        voice: VoiceStyle,
    ) -> Result<Vec<u8>, TurnError> {
        let locale = lang.recognition_locale();
        let call = self.ports.synthesis.synthesize(text, locale, voice);

        bounded(self.stage_timeout, Stage::Synthesis, call)
            .await?
            .map_err(|err| {
                tracing::warn!(
                    backend = self.ports.synthesis.name(),
                    locale = %locale,
                    error = %err,
                    "Synthesis failed"
                );
                TurnError::BackendUnavailable {
                    stage: Stage::Synthesis,
                }
            })
    }
}

/// Await `call` for at most `limit`. On expiry the future is dropped, which
/// cancels the in-flight request.
async fn bounded<F, T>(limit: Duration, stage: Stage, call: F) -> Result<T, TurnError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, call).await.map_err(|_| {
        tracing::warn!(
            %stage,
            timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            "Stage timed out"
        );
        TurnError::Timeout { stage }
    })
}

/// Translation failures keep the untranslated text as the fallback.
fn assemble(
    original: String,
    translation: Result<String, TurnError>,
    action: String,
    latency: LatencyReport,
) -> OutcomeFrame {
    match translation {
        Ok(translated) => OutcomeFrame::translated(original, translated, action, latency),
        Err(error) => {
            let fallback = original.clone();
            OutcomeFrame::failed(original, error, action, latency).with_fallback(fallback)
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
