//! Text and speech turn relay.
//!
//! A client streams typed text or recorded audio over one connection and
//! gets back, per turn, the recognized and translated text with per-stage
//! latency.
//!
//! ## Design
//! - Trait-driven backend ports (`RecognitionPort`, `TranslationPort`, `SynthesisPort`)
//! - 11-language registry resolving wire codes to backend locale tags
//! - `|`-delimited turn frames, JSON control messages for capture settings
//! - Per-session capture settings, never shared across sessions
//! - Strictly ordered turns; every failure folded into the reply frame

pub mod capture;
pub mod events;
pub mod http_backends;
pub mod language;
pub mod outcome;
pub mod pipeline;
pub mod ports;
pub mod registry;
pub mod session;
pub mod turn;

#[cfg(test)]
pub(crate) mod testing;

pub use capture::{CaptureSettings, ChunkDuration, InvalidConfig, RecognizerTuning, Sensitivity};
pub use events::{ClientMessage, ServerMessage};
pub use http_backends::{HttpRecognitionBackend, HttpSynthesisBackend, HttpTranslationBackend};
pub use language::{LanguageCode, LanguageRegistry, NotSupported, RecognitionLocale, TranslationLocale};
pub use outcome::{LatencyReport, OutcomeFrame, Stage, TurnError};
pub use pipeline::{SessionPipeline, DEFAULT_STAGE_TIMEOUT};
pub use ports::{
    Ports, RecognitionError, RecognitionPort, SynthesisPort, TranslationPort, VoiceStyle,
};
pub use registry::{RegistrySnapshot, SessionRegistry, SessionStats};
pub use session::Session;
pub use turn::{AudioTurn, Rejected, TextTurn, Turn};
