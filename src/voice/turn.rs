//! Turn decoding for the `|`-delimited wire frame.
//!
//! ```text
//! text turn:   <text>|<src>|<tgt>|<action>
//! audio turn:  <base64-audio>|<src>|<tgt>|audio
//! ```
//!
//! There is no escaping: a text containing `|` yields too many fields and is
//! rejected as malformed.

use base64::Engine;

use super::language::{LanguageCode, LanguageRegistry};
use super::outcome::{LatencyReport, OutcomeFrame, TurnError};

/// Field separator on the wire.
pub const FIELD_SEPARATOR: char = '|';

/// Trailing literal that marks an audio turn. Also echoed as the action of
/// every audio outcome.
pub const AUDIO_ACTION: &str = "audio";

/// A typed-text turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTurn {
    pub text: String,
    pub src: LanguageCode,
    pub tgt: LanguageCode,
    pub action: String,
}

/// A recorded-audio turn. `audio` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTurn {
    pub audio: Vec<u8>,
    pub src: LanguageCode,
    pub tgt: LanguageCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Text(TextTurn),
    Audio(AudioTurn),
}

impl Turn {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Audio(_) => "audio",
        }
    }

    pub fn src(&self) -> LanguageCode {
        match self {
            Self::Text(t) => t.src,
            Self::Audio(a) => a.src,
        }
    }

    pub fn tgt(&self) -> LanguageCode {
        match self {
            Self::Text(t) => t.tgt,
            Self::Audio(a) => a.tgt,
        }
    }
}

/// A frame that could not be decoded, with as much of its shape as could
/// still be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub error: TurnError,
    /// `audio` for audio-shaped frames, the action field of a four-field
    /// text frame, empty otherwise.
    pub action: String,
    pub audio: bool,
}

impl Rejected {
    fn unknown(error: TurnError) -> Self {
        Self {
            error,
            action: String::new(),
            audio: false,
        }
    }

    fn text(error: TurnError, action: &str) -> Self {
        Self {
            error,
            action: action.to_string(),
            audio: false,
        }
    }

    fn audio(error: TurnError) -> Self {
        Self {
            error,
            action: AUDIO_ACTION.to_string(),
            audio: true,
        }
    }

    /// Reply frame for the rejected turn. Audio-shaped frames keep the
    /// zeroed recognition latency.
    pub fn into_frame(self) -> OutcomeFrame {
        let latency = if self.audio {
            LatencyReport::audio()
        } else {
            LatencyReport::text()
        };
        OutcomeFrame::failed(String::new(), self.error, self.action, latency)
    }
}

/// Decode one inbound frame.
pub fn parse(raw: &str) -> Result<Turn, Rejected> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    if fields.len() < 3 {
        return Err(Rejected::unknown(TurnError::MalformedFrame));
    }

    let is_audio = fields
        .last()
        .is_some_and(|last| last.trim() == AUDIO_ACTION);

    let [body, src, tgt, action] = fields.as_slice() else {
        return Err(if is_audio {
            Rejected::audio(TurnError::MalformedFrame)
        } else {
            Rejected::unknown(TurnError::MalformedFrame)
        });
    };

    if is_audio {
        return parse_audio(body, src, tgt).map_err(Rejected::audio);
    }

    let action = action.trim();
    let (src, tgt) = resolve_pair(src, tgt).map_err(|e| Rejected::text(e, action))?;
    Ok(Turn::Text(TextTurn {
        text: (*body).to_string(),
        src,
        tgt,
        action: action.to_string(),
    }))
}

fn parse_audio(body: &str, src: &str, tgt: &str) -> Result<Turn, TurnError> {
    let audio = base64::engine::general_purpose::STANDARD
        .decode(body.trim())
        .map_err(|_| TurnError::BadAudioEncoding)?;
    if audio.is_empty() {
        return Err(TurnError::BadAudioEncoding);
    }
    let (src, tgt) = resolve_pair(src, tgt)?;
    Ok(Turn::Audio(AudioTurn { audio, src, tgt }))
}

fn resolve_pair(src: &str, tgt: &str) -> Result<(LanguageCode, LanguageCode), TurnError> {
    let src = LanguageRegistry::code(src)?;
    let tgt = LanguageRegistry::code(tgt)?;
    Ok((src, tgt))
}
