//! Language codes and the locale registry.
//!
//! Clients speak in short ISO 639-1 codes. Backends need richer tags: the
//! translation engine wants NLLB-style `script`-qualified codes (`eng_Latn`)
//! and the recognizer wants BCP-47 region locales (`en-US`). Both are
//! resolved here, before any backend call, and never guessed.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Language codes (11 supported languages) ──────────────────────

/// Language codes accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Th, // Thai
    En, // English
    Es, // Spanish
    Fr, // French
    It, // Italian
    Ru, // Russian
    De, // German
    Zh, // Chinese (Simplified)
    Ko, // Korean
    Ja, // Japanese
    Ar, // Arabic
}

impl LanguageCode {
    /// Get the ISO 639-1 code string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Th => "th",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Ru => "ru",
            Self::De => "de",
            Self::Zh => "zh",
            Self::Ko => "ko",
            Self::Ja => "ja",
            Self::Ar => "ar",
        }
    }

    /// Get the human-readable language name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Th => "Thai",
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::It => "Italian",
            Self::Ru => "Russian",
            Self::De => "German",
            Self::Zh => "Chinese (Simplified)",
            Self::Ko => "Korean",
            Self::Ja => "Japanese",
            Self::Ar => "Arabic",
        }
    }

    /// Parse from string code (case-insensitive, surrounding whitespace ignored).
    pub fn from_str_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "th" => Some(Self::Th),
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            "it" => Some(Self::It),
            "ru" => Some(Self::Ru),
            "de" => Some(Self::De),
            "zh" => Some(Self::Zh),
            "ko" => Some(Self::Ko),
            "ja" => Some(Self::Ja),
            "ar" => Some(Self::Ar),
            _ => None,
        }
    }

    /// Return all supported language codes.
    pub fn all() -> &'static [LanguageCode] {
        &[
            Self::Th,
            Self::En,
            Self::Es,
            Self::Fr,
            Self::It,
            Self::Ru,
            Self::De,
            Self::Zh,
            Self::Ko,
            Self::Ja,
            Self::Ar,
        ]
    }

    /// Locale tag understood by the translation backend.
    pub fn translation_locale(self) -> TranslationLocale {
        TranslationLocale(match self {
            Self::Th => "tha_Thai",
            Self::En => "eng_Latn",
            Self::Es => "spa_Latn",
            Self::Fr => "fra_Latn",
            Self::It => "ita_Latn",
            Self::Ru => "rus_Cyrl",
            Self::De => "deu_Latn",
            Self::Zh => "zho_Hans",
            Self::Ko => "kor_Hang",
            Self::Ja => "jpn_Jpan",
            Self::Ar => "arb_Arab",
        })
    }

    /// Locale tag understood by the speech recognizer.
    pub fn recognition_locale(self) -> RecognitionLocale {
        RecognitionLocale(match self {
            Self::Th => "th-TH",
            Self::En => "en-US",
            Self::Es => "es-ES",
            Self::Fr => "fr-FR",
            Self::It => "it-IT",
            Self::Ru => "ru-RU",
            Self::De => "de-DE",
            Self::Zh => "zh-CN",
            Self::Ko => "ko-KR",
            Self::Ja => "ja-JP",
            Self::Ar => "ar-SA",
        })
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NLLB-style translation locale, e.g. `tha_Thai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranslationLocale(&'static str);

impl TranslationLocale {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TranslationLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// BCP-47 recognition locale, e.g. `th-TH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecognitionLocale(&'static str);

impl RecognitionLocale {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RecognitionLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A language code outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {code}")]
pub struct NotSupported {
    pub code: String,
}

// ── Registry ─────────────────────────────────────────────────────

/// Stateless lookup from raw wire codes to backend locales.
pub struct LanguageRegistry;

impl LanguageRegistry {
    /// Validate a raw code against the supported set.
    pub fn code(raw: &str) -> Result<LanguageCode, NotSupported> {
        LanguageCode::from_str_code(raw).ok_or_else(|| NotSupported {
            code: raw.trim().to_string(),
        })
    }

    pub fn resolve_translation(raw: &str) -> Result<TranslationLocale, NotSupported> {
        Self::code(raw).map(LanguageCode::translation_locale)
    }

    pub fn resolve_recognition(raw: &str) -> Result<RecognitionLocale, NotSupported> {
        Self::code(raw).map(LanguageCode::recognition_locale)
    }
}

// ── Tests ────────────────────────────────────────────────────────
