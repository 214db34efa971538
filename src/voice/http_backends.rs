//! reqwest-backed port implementations for out-of-process model servers.
//!
//! Each backend is a small JSON-over-HTTP service:
//!
//! ```text
//! POST {translation_url}/translate   {"text","src","tgt"}      -> {"translation"}
//! POST {recognition_url}/recognize?locale=..&energy_threshold=..&pause_threshold=..
//!                                    <raw audio body>          -> {"text"}
//! POST {synthesis_url}/synthesize    {"text","locale","voice"} -> audio bytes
//! ```

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::capture::RecognizerTuning;
use super::language::{RecognitionLocale, TranslationLocale};
use super::ports::{
    RecognitionError, RecognitionPort, SynthesisPort, TranslationPort, VoiceStyle,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .build()
        .context("failed to build HTTP client")
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

// ── Translation ──────────────────────────────────────────────────

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    src: &'a str,
    tgt: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
}

pub struct HttpTranslationBackend {
    url: String,
    http: reqwest::Client,
}

impl HttpTranslationBackend {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            url: endpoint(base_url, "translate"),
            http: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl TranslationPort for HttpTranslationBackend {
    async fn translate(
        &self,
        text: &str,
        source: TranslationLocale,
        target: TranslationLocale,
    ) -> anyhow::Result<String> {
        let body = TranslateRequest {
            text,
            src: source.as_str(),
            tgt: target.as_str(),
        };

        let resp = self.http.post(&self.url).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Translation backend returned {status}: {body}");
        }

        let parsed: TranslateResponse = resp
            .json()
            .await
            .context("invalid translation response")?;
        Ok(parsed.translation)
    }

    fn name(&self) -> &str {
        "http-translation"
    }
}

// ── Recognition ──────────────────────────────────────────────────

#[derive(Serialize)]
struct RecognizeQuery<'a> {
    locale: &'a str,
    energy_threshold: u32,
    pause_threshold: f64,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    text: String,
}

pub struct HttpRecognitionBackend {
    url: String,
    http: reqwest::Client,
}

impl HttpRecognitionBackend {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            url: endpoint(base_url, "recognize"),
            http: build_client(timeout)?,
        })
    }
}

/// Transport failures mean the recognizer is unreachable; anything else
/// happened after it answered.
fn classify_transport_error(err: &reqwest::Error) -> RecognitionError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        RecognitionError::Unavailable(err.to_string())
    } else {
        RecognitionError::Other(err.to_string())
    }
}

fn classify_status(status: StatusCode, body: String) -> RecognitionError {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        RecognitionError::Unintelligible
    } else if status.is_server_error() {
        RecognitionError::Unavailable(format!("{status}: {body}"))
    } else {
        RecognitionError::Other(format!("{status}: {body}"))
    }
}

#[async_trait]
impl RecognitionPort for HttpRecognitionBackend {
    async fn recognize(
        &self,
        audio: &[u8],
        locale: RecognitionLocale,
        tuning: RecognizerTuning,
    ) -> Result<String, RecognitionError> {
        let query = RecognizeQuery {
            locale: locale.as_str(),
            energy_threshold: tuning.energy_threshold,
            pause_threshold: tuning.pause_threshold,
        };

        let resp = self
            .http
            .post(&self.url)
            .query(&query)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let parsed: RecognizeResponse = resp
            .json()
            .await
            .map_err(|e| RecognitionError::Other(format!("invalid recognition response: {e}")))?;
        Ok(parsed.text)
    }

    fn name(&self) -> &str {
        "http-recognition"
    }
}

// ── Synthesis ────────────────────────────────────────────────────

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    locale: &'a str,
    voice: VoiceStyle,
}

pub struct HttpSynthesisBackend {
    url: String,
    http: reqwest::Client,
}

impl HttpSynthesisBackend {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            url: endpoint(base_url, "synthesize"),
            http: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl SynthesisPort for HttpSynthesisBackend {
    async fn synthesize(
        &self,
        text: &str,
        locale: RecognitionLocale,
        voice: VoiceStyle,
    ) -> anyhow::Result<Vec<u8>> {
        let body = SynthesizeRequest {
            text,
            locale: locale.as_str(),
            voice,
        };

        let resp = self.http.post(&self.url).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Synthesis backend returned {status}: {body}");
        }

        let audio = resp.bytes().await?;
        if audio.is_empty() {
            anyhow::bail!("Synthesis backend returned no audio");
        }
        Ok(audio.to_vec())
    }

    fn name(&self) -> &str {
        "http-synthesis"
    }
}

// ── Tests ────────────────────────────────────────────────────────
