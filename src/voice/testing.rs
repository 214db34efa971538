//! Port doubles for unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::capture::RecognizerTuning;
use super::language::{RecognitionLocale, TranslationLocale};
use super::ports::{
    Ports, RecognitionError, RecognitionPort, SynthesisPort, TranslationPort, VoiceStyle,
};

pub(crate) struct FakeTranslator {
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<(String, TranslationLocale, TranslationLocale)>>,
    reply: Result<String, String>,
    delay: Duration,
}

impl FakeTranslator {
    pub fn replying(text: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            ..Self::replying("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationPort for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        source: TranslationLocale,
        target: TranslationLocale,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push((text.to_string(), source, target));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => anyhow::bail!("{message}"),
        }
    }

    fn name(&self) -> &str {
        "fake-translation"
    }
}

pub(crate) struct FakeRecognizer {
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<(Vec<u8>, RecognitionLocale, RecognizerTuning)>>,
    reply: Result<String, RecognitionError>,
    delay: Duration,
}

impl FakeRecognizer {
    pub fn replying(text: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(error: RecognitionError) -> Self {
        Self {
            reply: Err(error),
            ..Self::replying("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_tuning(&self) -> Option<RecognizerTuning> {
        self.seen.lock().last().map(|(_, _, tuning)| *tuning)
    }
}

#[async_trait]
impl RecognitionPort for FakeRecognizer {
    async fn recognize(
        &self,
        audio: &[u8],
        locale: RecognitionLocale,
        tuning: RecognizerTuning,
    ) -> Result<String, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push((audio.to_vec(), locale, tuning));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }

    fn name(&self) -> &str {
        "fake-recognition"
    }
}

pub(crate) struct FakeSynthesizer {
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<(String, RecognitionLocale, VoiceStyle)>>,
    reply: Result<Vec<u8>, String>,
}

impl FakeSynthesizer {
    pub fn replying(audio: &[u8]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply: Ok(audio.to_vec()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            ..Self::replying(b"")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisPort for FakeSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        locale: RecognitionLocale,
        voice: VoiceStyle,
    ) -> anyhow::Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push((text.to_string(), locale, voice));
        match &self.reply {
            Ok(audio) => Ok(audio.clone()),
            Err(message) => anyhow::bail!("{message}"),
        }
    }

    fn name(&self) -> &str {
        "fake-synthesis"
    }
}

pub(crate) fn ports(
    recognition: Arc<FakeRecognizer>,
    translation: Arc<FakeTranslator>,
    synthesis: Arc<FakeSynthesizer>,
) -> Ports {
    Ports {
        recognition,
        translation,
        synthesis,
    }
}

/// Ports that answer every call successfully with fixed values.
pub(crate) fn happy_ports() -> Ports {
    ports(
        Arc::new(FakeRecognizer::replying("hola")),
        Arc::new(FakeTranslator::replying("hello")),
        Arc::new(FakeSynthesizer::replying(b"mp3")),
    )
}
