//! TOML configuration with environment overrides.

pub mod schema;

pub use schema::{BackendsConfig, CaptureConfig, Config, GatewayConfig, PipelineConfig};

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::voice::CaptureSettings;

/// Environment variables consulted by [`Config::with_env_overrides`].
pub const ENV_HOST: &str = "PARLEY_HOST";
pub const ENV_PORT: &str = "PARLEY_PORT";
pub const ENV_TRANSLATION_URL: &str = "PARLEY_TRANSLATION_URL";
pub const ENV_RECOGNITION_URL: &str = "PARLEY_RECOGNITION_URL";
pub const ENV_SYNTHESIS_URL: &str = "PARLEY_SYNTHESIS_URL";

impl Config {
    /// Load configuration from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields defaults. Any other
    /// failure is returned.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply `PARLEY_*` environment variables. Empty values are ignored.
    pub fn with_env_overrides(self) -> anyhow::Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(ENV_HOST) {
            self.gateway.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.gateway.port = port
                .trim()
                .parse()
                .with_context(|| format!("{ENV_PORT} is not a valid port: {port}"))?;
        }
        if let Some(url) = get(ENV_TRANSLATION_URL) {
            self.backends.translation_url = url;
        }
        if let Some(url) = get(ENV_RECOGNITION_URL) {
            self.backends.recognition_url = url;
        }
        if let Some(url) = get(ENV_SYNTHESIS_URL) {
            self.backends.synthesis_url = url;
        }

        Ok(self)
    }

    /// `<config_dir>/parley/config.toml`, or `./parley.toml` when the
    /// platform has no config directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "parley")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("parley.toml"))
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gateway.host.trim().is_empty() {
            anyhow::bail!("gateway.host must not be empty");
        }
        if self.gateway.request_timeout_secs == 0 {
            anyhow::bail!("gateway.request_timeout_secs must be greater than 0");
        }
        if self.gateway.max_body_bytes == 0 {
            anyhow::bail!("gateway.max_body_bytes must be greater than 0");
        }
        if self.backends.request_timeout_secs == 0 {
            anyhow::bail!("backends.request_timeout_secs must be greater than 0");
        }
        if self.pipeline.stage_timeout_secs == 0 {
            anyhow::bail!("pipeline.stage_timeout_secs must be greater than 0");
        }
        for (name, url) in [
            ("translation_url", &self.backends.translation_url),
            ("recognition_url", &self.backends.recognition_url),
            ("synthesis_url", &self.backends.synthesis_url),
        ] {
            if url.trim().is_empty() {
                anyhow::bail!("backends.{name} must not be empty");
            }
        }
        self.capture_defaults()?;
        Ok(())
    }

    /// Capture settings new sessions start from.
    pub fn capture_defaults(&self) -> anyhow::Result<CaptureSettings> {
        CaptureSettings::parse(&self.capture.sensitivity, &self.capture.chunk_duration)
            .context("invalid [capture] defaults")
    }

    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.pipeline.stage_timeout_secs)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backends.request_timeout_secs)
    }
}

impl GatewayConfig {
    /// Upper bound for one REST request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
