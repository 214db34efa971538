use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub backends: BackendsConfig,
    pub pipeline: PipelineConfig,
    pub capture: CaptureConfig,
}

/// HTTP listener and REST limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    /// 0 binds an ephemeral port.
    pub port: u16,
    /// Applies to REST routes only; WebSocket sessions are unbounded.
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_secs: 120,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Base URLs of the model servers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendsConfig {
    pub translation_url: String,
    pub recognition_url: String,
    pub synthesis_url: String,
    /// HTTP client timeout for every backend request.
    pub request_timeout_secs: u64,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            translation_url: "http://127.0.0.1:9001".to_string(),
            recognition_url: "http://127.0.0.1:9002".to_string(),
            synthesis_url: "http://127.0.0.1:9003".to_string(),
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Upper bound for any single backend stage of a turn.
    pub stage_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_timeout_secs: 30,
        }
    }
}

/// Capture settings every new session starts with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    pub sensitivity: String,
    pub chunk_duration: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sensitivity: "Medium".to_string(),
            chunk_duration: "50ms".to_string(),
        }
    }
}
