//! parley: relay typed text and recorded speech over one WebSocket and get
//! back translated turns with per-stage latency.

pub mod config;
pub mod gateway;
pub mod voice;

pub use config::Config;
