//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! every field has a default, so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for a health wait.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WaitConfig {
    /// Which endpoint and service to poll.
    pub target: TargetConfig,

    /// How long to wait and for what.
    pub wait: WaitSettings,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// gRPC endpoint URI (e.g., "http://127.0.0.1:50051").
    pub address: String,

    /// Service name registered with the health server.
    /// Empty asks about the server as a whole.
    pub service: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:50051".to_string(),
            service: String::new(),
            connect_timeout_secs: 5,
        }
    }
}

impl TargetConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// What the wait is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WaitMode {
    /// Any health response, whatever its status.
    Reachable,
    /// A `SERVING` health response.
    Serving,
}

/// Wait configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WaitSettings {
    /// Overall deadline in seconds.
    pub timeout_secs: u64,

    /// Stop condition.
    pub mode: WaitMode,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            mode: WaitMode::Serving,
        }
    }
}

impl WaitSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
