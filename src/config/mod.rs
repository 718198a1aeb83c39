use crate::error::{AdmissionError, Result};
use crate::rate_limit::types::{RateLimitConfig, WindowDuration};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Rate limiting configuration
    pub rate_limit: RateLimitSettings,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which limiter variant to wire into the server
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStrategy {
    /// One window of quota per client IP
    #[default]
    PerClient,
    /// One shared window for all requests
    Global,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Limiter variant
    #[serde(default)]
    pub strategy: RateLimitStrategy,
    /// Maximum number of requests allowed per window
    pub max_requests: u32,
    /// Length of the fixed window (second, minute, hour, or day)
    pub window: WindowDuration,
}

impl RateLimitSettings {
    /// The engine-level limits these settings describe
    pub fn limits(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.max_requests,
            window: self.window,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AdmissionError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| AdmissionError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(AdmissionError::Config(
                "Server host cannot be empty".to_string(),
            ));
        }

        if self.rate_limit.max_requests == 0 {
            return Err(AdmissionError::Config(
                "Rate limit max_requests must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
