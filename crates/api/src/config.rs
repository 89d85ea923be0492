//! API Configuration

use crate::rate_limit::RateLimitConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration, loaded from the environment with validated
/// defaults
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Socket address the server binds to
    pub bind_addr: SocketAddr,
    /// Directory scanned for classifier artifacts
    pub artifact_dir: PathBuf,
    /// Filename prefix selecting artifacts in that directory
    pub artifact_prefix: String,
    /// Rate limiting knobs for the prediction routes
    pub rate_limit: RateLimitConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `BIND_ADDR`, `MODEL_DIR`, `MODEL_PREFIX`,
    /// `RATE_LIMIT_PER_SECOND`, `RATE_LIMIT_BURST`. Every variable has a
    /// default; values that are present but invalid are errors.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .map_err(|_| anyhow::anyhow!("BIND_ADDR must be a valid socket address"))?;

        let artifact_dir =
            PathBuf::from(std::env::var("MODEL_DIR").unwrap_or_else(|_| "models".to_string()));

        let artifact_prefix =
            std::env::var("MODEL_PREFIX").unwrap_or_else(|_| "model_".to_string());
        if artifact_prefix.trim().is_empty() {
            anyhow::bail!("MODEL_PREFIX cannot be empty");
        }

        let per_second = match std::env::var("RATE_LIMIT_PER_SECOND") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_PER_SECOND must be a positive number"))?,
            Err(_) => RateLimitConfig::default().per_second,
        };
        let burst_size = match std::env::var("RATE_LIMIT_BURST") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST must be a positive number"))?,
            Err(_) => RateLimitConfig::default().burst_size,
        };

        let config = Self {
            bind_addr,
            artifact_dir,
            artifact_prefix,
            rate_limit: RateLimitConfig {
                per_second,
                burst_size,
            },
        };

        tracing::info!(
            addr = %config.bind_addr,
            artifact_dir = %config.artifact_dir.display(),
            artifact_prefix = %config.artifact_prefix,
            "Configuration loaded"
        );

        Ok(config)
    }
}
