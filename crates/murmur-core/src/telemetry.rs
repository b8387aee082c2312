//! Telemetry initialization
//!
//! Sets up the tracing subscriber with an env filter. The system's richer
//! observability surface is the visualizer event stream; this module only
//! covers process logs.

use crate::error::{Error, Result};

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name recorded in the startup log line
    pub service_name: String,
    /// Log level filter used when RUST_LOG is unset
    pub log_level: String,
    /// Whether to log to stdout at all
    pub stdout_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "murmur".to_string(),
            log_level: "info".to_string(),
            stdout_enabled: true,
        }
    }
}

impl TelemetryConfig {
    /// Create a new configuration with the given service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set the log level filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Disable stdout logging
    pub fn without_stdout(mut self) -> Self {
        self.stdout_enabled = false;
        self
    }

    /// Create from environment variables
    ///
    /// Reads `MURMUR_SERVICE_NAME` (default: "murmur") and `RUST_LOG`
    /// (default: "info").
    pub fn from_env() -> Self {
        let service_name =
            std::env::var("MURMUR_SERVICE_NAME").unwrap_or_else(|_| "murmur".to_string());
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            service_name,
            log_level,
            stdout_enabled: true,
        }
    }
}

/// Guard returned by [`init_telemetry`]; keep it alive for the process
pub struct TelemetryGuard {
    _private: (),
}

/// Initialize the tracing subscriber
///
/// Idempotence is the caller's responsibility; a second call returns an
/// error from the subscriber registry.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = if config.stdout_enabled {
        Some(tracing_subscriber::fmt::layer())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Internal {
            reason: format!("failed to initialize tracing subscriber: {}", e),
        })?;

    tracing::info!(service = %config.service_name, "Telemetry initialized");

    Ok(TelemetryGuard { _private: () })
}
