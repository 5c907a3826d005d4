//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the per-environment directive is used.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Environment;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub directive: String,
    pub format: LogFormat,
    /// Emit span open/close events (request timings)
    pub span_events: bool,
    pub file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            directive: "info".to_string(),
            format: LogFormat::Pretty,
            span_events: false,
            file_line: true,
        }
    }
}

impl TracingConfig {
    /// Verbose output for the registry crates and HTTP layer
    #[must_use]
    pub fn development() -> Self {
        Self {
            directive: "info,registry_api=debug,registry_service=debug,registry_db=debug,tower_http=debug"
                .to_string(),
            span_events: true,
            ..Self::default()
        }
    }

    /// Structured JSON at info level
    #[must_use]
    pub fn production() -> Self {
        Self {
            format: LogFormat::Json,
            file_line: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Staging => Self::default(),
            Environment::Production => Self::production(),
        }
    }

    fn fmt_span(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.directive))
    }
}

/// Install the global subscriber
///
/// Fails if a subscriber is already installed; callers may ignore that.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    let json = (config.format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_span_events(config.fmt_span())
    });
    let pretty = (config.format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_span_events(config.fmt_span())
    });

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(json)
        .with(pretty)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Install the global subscriber with [`TracingConfig::default`]
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(TracingConfig::default())
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
