//! Structured logging for the sigforest CLI.
//!
//! A single global `tracing` subscriber writes to `stderr`, leaving `stdout`
//! to the rendered summary. `RUST_LOG` selects what is recorded and
//! `SIGFOREST_LOG_FORMAT` selects between human-readable and JSON lines.
//! Records emitted through the `log` facade are bridged into `tracing`.

use std::{env, io, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "SIGFOREST_LOG_FORMAT";
const DEFAULT_DIRECTIVES: &str = "info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Output format of log records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text meant for terminals.
    #[default]
    Human,
    /// One JSON object per record, including the span stack.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" | "" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

impl LogFormat {
    /// Reads the format from `SIGFOREST_LOG_FORMAT`, defaulting to
    /// [`LogFormat::Human`] when it is unset.
    ///
    /// # Errors
    /// Returns [`LoggingError`] when the variable is not Unicode or names an
    /// unknown format.
    pub fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            }),
        }
    }
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `SIGFOREST_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// Another subscriber already owns the global slot.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Installs the global subscriber once; later calls return the format chosen
/// by the first successful call.
///
/// # Errors
/// Returns [`LoggingError`] when the format cannot be determined or the
/// subscriber cannot be installed.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }

    let format = LogFormat::from_env()?;
    install(format)?;
    Ok(*INSTALLED.get_or_init(|| format))
}

fn install(format: LogFormat) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr);
    let layer = match format {
        LogFormat::Human => layer.boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // A logger installed by an embedding application keeps the `log` slot.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}
