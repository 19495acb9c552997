//! Probe error definitions.

use std::time::Duration;
use thiserror::Error;

/// Boxed cause carried by connection failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that end a probe invocation.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Mode string did not name a known probe.
    #[error("Unsupported mode: {0}")]
    UnsupportedMode(String),

    /// A field the selected mode cannot run without was not supplied.
    #[error("{field} is required for mode: {mode}")]
    MissingRequiredField { field: &'static str, mode: String },

    /// Connection descriptor could not be built or was rejected by the driver.
    #[error("Invalid configuration for {target}: {reason}")]
    ConfigurationInvalid { target: String, reason: String },

    /// HTTP request could not be constructed (bad url or method).
    #[error("Failed to create HTTP request: {0}")]
    RequestConstructionFailed(String),

    /// Network, auth or handshake failure before the deadline.
    #[error("Failed to connect to {target}: {source}")]
    ConnectionFailed {
        target: String,
        #[source]
        source: BoxError,
    },

    /// Deadline elapsed before the operation completed.
    #[error("Connection to {target} timed out after {}", format_after(.after))]
    Timeout { target: String, after: Duration },

    /// HTTP response arrived with status >= 400.
    #[error("Received HTTP status code {status} from {url}")]
    UnhealthyResponse { url: String, status: u16 },
}

fn format_after(after: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*after)
}

/// Fieldless classification of a [`ProbeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    UnsupportedMode,
    MissingRequiredField,
    ConfigurationInvalid,
    RequestConstructionFailed,
    ConnectionFailed,
    Timeout,
    UnhealthyResponse,
}

impl ProbeError {
    /// Classify this error.
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::UnsupportedMode(_) => ProbeErrorKind::UnsupportedMode,
            ProbeError::MissingRequiredField { .. } => ProbeErrorKind::MissingRequiredField,
            ProbeError::ConfigurationInvalid { .. } => ProbeErrorKind::ConfigurationInvalid,
            ProbeError::RequestConstructionFailed(_) => ProbeErrorKind::RequestConstructionFailed,
            ProbeError::ConnectionFailed { .. } => ProbeErrorKind::ConnectionFailed,
            ProbeError::Timeout { .. } => ProbeErrorKind::Timeout,
            ProbeError::UnhealthyResponse { .. } => ProbeErrorKind::UnhealthyResponse,
        }
    }

    /// Shorthand for a connection failure with an arbitrary cause.
    pub fn connection_failed(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ProbeError::ConnectionFailed {
            target: target.into(),
            source: source.into(),
        }
    }

    /// Shorthand for a rejected connection descriptor.
    pub fn invalid(target: impl Into<String>, reason: impl ToString) -> Self {
        ProbeError::ConfigurationInvalid {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;
