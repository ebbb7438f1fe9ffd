//! Error types shared by the gateway services

use axum::http::StatusCode;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Every failure a gateway request (or startup) can surface
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("upstream '{provider}' did not respond within {timeout_ms}ms")]
    UpstreamTimeout { provider: String, timeout_ms: u64 },

    #[error("transport error calling upstream '{provider}': {source}")]
    UpstreamTransport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream '{provider}' returned {status}: {body}")]
    UpstreamStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("malformed payload from upstream '{provider}': {reason}")]
    MalformedUpstreamPayload { provider: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Failure classes, each bound to exactly one HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    UpstreamTimeout,
    UpstreamTransport,
    UpstreamStatus,
    MalformedUpstreamPayload,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::UpstreamTransport
            | ErrorKind::UpstreamStatus
            | ErrorKind::MalformedUpstreamPayload
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::UpstreamTimeout => "upstream_timeout",
            ErrorKind::UpstreamTransport => "upstream_transport_error",
            ErrorKind::UpstreamStatus => "upstream_status_error",
            ErrorKind::MalformedUpstreamPayload => "malformed_upstream_payload",
            ErrorKind::Internal => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// Classify this error. Anything outside the request taxonomy is internal.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::UpstreamTimeout { .. } => ErrorKind::UpstreamTimeout,
            AppError::UpstreamTransport { .. } => ErrorKind::UpstreamTransport,
            AppError::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            AppError::MalformedUpstreamPayload { .. } => ErrorKind::MalformedUpstreamPayload,
            AppError::Internal(_) | AppError::Config(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind().status()
    }
}
