//! Translation of gateway failures into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::error::{AppError, ErrorKind};

/// Message returned for every upstream timeout
pub const TIMEOUT_MESSAGE: &str = "API request timed out";

/// Error body returned to clients
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Client-facing messages for each non-validation failure class of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureMessages {
    pub timeout: &'static str,
    pub transport: &'static str,
    pub upstream_status: &'static str,
    pub malformed: &'static str,
    pub internal: &'static str,
}

impl FailureMessages {
    /// One message for everything except timeouts
    pub const fn uniform(message: &'static str) -> Self {
        Self {
            timeout: TIMEOUT_MESSAGE,
            transport: message,
            upstream_status: message,
            malformed: message,
            internal: message,
        }
    }
}

/// A failed gateway request, ready to be rendered
#[derive(Debug)]
pub struct GatewayFailure {
    operation: &'static str,
    error: AppError,
    messages: &'static FailureMessages,
}

impl GatewayFailure {
    pub fn new(operation: &'static str, error: AppError, messages: &'static FailureMessages) -> Self {
        Self {
            operation,
            error,
            messages,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn status(&self) -> StatusCode {
        self.kind().status()
    }

    /// Stable client message. Never includes upstream detail.
    pub fn message(&self) -> String {
        let message = match &self.error {
            AppError::Validation { message, .. } => return message.clone(),
            AppError::UpstreamTimeout { .. } => self.messages.timeout,
            AppError::UpstreamTransport { .. } => self.messages.transport,
            AppError::UpstreamStatus { .. } => self.messages.upstream_status,
            AppError::MalformedUpstreamPayload { .. } => self.messages.malformed,
            AppError::Internal(_) | AppError::Config(_) => self.messages.internal,
        };
        message.to_string()
    }
}

impl IntoResponse for GatewayFailure {
    fn into_response(self) -> Response {
        let kind = self.kind();
        if kind == ErrorKind::Validation {
            warn!(operation = self.operation, kind = %kind, error = %self.error, "Rejected request");
        } else {
            error!(operation = self.operation, kind = %kind, error = %self.error, "Request failed");
        }

        let body = ErrorResponse {
            error: self.message(),
        };
        (kind.status(), Json(body)).into_response()
    }
}
