//! Request validation

use crate::error::{AppError, Result};
use crate::gateway::request::GatewayRequest;

/// Message for a body that could not be read as JSON
pub const UNREADABLE_BODY_MESSAGE: &str = "Request body must be valid JSON";

/// The one field an operation requires, with the message returned when it is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    pub name: &'static str,
    pub missing_message: &'static str,
}

impl RequiredField {
    pub const fn new(name: &'static str, missing_message: &'static str) -> Self {
        Self {
            name,
            missing_message,
        }
    }
}

/// Return the trimmed value of `field`, rejecting absent and blank values
pub fn validate<'a>(request: &'a GatewayRequest, field: &RequiredField) -> Result<&'a str> {
    match request.field(field.name).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Validation {
            field: field.name.to_string(),
            message: field.missing_message.to_string(),
        }),
    }
}

/// Validation failure for a request body that is not readable JSON
pub fn unreadable_body(reason: impl std::fmt::Display) -> AppError {
    AppError::Validation {
        field: format!("body ({})", reason),
        message: UNREADABLE_BODY_MESSAGE.to_string(),
    }
}
