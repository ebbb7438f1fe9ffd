//! Gateway core - request validation, operation catalog, pipeline and error mapping

pub mod error_mapper;
pub mod operations;
pub mod pipeline;
pub mod request;
pub mod validator;

pub use error_mapper::{ErrorResponse, FailureMessages, GatewayFailure};
pub use operations::{ImageOperation, TextOperation, GENERATE_IMAGE, TEXT_OPERATIONS};
pub use request::GatewayRequest;
pub use validator::{unreadable_body, validate, RequiredField, UNREADABLE_BODY_MESSAGE};
