//! Backend module - upstream provider trait, HTTP invoker and provider clients

pub mod image_backend;
pub mod invoker;
pub mod text_backend;
pub mod traits;

use std::sync::Arc;

use crate::config::{ProtocolType, UpstreamConfig};
use crate::error::{AppError, Result};

pub use image_backend::InferenceImageBackend;
pub use invoker::UpstreamInvoker;
pub use text_backend::{GeminiBackend, OpenAICompatibleBackend};
pub use traits::{Upstream, UpstreamBody, UpstreamPayload, UpstreamResult};

/// Create the image upstream described by `config`
pub fn create_image_backend(config: &UpstreamConfig) -> Result<Arc<dyn Upstream>> {
    match config.protocol {
        ProtocolType::Http => Ok(Arc::new(InferenceImageBackend::new(config)?)),
        other => Err(AppError::Config(config::ConfigError::Message(format!(
            "Unsupported protocol for image upstream: {}",
            other
        )))),
    }
}

/// Create the text upstream described by `config`
pub fn create_text_backend(config: &UpstreamConfig) -> Result<Arc<dyn Upstream>> {
    match config.protocol {
        ProtocolType::Gemini => Ok(Arc::new(GeminiBackend::new(config)?)),
        ProtocolType::OpenAI => Ok(Arc::new(OpenAICompatibleBackend::new(config)?)),
        ProtocolType::Http => Err(AppError::Config(config::ConfigError::Message(
            "Unsupported protocol for text upstream: http".to_string(),
        ))),
    }
}
