//! Creative Gateway
//!
//! Two small HTTP services in front of hosted AI models: an image service that
//! turns prompts into PNG images and a text service offering creative-writing
//! operations backed by a language model. Every route follows the same shape:
//! validate the request, make one bounded upstream call, transcode the result.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod response;

pub use error::{AppError, ErrorKind, Result};

use std::sync::Arc;

use backend::Upstream;

/// Application state shared across the handlers of one service
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(settings: Arc<config::Settings>, upstream: Arc<dyn Upstream>) -> Self {
        Self { settings, upstream }
    }
}
