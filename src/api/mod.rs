//! API module - HTTP routes, handlers, and models

pub mod handlers;
pub mod models;
pub mod routes;
pub mod text_handlers;

pub use routes::{create_image_router, create_text_router};
