//! Image transcoding: validate upstream bytes and normalize them to PNG

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use image::ImageFormat;
use std::io::Cursor;
use tracing::{debug, error};

use crate::backend::{UpstreamBody, UpstreamResult};
use crate::error::{AppError, Result};

pub const PNG_MEDIA_TYPE: &str = "image/png";

/// PNG-encoded image ready to be sent to the client
#[derive(Debug, Clone)]
pub struct PngImage(pub Vec<u8>);

impl IntoResponse for PngImage {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, PNG_MEDIA_TYPE)], self.0).into_response()
    }
}

/// Decode the upstream bytes as an image and re-encode them as PNG.
/// Bytes that are not a recognized image are a malformed payload.
pub fn transcode_image(result: UpstreamResult) -> Result<PngImage> {
    let bytes = match result.body {
        UpstreamBody::Binary(bytes) => bytes,
        UpstreamBody::Text(_) => {
            return Err(AppError::Internal(format!(
                "upstream '{}' returned text where image bytes were expected",
                result.provider
            )))
        }
    };

    let image = image::load_from_memory(&bytes).map_err(|e| {
        error!(provider = %result.provider, bytes = bytes.len(), error = %e, "Unable to identify image data");
        AppError::MalformedUpstreamPayload {
            provider: result.provider.clone(),
            reason: format!("not a recognized image: {}", e),
        }
    })?;

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| AppError::Internal(format!("PNG encoding failed: {}", e)))?;

    debug!(
        provider = %result.provider,
        width = image.width(),
        height = image.height(),
        "Transcoded upstream image to PNG"
    );

    Ok(PngImage(buffer.into_inner()))
}
