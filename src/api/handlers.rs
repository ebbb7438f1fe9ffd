//! HTTP request handlers for the image service and shared health endpoint

use crate::api::models::HealthResponse;
use crate::gateway::{pipeline, GatewayFailure, GatewayRequest, GENERATE_IMAGE};
use crate::response::PngImage;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Generate an image from a prompt
#[utoipa::path(
    get,
    path = "/generate-image",
    tag = "Images",
    params(("prompt" = String, Query, description = "Text describing the image to generate")),
    responses(
        (status = 200, description = "Generated image", content_type = "image/png", body = Vec<u8>),
        (status = 400, description = "Prompt missing or blank", body = ErrorResponse),
        (status = 500, description = "Upstream or internal failure", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse),
    )
)]
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<PngImage, GatewayFailure> {
    let request = GatewayRequest::from_query(params);
    let span = info_span!("generate_image", request_id = %Uuid::new_v4());

    async move {
        info!(upstream = %state.upstream.name(), "Received image generation request");

        match pipeline::generate_image(&state, &request).await {
            Ok(image) => {
                info!(bytes = image.0.len(), "Image generation completed");
                Ok(image)
            }
            Err(e) => Err(GatewayFailure::new(GENERATE_IMAGE.name, e, &GENERATE_IMAGE.failure)),
        }
    }
    .instrument(span)
    .await
}

/// Health check endpoint. Does not contact the upstream provider.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: state.upstream.name().to_string(),
        protocol: state.upstream.protocol().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
