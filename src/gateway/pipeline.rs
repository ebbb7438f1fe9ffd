//! Validate → invoke → transcode for each service

use serde_json::Value;
use tracing::debug;

use crate::backend::UpstreamPayload;
use crate::error::Result;
use crate::gateway::operations::{TextOperation, GENERATE_IMAGE};
use crate::gateway::request::GatewayRequest;
use crate::gateway::validator::validate;
use crate::response::{transcode_image, transcode_text, PngImage};
use crate::AppState;

/// Generate an image for the request's prompt and return it as PNG
pub async fn generate_image(state: &AppState, request: &GatewayRequest) -> Result<PngImage> {
    let prompt = validate(request, &GENERATE_IMAGE.field)?;
    debug!(prompt_len = prompt.len(), "Validated image prompt");

    let payload = UpstreamPayload::Inference {
        inputs: prompt.to_string(),
    };
    let result = state.upstream.invoke(payload).await?;

    transcode_image(result)
}

/// Run one text operation and return its JSON response body
pub async fn run_text_operation(
    state: &AppState,
    operation: &TextOperation,
    request: &GatewayRequest,
) -> Result<Value> {
    let input = validate(request, &operation.field)?;

    let instruction = state
        .settings
        .prompt_override(operation.name)
        .unwrap_or(operation.instruction);
    let prompt = operation.build_prompt(instruction, input);
    debug!(input_len = input.len(), prompt_len = prompt.len(), "Built text prompt");

    let result = state.upstream.invoke(UpstreamPayload::Prompt(prompt)).await?;

    transcode_text(result, operation.response_key, operation.shape)
}
