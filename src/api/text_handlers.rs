//! Text service handlers, one per creative-writing operation

use crate::gateway::operations::{
    ANALYZE_STORY_ARC, ENHANCE_CONTENT, FORMAT_SCRIPT, POETIC_ANALYSIS, SCENE_SUGGESTIONS,
    SENTIMENT_ANALYSIS, SUGGEST_EDITS,
};
use crate::gateway::validator::unreadable_body;
use crate::gateway::{pipeline, GatewayFailure, GatewayRequest, TextOperation};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

type TextResult = Result<Json<Value>, GatewayFailure>;

/// Shared body of every text handler. A body that is not readable JSON
/// (bad syntax, wrong content type) is rejected before validation with its
/// own message; a readable body without the field gets the field's message.
async fn handle(
    state: Arc<AppState>,
    operation: &'static TextOperation,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> TextResult {
    let span = info_span!("text_operation", request_id = %Uuid::new_v4(), operation = operation.name);

    async move {
        let request = match body {
            Ok(Json(value)) => GatewayRequest::from_json(Some(value)),
            Err(rejection) => {
                debug!(status = %rejection.status(), error = %rejection, "Unreadable JSON body");
                let e = unreadable_body(rejection.body_text());
                return Err(GatewayFailure::new(operation.name, e, &operation.failure));
            }
        };

        info!(upstream = %state.upstream.name(), "Received text operation request");

        match pipeline::run_text_operation(&state, operation, &request).await {
            Ok(body) => {
                info!("Text operation completed");
                Ok(Json(body))
            }
            Err(e) => Err(GatewayFailure::new(operation.name, e, &operation.failure)),
        }
    }
    .instrument(span)
    .await
}

/// Refine content to be more engaging and professional
#[utoipa::path(
    post,
    path = "/api/content/enhance",
    tag = "Content",
    request_body = ContentRequest,
    responses(
        (status = 200, description = "Enhanced content", body = EnhancedContentResponse),
        (status = 400, description = "Content missing or blank", body = ErrorResponse),
        (status = 500, description = "Upstream or internal failure", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse),
    )
)]
pub async fn enhance_content(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> TextResult {
    handle(state, &ENHANCE_CONTENT, body).await
}

/// Rewrite content poetically
#[utoipa::path(
    post,
    path = "/api/content/poetic-analysis",
    tag = "Content",
    request_body = ContentRequest,
    responses(
        (status = 200, description = "Poetic rewrite", body = PoeticContentResponse),
        (status = 400, description = "Content missing or blank", body = ErrorResponse),
        (status = 500, description = "Upstream or internal failure", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse),
    )
)]
pub async fn poetic_analysis(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> TextResult {
    handle(state, &POETIC_ANALYSIS, body).await
}

/// Name the emotions carried by the content
#[utoipa::path(
    post,
    path = "/api/content/sentiment-analysis",
    tag = "Content",
    request_body = ContentRequest,
    responses(
        (status = 200, description = "Detected emotions", body = SentimentResponse),
        (status = 400, description = "Content missing or blank", body = ErrorResponse),
        (status = 500, description = "Upstream or internal failure", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse),
    )
)]
pub async fn sentiment_analysis(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> TextResult {
    handle(state, &SENTIMENT_ANALYSIS, body).await
}

/// Format free text as a screenplay
#[utoipa::path(
    post,
    path = "/api/script/format",
    tag = "Script",
    request_body = ScriptRequest,
    responses(
        (status = 200, description = "Formatted screenplay", body = FormattedScriptResponse),
        (status = 400, description = "Script missing or blank", body = ErrorResponse),
        (status = 500, description = "Upstream or internal failure", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse),
    )
)]
pub async fn format_script(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> TextResult {
    handle(state, &FORMAT_SCRIPT, body).await
}

/// Break a story into exposition, rising action, climax and resolution
#[utoipa::path(
    post,
    path = "/api/story/analyze-arc",
    tag = "Story",
    request_body = StoryRequest,
    responses(
        (status = 200, description = "Story arc breakdown", body = ArcAnalysisResponse),
        (status = 400, description = "Story missing or blank", body = ErrorResponse),
        (status = 500, description = "Upstream or internal failure", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse),
    )
)]
pub async fn analyze_story_arc(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> TextResult {
    handle(state, &ANALYZE_STORY_ARC, body).await
}

/// Suggest up to three alternative phrasings
#[utoipa::path(
    post,
    path = "/api/content/suggest-edits",
    tag = "Content",
    request_body = ContentRequest,
    responses(
        (status = 200, description = "Alternative phrasings", body = SuggestionsResponse),
        (status = 400, description = "Content missing or blank", body = ErrorResponse),
        (status = 500, description = "Upstream or internal failure", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse),
    )
)]
pub async fn suggest_edits(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> TextResult {
    handle(state, &SUGGEST_EDITS, body).await
}

/// Suggest descriptions and sound effects for a film scene
#[utoipa::path(
    post,
    path = "/api/film/scene-suggestions",
    tag = "Film",
    request_body = SceneRequest,
    responses(
        (status = 200, description = "Scene details", body = SceneDetailsResponse),
        (status = 400, description = "Scene description missing or blank", body = ErrorResponse),
        (status = 500, description = "Upstream or internal failure", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse),
    )
)]
pub async fn scene_suggestions(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> TextResult {
    handle(state, &SCENE_SUGGESTIONS, body).await
}
