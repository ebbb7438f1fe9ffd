//! HTTP route definitions for the image and text services

use crate::api::models::*;
use crate::api::{handlers, text_handlers};
use crate::gateway::operations::{
    ANALYZE_STORY_ARC, ENHANCE_CONTENT, FORMAT_SCRIPT, POETIC_ANALYSIS, SCENE_SUGGESTIONS,
    SENTIMENT_ANALYSIS, SUGGEST_EDITS,
};
use crate::gateway::ErrorResponse;
use crate::middleware::cors_layer;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation of the image service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Creative Gateway Image Service",
        description = "Generates images from text prompts through a hosted inference endpoint.",
        license(name = "MIT"),
    ),
    servers((url = "http://localhost:8000", description = "Local development server")),
    paths(handlers::generate_image, handlers::health_check),
    components(schemas(ErrorResponse, HealthResponse)),
    tags(
        (name = "Images", description = "Image generation"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ImageApiDoc;

/// OpenAPI documentation of the text service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Creative Gateway Text Service",
        description = "Creative-writing operations backed by a hosted language model.",
        license(name = "MIT"),
    ),
    servers((url = "http://localhost:4000", description = "Local development server")),
    paths(
        text_handlers::enhance_content,
        text_handlers::poetic_analysis,
        text_handlers::sentiment_analysis,
        text_handlers::format_script,
        text_handlers::analyze_story_arc,
        text_handlers::suggest_edits,
        text_handlers::scene_suggestions,
        handlers::health_check,
    ),
    components(schemas(
        ContentRequest,
        ScriptRequest,
        StoryRequest,
        SceneRequest,
        EnhancedContentResponse,
        PoeticContentResponse,
        SentimentResponse,
        FormattedScriptResponse,
        ArcAnalysisResponse,
        SuggestionsResponse,
        SceneDetailsResponse,
        ErrorResponse,
        HealthResponse,
    )),
    tags(
        (name = "Content", description = "Content refinement and analysis"),
        (name = "Script", description = "Screenplay formatting"),
        (name = "Story", description = "Story structure analysis"),
        (name = "Film", description = "Film scene assistance"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct TextApiDoc;

/// Create the image service router
pub fn create_image_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.settings.cors);

    Router::new()
        .route("/generate-image", get(handlers::generate_image))
        .route("/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ImageApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Create the text service router
pub fn create_text_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.settings.cors);

    Router::new()
        .route(ENHANCE_CONTENT.path, post(text_handlers::enhance_content))
        .route(POETIC_ANALYSIS.path, post(text_handlers::poetic_analysis))
        .route(SENTIMENT_ANALYSIS.path, post(text_handlers::sentiment_analysis))
        .route(FORMAT_SCRIPT.path, post(text_handlers::format_script))
        .route(ANALYZE_STORY_ARC.path, post(text_handlers::analyze_story_arc))
        .route(SUGGEST_EDITS.path, post(text_handlers::suggest_edits))
        .route(SCENE_SUGGESTIONS.path, post(text_handlers::scene_suggestions))
        .route("/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", TextApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
