//! API request and response models, as documented in the OpenAPI schema

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the content operations (enhance, poetic/sentiment analysis, suggest edits)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ContentRequest {
    /// Text to work on
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ScriptRequest {
    /// Free-form text to format as a screenplay
    pub script: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StoryRequest {
    pub story: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SceneRequest {
    /// Description of the scene
    pub scene: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedContentResponse {
    pub enhanced_content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoeticContentResponse {
    pub poetic_content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SentimentResponse {
    pub sentiment: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormattedScriptResponse {
    pub formatted_script: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArcAnalysisResponse {
    pub arc_analysis: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SuggestionsResponse {
    /// Up to three alternative phrasings, split from the model output on blank lines
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SceneDetailsResponse {
    pub scene_details: String,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Name of the configured upstream provider
    pub upstream: String,
    pub protocol: String,
    /// RFC 3339 time of the check
    pub timestamp: String,
}
