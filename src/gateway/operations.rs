//! Catalog of gateway operations: required field, prompt instruction,
//! response key and failure messages for each route.

use crate::gateway::error_mapper::{FailureMessages, TIMEOUT_MESSAGE};
use crate::gateway::validator::RequiredField;
use crate::response::ResponseShape;

/// Image generation from a text prompt
#[derive(Debug)]
pub struct ImageOperation {
    pub name: &'static str,
    pub field: RequiredField,
    pub failure: FailureMessages,
}

pub static GENERATE_IMAGE: ImageOperation = ImageOperation {
    name: "generate_image",
    field: RequiredField::new("prompt", "Prompt cannot be empty"),
    failure: FailureMessages {
        timeout: TIMEOUT_MESSAGE,
        transport: "Failed to connect to the API",
        upstream_status: "Error generating image from API",
        malformed: "Invalid image data received",
        internal: "An unexpected error occurred",
    },
};

/// A text operation forwarded to the language model
#[derive(Debug)]
pub struct TextOperation {
    /// Operation name, also the key for instruction overrides in settings
    pub name: &'static str,
    pub path: &'static str,
    pub field: RequiredField,
    pub instruction: &'static str,
    pub response_key: &'static str,
    pub shape: ResponseShape,
    pub failure: FailureMessages,
}

impl TextOperation {
    /// `"<instruction>:\n\n<input>"`
    pub fn build_prompt(&self, instruction: &str, input: &str) -> String {
        format!("{}:\n\n{}", instruction, input)
    }
}

pub static ENHANCE_CONTENT: TextOperation = TextOperation {
    name: "enhance",
    path: "/api/content/enhance",
    field: RequiredField::new("content", "Content is required"),
    instruction: "Review and refine the following content to make it more engaging and professional. \
                  Provide only one improved version",
    response_key: "enhancedContent",
    shape: ResponseShape::Whole,
    failure: FailureMessages::uniform("Failed to enhance content"),
};

pub static POETIC_ANALYSIS: TextOperation = TextOperation {
    name: "poetic_analysis",
    path: "/api/content/poetic-analysis",
    field: RequiredField::new("content", "Content is required"),
    instruction: "Analyze the following text for poetic elements such as rhythm, figures of speech, \
                  and structure. Then, rewrite it poetically while keeping the original meaning. \
                  Provide only one enhanced poetic version",
    response_key: "poeticContent",
    shape: ResponseShape::Whole,
    failure: FailureMessages::uniform("Failed to analyze poetic content"),
};

pub static SENTIMENT_ANALYSIS: TextOperation = TextOperation {
    name: "sentiment_analysis",
    path: "/api/content/sentiment-analysis",
    field: RequiredField::new("content", "Content is required"),
    instruction: "Analyze the sentiment of the following text and classify it. \
                  Sentiment should basically give the emotions of the given content. \
                  Just give the emotions, don't explain them.",
    response_key: "sentiment",
    shape: ResponseShape::Whole,
    failure: FailureMessages::uniform("Failed to analyze sentiment"),
};

pub static FORMAT_SCRIPT: TextOperation = TextOperation {
    name: "format_script",
    path: "/api/script/format",
    field: RequiredField::new("script", "Script is required"),
    instruction: "Format the following text into a properly structured screenplay",
    response_key: "formattedScript",
    shape: ResponseShape::Whole,
    failure: FailureMessages::uniform("Failed to format script"),
};

pub static ANALYZE_STORY_ARC: TextOperation = TextOperation {
    name: "analyze_arc",
    path: "/api/story/analyze-arc",
    field: RequiredField::new("story", "Story content is required"),
    instruction: "Break down the following story into Exposition, Rising Action, Climax, and Resolution",
    response_key: "arcAnalysis",
    shape: ResponseShape::Whole,
    failure: FailureMessages::uniform("Failed to analyze story arc"),
};

pub static SUGGEST_EDITS: TextOperation = TextOperation {
    name: "suggest_edits",
    path: "/api/content/suggest-edits",
    field: RequiredField::new("content", "Content is required"),
    instruction: "Suggest three alternative phrasings for the following text",
    response_key: "suggestions",
    shape: ResponseShape::Segments {
        delimiter: "\n\n",
        limit: 3,
    },
    failure: FailureMessages::uniform("Failed to suggest edits"),
};

pub static SCENE_SUGGESTIONS: TextOperation = TextOperation {
    name: "scene_suggestions",
    path: "/api/film/scene-suggestions",
    field: RequiredField::new("scene", "Scene description is required"),
    instruction: "Suggest vivid descriptions and sound effects for the following scene",
    response_key: "sceneDetails",
    shape: ResponseShape::Whole,
    failure: FailureMessages::uniform("Failed to generate scene suggestions"),
};

/// Every text operation, in route order
pub static TEXT_OPERATIONS: [&TextOperation; 7] = [
    &ENHANCE_CONTENT,
    &POETIC_ANALYSIS,
    &SENTIMENT_ANALYSIS,
    &FORMAT_SCRIPT,
    &ANALYZE_STORY_ARC,
    &SUGGEST_EDITS,
    &SCENE_SUGGESTIONS,
];
