//! Text generation backends for hosted LLMs
//! Supports Google Gemini `generateContent` and OpenAI API compatible endpoints

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::backend::invoker::UpstreamInvoker;
use crate::backend::traits::{Upstream, UpstreamPayload, UpstreamResult};
use crate::config::UpstreamConfig;
use crate::error::{AppError, Result};

/// Header Gemini expects the API key in
pub const GEMINI_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> std::result::Result<String, String> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match block_reason {
                Some(reason) => format!("prompt blocked: {}", reason),
                None => "response has no candidates".to_string(),
            });
        };

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if texts.is_empty() {
            return Err(format!(
                "candidate has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ));
        }

        Ok(texts.concat())
    }
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Chat completion request (OpenAI compatible)
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Chat completion response, reduced to what the gateway reads
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Chat choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

fn required_model(config: &UpstreamConfig) -> Result<String> {
    config
        .model
        .clone()
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| {
            AppError::Config(config::ConfigError::Message(format!(
                "Upstream '{}' ({}) requires a model",
                config.name, config.protocol
            )))
        })
}

fn malformed(provider: &str, reason: String) -> AppError {
    error!(provider = %provider, reason = %reason, "Malformed upstream payload");
    AppError::MalformedUpstreamPayload {
        provider: provider.to_string(),
        reason,
    }
}

/// Google Gemini backend
pub struct GeminiBackend {
    url: String,
    invoker: UpstreamInvoker,
}

impl GeminiBackend {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let model = required_model(config)?;
        let header = config
            .auth
            .header_name
            .clone()
            .unwrap_or_else(|| GEMINI_KEY_HEADER.to_string());

        Ok(Self {
            url: format!(
                "{}/v1beta/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                model
            ),
            invoker: UpstreamInvoker::with_header(config, Some(header))?,
        })
    }
}

#[async_trait]
impl Upstream for GeminiBackend {
    fn name(&self) -> &str {
        self.invoker.provider()
    }

    fn protocol(&self) -> &str {
        "gemini"
    }

    async fn invoke(&self, payload: UpstreamPayload) -> Result<UpstreamResult> {
        let request = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part {
                    text: payload.text(),
                }],
            }],
        };

        let bytes = self.invoker.post_json(&self.url, &request).await?;

        let response: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| malformed(self.name(), format!("invalid JSON: {}", e)))?;
        let text = response
            .into_text()
            .map_err(|reason| malformed(self.name(), reason))?;

        Ok(UpstreamResult::text(self.name(), text))
    }
}

/// OpenAI API compatible text backend
pub struct OpenAICompatibleBackend {
    url: String,
    model: String,
    invoker: UpstreamInvoker,
}

impl OpenAICompatibleBackend {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            url: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            model: required_model(config)?,
            invoker: UpstreamInvoker::new(config)?,
        })
    }
}

#[async_trait]
impl Upstream for OpenAICompatibleBackend {
    fn name(&self) -> &str {
        self.invoker.provider()
    }

    fn protocol(&self) -> &str {
        "openai"
    }

    async fn invoke(&self, payload: UpstreamPayload) -> Result<UpstreamResult> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(payload.text().to_string()),
            }],
        };

        let bytes = self.invoker.post_json(&self.url, &request).await?;

        let response: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| malformed(self.name(), format!("invalid JSON: {}", e)))?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| malformed(self.name(), "response has no message content".to_string()))?;

        Ok(UpstreamResult::text(self.name(), text))
    }
}
