//! Upstream provider abstraction

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Data sent to an upstream provider, built from a validated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamPayload {
    /// Inference-endpoint input, sent as `{"inputs": ...}`
    Inference { inputs: String },
    /// Free-text prompt for a language model
    Prompt(String),
}

impl UpstreamPayload {
    pub fn text(&self) -> &str {
        match self {
            UpstreamPayload::Inference { inputs } => inputs,
            UpstreamPayload::Prompt(prompt) => prompt,
        }
    }
}

/// Raw upstream content
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Binary(Bytes),
    Text(String),
}

/// Result of a single upstream call, tagged with the provider that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResult {
    pub provider: String,
    pub body: UpstreamBody,
}

impl UpstreamResult {
    pub fn binary(provider: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            provider: provider.into(),
            body: UpstreamBody::Binary(bytes),
        }
    }

    pub fn text(provider: impl Into<String>, text: String) -> Self {
        Self {
            provider: provider.into(),
            body: UpstreamBody::Text(text),
        }
    }
}

/// An external model provider. Implementations make exactly one outbound
/// call per `invoke` and never retry.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Provider name, used to tag results and in logs
    fn name(&self) -> &str;

    /// Wire protocol
    fn protocol(&self) -> &str;

    async fn invoke(&self, payload: UpstreamPayload) -> Result<UpstreamResult>;
}
