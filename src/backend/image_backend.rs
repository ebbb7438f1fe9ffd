//! Image generation backend for Hugging Face style inference endpoints

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::backend::invoker::UpstreamInvoker;
use crate::backend::traits::{Upstream, UpstreamPayload, UpstreamResult};
use crate::config::UpstreamConfig;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Inference endpoint returning raw image bytes for `{"inputs": prompt}`
pub struct InferenceImageBackend {
    endpoint: String,
    invoker: UpstreamInvoker,
}

impl InferenceImageBackend {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let invoker = UpstreamInvoker::new(config)?;
        if !invoker.has_credential() {
            warn!(provider = %config.name, "No credential configured for image upstream");
        }

        Ok(Self {
            endpoint: config.endpoint.clone(),
            invoker,
        })
    }
}

#[async_trait]
impl Upstream for InferenceImageBackend {
    fn name(&self) -> &str {
        self.invoker.provider()
    }

    fn protocol(&self) -> &str {
        "http"
    }

    async fn invoke(&self, payload: UpstreamPayload) -> Result<UpstreamResult> {
        let request = InferenceRequest {
            inputs: payload.text(),
        };
        let bytes = self.invoker.post_json(&self.endpoint, &request).await?;
        Ok(UpstreamResult::binary(self.name(), bytes))
    }
}
