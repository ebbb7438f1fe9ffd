//! Single-attempt HTTP invocation shared by every upstream provider

use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::UpstreamConfig;
use crate::error::{AppError, Result};

/// HTTP client bound to one provider, its credential and its timeout
pub struct UpstreamInvoker {
    provider: String,
    client: Client,
    timeout_ms: u64,
    credential: Option<String>,
    header_name: Option<String>,
}

impl UpstreamInvoker {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Self::with_header(config, config.auth.header_name.clone())
    }

    /// Create an invoker sending the credential in `header_name` (bearer when `None`)
    pub fn with_header(config: &UpstreamConfig, header_name: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            provider: config.name.clone(),
            client,
            timeout_ms: config.timeout_ms,
            credential: config.auth.credential(),
            header_name,
        })
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Get headers with authentication
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let Some(token) = &self.credential else {
            return Ok(headers);
        };

        match &self.header_name {
            Some(header_name) => {
                let name = HeaderName::from_bytes(header_name.as_bytes()).map_err(|e| {
                    AppError::Internal(format!("Invalid auth header name '{}': {}", header_name, e))
                })?;
                let value = HeaderValue::from_str(token)
                    .map_err(|e| AppError::Internal(format!("Invalid credential value: {}", e)))?;
                headers.insert(name, value);
            }
            None => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| AppError::Internal(format!("Invalid credential value: {}", e)))?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(headers)
    }

    /// POST `body` as JSON to `url` once and return the raw response body.
    ///
    /// Non-success statuses are logged with their body and surface as
    /// [`AppError::UpstreamStatus`].
    pub async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Bytes> {
        debug!(provider = %self.provider, url = %url, "Sending upstream request");

        let response = self
            .client
            .post(url)
            .headers(self.headers()?)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                provider = %self.provider,
                status = status.as_u16(),
                body = %body,
                "Upstream returned non-success status"
            );
            return Err(AppError::UpstreamStatus {
                provider: self.provider.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        debug!(provider = %self.provider, bytes = bytes.len(), "Upstream request completed");
        Ok(bytes)
    }

    fn classify(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            error!(provider = %self.provider, timeout_ms = self.timeout_ms, "Upstream request timed out");
            AppError::UpstreamTimeout {
                provider: self.provider.clone(),
                timeout_ms: self.timeout_ms,
            }
        } else {
            error!(provider = %self.provider, error = %err, "Upstream transport error");
            AppError::UpstreamTransport {
                provider: self.provider.clone(),
                source: err,
            }
        }
    }
}
