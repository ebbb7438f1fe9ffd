//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default location of the gateway configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_PATH_ENV: &str = "CREATIVE_GATEWAY_CONFIG";

/// Prefix for environment overrides, e.g. `CREATIVE_GATEWAY__TEXT_SERVICE__SERVER__PORT`
pub const ENV_PREFIX: &str = "CREATIVE_GATEWAY";

/// Default upstream timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub image_service: ServiceConfig,
    pub text_service: ServiceConfig,
    /// Per-operation instruction overrides for the text service, keyed by operation name
    #[serde(default)]
    pub prompts: HashMap<String, String>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

/// One gateway service: its listener and the provider it forwards to
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

fn default_true() -> bool {
    true
}

/// Wire protocol spoken by an upstream provider
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolType {
    /// Hugging Face style inference endpoint: JSON `{"inputs": ...}` in, raw bytes out
    Http,
    /// Google Generative Language `generateContent`
    Gemini,
    /// OpenAI-compatible chat completions
    OpenAI,
}

impl Default for ProtocolType {
    fn default() -> Self {
        ProtocolType::Http
    }
}

impl std::fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolType::Http => write!(f, "http"),
            ProtocolType::Gemini => write!(f, "gemini"),
            ProtocolType::OpenAI => write!(f, "openai"),
        }
    }
}

/// Credential settings for an upstream provider
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct UpstreamAuth {
    /// Environment variable holding the credential
    #[serde(default)]
    pub token_env: Option<String>,
    /// Header carrying the raw credential; bearer `Authorization` when unset
    #[serde(default)]
    pub header_name: Option<String>,
    /// Inline credential, takes precedence over `token_env`
    #[serde(default)]
    pub api_key: Option<String>,
}

impl UpstreamAuth {
    /// Resolve the credential, if any is configured
    pub fn credential(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        self.token_env
            .as_ref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|token| !token.is_empty())
    }
}

/// Upstream provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    pub name: String,

    #[serde(default)]
    pub protocol: ProtocolType,

    pub endpoint: String,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub auth: UpstreamAuth,

    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Settings {
    /// Load settings from the default configuration file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from_path(path)
    }

    /// Load settings from a specific configuration file (YAML or TOML).
    /// A missing file leaves the built-in defaults in place.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = if path.extension().map_or(false, |ext| ext == "toml") {
            FileFormat::Toml
        } else {
            FileFormat::Yaml
        };

        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if path.exists() {
            builder = builder.add_source(File::from(path).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins"),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let services = [("image_service", &self.image_service), ("text_service", &self.text_service)];

        for (label, service) in services {
            if !service.enabled {
                continue;
            }
            if service.server.port == 0 {
                return Err(invalid(format!("{label}: server port cannot be 0")));
            }
            let upstream = &service.upstream;
            if upstream.name.trim().is_empty() {
                return Err(invalid(format!("{label}: upstream name cannot be empty")));
            }
            if Url::parse(&upstream.endpoint).is_err() {
                return Err(invalid(format!(
                    "{label}: upstream endpoint '{}' is not a valid URL",
                    upstream.endpoint
                )));
            }
            if upstream.timeout_ms == 0 {
                return Err(invalid(format!("{label}: upstream timeout cannot be 0")));
            }
        }

        if self.image_service.enabled
            && self.text_service.enabled
            && self.image_service.server.address() == self.text_service.server.address()
        {
            return Err(invalid(format!(
                "image_service and text_service both bind {}",
                self.image_service.server.address()
            )));
        }

        Ok(())
    }

    /// Configured instruction override for a text operation
    pub fn prompt_override(&self, operation: &str) -> Option<&str> {
        self.prompts.get(operation).map(String::as_str)
    }
}

fn invalid(message: String) -> AppError {
    AppError::Config(config::ConfigError::Message(message))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            cors: CorsConfig {
                allowed_origins: default_allowed_origins(),
            },
            image_service: ServiceConfig {
                enabled: true,
                server: ServerConfig {
                    host: default_host(),
                    port: 8000,
                },
                upstream: UpstreamConfig {
                    name: "huggingface".to_string(),
                    protocol: ProtocolType::Http,
                    endpoint: "https://api-inference.huggingface.co/models/ZB-Tech/Text-to-Image"
                        .to_string(),
                    model: None,
                    auth: UpstreamAuth {
                        token_env: Some("HUGGINGFACE_API_TOKEN".to_string()),
                        ..Default::default()
                    },
                    timeout_ms: DEFAULT_TIMEOUT_MS,
                },
            },
            text_service: ServiceConfig {
                enabled: true,
                server: ServerConfig {
                    host: default_host(),
                    port: 4000,
                },
                upstream: UpstreamConfig {
                    name: "gemini".to_string(),
                    protocol: ProtocolType::Gemini,
                    endpoint: "https://generativelanguage.googleapis.com".to_string(),
                    model: Some("gemini-2.0-flash".to_string()),
                    auth: UpstreamAuth {
                        token_env: Some("GEMINI_API_KEY".to_string()),
                        ..Default::default()
                    },
                    timeout_ms: DEFAULT_TIMEOUT_MS,
                },
            },
            prompts: HashMap::new(),
        }
    }
}
