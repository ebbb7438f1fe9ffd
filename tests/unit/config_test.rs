//! Unit tests for configuration module

use creative_gateway::config::{ProtocolType, Settings, DEFAULT_TIMEOUT_MS};
use std::io::Write;
use std::sync::Mutex;

/// Serializes tests that set `CREATIVE_GATEWAY__*` variables or assert on keys they override
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.image_service.server.host, "0.0.0.0");
    assert_eq!(settings.image_service.server.port, 8000);
    assert_eq!(settings.text_service.server.port, 4000);
    assert_eq!(settings.image_service.upstream.protocol, ProtocolType::Http);
    assert_eq!(settings.text_service.upstream.protocol, ProtocolType::Gemini);
    assert_eq!(settings.text_service.upstream.model.as_deref(), Some("gemini-2.0-flash"));
    assert_eq!(settings.text_service.upstream.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert_eq!(settings.cors.allowed_origins, vec!["*"]);
    assert!(settings.prompts.is_empty());
}

#[test]
fn test_settings_validation_valid() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn test_settings_validation_invalid_port() {
    let mut settings = Settings::default();
    settings.text_service.server.port = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_validation_invalid_endpoint() {
    let mut settings = Settings::default();
    settings.image_service.upstream.endpoint = "not a url".to_string();

    let err = settings.validate().unwrap_err();
    assert!(err.to_string().contains("not a valid URL"));
}

#[test]
fn test_settings_validation_zero_timeout() {
    let mut settings = Settings::default();
    settings.image_service.upstream.timeout_ms = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_validation_shared_address() {
    let mut settings = Settings::default();
    settings.text_service.server.port = settings.image_service.server.port;

    assert!(settings.validate().is_err());
}

#[test]
fn test_disabled_service_is_not_validated() {
    let mut settings = Settings::default();
    settings.image_service.enabled = false;
    settings.image_service.server.port = 0;
    settings.image_service.upstream.endpoint = String::new();

    assert!(settings.validate().is_ok());
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from_path(dir.path().join("absent.yaml")).unwrap();

    assert_eq!(settings.image_service.server.port, 8000);
    assert_eq!(settings.text_service.upstream.name, "gemini");
}

#[test]
fn test_load_yaml_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let file = write_config(
        ".yaml",
        r#"
cors:
  allowed_origins:
    - "https://studio.example.com"
text_service:
  upstream:
    name: local-llm
    protocol: openai
    endpoint: "http://localhost:11434/v1"
    model: llama3
    timeout_ms: 10000
prompts:
  suggest_edits: Offer three rewrites of the following text
"#,
    );

    let settings = Settings::load_from_path(file.path()).unwrap();

    assert_eq!(settings.cors.allowed_origins, vec!["https://studio.example.com"]);
    assert_eq!(settings.text_service.upstream.protocol, ProtocolType::OpenAI);
    assert_eq!(settings.text_service.upstream.model.as_deref(), Some("llama3"));
    assert_eq!(settings.text_service.upstream.timeout_ms, 10_000);
    assert_eq!(settings.text_service.server.port, 4000);
    assert_eq!(
        settings.prompt_override("suggest_edits"),
        Some("Offer three rewrites of the following text")
    );
    assert_eq!(settings.prompt_override("enhance"), None);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_load_toml_file() {
    let file = write_config(
        ".toml",
        r#"
[image_service]
enabled = false

[image_service.server]
port = 9100

[text_service.server]
host = "127.0.0.1"
port = 4500
"#,
    );

    let settings = Settings::load_from_path(file.path()).unwrap();

    assert!(!settings.image_service.enabled);
    assert_eq!(settings.image_service.server.port, 9100);
    assert_eq!(settings.text_service.server.address(), "127.0.0.1:4500");
}

#[test]
fn test_environment_overrides_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let file = write_config(".yaml", "logging:\n  level: debug\n");

    std::env::set_var("CREATIVE_GATEWAY__LOGGING__FORMAT", "pretty");
    let settings = Settings::load_from_path(file.path());
    std::env::remove_var("CREATIVE_GATEWAY__LOGGING__FORMAT");

    let settings = settings.unwrap();
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.format, "pretty");
}

#[test]
fn test_unknown_protocol_is_rejected() {
    let file = write_config(".yaml", "text_service:\n  upstream:\n    protocol: carrier-pigeon\n");

    assert!(Settings::load_from_path(file.path()).is_err());
}

#[test]
fn test_environment_sets_cors_origin_list() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("CREATIVE_GATEWAY__CORS__ALLOWED_ORIGINS", "http://a,http://b");
    let settings = Settings::load_from_path(dir.path().join("absent.yaml"));
    std::env::remove_var("CREATIVE_GATEWAY__CORS__ALLOWED_ORIGINS");

    let settings = settings.unwrap();
    assert_eq!(settings.cors.allowed_origins, vec!["http://a", "http://b"]);
}

#[test]
fn test_environment_sets_single_cors_origin() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("CREATIVE_GATEWAY__CORS__ALLOWED_ORIGINS", "http://localhost:5173");
    let settings = Settings::load_from_path(dir.path().join("absent.yaml"));
    std::env::remove_var("CREATIVE_GATEWAY__CORS__ALLOWED_ORIGINS");

    let settings = settings.unwrap();
    assert_eq!(settings.cors.allowed_origins, vec!["http://localhost:5173"]);
    assert!(settings.validate().is_ok());
}
