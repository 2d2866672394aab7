//! LLM provider factory.
//!
//! Builds a chat-completion client from a provider name, applying the
//! provider's default endpoint and its secret requirements.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use basira_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Resolve a provider name to a supported provider.
pub fn parse_provider(provider: &str) -> Result<ProviderType, String> {
    ProviderType::parse(provider).ok_or_else(|| {
        let supported: Vec<&str> = ProviderType::ALL.iter().map(|p| p.as_str()).collect();
        format!(
            "Unknown provider: {}. Supported: {}",
            provider,
            supported.join(", ")
        )
    })
}

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "openai-compatible", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Optional API key (for providers that require it)
/// * `timeout` - Upper bound on a single completion request
///
/// # Errors
/// Returns error if:
/// - Provider is unknown
/// - Required secrets are missing
/// - The HTTP client cannot be built
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Duration,
) -> Result<Arc<dyn LlmClient>, String> {
    let provider_type = parse_provider(provider)?;
    let base_url = endpoint.unwrap_or(provider_type.default_endpoint());

    if provider_type.requires_api_key() && api_key.is_none() {
        return Err(format!(
            "The {} provider requires an API key",
            provider_type.as_str()
        ));
    }

    match provider_type {
        ProviderType::OpenAI => {
            let client = OpenAiClient::new(base_url, api_key.unwrap_or_default(), timeout)
                .map_err(|e| e.to_string())?;
            Ok(Arc::new(client))
        }
        ProviderType::Ollama => {
            let client =
                OllamaClient::with_base_url(base_url, timeout).map_err(|e| e.to_string())?;
            Ok(Arc::new(client))
        }
    }
}

/// Create the client described by application configuration.
///
/// Checks the provider-independent settings first, then the provider name
/// and its key requirement, so configuration errors name the env var to set.
pub fn create_client_from_config(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    config.validate()?;

    let provider_type = parse_provider(&config.provider).map_err(AppError::Config)?;
    if provider_type.requires_api_key() && config.api_key.is_none() {
        return Err(AppError::Config(format!(
            "API key for the {} provider not found in BASIRA_API_KEY or {}",
            provider_type.as_str(),
            config.api_key_env
        )));
    }

    tracing::debug!("Using {} provider", provider_type.as_str());

    create_client(
        &config.provider,
        config.llm_endpoint.as_deref(),
        config.api_key.as_deref(),
        Duration::from_secs(config.generation_timeout_secs),
    )
    .map_err(AppError::Config)
}
