//! Builds the configured model backend.

use std::sync::Arc;
use std::time::Duration;
use ressa_config::AppConfig;
use ressa_core::error::ProviderError;
use ressa_core::provider::Provider;
use tracing::info;
use crate::openai_compat::OpenAiCompatProvider;

/// Provider names accepted in `default_provider`.
pub const SUPPORTED_PROVIDERS: &[&str] = &["ollama", "openai"];

/// Build the default provider from configuration.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    Ok(Arc::new(configure(config)?))
}

fn configure(config: &AppConfig) -> Result<OpenAiCompatProvider, ProviderError> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let model = config.model();

    let provider = match config.default_provider.as_str() {
        "openai" => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                ProviderError::NotConfigured(
                    "OpenAI requires an API key (set OPENAI_API_KEY)".into(),
                )
            })?;
            OpenAiCompatProvider::openai(api_key, model)
        }
        "ollama" => OpenAiCompatProvider::ollama(Some(config.ollama_base_url.as_str()), model),
        other => {
            return Err(ProviderError::NotConfigured(format!(
                "Unknown provider: {other}. Use one of: {}",
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }
    };

    info!(provider = %config.default_provider, model, "Creating model provider");

    Ok(provider
        .with_max_tokens(config.max_tokens)
        .with_embedding_model(&config.retrieval.embedding_model)
        .with_timeout(timeout))
}
