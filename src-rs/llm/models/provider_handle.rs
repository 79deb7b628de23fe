use crate::config::{AttributionConfig, ResolvedProvider};
use crate::cons::provider_cons::LLMProvider;

use super::openai::{create_mistral, create_openai, create_openrouter, OpenAiClient};

/// Builds the client for one provider row, or `None` when its credential is absent.
pub fn create_client(
    resolved: &ResolvedProvider,
    attribution: &AttributionConfig,
    http_client: &reqwest::Client,
) -> Option<OpenAiClient> {
    let api_key = resolved.api_key.clone()?;
    let config = &resolved.config;
    let base_url = config.base_url().to_string();
    let model_name = config.model.clone();

    let client = match config.provider {
        LLMProvider::OpenRouter => create_openrouter(
            base_url,
            api_key,
            model_name,
            &attribution.referer,
            &attribution.title,
        ),
        LLMProvider::Mistral => create_mistral(base_url, api_key, model_name),
        LLMProvider::OpenAI => create_openai(base_url, api_key, model_name),
    };

    Some(client.with_http_client(http_client.clone()))
}
