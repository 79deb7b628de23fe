use serde_json::Value;

use crate::analysis::parse_fenced_json;
use crate::config::{AttributionConfig, ResolvedProvider};
use crate::llm::models::provider_base::{DeltaStream, Message, ProviderError};
use crate::llm::models::provider_handle::create_client;

use super::error::ProxyError;

/// First successful provider answer
pub enum Completion {
    Stream(DeltaStream),
    Json(Value),
}

/// Tries each provider row once, in table order, and stops at the first 2xx.
///
/// Rows without a credential are skipped. HTTP and transport failures are
/// remembered and the next row is tried; only the last one is reported.
pub async fn complete_with_fallback(
    providers: &[ResolvedProvider],
    attribution: &AttributionConfig,
    http_client: &reqwest::Client,
    prompt: &str,
    stream: bool,
) -> Result<Completion, ProxyError> {
    if providers.iter().all(|p| p.api_key.is_none()) {
        log::error!(
            "No provider credentials configured ({} providers in table)",
            providers.len()
        );
        return Err(ProxyError::ServerMisconfigured);
    }

    let mut last_error: Option<ProviderError> = None;

    for resolved in providers {
        let config = &resolved.config;
        let Some(client) = create_client(resolved, attribution, http_client) else {
            log::warn!(
                "Skipping {} ({}): {} is not set",
                config.provider,
                config.model,
                config.api_key_env()
            );
            continue;
        };

        log::info!(
            "Attempting with provider: {}, model: {}",
            config.provider,
            config.model
        );
        let messages = vec![Message::user(prompt)];
        let outcome = if stream {
            client.stream_chat(messages).await.map(Completion::Stream)
        } else {
            client.chat(messages).await.map(Completion::Json)
        };

        match outcome {
            Ok(completion) => {
                log::info!("Provider {} ({}) answered", config.provider, config.model);
                return Ok(completion);
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("Provider {} ({}) failed: {}", config.provider, config.model, e);
                last_error = Some(e);
            }
            Err(e) => return Err(ProxyError::UpstreamProtocol(e.to_string())),
        }
    }

    Err(ProxyError::AllProvidersFailed {
        details: last_error.map(|e| e.to_string()),
    })
}

/// Pulls `choices[0].message.content` out of a completion body and parses it.
pub fn analysis_from_completion(body: &Value) -> Result<Value, ProxyError> {
    let message = body
        .pointer("/choices/0/message")
        .ok_or_else(|| ProxyError::UpstreamProtocol("missing choices[0].message".to_string()))?;
    let content = message
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ProxyError::UpstreamProtocol("choices[0].message.content is not a string".to_string())
        })?;

    parse_fenced_json(content).map_err(ProxyError::ResponseParse)
}
