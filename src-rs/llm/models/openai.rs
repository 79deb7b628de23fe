use serde_json::{json, Value};

use crate::cons::provider_cons::LLMProvider;
use crate::llm::models::provider_base::{DeltaStream, Message, ProviderError};
use crate::llm::models::sse::delta_stream;
use crate::llm::utils::string_util::truncate_utf8_with_ellipsis;

const ERROR_BODY_LOG_LIMIT: usize = 512;

/// Client for OpenAI-compatible `/chat/completions` endpoints
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    pub provider: LLMProvider,
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    extra_headers: Vec<(String, String)>,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(provider: LLMProvider, api_base: String, api_key: String, model: String) -> Self {
        Self {
            provider,
            api_base,
            api_key,
            model,
            extra_headers: Vec::new(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Shares one connection pool across clients built per request.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn extra_headers(&self) -> &[(String, String)] {
        &self.extra_headers
    }

    pub fn endpoint(&self) -> String {
        chat_completions_url(&self.api_base)
    }

    async fn send(
        &self,
        messages: Vec<Message>,
        stream: bool,
    ) -> Result<reqwest::Response, ProviderError> {
        let request_body = build_chat_completions_request_body(&self.model, messages, stream);
        let url = self.endpoint();

        let mut request = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        for (name, value) in &self.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                provider: self.provider.to_string(),
                message: format!("{} ({})", e, url),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            log::warn!(
                "Model {} ({}) failed: {} - {}",
                self.model,
                self.provider,
                status,
                truncate_utf8_with_ellipsis(&error_text, ERROR_BODY_LOG_LIMIT)
            );
            return Err(ProviderError::Http {
                provider: self.provider.to_string(),
                status,
                body: error_text,
            });
        }

        Ok(response)
    }

    pub async fn stream_chat(&self, messages: Vec<Message>) -> Result<DeltaStream, ProviderError> {
        let response = self.send(messages, true).await?;
        Ok(delta_stream(response.bytes_stream()))
    }

    pub async fn chat(&self, messages: Vec<Message>) -> Result<Value, ProviderError> {
        let response = self.send(messages, false).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Protocol {
                provider: self.provider.to_string(),
                message: format!("Failed to parse response JSON: {}", e),
            })
    }
}

pub fn create_openai(base_url: String, api_key: String, model_name: String) -> OpenAiClient {
    OpenAiClient::new(LLMProvider::OpenAI, base_url, api_key, model_name)
}

pub fn create_mistral(base_url: String, api_key: String, model_name: String) -> OpenAiClient {
    OpenAiClient::new(LLMProvider::Mistral, base_url, api_key, model_name)
}

pub fn create_openrouter(
    base_url: String,
    api_key: String,
    model_name: String,
    referer: &str,
    title: &str,
) -> OpenAiClient {
    OpenAiClient::new(LLMProvider::OpenRouter, base_url, api_key, model_name)
        .with_header("HTTP-Referer", referer)
        .with_header("X-Title", title)
}

pub(crate) fn build_chat_completions_request_body(
    model: &str,
    messages: Vec<Message>,
    stream: bool,
) -> Value {
    let converted_messages: Vec<Value> = messages
        .into_iter()
        .map(|msg| json!({ "role": msg.role, "content": msg.content }))
        .collect();

    json!({
        "model": model,
        "messages": converted_messages,
        "stream": stream,
    })
}

pub(crate) fn chat_completions_url(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}
