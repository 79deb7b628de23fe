use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

/// Incremental assistant text, in arrival order
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Outcome of a single provider attempt that did not produce a usable response
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} error: {status} - {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },

    #[error("{provider} returned an unexpected response: {message}")]
    Protocol { provider: String, message: String },
}

impl ProviderError {
    /// Http and Transport failures move the fallback loop on to the next provider.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ProviderError::Protocol { .. })
    }
}
