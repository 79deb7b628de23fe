use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio_stream::StreamExt;

use crate::analysis::{AnalysisRequest, ExtractError};

use super::busy::{BusyGuard, BusyIndicator, NoopBusy};
use super::reconstruct::StreamAccumulator;
use super::render::{RenderError, ResultsView};

/// Shown for every failure; the cause only goes to the log.
pub const FAILURE_NOTICE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("an analysis is already running")]
    Busy,

    #[error("analysis endpoint returned {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Reconstruct(#[from] ExtractError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl RequestError {
    pub fn notice(&self) -> &'static str {
        FAILURE_NOTICE
    }
}

pub struct AnalysisRequester {
    endpoint: String,
    streaming: bool,
    busy: AtomicBool,
    indicator: Arc<dyn BusyIndicator>,
    http_client: reqwest::Client,
}

impl AnalysisRequester {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            streaming: true,
            busy: AtomicBool::new(false),
            indicator: Arc::new(NoopBusy),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn with_indicator(mut self, indicator: Arc<dyn BusyIndicator>) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Submits `topic` and renders the answer into `view`.
    ///
    /// Blank topics are ignored and return `Ok(false)`. The busy state is held
    /// for the whole call and released on every exit path.
    pub async fn submit(&self, topic: &str, view: &mut ResultsView) -> Result<bool, RequestError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Ok(false);
        }

        let _guard =
            BusyGuard::acquire(&self.busy, self.indicator.as_ref()).ok_or(RequestError::Busy)?;
        view.reset();

        let outcome = match self.fetch(topic).await {
            Ok(data) => view.render(&data).map_err(RequestError::from),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            log::error!("Analysis of {:?} failed: {}", topic, e);
        }
        outcome.map(|_| true)
    }

    async fn fetch(&self, topic: &str) -> Result<Value, RequestError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&AnalysisRequest::new(topic))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log::warn!("Analysis endpoint returned {}: {}", status, body);
            return Err(RequestError::Status(status));
        }

        if !self.streaming {
            return Ok(response.json::<Value>().await?);
        }

        let mut accumulator = StreamAccumulator::new();
        let mut body = Box::pin(response.bytes_stream());
        while let Some(chunk) = body.next().await {
            accumulator.push(&chunk?);
        }
        Ok(accumulator.finish()?)
    }
}
