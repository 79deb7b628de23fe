use anyhow::Context;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppConfig, AttributionConfig, ResolvedProvider};

use super::handler::{analyze, health, index, method_not_allowed};

/// Immutable per-process state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<Vec<ResolvedProvider>>,
    pub attribution: Arc<AttributionConfig>,
    pub stream: bool,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: &AppConfig, providers: Vec<ResolvedProvider>) -> Self {
        Self {
            providers: Arc::new(providers),
            attribution: Arc::new(config.attribution.clone()),
            stream: config.server.stream,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn usable_providers(&self) -> usize {
        self.providers.iter().filter(|p| p.api_key.is_some()).count()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/analyze", post(analyze).fallback(method_not_allowed))
        .with_state(state)
        .layer(middleware::from_fn(log_http_request))
}

pub async fn serve(listen_addr: &str, state: AppState) -> anyhow::Result<()> {
    log::info!(
        "Starting analysis proxy: stream={}, providers={} ({} with credentials)",
        state.stream,
        state.providers.len(),
        state.usable_providers()
    );
    if state.usable_providers() == 0 {
        log::warn!("No provider credentials found; every analysis will fail with 500");
    }

    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", listen_addr))?;
    log::info!("Listening on http://{}", listen_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("server error")?;
    log::info!("Analysis proxy shutting down");
    Ok(())
}

async fn log_http_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    log::info!("{} {} -> {}", method, uri, response.status());
    response
}

async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
    log::info!("Shutdown signal received");
}
