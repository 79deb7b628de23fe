use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::analysis::AnalysisRequest;
use crate::llm::models::provider_base::DeltaStream;
use crate::llm::prompts::render_analysis_prompt;

use super::error::ProxyError;
use super::fallback::{analysis_from_completion, complete_with_fallback, Completion};
use super::server::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn analyze(State(state): State<AppState>, body: Bytes) -> Result<Response, ProxyError> {
    let request: AnalysisRequest = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("Rejected analyze body: {}", e);
        ProxyError::BadRequest
    })?;
    let topic = request.topic().ok_or(ProxyError::BadRequest)?;
    let prompt = render_analysis_prompt(topic);

    let completion = complete_with_fallback(
        &state.providers,
        &state.attribution,
        &state.http_client,
        &prompt,
        state.stream,
    )
    .await?;

    match completion {
        Completion::Stream(deltas) => Ok(stream_response(deltas)),
        Completion::Json(body) => {
            let analysis = analysis_from_completion(&body)?;
            Ok(Json(analysis).into_response())
        }
    }
}

pub async fn method_not_allowed() -> ProxyError {
    ProxyError::MethodNotAllowed
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> &'static str {
    "ok"
}

/// Relays deltas as a chunked plain-text body; an upstream read error aborts it.
fn stream_response(deltas: DeltaStream) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(deltas),
    )
        .into_response()
}
