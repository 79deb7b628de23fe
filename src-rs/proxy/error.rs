use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Terminal outcomes of `POST /api/analyze`
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Topic is required")]
    BadRequest,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server misconfigured: no provider API key is set")]
    ServerMisconfigured,

    #[error("Unexpected response from AI provider")]
    UpstreamProtocol(String),

    #[error("Failed to parse AI response as JSON")]
    ResponseParse(#[source] serde_json::Error),

    #[error("All AI models failed to respond. Please check API quotas.")]
    AllProvidersFailed { details: Option<String> },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest => StatusCode::BAD_REQUEST,
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::ServerMisconfigured | ProxyError::ResponseParse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::UpstreamProtocol(_) | ProxyError::AllProvidersFailed { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Diagnostic detail exposed alongside the message for upstream failures.
    pub fn details(&self) -> Option<&str> {
        match self {
            ProxyError::UpstreamProtocol(details) => Some(details),
            ProxyError::AllProvidersFailed { details } => details.as_deref(),
            _ => None,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Analyze request failed ({}): {} {:?}", status, self, self.details());
        }

        let mut body = json!({ "error": self.to_string() });
        if let Some(details) = self.details() {
            body["details"] = json!(details);
        }
        (status, Json(body)).into_response()
    }
}
