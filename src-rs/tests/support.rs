use crate::client::BusyIndicator;
use crate::config::{ProviderConfig, ResolvedProvider};
use crate::cons::provider_cons::LLMProvider;
use crate::proxy::{router, AppState};
use serde_json::json;
use std::sync::Mutex;

pub const ANALYSIS_JSON: &str = r#"{"analysis":{"pros":["Быстро","Надёжно"],"cons":["Сложно"]}}"#;

/// Non-streaming completion body whose message content is `content`.
pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// SSE body delivering `deltas` one event each, terminated by `[DONE]`.
pub fn sse_body(deltas: &[&str]) -> String {
    let mut out = String::new();
    for d in deltas {
        let event = json!({ "choices": [{ "index": 0, "delta": { "content": d } }] });
        out.push_str(&format!("data: {}\n\n", event));
    }
    out.push_str("data: [DONE]\n\n");
    out
}

pub fn provider(kind: LLMProvider, model: &str, base_url: &str, key: Option<&str>) -> ResolvedProvider {
    ResolvedProvider::new(
        ProviderConfig::new(kind, model).with_base_url(base_url),
        key.map(str::to_string),
    )
}

pub fn state(providers: Vec<ResolvedProvider>, stream: bool) -> AppState {
    let config = crate::config::AppConfig::embedded().unwrap();
    AppState::new(&config, providers).with_stream(stream)
}

/// Serves the proxy on an ephemeral port and returns its base URL.
pub async fn spawn_proxy(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Default)]
pub struct RecordingBusy {
    pub events: Mutex<Vec<bool>>,
}

impl RecordingBusy {
    pub fn events(&self) -> Vec<bool> {
        self.events.lock().unwrap().clone()
    }
}

impl BusyIndicator for RecordingBusy {
    fn set_busy(&self, busy: bool) {
        self.events.lock().unwrap().push(busy);
    }
}
