use serde_json::Value;
use tokio_stream::{Stream, StreamExt};

use super::provider_base::DeltaStream;

/// Splits an SSE byte stream into lines.
///
/// Bytes after the last `\n` are carried over to the next `push`, so a line
/// split across reads is emitted once, whole. Splitting happens on bytes, so a
/// multi-byte character cut in half by the transport is reassembled before
/// decoding.
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    buffer: Vec<u8>,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns every line it completed, without terminators.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Returns the unterminated remainder, if any, and resets the decoder.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&rest);
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

/// Extracts `choices[0].delta.content` from one SSE line.
///
/// Blank lines, comments, `[DONE]` and payloads that are not valid JSON yield
/// `None`; partial chunks are dropped rather than reported.
pub fn delta_content_from_line(line: &str) -> Option<String> {
    let line = line.trim_end_matches('\r');
    let payload = line.strip_prefix("data:")?;
    let payload = payload.strip_prefix(' ').unwrap_or(payload);
    if payload.trim().is_empty() || payload.trim() == "[DONE]" {
        return None;
    }

    let json: Value = serde_json::from_str(payload).ok()?;
    json.pointer("/choices/0/delta/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Turns a provider's raw SSE body into a stream of content deltas.
///
/// Each delta is yielded as soon as its line is complete. A read error from
/// upstream is yielded once and ends the stream.
pub fn delta_stream<S, B, E>(upstream: S) -> DeltaStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    Box::pin(async_stream::stream! {
        let mut upstream = Box::pin(upstream);
        let mut decoder = SseLineDecoder::new();
        let mut failed = false;

        while let Some(chunk) = upstream.next().await {
            let bytes = match chunk {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::error!("Stream reading error: {}", e);
                    failed = true;
                    yield Err(anyhow::Error::new(e).context("Failed to read stream chunk"));
                    break;
                }
            };

            for line in decoder.push(bytes.as_ref()) {
                if let Some(delta) = delta_content_from_line(&line) {
                    yield Ok(delta);
                }
            }
        }

        if !failed {
            if let Some(line) = decoder.finish() {
                if let Some(delta) = delta_content_from_line(&line) {
                    yield Ok(delta);
                }
            }
        }
    })
}
