use serde_json::Value;

use crate::analysis::{extract_json_object, ExtractError};

/// Collects a streamed body; nothing is parsed until the stream has ended.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    bytes: Vec<u8>,
    chunks: usize,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
        self.chunks += 1;
    }

    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    pub fn finish(self) -> Result<Value, ExtractError> {
        log::debug!(
            "Reconstructing analysis from {} chunks ({} bytes)",
            self.chunks,
            self.bytes.len()
        );
        extract_json_object(&self.text())
    }
}
