use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::llm::utils::string_util::strip_code_fences;

lazy_static! {
    static ref FENCED_JSON_BLOCK: Regex =
        Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("fenced block pattern is valid");
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoObject,

    #[error("model output is not valid JSON: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Parses model output after removing fence markers, without any other repair.
pub fn parse_fenced_json(content: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fences(content).trim())
}

/// Recovers one JSON object from free-form model output.
///
/// Candidate text is the body of a ```json block when one is closed, otherwise
/// the whole text with fence markers removed. The object is the span from the
/// first `{` to the last `}` of the candidate.
pub fn extract_json_object(text: &str) -> Result<Value, ExtractError> {
    let candidate = match FENCED_JSON_BLOCK.captures(text).and_then(|c| c.get(1)) {
        Some(block) => block.as_str().to_string(),
        None => strip_code_fences(text),
    };

    let object = outer_braces(&candidate).ok_or(ExtractError::NoObject)?;
    Ok(serde_json::from_str(object)?)
}

fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
