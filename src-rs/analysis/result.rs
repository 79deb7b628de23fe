use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

impl AnalysisRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
        }
    }

    /// The topic as received, if it has any non-whitespace content.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// The only response shape the renderer accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub pros: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub cons: Vec<String>,
}

/// Accepts a missing or `null` list as empty.
fn deserialize_vec_or_null<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
