use serde::{Deserialize, Serialize};

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    OpenRouter,
    Mistral,
    OpenAI,
}

impl LLMProvider {
    /// Identifier used in configuration and in diagnostic messages (e.g., "openrouter")
    pub fn provider_name(&self) -> &'static str {
        match self {
            LLMProvider::OpenRouter => "openrouter",
            LLMProvider::Mistral => "mistral",
            LLMProvider::OpenAI => "openai",
        }
    }

    /// Helper to parse from a string (handles aliases)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openrouter" | "open-router" => Some(LLMProvider::OpenRouter),
            "mistral" | "mistralai" => Some(LLMProvider::Mistral),
            "openai" => Some(LLMProvider::OpenAI),
            _ => None,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenRouter => OPENROUTER_BASE_URL,
            LLMProvider::Mistral => MISTRAL_BASE_URL,
            LLMProvider::OpenAI => OPENAI_BASE_URL,
        }
    }

    /// Environment variable holding the bearer token for this provider
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            LLMProvider::OpenRouter => "OPENROUTER_API_KEY",
            LLMProvider::Mistral => "MISTRAL_API_KEY",
            LLMProvider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.provider_name())
    }
}
