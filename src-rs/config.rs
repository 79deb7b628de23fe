use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cons::provider_cons::LLMProvider;

const CONFIG_DIR: &str = ".pros-cons";
const CONFIG_FILE: &str = "config.json";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Relay the provider token stream instead of returning parsed JSON
    #[serde(default = "default_stream")]
    pub stream: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_stream() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            stream: default_stream(),
        }
    }
}

/// Attribution headers sent to providers that require them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionConfig {
    pub referer: String,
    pub title: String,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            referer: "https://pros-cons.vercel.app".to_string(),
            title: "Pros & Cons App".to_string(),
        }
    }
}

/// One row of the provider priority table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: LLMProvider,

    /// Model identifier sent verbatim in the request body
    pub model: String,

    /// Overrides the provider's default API base
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Overrides the provider's default credential variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl ProviderConfig {
    pub fn new(provider: LLMProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            base_url: None,
            api_key_env: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }
}

/// A provider row paired with the credential found for it at startup
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    pub config: ProviderConfig,
    pub api_key: Option<String>,
}

impl ResolvedProvider {
    pub fn new(config: ProviderConfig, api_key: Option<String>) -> Self {
        Self { config, api_key }
    }
}

/// Deployment patch file (restricted fields)
#[derive(Deserialize)]
pub struct UserOverrideConfig {
    pub server: Option<ServerPatch>,
    pub providers: Option<Vec<ProviderConfig>>,
}

#[derive(Deserialize)]
pub struct ServerPatch {
    pub listen_addr: Option<String>,
    pub stream: Option<bool>,
}

/// Global application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub attribution: AttributionConfig,

    /// Ordered provider table; earlier rows are tried first
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl AppConfig {
    /// Load configuration with layered strategy:
    /// 1. Defaults (Embedded Config.toml)
    /// 2. User Config (~/.pros-cons/config.json)
    /// 3. Project Config (./.pros-cons/config.json)
    pub fn load() -> Result<Self> {
        let mut config = Self::embedded()?;

        if let Some(home) = dirs::home_dir() {
            config.apply_patch(home.join(CONFIG_DIR).join(CONFIG_FILE));
        }

        config.apply_patch(Path::new(CONFIG_DIR).join(CONFIG_FILE));

        config.validate()?;
        Ok(config)
    }

    pub fn embedded() -> Result<Self> {
        let default_str = include_str!("../Config.toml");
        toml::from_str(default_str).context("Failed to parse embedded Config.toml")
    }

    pub(crate) fn apply_patch<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        if !path.exists() {
            return;
        }
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read config patch at {}: {}", path.display(), e);
                return;
            }
        };

        match serde_json::from_str::<UserOverrideConfig>(&content) {
            Ok(patch) => {
                if let Some(server) = patch.server {
                    if let Some(addr) = server.listen_addr {
                        self.server.listen_addr = addr;
                    }
                    if let Some(stream) = server.stream {
                        self.server.stream = stream;
                    }
                }
                if let Some(providers) = patch.providers {
                    // The patch replaces the whole table; order is significant
                    let mut merged: Vec<ProviderConfig> = Vec::new();
                    for p in providers {
                        if p.model.trim().is_empty() {
                            continue;
                        }
                        if merged.contains(&p) {
                            continue;
                        }
                        merged.push(p);
                    }
                    self.providers = merged;
                }
                log::info!("Applied config patch from {}", path.display());
            }
            Err(e) => {
                log::warn!("Failed to parse config patch at {}: {}", path.display(), e);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        for p in &self.providers {
            if p.model.trim().is_empty() {
                anyhow::bail!("Provider {} has an empty model id", p.provider);
            }
            url::Url::parse(p.base_url()).with_context(|| {
                format!("Invalid base_url for {}:{}: {}", p.provider, p.model, p.base_url())
            })?;
        }
        Ok(())
    }

    /// Pairs each provider row with its credential. Blank values count as absent.
    pub fn resolve_credentials<F>(&self, lookup: F) -> Vec<ResolvedProvider>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.providers
            .iter()
            .map(|p| {
                let api_key = lookup(p.api_key_env()).filter(|k| !k.trim().is_empty());
                ResolvedProvider::new(p.clone(), api_key)
            })
            .collect()
    }

    pub fn resolve_from_env(&self) -> Vec<ResolvedProvider> {
        self.resolve_credentials(|name| std::env::var(name).ok())
    }
}
