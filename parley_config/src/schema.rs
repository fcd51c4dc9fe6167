use anyhow::Context;
use parley_core::{
    API_MAX_TOKENS, CompletionOptions, DEFAULT_MODEL, DEFAULT_TEMPERATURE, PAGE_MAX_TOKENS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub cohere: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
        }
    }
}

impl ProviderConfig {
    fn default_base_url() -> String {
        "https://api.cohere.com/v1".to_string()
    }
}

/// Model parameters for the two completion call sites.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CompletionConfig {
    #[serde(default = "CompletionConfig::default_model")]
    pub model: String,
    #[serde(default = "CompletionConfig::default_page_max_tokens")]
    pub page_max_tokens: u32,
    #[serde(default = "CompletionConfig::default_api_max_tokens")]
    pub api_max_tokens: u32,
    #[serde(default = "CompletionConfig::default_temperature")]
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            page_max_tokens: Self::default_page_max_tokens(),
            api_max_tokens: Self::default_api_max_tokens(),
            temperature: Self::default_temperature(),
        }
    }
}

impl CompletionConfig {
    fn default_model() -> String {
        DEFAULT_MODEL.to_string()
    }

    const fn default_page_max_tokens() -> u32 {
        PAGE_MAX_TOKENS
    }

    const fn default_api_max_tokens() -> u32 {
        API_MAX_TOKENS
    }

    const fn default_temperature() -> f32 {
        DEFAULT_TEMPERATURE
    }

    /// Options for the rendered page flow.
    #[must_use]
    pub fn page_options(&self) -> CompletionOptions {
        CompletionOptions::page(self.model.clone())
            .with_max_tokens(self.page_max_tokens)
            .with_temperature(self.temperature)
    }

    /// Options for the JSON chat endpoint.
    #[must_use]
    pub fn api_options(&self) -> CompletionOptions {
        CompletionOptions::api(self.model.clone())
            .with_max_tokens(self.api_max_tokens)
            .with_temperature(self.temperature)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
    #[serde(default = "ServerConfig::default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            static_dir: Self::default_static_dir(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        5000
    }

    fn default_static_dir() -> PathBuf {
        PathBuf::from("static")
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default = "SessionConfig::default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "SessionConfig::default_permanent_lifetime_secs")]
    pub permanent_lifetime_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: Self::default_idle_timeout_secs(),
            permanent_lifetime_secs: Self::default_permanent_lifetime_secs(),
        }
    }
}

impl SessionConfig {
    const fn default_idle_timeout_secs() -> u64 {
        24 * 60 * 60
    }

    const fn default_permanent_lifetime_secs() -> u64 {
        31 * 24 * 60 * 60
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_max_turns")]
    pub max_turns: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_turns: Self::default_max_turns(),
        }
    }
}

impl HistoryConfig {
    const fn default_max_turns() -> usize {
        50
    }
}

impl Config {
    /// Load `~/parley/config.json` if present, then apply `.env` and
    /// environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::from_file(&config_path)?
        } else {
            info!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };

        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Override settings from environment variables.
    ///
    /// Reads:
    /// - `API` (fallback: `COHERE_API_KEY`, `PARLEY_API_KEY`)
    /// - `PORT`
    /// - `PARLEY_HOST`
    /// - `PARLEY_MODEL`
    /// - `PARLEY_BASE_URL`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("API")
            .or_else(|| non_empty("COHERE_API_KEY"))
            .or_else(|| non_empty("PARLEY_API_KEY"))
        {
            self.providers.cohere.api_key = key.trim().to_string();
        }

        if let Some(port) = non_empty("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Some(host) = non_empty("PARLEY_HOST") {
            self.server.host = host.trim().to_string();
        }

        if let Some(model) = non_empty("PARLEY_MODEL") {
            self.completion.model = model.trim().to_string();
        }

        if let Some(url) = non_empty("PARLEY_BASE_URL") {
            self.providers.cohere.base_url = url.trim().to_string();
        }

        Ok(())
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("parley"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(&config_path, template)?;

        info!("Created config file at {}", config_path.display());
        Ok(config_path)
    }
}
