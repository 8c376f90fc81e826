//! Configuration loading, validation, and management for Ressa.
//!
//! Loads configuration from `~/.ressa/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.ressa/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model provider: "ollama" or "openai"
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Model name; when unset, [`AppConfig::model`] picks one for the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// OpenAI API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,

    /// Ollama server URL (without the `/v1` suffix)
    #[serde(default = "default_ollama_base_url")]
    pub ollama_base_url: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per model response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// HTTP timeout for model calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub agent: AgentSection,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub web_search: WebSearchConfig,

    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

fn default_provider() -> String {
    "ollama".into()
}
/// Model used when `default_model` is unset.
pub fn default_model_for(provider: &str) -> &'static str {
    match provider {
        "openai" => "gpt-4",
        _ => "qwen2:latest",
    }
}
fn default_ollama_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_request_timeout() -> u64 {
    120
}
fn default_log_level() -> String {
    "info".into()
}

const REDACTED: &str = "[REDACTED]";

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => REDACTED,
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.model())
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("ollama_base_url", &self.ollama_base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("agent", &self.agent)
            .field("memory", &self.memory)
            .field("chunking", &self.chunking)
            .field("retrieval", &self.retrieval)
            .field("web_search", &self.web_search)
            .field("summarizer", &self.summarizer)
            .finish()
    }
}

impl std::fmt::Debug for WebSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchConfig")
            .field("serpapi_key", &redact(&self.serpapi_key))
            .field("max_results", &self.max_results)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSection {
    /// Maximum reasoning iterations per query
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Whether `ask` uses conversation memory by default
    #[serde(default = "default_true")]
    pub use_memory: bool,
}

fn default_max_iterations() -> usize {
    10
}
fn default_true() -> bool {
    true
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            use_memory: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Conversation window size, in messages
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

fn default_max_messages() -> usize {
    10
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
        }
    }
}

/// Document chunking parameters (character counts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: i64,

    #[serde(default = "default_overlap")]
    pub overlap: i64,

    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,
}

fn default_chunk_size() -> i64 {
    900
}
fn default_overlap() -> i64 {
    150
}
fn default_max_chunks() -> usize {
    20_000
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
            max_chunks: default_max_chunks(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Documents returned per retriever query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Embedding model requested from the provider
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

fn default_top_k() -> usize {
    3
}
fn default_embedding_model() -> String {
    "all-minilm".into()
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            embedding_model: default_embedding_model(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    /// SerpAPI key; DuckDuckGo is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serpapi_key: Option<String>,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

fn default_max_results() -> usize {
    5
}
fn default_search_timeout() -> u64 {
    10
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            serpapi_key: None,
            max_results: default_max_results(),
            timeout_secs: default_search_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Target summary length, in words
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

fn default_max_words() -> usize {
    200
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.ressa/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup` and re-validate.
    ///
    /// Recognized keys: `DEFAULT_PROVIDER`, `RESSA_MODEL`, `OLLAMA_MODEL`,
    /// `OPENAI_API_KEY`, `OLLAMA_BASE_URL`, `TEMPERATURE`, `MAX_TOKENS`,
    /// `MAX_ITERATIONS`, `EMBEDDING_MODEL`, `SERPAPI_KEY`, `LOG_LEVEL`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("DEFAULT_PROVIDER") {
            self.default_provider = provider.to_lowercase();
        }
        if let Some(model) = lookup("RESSA_MODEL") {
            self.default_model = Some(model);
        } else if self.default_provider == "ollama"
            && let Some(model) = lookup("OLLAMA_MODEL")
        {
            self.default_model = Some(model);
        }
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            self.openai_api_key = Some(key);
        }
        if let Some(url) = lookup("OLLAMA_BASE_URL") {
            self.ollama_base_url = url;
        }
        if let Some(raw) = lookup("TEMPERATURE") {
            self.temperature = parse_env("TEMPERATURE", &raw)?;
        }
        if let Some(raw) = lookup("MAX_TOKENS") {
            self.max_tokens = parse_env("MAX_TOKENS", &raw)?;
        }
        if let Some(raw) = lookup("MAX_ITERATIONS") {
            self.agent.max_iterations = parse_env("MAX_ITERATIONS", &raw)?;
        }
        if let Some(model) = lookup("EMBEDDING_MODEL") {
            self.retrieval.embedding_model = model;
        }
        if let Some(key) = lookup("SERPAPI_KEY").filter(|k| !k.is_empty()) {
            self.web_search.serpapi_key = Some(key);
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level.to_lowercase();
        }
        self.validate()
    }

    /// The model to request: `default_model`, or the provider's default.
    pub fn model(&self) -> &str {
        self.default_model
            .as_deref()
            .unwrap_or_else(|| default_model_for(&self.default_provider))
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".ressa")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }

        if self.memory.max_messages == 0 {
            return Err(ConfigError::ValidationError(
                "memory.max_messages must be at least 1".into(),
            ));
        }

        if self.chunking.chunk_size < 1 {
            return Err(ConfigError::ValidationError(
                "chunking.chunk_size must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Render the effective settings as TOML, with secrets redacted.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        shown.default_model = Some(self.model().to_string());
        if shown.openai_api_key.is_some() {
            shown.openai_api_key = Some(REDACTED.into());
        }
        if shown.web_search.serpapi_key.is_some() {
            shown.web_search.serpapi_key = Some(REDACTED.into());
        }
        toml::to_string_pretty(&shown)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            default_model: None,
            openai_api_key: None,
            ollama_base_url: default_ollama_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout(),
            log_level: default_log_level(),
            agent: AgentSection::default(),
            memory: MemoryConfig::default(),
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
            web_search: WebSearchConfig::default(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{key} has an invalid value: '{raw}'")))
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
