//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (applied by the binary on top)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::DEFAULT_PREVIEW_CHARS;
use crate::encoding::{Encoding, ModelTable};
use crate::error::{Result, TokCalcError};
use crate::report::DEFAULT_PREVIEW_TOKENS;
use crate::tokenizer::{SpecialTokens, TiktokenEncoder, TokenCounter};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Counting configuration
    #[serde(default)]
    pub counter: CounterConfig,

    /// Extra model → encoding mappings
    #[serde(default)]
    pub models: ModelsConfig,

    /// Remote model listing configuration
    #[serde(default)]
    pub remote: RemoteConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerSection,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| TokCalcError::Config(format!("Failed to read config file: {e}")))?;

        Ok(toml::from_str(&content)?)
    }

    /// Default config file location (`<config dir>/tokcalc/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tokcalc").join("config.toml"))
    }

    /// Load configuration: the explicit file if given, else the default file
    /// if it exists, else defaults; environment variables are applied on top
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "using default config file");
                    Self::from_file(path)?
                },
                None => Self::default(),
            },
        };

        Ok(base.apply_env())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Override fields from `TOKCALC_*` environment variables
    fn apply_env(mut self) -> Self {
        if let Ok(model) = std::env::var("TOKCALC_MODEL") {
            self.counter.default_model = model;
        }
        if let Ok(val) = std::env::var("TOKCALC_PREVIEW_TOKENS") {
            if let Ok(val) = val.parse() {
                self.counter.preview_tokens = val;
            }
        }
        if let Ok(val) = std::env::var("TOKCALC_SPECIAL_TOKENS") {
            if let Ok(val) = val.parse() {
                self.counter.special_tokens = val;
            }
        }
        if let Ok(url) = std::env::var("TOKCALC_REMOTE_BASE_URL") {
            self.remote.base_url = url;
        }
        if let Ok(host) = std::env::var("TOKCALC_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TOKCALC_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        self
    }

    /// Model table with this config's overrides applied
    pub fn model_table(&self) -> Result<ModelTable> {
        let overrides = self
            .models
            .overrides
            .iter()
            .map(|(model, name)| Ok((model.clone(), name.parse::<Encoding>()?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(ModelTable::new().with_overrides(overrides))
    }

    /// Token counter configured from this config
    pub fn token_counter(&self) -> Result<TokenCounter> {
        let encoder = TiktokenEncoder::new().with_special_tokens(self.counter.special_tokens);
        Ok(TokenCounter::new(self.model_table()?, encoder))
    }
}

/// Counting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Model used when none is given
    pub default_model: String,

    /// Leading token IDs kept in reports
    pub preview_tokens: usize,

    /// Characters shown in document previews
    pub preview_chars: usize,

    /// Handling of special-token literals in input text
    pub special_tokens: SpecialTokens,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o".to_string(),
            preview_tokens: DEFAULT_PREVIEW_TOKENS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            special_tokens: SpecialTokens::Reject,
        }
    }
}

/// Extra model → encoding mappings, e.g.
///
/// ```toml
/// [models.overrides]
/// "my-finetune" = "cl100k_base"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model name → encoding name
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

/// Remote model listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// OpenAI-compatible API base URL (without trailing `/models`)
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RemoteConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TokCalcError::Config(format!("No API key found in ${}", self.api_key_env))
            })
    }

    /// Full URL of the model listing endpoint
    pub fn models_url(&self) -> String {
        format!("{}/models", self.base_url.trim_end_matches('/'))
    }
}

/// HTTP server section of the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Enable permissive CORS
    pub cors: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_body_size: 10 * 1024 * 1024, // 10 MB
            cors: true,
        }
    }
}

impl ServerSection {
    /// Get the full listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
