//! Configuration management for Dossier.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `dossier.toml` file
//! 3. User config `~/.config/dossier/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation provider configuration.
    pub provider: ProviderConfig,

    /// Research session configuration.
    pub research: ResearchConfig,

    /// Terminal UI configuration.
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./dossier.toml` (project local)
    /// 2. `~/.config/dossier/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        // Try project-local config first
        if Path::new("dossier.toml").exists() {
            return Self::from_file("dossier.toml");
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("dossier").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Use defaults
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("DOSSIER_MODEL") {
            self.provider.model = Some(model);
        }
        if let Ok(url) = std::env::var("DOSSIER_BASE_URL") {
            self.provider.base_url = Some(url);
        }
        if let Ok(key) = std::env::var("DOSSIER_API_KEY") {
            self.provider.api_key = Some(key);
        }
        if let Ok(tokens) = std::env::var("DOSSIER_MAX_OUTPUT_TOKENS") {
            if let Ok(n) = tokens.parse() {
                self.provider.max_output_tokens = n;
            }
        }
        if let Ok(budget) = std::env::var("DOSSIER_THINKING_BUDGET") {
            if let Ok(n) = budget.parse() {
                self.provider.thinking_budget = n;
            }
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Generation provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Model name.
    pub model: Option<String>,

    /// Base URL for the API (for proxies or regional endpoints).
    pub base_url: Option<String>,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum tokens for a generated report segment.
    pub max_output_tokens: u32,

    /// Internal reasoning budget, in tokens.
    pub thinking_budget: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: None,    // Use provider default
            base_url: None, // Use provider default
            api_key: None,  // Load from env
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            thinking_budget: DEFAULT_THINKING_BUDGET,
        }
    }
}

impl ProviderConfig {
    /// Get the model name, falling back to the default.
    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    /// Get the base URL, falling back to the default.
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string())
    }

    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("DOSSIER_API_KEY").ok())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
    }
}

/// Research session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// System instruction for report generation.
    /// If not set, uses the built-in default.
    pub system_prompt: Option<String>,
}

/// Terminal UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether the document panel is open at startup.
    pub artifact_open: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            artifact_open: DEFAULT_ARTIFACT_OPEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(config.provider.thinking_budget, DEFAULT_THINKING_BUDGET);
        assert!(config.ui.artifact_open);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[provider]"));
        assert!(toml_str.contains("[research]"));
        assert!(toml_str.contains("[ui]"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[provider]
model = "gemini-2.5-pro"
thinking_budget = 1024

[ui]
artifact_open = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.model, Some("gemini-2.5-pro".to_string()));
        assert_eq!(config.provider.thinking_budget, 1024);
        assert!(!config.ui.artifact_open);
    }

    #[test]
    fn test_model_or_default() {
        let mut config = ProviderConfig::default();
        assert_eq!(config.model_or_default(), DEFAULT_GEMINI_MODEL);

        config.model = Some("custom-model".to_string());
        assert_eq!(config.model_or_default(), "custom-model");
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = ProviderConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_str.contains("secret"));
    }
}
