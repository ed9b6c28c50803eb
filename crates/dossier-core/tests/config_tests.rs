use dossier_core::config::{
    ConfigError, ProviderConfig, DEFAULT_GEMINI_MODEL, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_THINKING_BUDGET,
};
use dossier_core::Config;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.provider.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    assert_eq!(config.provider.thinking_budget, DEFAULT_THINKING_BUDGET);
    assert_eq!(config.provider.model_or_default(), DEFAULT_GEMINI_MODEL);
    assert!(config.ui.artifact_open);
    assert!(config.research.system_prompt.is_none());
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
max_output_tokens = 4096

[research]
system_prompt = "Write terse reports."

[ui]
artifact_open = false
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.provider.model, Some("gemini-2.5-pro".to_string()));
    assert_eq!(config.provider.max_output_tokens, 4096);
    assert_eq!(
        config.research.system_prompt,
        Some("Write terse reports.".to_string())
    );
    assert!(!config.ui.artifact_open);
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("dossier.toml");
    std::fs::write(&path, "[provider]\nmodel = \"file-model\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.provider.model, Some("file-model".to_string()));
}

#[test]
fn test_config_from_missing_file() {
    let result = Config::from_file("/nonexistent/dossier.toml");
    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}

#[test]
fn test_model_or_default() {
    let mut config = ProviderConfig::default();
    assert_eq!(config.model_or_default(), DEFAULT_GEMINI_MODEL);

    config.model = Some("custom-model".to_string());
    assert_eq!(config.model_or_default(), "custom-model");
}

#[test]
fn test_default_config_string_round_trips() {
    let rendered = Config::default_config_string();
    let parsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(
        parsed.provider.max_output_tokens,
        DEFAULT_MAX_OUTPUT_TOKENS
    );
}
