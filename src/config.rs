use serde::{Deserialize, Serialize};
use std::fs;
use anyhow::Result;
use regex::Regex;

use crate::generation::categories::DEFAULT_SAMPLE_SIZE;
use crate::generation::variant::Variant;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub generation_config: GenerationConfig,
    #[serde(default)]
    pub llm_config: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "static".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default = "default_sample_size")]
    pub category_sample_size: usize,
    #[serde(default = "default_max_pair_count")]
    pub max_pair_count: u32,
    /// Replaces the built-in category catalog when non-empty.
    #[serde(default)]
    pub categories: Vec<String>,
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_max_pair_count() -> u32 {
    50
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_provider() -> String {
    "openai_llm".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-2024-08-06".to_string()
}

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

impl LlmConfig {
    /// Configured key, or `OPENAI_API_KEY` when the file leaves it blank or
    /// holds a placeholder that was never substituted.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
            .map(str::to_string)
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()))
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !std::path::Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }
        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Parses configuration text, choosing JSON or YAML by the path's extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let content = substitute_env_vars(content.trim_start_matches('\u{feff}'))?;

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation_config;
        if generation.max_pair_count == 0 {
            anyhow::bail!("generation_config.max_pair_count must be at least 1");
        }
        if generation.variant.uses_categories() && generation.category_sample_size == 0 {
            anyhow::bail!("generation_config.category_sample_size must be at least 1");
        }
        Ok(())
    }
}

/// Replaces `${VAR_NAME}` with the variable's value; unset variables are left as is.
fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            category_sample_size: default_sample_size(),
            max_pair_count: default_max_pair_count(),
            categories: Vec::new(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            temperature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config = Config::parse(
            "conf.yaml",
            "system_config:\n  port: 8080\ngeneration_config:\n  variant: classic\n",
        )
        .unwrap();
        assert_eq!(config.system_config.port, 8080);
        assert_eq!(config.system_config.host, "0.0.0.0");
        assert_eq!(config.generation_config.variant, Variant::Classic);
        assert_eq!(config.generation_config.category_sample_size, 8);
        assert_eq!(config.llm_config.model, "gpt-4o-2024-08-06");
    }

    #[test]
    fn json_is_selected_by_extension() {
        let config = Config::parse(
            "conf.json",
            r#"{"llm_config": {"model": "gpt-4o-mini", "temperature": 0.5}}"#,
        )
        .unwrap();
        assert_eq!(config.llm_config.model, "gpt-4o-mini");
        assert_eq!(config.llm_config.temperature, Some(0.5));
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("WORDPAIR_TEST_MODEL", "gpt-test");
        let config = Config::parse(
            "conf.yaml",
            "llm_config:\n  model: ${WORDPAIR_TEST_MODEL}\n  api_key: ${WORDPAIR_TEST_UNSET_KEY}\n",
        )
        .unwrap();
        assert_eq!(config.llm_config.model, "gpt-test");
        assert_eq!(
            config.llm_config.api_key.as_deref(),
            Some("${WORDPAIR_TEST_UNSET_KEY}")
        );
    }

    #[test]
    fn explicit_api_key_wins() {
        let llm = LlmConfig {
            api_key: Some("sk-explicit".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(llm.resolved_api_key().as_deref(), Some("sk-explicit"));
    }

    #[test]
    fn zero_max_pair_count_is_rejected() {
        let err = Config::parse("conf.yaml", "generation_config:\n  max_pair_count: 0\n");
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load("does/not/exist.yaml").is_err());
    }
}
