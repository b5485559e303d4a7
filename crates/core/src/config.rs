//! Configuration management for the Fund FAQ engine.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (faq.yaml)
//!
//! CLI flags win over environment variables, which win over the YAML file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default inactivity window after which a session loses its scheme context.
pub const DEFAULT_SESSION_TTL_MINUTES: u64 = 30;

/// Default upper bound for a single rephrasing call.
pub const DEFAULT_REPHRASE_TIMEOUT_MS: u64 = 8_000;

/// Main application configuration.
///
/// This struct holds all global options that affect engine behavior:
/// where the persisted scheme records live, which (optional) LLM provider
/// rephrases answers, and the session expiry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the persisted scheme records (JSON written by the data pipeline)
    pub data_file: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider for answer rephrasing ("gemini", "ollama", "none")
    pub provider: String,

    /// Model identifier for the rephrasing provider
    pub model: String,

    /// API key for the LLM provider
    pub api_key: Option<String>,

    /// Whether the rephrasing step is attempted at all
    pub rephrase_enabled: bool,

    /// Upper bound for a single rephrasing call, in milliseconds
    pub rephrase_timeout_ms: u64,

    /// Session inactivity window, in minutes
    pub session_ttl_minutes: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    data: Option<DataConfig>,
    llm: Option<LlmFileConfig>,
    session: Option<SessionConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DataConfig {
    file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmFileConfig {
    provider: Option<String>,
    model: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    rephrase: Option<RephraseConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RephraseConfig {
    enabled: Option<bool>,
    #[serde(rename = "timeoutMs")]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionConfig {
    #[serde(rename = "ttlMinutes")]
    ttl_minutes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/schemes.json"),
            config_file: None,
            provider: "none".to_string(), // Deterministic-only by default
            model: "gemini-pro".to_string(),
            api_key: None,
            rephrase_enabled: false,
            rephrase_timeout_ms: DEFAULT_REPHRASE_TIMEOUT_MS,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `FAQ_DATA`: Path to the persisted scheme records
    /// - `FAQ_CONFIG`: Path to config file
    /// - `FAQ_PROVIDER`: Rephrasing LLM provider
    /// - `FAQ_MODEL`: Model identifier
    /// - `FAQ_API_KEY` / `GOOGLE_GEMINI_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(data_file) = std::env::var("FAQ_DATA") {
            config.data_file = PathBuf::from(data_file);
        }

        if let Ok(config_file) = std::env::var("FAQ_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("faq.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("FAQ_PROVIDER") {
            config.rephrase_enabled = provider != "none";
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("FAQ_MODEL") {
            config.model = model;
        }

        if config.api_key.is_none() {
            config.api_key = std::env::var("FAQ_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_GEMINI_API_KEY"))
                .ok();
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(data) = config_file.data {
            if let Some(file) = data.file {
                result.data_file = PathBuf::from(file);
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.rephrase_enabled = provider != "none";
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(env_var) = llm.api_key_env {
                if let Ok(key) = std::env::var(&env_var) {
                    result.api_key = Some(key);
                }
            }
            if let Some(rephrase) = llm.rephrase {
                if let Some(enabled) = rephrase.enabled {
                    result.rephrase_enabled = enabled;
                }
                if let Some(timeout_ms) = rephrase.timeout_ms {
                    result.rephrase_timeout_ms = timeout_ms;
                }
            }
        }

        if let Some(session) = config_file.session {
            if let Some(ttl) = session.ttl_minutes {
                result.session_ttl_minutes = ttl;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        data_file: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.rephrase_enabled = provider != "none";
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = &self.provider;
        let known_providers = ["gemini", "ollama", "none"];

        if !known_providers.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                known_providers.join(", ")
            )));
        }

        if self.rephrase_enabled && provider == "gemini" && self.api_key.is_none() {
            return Err(AppError::Config(
                "Gemini provider requires an API key (FAQ_API_KEY or GOOGLE_GEMINI_API_KEY)"
                    .to_string(),
            ));
        }

        if self.rephrase_timeout_ms == 0 {
            return Err(AppError::Config(
                "Rephrase timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "none");
        assert!(!config.rephrase_enabled);
        assert_eq!(config.session_ttl_minutes, DEFAULT_SESSION_TTL_MINUTES);
        assert!(!config.verbose);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some(PathBuf::from("other/schemes.json")),
            None,
            Some("gemini".to_string()),
            Some("gemini-1.5-flash".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.data_file, PathBuf::from("other/schemes.json"));
        assert_eq!(overridden.provider, "gemini");
        assert!(overridden.rephrase_enabled);
        assert_eq!(overridden.model, "gemini-1.5-flash");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_yaml_log_level_survives_env_merge() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: trace").unwrap();

        // With RUST_LOG unset, the YAML level must not be erased
        std::env::remove_var("RUST_LOG");
        std::env::set_var("FAQ_CONFIG", file.path());
        let config = AppConfig::load().unwrap();
        std::env::remove_var("FAQ_CONFIG");

        assert_eq!(config.log_level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_provider_none_disables_rephrase() {
        let config = AppConfig::default().with_overrides(
            None,
            None,
            Some("none".to_string()),
            None,
            None,
            false,
            false,
        );
        assert!(!config.rephrase_enabled);
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_gemini_requires_key() {
        let mut config = AppConfig::default();
        config.provider = "gemini".to_string();
        config.rephrase_enabled = true;
        config.api_key = None;
        assert!(config.validate().is_err());

        config.api_key = Some("test-key".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = AppConfig::default();
        config.rephrase_timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
