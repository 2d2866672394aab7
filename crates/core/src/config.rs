//! Configuration management for Basira.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (.basira/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! The engine only reads configuration; it never writes any of it back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .basira/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Chat-completion provider ("openai" or "ollama")
    pub provider: String,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Custom provider endpoint (OpenAI-compatible base URL or Ollama host)
    pub llm_endpoint: Option<String>,

    /// Name of the environment variable holding the provider API key
    pub api_key_env: String,

    /// Resolved API key for the provider
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Sampling temperature for generation
    pub temperature: f32,

    /// Completion token budget
    pub max_tokens: u32,

    /// Upper bound on a single completion request, in seconds
    pub generation_timeout_secs: u64,

    /// Supabase project URL used for full-text retrieval
    pub supabase_url: Option<String>,

    /// Name of the environment variable holding the Supabase key
    pub supabase_key_env: String,

    /// Resolved Supabase API key
    #[serde(skip_serializing)]
    pub supabase_key: Option<String>,

    /// Candidate sources requested from the retriever per question
    pub retrieval_limit: usize,

    /// Upper bound on a single full-text search request, in seconds
    pub retrieval_timeout_secs: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    retrieval: Option<RetrievalSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    temperature: Option<f32>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalSection {
    url: Option<String>,
    #[serde(rename = "keyEnv")]
    key_env: Option<String>,
    limit: Option<usize>,
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            llm_endpoint: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            temperature: 0.3,
            max_tokens: 2000,
            generation_timeout_secs: 60,
            supabase_url: None,
            supabase_key_env: "SUPABASE_ANON_KEY".to_string(),
            supabase_key: None,
            retrieval_limit: 10,
            retrieval_timeout_secs: 10,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML config file and environment variables.
    ///
    /// Environment variables:
    /// - `BASIRA_WORKSPACE`: Override workspace path
    /// - `BASIRA_CONFIG`: Path to config file
    /// - `BASIRA_PROVIDER`: Chat-completion provider
    /// - `BASIRA_MODEL`: Model identifier
    /// - `BASIRA_API_KEY`: API key (otherwise read from `llm.apiKeyEnv`, default `OPENAI_API_KEY`)
    /// - `SUPABASE_URL`: Supabase project URL
    /// - `SUPABASE_ANON_KEY`: Supabase key (or the variable named by `retrieval.keyEnv`)
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use basira_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Model: {}", config.model);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration, locating the workspace and config file from the
    /// given paths before falling back to `BASIRA_WORKSPACE` / `BASIRA_CONFIG`.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("BASIRA_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        config.config_file =
            config_file.or_else(|| std::env::var("BASIRA_CONFIG").ok().map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.basira_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("BASIRA_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("BASIRA_MODEL") {
            config.model = model;
        }

        if let Ok(url) = std::env::var("SUPABASE_URL") {
            config.supabase_url = Some(url);
        }

        config.resolve_secrets();
        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if llm.endpoint.is_some() {
                result.llm_endpoint = llm.endpoint;
            }
            if let Some(api_key_env) = llm.api_key_env {
                result.api_key_env = api_key_env;
            }
            if let Some(temperature) = llm.temperature {
                result.temperature = temperature;
            }
            if let Some(max_tokens) = llm.max_tokens {
                result.max_tokens = max_tokens;
            }
            if let Some(timeout) = llm.timeout {
                result.generation_timeout_secs = timeout;
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            if retrieval.url.is_some() {
                result.supabase_url = retrieval.url;
            }
            if let Some(key_env) = retrieval.key_env {
                result.supabase_key_env = key_env;
            }
            if let Some(limit) = retrieval.limit {
                result.retrieval_limit = limit;
            }
            if let Some(timeout) = retrieval.timeout {
                result.retrieval_timeout_secs = timeout;
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

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Read API keys from the environment variables the config points at.
    fn resolve_secrets(&mut self) {
        self.api_key = std::env::var("BASIRA_API_KEY")
            .or_else(|_| std::env::var(&self.api_key_env))
            .ok()
            .filter(|key| !key.trim().is_empty());

        self.supabase_key = std::env::var(&self.supabase_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
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

    /// Get the path to the .basira directory.
    pub fn basira_dir(&self) -> PathBuf {
        self.workspace.join(".basira")
    }

    /// Supabase URL and key, when both are configured.
    ///
    /// `None` means the engine runs without a retriever.
    pub fn retrieval_settings(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }

    /// Validate the provider-independent generation settings.
    ///
    /// Provider names and their key requirements are checked by the LLM
    /// factory, which owns the list of supported providers.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(AppError::Config(
                "maxTokens must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.retrieval_limit, 10);
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_basira_dir() {
        let config = AppConfig::default();
        assert!(config.basira_dir().ends_with(".basira"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            None,
            Some("ollama".to_string()),
            Some("llama3.2".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.provider, "ollama");
        assert_eq!(overridden.model, "llama3.2");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
llm:
  provider: ollama
  model: llama3.2
  endpoint: http://localhost:11434
  temperature: 0.5
  maxTokens: 800
  timeout: 30
retrieval:
  url: https://example.supabase.co
  keyEnv: MY_SUPABASE_KEY
  limit: 6
logging:
  level: debug
  color: false
"#,
        )
        .unwrap();

        let merged = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(merged.provider, "ollama");
        assert_eq!(merged.model, "llama3.2");
        assert_eq!(merged.llm_endpoint.as_deref(), Some("http://localhost:11434"));
        assert_eq!(merged.temperature, 0.5);
        assert_eq!(merged.max_tokens, 800);
        assert_eq!(merged.generation_timeout_secs, 30);
        assert_eq!(merged.supabase_url.as_deref(), Some("https://example.supabase.co"));
        assert_eq!(merged.supabase_key_env, "MY_SUPABASE_KEY");
        assert_eq!(merged.retrieval_limit, 6);
        assert_eq!(merged.retrieval_timeout_secs, 10);
        assert_eq!(merged.log_level.as_deref(), Some("debug"));
        assert!(merged.no_color);
    }

    #[test]
    fn test_load_from_workspace_config() {
        let temp_dir = TempDir::new().unwrap();
        let basira_dir = temp_dir.path().join(".basira");
        std::fs::create_dir_all(&basira_dir).unwrap();
        std::fs::write(basira_dir.join("config.yaml"), "retrieval:\n  limit: 4\n").unwrap();

        let config = AppConfig::load_from(Some(temp_dir.path().to_path_buf()), None).unwrap();
        assert_eq!(config.workspace, temp_dir.path());
        assert_eq!(config.retrieval_limit, 4);
    }

    #[test]
    fn test_load_from_missing_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = AppConfig::load_from(Some(missing), None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "llm: [not, a, map").unwrap();

        let result = AppConfig::default().merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_retrieval_settings_require_url_and_key() {
        let mut config = AppConfig::default();
        assert!(config.retrieval_settings().is_none());

        config.supabase_url = Some("https://example.supabase.co".to_string());
        assert!(config.retrieval_settings().is_none());

        config.supabase_key = Some("anon".to_string());
        assert_eq!(
            config.retrieval_settings(),
            Some(("https://example.supabase.co", "anon"))
        );
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = AppConfig::default();
        config.temperature = 2.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_max_tokens() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.max_tokens = 0;
        assert!(config.validate().is_err());
    }
}
