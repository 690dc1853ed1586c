use crate::exec::result::ExecutionMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("No API key found (set ${0} or llm.api_key in the config file)")]
    MissingApiKey(String),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub llm: LLMConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ExecutionConfig {
    pub default_mode: ExecutionMode,
    /// Pause between commands in automatic mode
    pub step_delay_ms: u64,
    /// Tee child stderr so failures carry the tool's message; git sees a
    /// pipe instead of a terminal and drops progress and colour output
    pub capture_stderr: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BehaviorConfig {
    pub recovery_enabled: bool,
    pub log_commands: bool,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            default_mode: ExecutionMode::StepConfirm,
            step_delay_ms: 300,
            capture_stderr: true,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            recovery_enabled: true,
            log_commands: true,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("gitmate"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration, falling back to defaults when no file exists yet
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default_config());
        }
        Self::load_from(&path)
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Validate before saving
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            llm: LLMConfig {
                provider: "anthropic".to_string(),
                model: "claude-sonnet-4-20250514".to_string(),
                api_key_env: "ANTHROPIC_API_KEY".to_string(),
                api_key: None,
                timeout_seconds: default_timeout_seconds(),
            },
            execution: ExecutionConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.provider != "anthropic" {
            return Err(ConfigError::InvalidValue(format!(
                "Unsupported LLM provider: {}. Only 'anthropic' is supported",
                self.llm.provider
            )));
        }

        if !self.llm.model.starts_with("claude-") {
            return Err(ConfigError::InvalidValue(format!(
                "Invalid model name: {}. Must be a Claude model",
                self.llm.model
            )));
        }

        if self.llm.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get API key from environment variable or config
    pub fn get_api_key(&self) -> Option<String> {
        // First try environment variable
        if let Ok(key) = std::env::var(&self.llm.api_key_env)
            && !key.is_empty()
        {
            return Some(key);
        }

        // Fall back to config file if present
        self.llm.api_key.clone()
    }

    /// Check if API key is available
    pub fn has_api_key(&self) -> bool {
        self.get_api_key().is_some()
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.execution.step_delay_ms)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_seconds)
    }
}
