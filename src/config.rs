use crate::error::AppError;
use crate::log_debug;

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

/// Environment variable holding the Gemini API credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "RESAY_MODEL";
/// Environment variable overriding the max-token cap
pub const MAX_TOKENS_ENV: &str = "RESAY_MAX_TOKENS";
/// Environment variable overriding the sampling temperature
pub const TEMPERATURE_ENV: &str = "RESAY_TEMPERATURE";
/// Environment variable overriding the deployment environment name
pub const ENVIRONMENT_ENV: &str = "RESAY_ENV";
/// Environment variable overriding the log verbosity
pub const LOG_LEVEL_ENV: &str = "RESAY_LOG_LEVEL";

/// Default model: Gemini's small fast tier
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Upper bound accepted for the max-token knob
pub const MAX_OUTPUT_TOKENS_CEILING: u32 = 8192;

/// Named deployment environment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Configuration for the Resay application.
///
/// Loaded once at process start from the optional config file and the
/// environment (environment wins), then treated as read-only. Constructed
/// explicitly and passed in; there is no process-wide singleton.
#[derive(Deserialize, Serialize, Clone)]
pub struct Config {
    /// Gemini API credential
    #[serde(default)]
    pub api_key: String,
    /// Model used for rewrites
    #[serde(default = "default_model")]
    pub model: String,
    /// Cap on generated tokens, when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature, when set (ignored by some models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Deployment environment name
    #[serde(default)]
    pub environment: Environment,
    /// Log verbosity (off, error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Environment values that failed to parse, reported at validation
    #[serde(skip)]
    pub env_issues: Vec<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            max_tokens: None,
            temperature: None,
            environment: Environment::default(),
            log_level: default_log_level(),
            env_issues: Vec::new(),
        }
    }
}

impl Config {
    /// Load the configuration: defaults, then the optional config file, then
    /// environment overrides
    pub fn load() -> Result<Self, AppError> {
        let mut config = Self::load_file(Self::config_path().as_deref())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        log_debug!(
            "Configuration loaded: model={}, environment={}",
            config.model,
            config.environment
        );
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// path is absent or the file does not exist
    pub fn load_file(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::unknown(
                format!("failed to read config file {}", path.display()),
                Some(Box::new(e)),
            )
        })?;
        toml::from_str(&content).map_err(|e| {
            AppError::validation(format!("invalid config file {}: {e}", path.display()))
        })
    }

    /// Path to the configuration file under the platform config directory
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|mut path| {
            path.push("resay");
            path.push("config.toml");
            path
        })
    }

    /// Apply environment overrides through the given lookup.
    ///
    /// Values that fail to parse are recorded in `env_issues` and surfaced by
    /// [`Config::validate`], so startup reports every problem at once.
    pub fn apply_env_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = get(API_KEY_ENV)
            && !key.is_empty()
        {
            self.api_key = key;
        }
        if let Some(model) = get(MODEL_ENV)
            && !model.is_empty()
        {
            self.model = model;
        }
        if let Some(raw) = get(MAX_TOKENS_ENV) {
            match raw.parse::<u32>() {
                Ok(value) => self.max_tokens = Some(value),
                Err(_) => self.env_issues.push(format!(
                    "{MAX_TOKENS_ENV} must be a positive integer, got '{raw}'"
                )),
            }
        }
        if let Some(raw) = get(TEMPERATURE_ENV) {
            match raw.parse::<f32>() {
                Ok(value) => self.temperature = Some(value),
                Err(_) => self
                    .env_issues
                    .push(format!("{TEMPERATURE_ENV} must be a number, got '{raw}'")),
            }
        }
        if let Some(raw) = get(ENVIRONMENT_ENV) {
            match raw.parse::<Environment>() {
                Ok(environment) => self.environment = environment,
                Err(_) => self.env_issues.push(format!(
                    "{ENVIRONMENT_ENV} must be one of development, staging, production, got '{raw}'"
                )),
            }
        }
        if let Some(level) = get(LOG_LEVEL_ENV)
            && !level.is_empty()
        {
            self.log_level = level;
        }
    }

    /// Validate the configuration, collecting every violated constraint into
    /// a single [`AppError::Validation`]. Called once at startup; fail fast.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut violations = self.env_issues.clone();

        if self.api_key.trim().is_empty() {
            violations.push(format!(
                "missing API credential: set the {API_KEY_ENV} environment variable"
            ));
        }
        if self.model.trim().is_empty() {
            violations.push("model name must not be empty".to_string());
        }
        if let Some(max_tokens) = self.max_tokens
            && !(1..=MAX_OUTPUT_TOKENS_CEILING).contains(&max_tokens)
        {
            violations.push(format!(
                "max_tokens must be between 1 and {MAX_OUTPUT_TOKENS_CEILING}, got {max_tokens}"
            ));
        }
        if let Some(temperature) = self.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            violations.push(format!(
                "temperature must be between 0.0 and 2.0, got {temperature}"
            ));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            violations.push(format!(
                "log_level '{}' is not one of off, error, warn, info, debug, trace",
                self.log_level
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "invalid configuration: {}",
                violations.join("; ")
            )))
        }
    }

    /// Save the configuration to the config file
    pub fn save(&self) -> Result<(), AppError> {
        let path = Self::config_path()
            .ok_or_else(|| AppError::unknown("unable to determine config directory", None))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::unknown(
                    format!("failed to create config directory {}", parent.display()),
                    Some(Box::new(e)),
                )
            })?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::unknown("failed to serialize configuration", Some(Box::new(e))))?;
        fs::write(&path, content).map_err(|e| {
            AppError::unknown(
                format!("failed to write config file {}", path.display()),
                Some(Box::new(e)),
            )
        })?;
        log_debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// API key with all but the last four characters masked, for display
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            "(not set)".to_string()
        } else if chars.len() <= 4 {
            "****".to_string()
        } else {
            let suffix: String = chars[chars.len() - 4..].iter().collect();
            format!("****{suffix}")
        }
    }
}

// The API key is a secret; keep it out of debug output and logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.masked_api_key())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}
