//! Server configuration.
//!
//! # Responsibility
//! - Describe how the bootstrap wants the mock server started.
//! - Read overrides from `REMINDERS_*` environment variables.
//!
//! # Invariants
//! - Missing variables fall back to defaults; malformed ones are errors.

use crate::factory::seeds::SeedScript;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_ENVIRONMENT: &str = "REMINDERS_ENV";
pub const ENV_LOG_LEVEL: &str = "REMINDERS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "REMINDERS_LOG_DIR";

/// Runtime environment selecting seeded or empty startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    /// Starts empty so tests create exactly what they need.
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    /// Seed script run at startup, `None` for an empty store.
    pub fn seed_script(self) -> Option<SeedScript> {
        match self {
            Self::Development => Some(SeedScript::Development),
            Self::Production => Some(SeedScript::Production),
            Self::Test => None,
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownEnvironment(String),
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEnvironment(value) => write!(
                f,
                "unknown environment `{value}`; expected development|production|test"
            ),
            Self::RelativeLogDir(value) => {
                write!(f, "log directory must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Startup configuration for `MockServer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub environment: Environment,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log file directory; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Default configuration for the given environment.
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Reads `REMINDERS_ENV`, `REMINDERS_LOG_LEVEL` and `REMINDERS_LOG_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let value_of = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(environment) = value_of(ENV_ENVIRONMENT) {
            config.environment = environment.parse()?;
        }
        if let Some(level) = value_of(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = value_of(ENV_LOG_DIR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(path);
        }
        Ok(config)
    }
}
