//! Configuration system for Sexton.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. Environment variables (highest priority)
//! 2. `config.toml` file
//! 3. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! All configuration options can be overridden via environment variables:
//! - `SEXTON_SERVER_HOST` - Server bind address
//! - `SEXTON_SERVER_PORT` - Server port
//! - `SEXTON_DATABASE_URL` - SQLite connection URL
//! - `SEXTON_LOGGING_ENABLED` - Enable logging
//! - `SEXTON_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
//! - `SEXTON_DECAY_ENABLED` - Enable the scheduled decay sweep
//! - `SEXTON_DECAY_CRON` - Cron expression for the decay sweep
//! - `SEXTON_DECAY_PREVENT_OVERLAP` - Skip a tick while a sweep is running

use config::Config;
use serde::Deserialize;
use std::env;
use std::sync::OnceLock;

use crate::errors::{SextonError, SextonResult};

/// Global configuration singleton.
static CONFIG: OnceLock<SextonConfig> = OnceLock::new();

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SextonConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Decay sweep configuration
    pub decay: DecayConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://sexton.db?mode=rwc".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
        }
    }
}

/// Decay sweep configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Enable the scheduled decay sweep
    pub enabled: bool,
    /// Cron expression for the sweep (default: daily at 2 AM)
    pub cron: String,
    /// Skip a tick while a previous sweep is still running
    pub prevent_overlap: bool,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // Daily at 2 AM
            cron: "0 0 2 * * *".to_string(),
            prevent_overlap: true,
        }
    }
}

impl SextonConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. `config.toml` file (optional)
    /// 3. Environment variables
    ///
    /// Most callers want [`get_config`], which loads once and caches.
    pub fn load() -> SextonResult<Self> {
        let builder = Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_default("server.port", 8080)
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_default("database.url", "sqlite://sexton.db?mode=rwc")
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_default("logging.enabled", true)
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_default("logging.level", "info")
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_default("decay.enabled", true)
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_default("decay.cron", "0 0 2 * * *")
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_default("decay.prevent_overlap", true)
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            // Load from config.toml (optional)
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            .set_override_option("server.host", env::var("SEXTON_SERVER_HOST").ok())
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_override_option(
                "server.port",
                env::var("SEXTON_SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_override_option("database.url", env::var("SEXTON_DATABASE_URL").ok())
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_override_option(
                "logging.enabled",
                env::var("SEXTON_LOGGING_ENABLED")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok()),
            )
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_override_option("logging.level", env::var("SEXTON_LOG_LEVEL").ok())
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_override_option(
                "decay.enabled",
                env::var("SEXTON_DECAY_ENABLED")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok()),
            )
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_override_option("decay.cron", env::var("SEXTON_DECAY_CRON").ok())
            .map_err(|e| SextonError::ConfigError(e.to_string()))?
            .set_override_option(
                "decay.prevent_overlap",
                env::var("SEXTON_DECAY_PREVENT_OVERLAP")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok()),
            )
            .map_err(|e| SextonError::ConfigError(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| SextonError::ConfigError(format!("failed to build config: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| SextonError::ConfigError(format!("failed to deserialize config: {e}")))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SextonResult<()> {
        // Validate port
        if self.server.port == 0 {
            return Err(SextonError::ConfigError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        // Validate database URL
        if !self.database.url.starts_with("sqlite:") {
            return Err(SextonError::ConfigError(format!(
                "database.url must be an sqlite URL, got '{}'",
                self.database.url
            )));
        }

        // Validate log level
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(SextonError::ConfigError(format!(
                    "logging.level must be one of: trace, debug, info, warn, error. Got '{other}'"
                )));
            }
        }

        // Validate decay schedule
        if self.decay.enabled && self.decay.cron.trim().is_empty() {
            return Err(SextonError::ConfigError(
                "decay.cron cannot be empty when decay.enabled is true".to_string(),
            ));
        }

        Ok(())
    }
}

/// Get the global configuration.
///
/// This loads the configuration on first access and caches it.
/// Returns an error if configuration loading or validation fails.
pub fn get_config() -> SextonResult<&'static SextonConfig> {
    // Check if already initialized
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    // Load and validate configuration
    let config = SextonConfig::load()?;
    config.validate()?;

    // Try to set it (ignore if another thread beat us)
    let _ = CONFIG.set(config.clone());

    // Return the stored config (either ours or another thread's)
    Ok(CONFIG.get().expect("config was just set"))
}

/// Initialize configuration explicitly.
///
/// Call this early in your application to catch configuration errors.
/// Returns the validated configuration.
pub fn init_config() -> SextonResult<&'static SextonConfig> {
    get_config()
}
