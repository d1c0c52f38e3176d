//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FX_ANALYZER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use fx_analyzer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Analysis server at {}", config.client.base_url);
//! ```

mod client;
mod error;
mod logging;
mod view;

pub use client::ClientConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use view::{MarkupPolicy, OutputFormat, ViewConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration pointing at a local analysis server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analysis server connection
    #[serde(default)]
    pub client: ClientConfig,

    /// Output format and markup policy
    #[serde(default)]
    pub view: ViewConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FX_ANALYZER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FX_ANALYZER__CLIENT__BASE_URL=http://fx:5000` -> `client.base_url`
    /// - `FX_ANALYZER__VIEW__FORMAT=html` -> `view.format`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FX_ANALYZER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.client.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
