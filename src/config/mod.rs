//! Configuration handling for the application.
//!
//! The catalog sync needs an API token and a podcast id; both come from the
//! environment and are required. The API base URL is overridable so tests
//! (and staging setups) can point the client at a local mock server.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets tests and scripts
/// refer to them directly.
pub const ENV_API_TOKEN: &str = "CASTNOTES_API_TOKEN";
pub const ENV_PODCAST_ID: &str = "CASTNOTES_PODCAST_ID";
pub const ENV_API_BASE: &str = "CASTNOTES_API_BASE";

const DEFAULT_API_BASE: &str = "https://api.simplecast.com";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_token: String,
    podcast_id: String,
    api_base: String,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        api_token: impl Into<String>,
        podcast_id: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            podcast_id: podcast_id.into(),
            api_base: api_base.into(),
        }
    }

    /// Load from environment variables.
    ///
    /// The token and podcast id have no sensible defaults and are required;
    /// the base URL falls back to the hosted API.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = require(ENV_API_TOKEN)?;
        let podcast_id = require(ENV_PODCAST_ID)?;
        let api_base = env::var(ENV_API_BASE).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Ok(Self {
            api_token,
            podcast_id,
            api_base,
        })
    }

    /// Bearer token for the podcast-hosting API.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }
    /// Identifier of the podcast whose catalog gets synced.
    pub fn podcast_id(&self) -> &str {
        &self.podcast_id
    }
    /// Base URL of the podcast-hosting API.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing { field: key }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    Missing { field: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing { field } => {
                write!(f, "missing required environment variable '{}'", field)
            }
        }
    }
}

impl Error for ConfigError {}
