// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! Configuration structures for the OpenSea client and the event backfill
//! helper, loadable from layered sources with the `config` crate.

use std::{collections::HashMap, path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{
    error::{OpenseaError, OpenseaResult},
    non_empty_string::NonEmptyString,
};

/// Default OpenSea API root (without version)
pub const DEFAULT_BASE_URL: &str = "https://api.opensea.io/api";
/// Default API version path segment
pub const DEFAULT_API_VERSION: &str = "v1";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TIMEOUT_SECONDS: u64 = 300;
const DEFAULT_USER_AGENT: &str = concat!("opensea-client/", env!("CARGO_PKG_VERSION"));

const DEFAULT_PAGE_INTERVAL_MS: u64 = 2_000;
const DEFAULT_RETRY_INTERVAL_MS: u64 = 3_000;
const DEFAULT_MAX_RETRIES: u32 = 5;

/// A validated timeout duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(Duration);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> OpenseaResult<Self> {
        if seconds == 0 {
            return Err(OpenseaError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }
        if seconds > MAX_TIMEOUT_SECONDS {
            return Err(OpenseaError::Config(format!(
                "timeout cannot exceed {MAX_TIMEOUT_SECONDS}"
            )));
        }
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// Get the timeout value
    pub fn value(&self) -> Duration {
        self.0
    }

    /// Get the timeout in whole seconds
    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

/// Pacing and failure tolerance for the event backfill helper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackfillOptions {
    /// Pause between consecutive page requests, in milliseconds
    pub page_interval_ms: u64,
    /// Pause before retrying a transient failure, in milliseconds
    pub retry_interval_ms: u64,
    /// Consecutive transient failures tolerated per page
    pub max_retries: u32,
}

impl BackfillOptions {
    /// Pause between consecutive page requests
    pub fn page_interval(&self) -> Duration {
        Duration::from_millis(self.page_interval_ms)
    }

    /// Pause before retrying a transient failure
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    /// Options with no pauses, for tests and local mocks
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            page_interval_ms: 0,
            retry_interval_ms: 0,
            max_retries,
        }
    }
}

impl Default for BackfillOptions {
    fn default() -> Self {
        Self {
            page_interval_ms: DEFAULT_PAGE_INTERVAL_MS,
            retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Configuration for the OpenSea API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenseaConfig {
    /// API root, e.g. `https://api.opensea.io/api`
    pub base_url: NonEmptyString,
    /// Version path segment appended to the root
    pub api_version: NonEmptyString,
    /// Key sent in the `X-API-KEY` header; requests go unauthenticated without one
    #[serde(default)]
    pub api_key: Option<NonEmptyString>,
    /// Request timeout in seconds (validated range: 1-300)
    #[serde(default)]
    pub timeout_seconds: TimeoutSeconds,
    /// `User-Agent` header value
    pub user_agent: NonEmptyString,
    /// Event backfill pacing
    #[serde(default)]
    pub backfill: BackfillOptions,
}

impl Default for OpenseaConfig {
    #[allow(clippy::missing_panics_doc)]
    fn default() -> Self {
        Self {
            base_url: NonEmptyString::new(DEFAULT_BASE_URL).expect("known to be non-empty"),
            api_version: NonEmptyString::new(DEFAULT_API_VERSION).expect("known to be non-empty"),
            api_key: None,
            timeout_seconds: TimeoutSeconds::default(),
            user_agent: NonEmptyString::new(DEFAULT_USER_AGENT).expect("known to be non-empty"),
            backfill: BackfillOptions::default(),
        }
    }
}

impl OpenseaConfig {
    /// Default configuration pointed at a different API root
    ///
    /// # Errors
    ///
    /// Returns `OpenseaError::Config` if `base_url` is empty
    pub fn with_base_url(base_url: impl Into<String>) -> OpenseaResult<Self> {
        Ok(Self {
            base_url: NonEmptyString::new(base_url).map_err(OpenseaError::Config)?,
            ..Self::default()
        })
    }

    /// Set the API key
    ///
    /// # Errors
    ///
    /// Returns `OpenseaError::Config` if the key is empty or whitespace-only
    pub fn api_key(mut self, api_key: impl Into<String>) -> OpenseaResult<Self> {
        self.api_key = Some(NonEmptyString::new(api_key).map_err(OpenseaError::Config)?);
        Ok(self)
    }

    /// Load configuration from the default locations and the environment
    ///
    /// # Errors
    ///
    /// Returns `OpenseaError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> OpenseaResult<Self> {
        Self::load(None)
            .map_err(|e| OpenseaError::Config(format!("failed to load configuration: {e}")))
    }

    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. Configuration file (`opensea.json`, or `explicit_file` when given)
    /// 3. Environment-specific file (`opensea.{ENVIRONMENT}.json`)
    /// 4. Environment variables with `OPENSEA_` prefix (`OPENSEA_API_KEY`,
    ///    `OPENSEA_BACKFILL__MAX_RETRIES`, ...)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value is invalid.
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        let env_name = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        Self::load_from_sources(explicit_file, &env_name, None)
    }

    /// Load configuration with an explicit environment name and variable set
    ///
    /// Same layering as [`Self::load`], but `env_vars` (when given) replaces the
    /// process environment as the source of `OPENSEA_*` overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value is invalid.
    pub fn load_from_sources(
        explicit_file: Option<&Path>,
        env_name: &str,
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file_source = match explicit_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name("opensea.json").required(false),
        };

        let config = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("api_version", DEFAULT_API_VERSION)?
            .set_default("timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .add_source(file_source)
            .add_source(
                File::with_name(&format!("opensea.{}.json", env_name.to_lowercase()))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("OPENSEA")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env_vars),
            )
            .build()?;

        config.try_deserialize()
    }
}
