//! Configuration module for gdsearch.

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::drive::auth::{RefreshTokenProvider, StaticTokenProvider, TokenProvider};
use crate::drive::types::DEFAULT_PAGE_SIZE;
use crate::{Result, SearchError};

/// Drive search configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    /// Folder that uploads land in; every search is scoped to it.
    #[serde(default)]
    pub parent_dir_id: String,
    /// Additional folders searched alongside the parent folder.
    #[serde(default)]
    pub other_dir_ids: Vec<String>,
    /// Base URL of an external web index of the drive.
    #[serde(default)]
    pub index_domain: Option<String>,
    /// Drive v3 REST endpoint.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Maximum number of entries returned per search.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            parent_dir_id: String::new(),
            other_dir_ids: vec![],
            index_domain: None,
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

/// OAuth credentials used to reach the Drive API.
///
/// Either `access_token` is set, or the `client_id`, `client_secret` and
/// `refresh_token` triple is.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Pre-issued bearer token.
    #[serde(default)]
    pub access_token: Option<String>,
    /// OAuth client id.
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Long-lived refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token endpoint used for the refresh grant.
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
            token_url: default_token_url(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl AuthConfig {
    fn has_refresh_credentials(&self) -> bool {
        non_empty(&self.client_id).is_some()
            && non_empty(&self.client_secret).is_some()
            && non_empty(&self.refresh_token).is_some()
    }

    /// Build the token provider described by these credentials.
    ///
    /// A static access token wins over refresh credentials.
    pub fn token_provider(&self) -> Result<Arc<dyn TokenProvider>> {
        if let Some(token) = non_empty(&self.access_token) {
            return Ok(Arc::new(StaticTokenProvider::new(token)));
        }

        match (
            non_empty(&self.client_id),
            non_empty(&self.client_secret),
            non_empty(&self.refresh_token),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Ok(Arc::new(RefreshTokenProvider::new(
                    &self.token_url,
                    client_id,
                    client_secret,
                    refresh_token,
                )?))
            }
            _ => Err(SearchError::Config(
                "no usable credentials: set auth.access_token or \
                 auth.client_id, auth.client_secret and auth.refresh_token"
                    .to_string(),
            )),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file, written in addition to stderr.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Drive search configuration.
    #[serde(default)]
    pub drive: DriveConfig,
    /// Credentials.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SearchError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SearchError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `GDSEARCH_ACCESS_TOKEN`
    /// - `GDSEARCH_REFRESH_TOKEN`
    /// - `GDSEARCH_CLIENT_SECRET`
    /// - `GDSEARCH_INDEX_DOMAIN`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = get("GDSEARCH_ACCESS_TOKEN") {
            self.auth.access_token = Some(token);
        }
        if let Some(token) = get("GDSEARCH_REFRESH_TOKEN") {
            self.auth.refresh_token = Some(token);
        }
        if let Some(secret) = get("GDSEARCH_CLIENT_SECRET") {
            self.auth.client_secret = Some(secret);
        }
        if let Some(domain) = get("GDSEARCH_INDEX_DOMAIN") {
            self.drive.index_domain = Some(domain);
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - `drive.parent_dir_id` is empty
    /// - neither an access token nor a full set of refresh credentials is present
    pub fn validate(&self) -> Result<()> {
        if self.drive.parent_dir_id.is_empty() {
            return Err(SearchError::Config(
                "drive.parent_dir_id is not set".to_string(),
            ));
        }
        if self.drive.page_size == 0 {
            return Err(SearchError::Config(
                "drive.page_size must be at least 1".to_string(),
            ));
        }
        if non_empty(&self.auth.access_token).is_none() && !self.auth.has_refresh_credentials() {
            return Err(SearchError::Config(
                "credentials missing: set auth.access_token (or GDSEARCH_ACCESS_TOKEN) \
                 or the refresh token triple"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
