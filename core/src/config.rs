//! Client configuration.
//!
//! A `ClientConfig` is validated once at construction and never mutated
//! afterwards. It can be built in code or from an in-memory JSON mapping such
//! as `{"api_key": "..."}`.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{IntegrationError, Result};
use crate::http::REDACTED;

/// Root of the HubSpot CRM v3 objects API.
pub const DEFAULT_API_ROOT: &str = "https://api.hubapi.com/crm/v3/objects/";

/// Credentials and connection settings for one client.
///
/// `Debug` output redacts the API key.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    api_root: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &REDACTED)
            .field("api_root", &self.api_root)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Mapping form accepted by `ClientConfig::from_value`. Unknown keys are
/// ignored.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_root: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        // "0" counts as unset, as it does for every other required value.
        if api_key.is_empty() || api_key == "0" {
            return Err(missing_api_key());
        }
        Ok(Self {
            api_key,
            api_root: DEFAULT_API_ROOT.to_string(),
            timeout: None,
        })
    }

    /// Build a config from a JSON mapping.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawConfig = serde_json::from_value(value)
            .map_err(|e| IntegrationError::with_source("Invalid client configuration!", e))?;
        let mut config = Self::new(raw.api_key.unwrap_or_default())?;
        if let Some(root) = raw.api_root {
            config = config.with_api_root(&root);
        }
        if let Some(secs) = raw.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Point the client at a different objects root, e.g. a mock server.
    /// A trailing slash is added when missing.
    pub fn with_api_root(mut self, api_root: &str) -> Self {
        let mut root = api_root.to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        self.api_root = root;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn missing_api_key() -> IntegrationError {
    IntegrationError::new("API Key is required to create API Client!")
}
