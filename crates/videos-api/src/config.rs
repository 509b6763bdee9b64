use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, Result};

pub const ENV_SERVICE_URL: &str = "VIDEOS_SERVICE_URL";
pub const ENV_API_KEY: &str = "VIDEOS_API_KEY";
pub const ENV_COLLECTION: &str = "VIDEOS_COLLECTION";
pub const ENV_TIMEOUT_SECS: &str = "VIDEOS_TIMEOUT_SECS";

pub const DEFAULT_COLLECTION: &str = "videos";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the video collection lives and how to authenticate against it.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the hosted service, e.g. `https://project.supabase.co`.
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// Keeps the key out of logs.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("collection", &self.collection)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ServiceConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            collection: default_collection(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Reads the configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_SERVICE_URL)
            .ok_or_else(|| ApiError::config(format!("{ENV_SERVICE_URL} is not set")))?;
        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| ApiError::config(format!("{ENV_API_KEY} is not set")))?;

        let mut config = Self::new(url, api_key);
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrites fields for which the lookup yields a value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVICE_URL) {
            self.url = url;
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api_key = api_key;
        }
        if let Some(collection) = lookup(ENV_COLLECTION) {
            self.collection = collection;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                ApiError::config(format!("{ENV_TIMEOUT_SECS} must be a number, got {timeout:?}"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::config("api key is empty"));
        }
        if self.collection.trim().is_empty() || self.collection.contains('/') {
            return Err(ApiError::config(format!(
                "invalid collection name {:?}",
                self.collection
            )));
        }
        self.collection_url().map(|_| ())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{url}/rest/v1/{collection}`
    pub fn collection_url(&self) -> Result<Url> {
        let mut base = Url::parse(self.url.trim())?;
        if base.cannot_be_a_base() {
            return Err(ApiError::config(format!("{} cannot be a base url", self.url)));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(&format!("rest/v1/{}", self.collection))?)
    }
}
