//! Catalog configuration.
//!
//! A TOML file supplies defaults, the environment (and `.env`) overrides the
//! service section:
//!
//! ```toml
//! [service]
//! url = "https://project.supabase.co"
//! api_key = "anon-key"
//!
//! [ui]
//! locale = "ru"
//!
//! [submit]
//! default_views = 0
//! default_duration = "10:30"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use videos_api::ServiceConfig;

use crate::error::{CatalogError, Result};
use crate::locale::Locale;
use crate::upload::SubmitDefaults;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: Locale,
}

/// Settings the view-model itself consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSettings {
    pub locale: Locale,
    pub submit: SubmitDefaults,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub service: ServiceConfig,
    pub ui: UiConfig,
    pub submit: SubmitDefaults,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    service: Option<ServiceConfig>,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    submit: SubmitDefaults,
}

impl CatalogConfig {
    /// Reads `path` when given, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let contents = match path {
            Some(path) => {
                debug!(path = %path.display(), "reading catalog config");
                Some(std::fs::read_to_string(path)?)
            }
            None => None,
        };
        Self::from_parts(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Builds the configuration from optional TOML text and a variable lookup.
    pub fn from_parts<F>(toml_text: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: FileConfig = match toml_text {
            Some(text) => toml::from_str(text)?,
            None => FileConfig::default(),
        };

        let service = match file.service {
            Some(mut service) => {
                service.apply_overrides(&lookup)?;
                service.validate()?;
                service
            }
            None => ServiceConfig::from_lookup(&lookup).map_err(|e| {
                CatalogError::config(format!("no [service] section and {e}"))
            })?,
        };

        file.submit
            .validate()
            .map_err(|e| CatalogError::config(format!("submit.default_duration: {e}")))?;

        Ok(Self {
            service,
            ui: file.ui,
            submit: file.submit,
        })
    }

    pub fn settings(&self) -> CatalogSettings {
        CatalogSettings {
            locale: self.ui.locale,
            submit: self.submit.clone(),
        }
    }
}
