use crate::model::ConfigError;
use crate::source::fetcher::DEFAULT_USER_AGENT;
use crate::view::SortKey;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CATALOG_URL: &str =
    "https://resultadosscrapping-default-rtdb.firebaseio.com/resultados.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_url: String,
    /// When set, the catalog is read from this file instead of `catalog_url`.
    pub catalog_file: Option<PathBuf>,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
    pub refresh_interval_seconds: u64,
    pub default_sort: SortKey,
    pub default_search: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_file: None,
            request_timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            refresh_interval_seconds: 300,
            default_sort: SortKey::Name,
            default_search: String::new(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.refresh_interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_seconds must be greater than 0".into(),
            ));
        }
        if self.catalog_file.is_none() && self.catalog_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "either catalog_url or catalog_file must be set".into(),
            ));
        }
        Ok(())
    }
}

/// Loads the config file; a missing file means defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let config: AppConfig = match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No config at {}, using defaults", path.display());
            AppConfig::default()
        }
        Err(e) => return Err(e.into()),
    };
    config.validate()?;
    Ok(config)
}
