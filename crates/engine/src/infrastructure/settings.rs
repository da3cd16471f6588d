//! Engine configuration from environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use lorelink_domain::{DomainError, EntityKind, DEFAULT_SOURCE};

use super::data_sources::{FallbackDataSource, FileDataSource, HttpDataSource};
use super::ports::DataSourcePort;

/// Local data directory (the 5etools `data/` folder)
pub const ENV_DATA_PATH: &str = "LORELINK_DATA_PATH";
/// Remote mirror of the data directory, used alone or as a fallback
pub const ENV_DATA_URL: &str = "LORELINK_DATA_URL";
pub const ENV_DEFAULT_SOURCE: &str = "LORELINK_DEFAULT_SOURCE";
/// Comma-separated kinds to warm at startup ("spell,item,condition")
pub const ENV_PRELOAD: &str = "LORELINK_PRELOAD";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No reference data configured: set LORELINK_DATA_PATH and/or LORELINK_DATA_URL")]
    NoDataSource,
    #[error("Invalid LORELINK_DATA_URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid LORELINK_PRELOAD entry: {0}")]
    InvalidPreload(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub data_path: Option<PathBuf>,
    pub data_url: Option<String>,
    pub default_source: String,
    pub preload: Vec<EntityKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            data_url: None,
            default_source: DEFAULT_SOURCE.to_string(),
            preload: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let preload = match non_empty(ENV_PRELOAD) {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|kind| !kind.is_empty())
                .map(str::parse::<EntityKind>)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            data_path: non_empty(ENV_DATA_PATH).map(PathBuf::from),
            data_url: non_empty(ENV_DATA_URL),
            default_source: non_empty(ENV_DEFAULT_SOURCE)
                .map(|s| s.to_ascii_uppercase())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            preload,
        })
    }

    /// Build the configured data source.
    ///
    /// A path alone reads from disk, a URL alone fetches over HTTP, and both
    /// together read from disk with HTTP as the fallback.
    pub fn data_source(&self) -> Result<Arc<dyn DataSourcePort>, ConfigError> {
        let file = self
            .data_path
            .as_ref()
            .map(|path| Arc::new(FileDataSource::new(path.clone())) as Arc<dyn DataSourcePort>);

        let http = match &self.data_url {
            Some(url) => Some(Arc::new(HttpDataSource::new(url).map_err(|source| {
                ConfigError::InvalidUrl {
                    url: url.clone(),
                    source,
                }
            })?) as Arc<dyn DataSourcePort>),
            None => None,
        };

        match (file, http) {
            (Some(file), Some(http)) => Ok(Arc::new(FallbackDataSource::new(file, http))),
            (Some(file), None) => Ok(file),
            (None, Some(http)) => Ok(http),
            (None, None) => Err(ConfigError::NoDataSource),
        }
    }
}
