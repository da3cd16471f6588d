//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    catalog::Catalog,
    ports::DataSourcePort,
    settings::{ConfigError, EngineConfig},
};
use crate::use_cases;

/// Main application state.
///
/// Owns the catalog and the use cases built on it. Cheap to share behind an
/// `Arc`; every field is already shared.
pub struct App {
    pub config: EngineConfig,
    pub catalog: Arc<Catalog>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub reference: Arc<use_cases::ReferenceResolver>,
}

impl App {
    /// Compose the application over an explicit data source.
    pub fn new(config: EngineConfig, data_source: Arc<dyn DataSourcePort>) -> Self {
        tracing::info!(
            data_source = %data_source.describe(),
            default_source = %config.default_source,
            "Composing reference engine"
        );

        let catalog = Arc::new(
            Catalog::new(data_source).with_default_source(config.default_source.clone()),
        );
        let use_cases = UseCases {
            reference: Arc::new(use_cases::ReferenceResolver::new(catalog.clone())),
        };

        Self {
            config,
            catalog,
            use_cases,
        }
    }

    /// Compose the application from configuration alone.
    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        let data_source = config.data_source()?;
        Ok(Self::new(config, data_source))
    }

    /// Load the configured preload categories. Returns how many loaded.
    pub async fn warm_up(&self) -> usize {
        if self.config.preload.is_empty() {
            return 0;
        }
        let loaded = self.catalog.preload(&self.config.preload).await;
        tracing::info!(
            requested = self.config.preload.len(),
            loaded,
            "Preloaded reference categories"
        );
        loaded
    }
}
