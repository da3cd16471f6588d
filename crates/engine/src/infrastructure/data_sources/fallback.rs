//! Primary-then-secondary data source.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::infrastructure::ports::{DataSourceError, DataSourcePort};

/// Tries the primary source first and falls back to the secondary on any failure.
///
/// The usual pairing is a local data directory backed by a remote mirror.
#[derive(Clone)]
pub struct FallbackDataSource {
    primary: Arc<dyn DataSourcePort>,
    secondary: Arc<dyn DataSourcePort>,
}

impl FallbackDataSource {
    pub fn new(primary: Arc<dyn DataSourcePort>, secondary: Arc<dyn DataSourcePort>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl DataSourcePort for FallbackDataSource {
    async fn fetch_document(&self, path: &str) -> Result<Value, DataSourceError> {
        match self.primary.fetch_document(path).await {
            Ok(doc) => Ok(doc),
            Err(DataSourceError::InvalidPath(p)) => Err(DataSourceError::InvalidPath(p)),
            Err(e) => {
                tracing::warn!(
                    path = %path,
                    primary = %self.primary.describe(),
                    secondary = %self.secondary.describe(),
                    error = %e,
                    "Primary data source failed, falling back"
                );
                self.secondary.fetch_document(path).await
            }
        }
    }

    fn describe(&self) -> String {
        format!("{} -> {}", self.primary.describe(), self.secondary.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockDataSourcePort;
    use serde_json::json;

    fn named(mut mock: MockDataSourcePort, name: &'static str) -> MockDataSourcePort {
        mock.expect_describe().returning(move || name.to_string());
        mock
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let mut primary = MockDataSourcePort::new();
        primary
            .expect_fetch_document()
            .times(1)
            .returning(|_| Ok(json!({"race": []})));
        let mut secondary = MockDataSourcePort::new();
        secondary.expect_fetch_document().never();

        let source = FallbackDataSource::new(
            Arc::new(named(primary, "fs")),
            Arc::new(named(secondary, "http")),
        );
        let doc = source.fetch_document("races.json").await.expect("primary");
        assert_eq!(doc, json!({"race": []}));
    }

    #[tokio::test]
    async fn falls_back_on_failure() {
        let mut primary = MockDataSourcePort::new();
        primary
            .expect_fetch_document()
            .returning(|path| Err(DataSourceError::NotFound(path.to_string())));
        let mut secondary = MockDataSourcePort::new();
        secondary
            .expect_fetch_document()
            .withf(|path| path.to_string() == "races.json")
            .times(1)
            .returning(|_| Ok(json!({"race": [{"name": "Elf"}]})));

        let source = FallbackDataSource::new(
            Arc::new(named(primary, "fs")),
            Arc::new(named(secondary, "http")),
        );
        let doc = source.fetch_document("races.json").await.expect("secondary");
        assert_eq!(doc["race"][0]["name"], "Elf");
    }

    #[tokio::test]
    async fn invalid_paths_are_not_retried() {
        let mut primary = MockDataSourcePort::new();
        primary
            .expect_fetch_document()
            .returning(|path| Err(DataSourceError::InvalidPath(path.to_string())));
        let mut secondary = MockDataSourcePort::new();
        secondary.expect_fetch_document().never();

        let source = FallbackDataSource::new(
            Arc::new(named(primary, "fs")),
            Arc::new(named(secondary, "http")),
        );
        let err = source
            .fetch_document("../x.json")
            .await
            .expect_err("invalid");
        assert!(matches!(err, DataSourceError::InvalidPath(_)));
    }
}
