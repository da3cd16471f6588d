//! Remote data source over HTTP.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::infrastructure::ports::{validate_document_path, DataSourceError, DataSourcePort};

/// Default request timeout for document fetches.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches documents from a static mirror of the data directory.
#[derive(Clone)]
pub struct HttpDataSource {
    client: Client,
    base_url: Url,
}

impl HttpDataSource {
    /// Create a source rooted at `base_url` (a trailing slash is added if missing).
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self, url::ParseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
        })
    }

    /// URL for a document path relative to the base.
    pub fn document_url(&self, path: &str) -> Result<Url, DataSourceError> {
        validate_document_path(path)?;
        self.base_url
            .join(path)
            .map_err(|_| DataSourceError::InvalidPath(path.to_string()))
    }
}

#[async_trait]
impl DataSourcePort for HttpDataSource {
    async fn fetch_document(&self, path: &str) -> Result<Value, DataSourceError> {
        let url = self.document_url(path)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DataSourceError::Request {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DataSourceError::NotFound(path.to_string()));
        }
        if !response.status().is_success() {
            return Err(DataSourceError::Request {
                path: path.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body = response.text().await.map_err(|e| DataSourceError::Request {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(url = %url, bytes = body.len(), "Fetched reference document");

        serde_json::from_str(&body).map_err(|source| DataSourceError::Parse {
            path: path.to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}
