//! Local filesystem data source.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::infrastructure::ports::{validate_document_path, DataSourceError, DataSourcePort};

/// Reads documents from a data directory on disk.
///
/// The directory is the `data/` folder of a 5etools checkout (the one that
/// holds `races.json` and `spells/index.json`).
#[derive(Debug, Clone)]
pub struct FileDataSource {
    root: PathBuf,
}

impl FileDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DataSourcePort for FileDataSource {
    async fn fetch_document(&self, path: &str) -> Result<Value, DataSourceError> {
        validate_document_path(path)?;

        let file_path = path.split('/').fold(self.root.clone(), |acc, part| acc.join(part));
        let content = match fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataSourceError::NotFound(path.to_string()));
            }
            Err(source) => {
                return Err(DataSourceError::Io {
                    path: path.to_string(),
                    source,
                })
            }
        };

        tracing::debug!(path = %file_path.display(), bytes = content.len(), "Read reference document");

        serde_json::from_str(&content).map_err(|source| DataSourceError::Parse {
            path: path.to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        format!("fs:{}", self.root.display())
    }
}
