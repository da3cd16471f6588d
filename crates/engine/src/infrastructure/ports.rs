//! Port traits for infrastructure boundaries.
//!
//! Reference data is the only external dependency of the engine: a tree of
//! JSON documents addressed by relative path. Where those documents come
//! from (local disk, a remote mirror) is an adapter concern.

use async_trait::async_trait;
use serde_json::Value;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Invalid document path (traversal attempt): {0}")]
    InvalidPath(String),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Request for {path} failed: {message}")]
    Request { path: String, message: String },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DataSourceError {
    /// Whether the document simply does not exist (as opposed to a failed read).
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataSourceError::NotFound(_))
    }
}

// =============================================================================
// Reference Data Port
// =============================================================================

/// Fetch and parse one JSON document relative to the data root.
///
/// Paths use `/` separators (`spells/index.json`). Implementations must
/// refuse paths that escape the data root.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataSourcePort: Send + Sync {
    async fn fetch_document(&self, path: &str) -> Result<Value, DataSourceError>;

    /// Short label for logs ("fs:/data/5etools", "http://mirror/").
    fn describe(&self) -> String;
}

/// Reject absolute paths, backslashes and `..` components.
pub fn validate_document_path(path: &str) -> Result<(), DataSourceError> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.contains(':')
        || path.split('/').any(|part| part == ".." || part.is_empty());
    if invalid {
        return Err(DataSourceError::InvalidPath(path.to_string()));
    }
    Ok(())
}
