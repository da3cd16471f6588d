//! Memoized category loading.
//!
//! Each category document is fetched and assembled once per catalog, then
//! served from memory. Concurrent first requests for the same category share
//! a single fetch. A failed load leaves nothing behind, so the next request
//! tries again.

use dashmap::DashMap;
use futures_util::future::{join_all, try_join_all};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::OnceCell;

use lorelink_domain::{EntityKind, DEFAULT_SOURCE};

use super::layout::{CategoryLocation, DataLayout};
use super::ports::{DataSourceError, DataSourcePort};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to load {kind} data: {source}")]
    Load {
        kind: EntityKind,
        #[source]
        source: DataSourceError,
    },
    #[error("Unknown {kind} source: {source_code}")]
    UnknownSource {
        kind: EntityKind,
        source_code: String,
    },
    #[error("Malformed {kind} index {path}: {reason}")]
    MalformedIndex {
        kind: EntityKind,
        path: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CategoryKey {
    kind: EntityKind,
    /// Upper-cased source code, only for partitioned categories
    source: Option<String>,
}

type Memo = Arc<OnceCell<Arc<Value>>>;

/// Lazily loaded, memoized category documents.
///
/// A category document has one array per collection key of its kind
/// (`{"item": [...], "baseitem": [...]}`), merged across every file the
/// kind is stored in.
pub struct Catalog {
    data_source: Arc<dyn DataSourcePort>,
    layout: DataLayout,
    default_source: String,
    documents: DashMap<String, Memo>,
    categories: DashMap<CategoryKey, Memo>,
}

impl Catalog {
    pub fn new(data_source: Arc<dyn DataSourcePort>) -> Self {
        Self::with_layout(data_source, DataLayout::default())
    }

    pub fn with_layout(data_source: Arc<dyn DataSourcePort>, layout: DataLayout) -> Self {
        Self {
            data_source,
            layout,
            default_source: DEFAULT_SOURCE.to_string(),
            documents: DashMap::new(),
            categories: DashMap::new(),
        }
    }

    /// Source used for partitioned categories when the caller names none.
    pub fn with_default_source(mut self, source: impl Into<String>) -> Self {
        self.default_source = source.into();
        self
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    /// Source assumed for `kind` when the caller names none.
    pub fn default_source_for(&self, kind: EntityKind) -> &str {
        kind.default_source(&self.default_source)
    }

    /// Whether `kind` is stored per source, so that `source` selects a document.
    pub fn is_partitioned(&self, kind: EntityKind) -> bool {
        self.layout.location(kind).is_partitioned()
    }

    /// Load (or return the cached) category document for `kind`.
    ///
    /// `source` only matters for partitioned categories; it defaults to the
    /// catalog's default source.
    pub async fn load_category(
        &self,
        kind: EntityKind,
        source: Option<&str>,
    ) -> Result<Arc<Value>, CatalogError> {
        let location = self.layout.location(kind);
        let key = self.category_key(kind, &location, source);

        // Clone the cell out so the map shard is not locked across the await
        let cell = self.categories.entry(key.clone()).or_default().clone();
        if let Some(doc) = cell.get() {
            tracing::debug!(kind = %kind, source = ?key.source, "Category cache hit");
            return Ok(doc.clone());
        }

        let doc = cell
            .get_or_try_init(|| async {
                let doc = self.build_category(kind, &location, key.source.as_deref()).await?;
                tracing::info!(
                    kind = %kind,
                    source = ?key.source,
                    records = record_count(&doc),
                    "Loaded category"
                );
                Ok::<_, CatalogError>(Arc::new(doc))
            })
            .await?;

        Ok(doc.clone())
    }

    /// Whether the category is already in memory.
    pub fn is_cached(&self, kind: EntityKind, source: Option<&str>) -> bool {
        let location = self.layout.location(kind);
        let key = self.category_key(kind, &location, source);
        self.categories
            .get(&key)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }

    /// Drop every cached document and category.
    pub fn clear(&self) {
        let categories = self.categories.len();
        self.categories.clear();
        self.documents.clear();
        tracing::info!(categories, "Cleared reference data cache");
    }

    /// Warm several categories concurrently. Returns how many loaded.
    ///
    /// Partitioned categories are warmed for their default source only.
    pub async fn preload(&self, kinds: &[EntityKind]) -> usize {
        let results = join_all(kinds.iter().map(|kind| self.load_category(*kind, None))).await;

        let mut loaded = 0;
        for (kind, result) in kinds.iter().zip(results) {
            match result {
                Ok(_) => loaded += 1,
                Err(e) => tracing::warn!(kind = %kind, error = %e, "Preload failed"),
            }
        }
        loaded
    }

    fn category_key(
        &self,
        kind: EntityKind,
        location: &CategoryLocation,
        source: Option<&str>,
    ) -> CategoryKey {
        let source = if location.is_partitioned() {
            let source = source
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(self.default_source_for(kind));
            Some(source.to_ascii_uppercase())
        } else {
            None
        };
        CategoryKey { kind, source }
    }

    async fn build_category(
        &self,
        kind: EntityKind,
        location: &CategoryLocation,
        source: Option<&str>,
    ) -> Result<Value, CatalogError> {
        let docs = match location {
            CategoryLocation::Files(paths) => {
                try_join_all(paths.iter().map(|path| self.fetch(kind, path))).await?
            }
            CategoryLocation::PartitionedIndex { dir } => {
                let source = source.unwrap_or(self.default_source_for(kind));
                let index_path = format!("{}/index.json", dir);
                let index = self.fetch(kind, &index_path).await?;
                let entries = index_entries(kind, &index_path, &index)?;

                let file = entries
                    .iter()
                    .find(|(code, _)| code.eq_ignore_ascii_case(source))
                    .map(|(_, file)| *file)
                    .ok_or_else(|| CatalogError::UnknownSource {
                        kind,
                        source_code: source.to_string(),
                    })?;

                vec![self.fetch(kind, &format!("{}/{}", dir, file)).await?]
            }
            CategoryLocation::MergedIndex { dir } => {
                let index_path = format!("{}/index.json", dir);
                let index = self.fetch(kind, &index_path).await?;
                let paths: Vec<String> = index_entries(kind, &index_path, &index)?
                    .into_iter()
                    .map(|(_, file)| format!("{}/{}", dir, file))
                    .collect();

                try_join_all(paths.iter().map(|path| self.fetch(kind, path))).await?
            }
        };

        Ok(collect_records(kind, &docs))
    }

    /// Fetch one raw document through the path-level memo.
    async fn fetch(&self, kind: EntityKind, path: &str) -> Result<Arc<Value>, CatalogError> {
        let cell = self.documents.entry(path.to_string()).or_default().clone();
        let doc = cell
            .get_or_try_init(|| async {
                tracing::debug!(path = %path, source = %self.data_source.describe(), "Fetching document");
                let doc = self.data_source.fetch_document(path).await?;
                Ok::<_, DataSourceError>(Arc::new(doc))
            })
            .await
            .map_err(|source| CatalogError::Load { kind, source })?;
        Ok(doc.clone())
    }
}

/// `(source code, file name)` pairs from an `index.json` document.
fn index_entries<'a>(
    kind: EntityKind,
    path: &str,
    index: &'a Value,
) -> Result<Vec<(&'a str, &'a str)>, CatalogError> {
    let obj = index.as_object().ok_or_else(|| CatalogError::MalformedIndex {
        kind,
        path: path.to_string(),
        reason: "expected an object of source -> file".to_string(),
    })?;

    obj.iter()
        .map(|(code, file)| {
            file.as_str()
                .map(|file| (code.as_str(), file))
                .ok_or_else(|| CatalogError::MalformedIndex {
                    kind,
                    path: path.to_string(),
                    reason: format!("entry '{}' is not a file name", code),
                })
        })
        .collect()
}

/// Keep only `kind`'s collections, concatenated across documents.
fn collect_records(kind: EntityKind, docs: &[Arc<Value>]) -> Value {
    let mut out = Map::new();
    for key in kind.collection_keys() {
        let records: Vec<Value> = docs
            .iter()
            .filter_map(|doc| doc.get(*key).and_then(Value::as_array))
            .flatten()
            .cloned()
            .collect();
        out.insert((*key).to_string(), Value::Array(records));
    }
    Value::Object(out)
}

fn record_count(doc: &Value) -> usize {
    doc.as_object()
        .map(|obj| obj.values().filter_map(Value::as_array).map(Vec::len).sum())
        .unwrap_or(0)
}
