//! ReferenceLookupPort - resolve a reference for a popup

use async_trait::async_trait;
use lorelink_domain::{ReferenceLookup, ResolvedReference};

/// Resolve one lookup. Never fails: load errors come back as a sentinel.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReferenceLookupPort: Send + Sync {
    async fn lookup(&self, lookup: &ReferenceLookup) -> ResolvedReference;
}
