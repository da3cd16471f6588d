//! `ReferenceLookupPort` backed by the engine's resolver.

use std::sync::Arc;

use async_trait::async_trait;
use lorelink_domain::{ReferenceLookup, ResolvedReference};
use lorelink_engine::use_cases::ReferenceResolver;

use crate::ports::outbound::ReferenceLookupPort;

pub struct EngineReferenceLookup {
    resolver: Arc<ReferenceResolver>,
}

impl EngineReferenceLookup {
    pub fn new(resolver: Arc<ReferenceResolver>) -> Self {
        Self { resolver }
    }

    /// Lookup over a composed engine application.
    pub fn from_app(app: &lorelink_engine::App) -> Self {
        Self::new(app.use_cases.reference.clone())
    }
}

#[async_trait]
impl ReferenceLookupPort for EngineReferenceLookup {
    async fn lookup(&self, lookup: &ReferenceLookup) -> ResolvedReference {
        self.resolver.lookup(lookup).await
    }
}
