//! Reference lookup over a fixed set of entities.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use lorelink_domain::{Entity, ReferenceKey, ReferenceLookup, ResolvedReference};

use crate::ports::outbound::ReferenceLookupPort;

/// Resolves lookups by reference key against entities added up front and
/// counts the calls it received.
#[derive(Default)]
pub struct StaticReferenceLookup {
    entities: HashMap<ReferenceKey, Entity>,
    calls: Mutex<Vec<ReferenceLookup>>,
}

impl StaticReferenceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities
            .insert(ReferenceKey::new(entity.kind(), entity.name()), entity);
        self
    }

    pub fn calls(&self) -> Vec<ReferenceLookup> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ReferenceLookupPort for StaticReferenceLookup {
    async fn lookup(&self, lookup: &ReferenceLookup) -> ResolvedReference {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(lookup.clone());
        match self.entities.get(&lookup.key()) {
            Some(entity) => ResolvedReference::Found(entity.clone()),
            None => ResolvedReference::not_found(lookup.kind, lookup.name.clone()),
        }
    }
}
