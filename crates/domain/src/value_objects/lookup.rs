//! Lookup requests and their outcomes.

use serde::{Deserialize, Serialize};

use super::reference_key::{normalize_name, ReferenceKey};
use crate::entities::{Entity, EntityKind};
use crate::DomainError;

/// `(kind, name, source?)`: what a tag or anchor asks to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceLookup {
    pub kind: EntityKind,
    pub name: String,
    #[serde(default)]
    pub source: Option<String>,
}

impl ReferenceLookup {
    /// Create a lookup; the name must not be blank.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "{} lookup needs a name",
                kind.label()
            )));
        }
        Ok(Self {
            kind,
            name,
            source: None,
        })
    }

    /// Attach a source; blank sources are ignored.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        let trimmed = source.trim();
        self.source = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn key(&self) -> ReferenceKey {
        ReferenceKey::new(self.kind, &self.name)
    }

    /// The requested source, or `default` when none was given.
    pub fn source_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.source.as_deref().unwrap_or(default)
    }

    /// Identity for memoizing resolutions within one request.
    pub fn memo_key(&self) -> (EntityKind, String, Option<String>) {
        (
            self.kind,
            normalize_name(&self.name),
            self.source.as_ref().map(|s| s.to_ascii_uppercase()),
        )
    }
}

/// Outcome of resolving a reference.
///
/// Not-found is data, not an error: callers render it inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolvedReference {
    Found(Entity),
    NotFound { name: String, error: String },
}

impl ResolvedReference {
    /// The standard "<Label> not found" sentinel.
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        ResolvedReference::NotFound {
            name: name.into(),
            error: kind.not_found_message(),
        }
    }

    /// A sentinel carrying an arbitrary error text (load failures).
    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        ResolvedReference::NotFound {
            name: name.into(),
            error: error.into(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolvedReference::Found(_))
    }

    pub fn entity(&self) -> Option<&Entity> {
        match self {
            ResolvedReference::Found(entity) => Some(entity),
            ResolvedReference::NotFound { .. } => None,
        }
    }

    pub fn into_entity(self) -> Option<Entity> {
        match self {
            ResolvedReference::Found(entity) => Some(entity),
            ResolvedReference::NotFound { .. } => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResolvedReference::Found(entity) => entity.name(),
            ResolvedReference::NotFound { name, .. } => name,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResolvedReference::Found(_) => None,
            ResolvedReference::NotFound { error, .. } => Some(error),
        }
    }
}
