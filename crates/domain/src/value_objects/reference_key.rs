//! Reference keys identify "the same thing" across tags, lookups and popups.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::EntityKind;

/// Normalize an entity name for comparison.
///
/// Lowercases, folds typographic apostrophes and backticks to `'`, and trims.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '`' => '\'',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether two entity names refer to the same thing.
pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// `type:normalizedname`, e.g. `spell:fireball`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceKey(String);

impl ReferenceKey {
    pub fn new(kind: EntityKind, name: &str) -> Self {
        Self(format!("{}:{}", kind.tag_name(), normalize_name(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
