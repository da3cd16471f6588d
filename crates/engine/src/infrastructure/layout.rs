//! Where each category lives inside the data directory.

use std::collections::HashMap;

use lorelink_domain::EntityKind;

/// How a category's records are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLocation {
    /// One or more documents merged together (`items.json` + `items-base.json`).
    Files(Vec<String>),
    /// A directory whose `index.json` maps source codes to per-source documents.
    /// Only the requested source's document is loaded.
    PartitionedIndex { dir: String },
    /// A directory whose `index.json` lists documents that are all merged.
    MergedIndex { dir: String },
}

impl CategoryLocation {
    fn files(paths: &[&str]) -> Self {
        CategoryLocation::Files(paths.iter().map(|p| p.to_string()).collect())
    }

    pub fn is_partitioned(&self) -> bool {
        matches!(self, CategoryLocation::PartitionedIndex { .. })
    }
}

/// Mapping from entity kind to storage location.
///
/// Defaults follow the 5etools `data/` directory.
#[derive(Debug, Clone, Default)]
pub struct DataLayout {
    overrides: HashMap<EntityKind, CategoryLocation>,
}

impl DataLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `kind` somewhere other than its default location.
    pub fn with_location(mut self, kind: EntityKind, location: CategoryLocation) -> Self {
        self.overrides.insert(kind, location);
        self
    }

    pub fn location(&self, kind: EntityKind) -> CategoryLocation {
        if let Some(location) = self.overrides.get(&kind) {
            return location.clone();
        }
        match kind {
            EntityKind::Race => CategoryLocation::files(&["races.json"]),
            EntityKind::Class | EntityKind::ClassFeature => CategoryLocation::MergedIndex {
                dir: "class".to_string(),
            },
            EntityKind::Spell => CategoryLocation::PartitionedIndex {
                dir: "spells".to_string(),
            },
            EntityKind::Item => CategoryLocation::files(&["items.json", "items-base.json"]),
            EntityKind::Background => CategoryLocation::files(&["backgrounds.json"]),
            EntityKind::Condition => CategoryLocation::files(&["conditionsdiseases.json"]),
            EntityKind::Skill => CategoryLocation::files(&["skills.json"]),
            EntityKind::Action => CategoryLocation::files(&["actions.json"]),
            EntityKind::Feat => CategoryLocation::files(&["feats.json"]),
            EntityKind::OptionalFeature => CategoryLocation::files(&["optionalfeatures.json"]),
            EntityKind::Reward => CategoryLocation::files(&["rewards.json"]),
            EntityKind::Trap => CategoryLocation::files(&["trapshazards.json"]),
            EntityKind::Vehicle => CategoryLocation::files(&["vehicles.json"]),
            EntityKind::Object => CategoryLocation::files(&["objects.json"]),
            EntityKind::VariantRule => CategoryLocation::files(&["variantrules.json"]),
            EntityKind::Monster => CategoryLocation::PartitionedIndex {
                dir: "bestiary".to_string(),
            },
        }
    }
}
