//! Entity categories known to the reference system.
//!
//! Every rules entity belongs to exactly one kind. The kind decides which
//! category document holds the entity, which JSON collections inside that
//! document list it, and how its stat block is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Source code assumed for creatures when a lookup names none.
pub const MONSTER_DEFAULT_SOURCE: &str = "MM";

/// Category of a rules entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Race,
    Class,
    ClassFeature,
    Spell,
    Item,
    Background,
    Condition,
    Skill,
    Action,
    Feat,
    OptionalFeature,
    Reward,
    Trap,
    Vehicle,
    Object,
    VariantRule,
    Monster,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 17] = [
        EntityKind::Race,
        EntityKind::Class,
        EntityKind::ClassFeature,
        EntityKind::Spell,
        EntityKind::Item,
        EntityKind::Background,
        EntityKind::Condition,
        EntityKind::Skill,
        EntityKind::Action,
        EntityKind::Feat,
        EntityKind::OptionalFeature,
        EntityKind::Reward,
        EntityKind::Trap,
        EntityKind::Vehicle,
        EntityKind::Object,
        EntityKind::VariantRule,
        EntityKind::Monster,
    ];

    /// Canonical tag name, as written in `{@tag ...}` and `data-hover-type`.
    pub fn tag_name(&self) -> &'static str {
        match self {
            EntityKind::Race => "race",
            EntityKind::Class => "class",
            EntityKind::ClassFeature => "feature",
            EntityKind::Spell => "spell",
            EntityKind::Item => "item",
            EntityKind::Background => "background",
            EntityKind::Condition => "condition",
            EntityKind::Skill => "skill",
            EntityKind::Action => "action",
            EntityKind::Feat => "feat",
            EntityKind::OptionalFeature => "optfeature",
            EntityKind::Reward => "reward",
            EntityKind::Trap => "trap",
            EntityKind::Vehicle => "vehicle",
            EntityKind::Object => "object",
            EntityKind::VariantRule => "variantrule",
            EntityKind::Monster => "creature",
        }
    }

    /// Resolve a tag name (including common aliases) to a kind.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "race" => EntityKind::Race,
            "class" => EntityKind::Class,
            "feature" | "classfeature" | "subclassfeature" => EntityKind::ClassFeature,
            "spell" => EntityKind::Spell,
            "item" | "baseitem" => EntityKind::Item,
            "background" => EntityKind::Background,
            "condition" | "disease" | "status" => EntityKind::Condition,
            "skill" => EntityKind::Skill,
            "action" => EntityKind::Action,
            "feat" => EntityKind::Feat,
            "optfeature" | "optionalfeature" => EntityKind::OptionalFeature,
            "reward" => EntityKind::Reward,
            "trap" | "hazard" => EntityKind::Trap,
            "vehicle" => EntityKind::Vehicle,
            "object" => EntityKind::Object,
            "variantrule" => EntityKind::VariantRule,
            "creature" | "monster" => EntityKind::Monster,
            _ => return None,
        };
        Some(kind)
    }

    /// Human-readable label, used in "not found" messages and stat blocks.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Race => "Race",
            EntityKind::Class => "Class",
            EntityKind::ClassFeature => "Class feature",
            EntityKind::Spell => "Spell",
            EntityKind::Item => "Item",
            EntityKind::Background => "Background",
            EntityKind::Condition => "Condition",
            EntityKind::Skill => "Skill",
            EntityKind::Action => "Action",
            EntityKind::Feat => "Feat",
            EntityKind::OptionalFeature => "Optional feature",
            EntityKind::Reward => "Reward",
            EntityKind::Trap => "Trap",
            EntityKind::Vehicle => "Vehicle",
            EntityKind::Object => "Object",
            EntityKind::VariantRule => "Variant rule",
            EntityKind::Monster => "Monster",
        }
    }

    /// JSON collection keys that hold this kind's records in its category document.
    pub fn collection_keys(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Race => &["race"],
            EntityKind::Class => &["class"],
            EntityKind::ClassFeature => &["classFeature", "subclassFeature"],
            EntityKind::Spell => &["spell"],
            EntityKind::Item => &["item", "baseitem"],
            EntityKind::Background => &["background"],
            EntityKind::Condition => &["condition", "disease", "status"],
            EntityKind::Skill => &["skill"],
            EntityKind::Action => &["action"],
            EntityKind::Feat => &["feat"],
            EntityKind::OptionalFeature => &["optionalfeature"],
            EntityKind::Reward => &["reward"],
            EntityKind::Trap => &["trap", "hazard"],
            EntityKind::Vehicle => &["vehicle"],
            EntityKind::Object => &["object"],
            EntityKind::VariantRule => &["variantrule"],
            EntityKind::Monster => &["monster"],
        }
    }

    /// Whether category documents for this kind are split per source book.
    pub fn is_source_partitioned(&self) -> bool {
        matches!(self, EntityKind::Spell | EntityKind::Monster)
    }

    /// Source assumed when a lookup names none.
    ///
    /// Creatures live in the Monster Manual; every other kind uses the
    /// configured default.
    pub fn default_source<'a>(&self, configured: &'a str) -> &'a str {
        match self {
            EntityKind::Monster => MONSTER_DEFAULT_SOURCE,
            _ => configured,
        }
    }

    /// The "not found" message carried by lookup sentinels.
    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.label())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::from_tag_name(s)
            .ok_or_else(|| DomainError::parse(format!("Unknown entity kind: {}", s)))
    }
}
