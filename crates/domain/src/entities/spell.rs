//! Spell records.
//!
//! Mirrors the 5etools spell schema closely enough to render a spell's stat
//! block; fields the tooltip never shows are left out.

use serde::{Deserialize, Serialize};

use super::common::RecordMeta;
use super::entries::Entry;

/// A spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Spell level (0 = cantrip)
    pub level: u8,
    /// School code ("V" = evocation, ...)
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub time: Vec<CastingTime>,
    #[serde(default)]
    pub range: Option<SpellRange>,
    #[serde(default)]
    pub components: Option<SpellComponents>,
    #[serde(default)]
    pub duration: Vec<SpellDuration>,
    #[serde(default)]
    pub entries_higher_level: Vec<Entry>,
    #[serde(rename = "meta", default)]
    pub flags: SpellFlags,
}

impl SpellRecord {
    /// Check if this is a cantrip.
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    /// Whether any duration requires concentration.
    pub fn requires_concentration(&self) -> bool {
        self.duration.iter().any(|d| d.concentration)
    }
}

/// How long it takes to cast a spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastingTime {
    #[serde(default)]
    pub number: Option<u32>,
    /// "action", "bonus", "reaction", "minute", "hour", ...
    pub unit: String,
    /// Trigger for reactions
    #[serde(default)]
    pub condition: Option<String>,
}

/// Range of a spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellRange {
    /// "point", "radius", "cone", "special", ...
    #[serde(rename = "type")]
    pub range_type: String,
    #[serde(default)]
    pub distance: Option<Distance>,
}

/// Distance part of a spell range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    /// "feet", "miles", "self", "touch", "sight", "unlimited", ...
    #[serde(rename = "type")]
    pub distance_type: String,
    #[serde(default)]
    pub amount: Option<u32>,
}

/// Required components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellComponents {
    #[serde(default)]
    pub v: bool,
    #[serde(default)]
    pub s: bool,
    #[serde(default)]
    pub m: Option<MaterialComponent>,
    /// Royalty component (rare)
    #[serde(default)]
    pub r: bool,
}

/// Material component - can be a string, an object, or a bare flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialComponent {
    Simple(String),
    Detailed {
        text: String,
        #[serde(default)]
        cost: Option<u32>,
        #[serde(default)]
        consume: Option<serde_json::Value>,
    },
    Flag(bool),
}

impl MaterialComponent {
    /// Descriptive text, if the data carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            MaterialComponent::Simple(text) => Some(text),
            MaterialComponent::Detailed { text, .. } => Some(text),
            MaterialComponent::Flag(_) => None,
        }
    }
}

/// Duration of a spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellDuration {
    /// "instant", "timed", "permanent", "special"
    #[serde(rename = "type")]
    pub duration_type: String,
    #[serde(default)]
    pub duration: Option<DurationAmount>,
    #[serde(default)]
    pub concentration: bool,
    /// Ending conditions for permanent spells ("dispel", "trigger")
    #[serde(default)]
    pub ends: Vec<String>,
}

/// Duration amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationAmount {
    /// "round", "minute", "hour", "day"
    #[serde(rename = "type")]
    pub unit: String,
    #[serde(default)]
    pub amount: Option<u32>,
    #[serde(default)]
    pub up_to: bool,
}

/// Spell metadata (ritual).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellFlags {
    #[serde(default)]
    pub ritual: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_fireball() {
        let spell: SpellRecord = serde_json::from_value(json!({
            "name": "Fireball",
            "source": "PHB",
            "page": 241,
            "level": 3,
            "school": "V",
            "time": [{"number": 1, "unit": "action"}],
            "range": {"type": "point", "distance": {"type": "feet", "amount": 150}},
            "components": {"v": true, "s": true, "m": "a tiny ball of bat guano and sulfur"},
            "duration": [{"type": "instant"}],
            "entries": ["A bright streak flashes from your pointing finger."],
            "entriesHigherLevel": [{"type": "entries", "name": "At Higher Levels", "entries": ["More."]}]
        }))
        .expect("fireball parses");

        assert_eq!(spell.meta.name, "Fireball");
        assert_eq!(spell.meta.page, Some(241));
        assert_eq!(spell.level, 3);
        assert!(!spell.is_cantrip());
        assert_eq!(
            spell.components.as_ref().and_then(|c| c.m.as_ref()).and_then(|m| m.text()),
            Some("a tiny ball of bat guano and sulfur")
        );
        assert_eq!(spell.entries_higher_level.len(), 1);
        assert!(!spell.flags.ritual);
    }

    #[test]
    fn parses_concentration_and_ritual() {
        let spell: SpellRecord = serde_json::from_value(json!({
            "name": "Detect Magic",
            "level": 1,
            "duration": [{"type": "timed", "duration": {"type": "minute", "amount": 10}, "concentration": true}],
            "meta": {"ritual": true}
        }))
        .expect("parses");

        assert!(spell.requires_concentration());
        assert!(spell.flags.ritual);
        assert_eq!(spell.meta.source, "PHB");
    }

    #[test]
    fn material_component_forms() {
        let detailed: MaterialComponent =
            serde_json::from_value(json!({"text": "a diamond worth 300 gp", "cost": 30000, "consume": true}))
                .expect("detailed");
        assert_eq!(detailed.text(), Some("a diamond worth 300 gp"));

        let flag: MaterialComponent = serde_json::from_value(json!(true)).expect("flag");
        assert_eq!(flag.text(), None);
    }
}
