//! Fields shared by every entity record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::entries::Entry;

/// Source code assumed when a record or lookup does not name one.
pub const DEFAULT_SOURCE: &str = "PHB";

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

/// Identity and rules text common to all records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub name: String,
    /// Source book code (e.g. "PHB", "XGE")
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl RecordMeta {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            page: None,
            entries: Vec::new(),
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }
}

/// Movement speed: a plain walking speed or a table of movement modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Speed {
    Walk(u32),
    Modes(BTreeMap<String, SpeedValue>),
}

/// A single movement mode value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeedValue {
    Feet(u32),
    /// `true` means "equal to walking speed"
    EqualsWalk(bool),
    Conditional {
        number: u32,
        #[serde(default)]
        condition: Option<String>,
    },
    /// Alternate-speed tables and other shapes the tooltip does not show
    Other(serde_json::Value),
}

impl Speed {
    /// One-line summary: "30 ft., fly 50 ft. (hover), swim equal to walking speed".
    pub fn summary(&self) -> String {
        let modes = match self {
            Speed::Walk(feet) => return format!("{} ft.", feet),
            Speed::Modes(modes) => modes,
        };

        let mut parts = Vec::new();
        if let Some(walk) = modes.get("walk").and_then(SpeedValue::describe) {
            parts.push(walk);
        }
        for (mode, value) in modes {
            if mode == "walk" || mode == "canHover" {
                continue;
            }
            if let Some(text) = value.describe() {
                parts.push(format!("{} {}", mode, text));
            }
        }
        parts.join(", ")
    }
}

impl SpeedValue {
    fn describe(&self) -> Option<String> {
        match self {
            SpeedValue::Feet(feet) => Some(format!("{} ft.", feet)),
            SpeedValue::EqualsWalk(true) => Some("equal to walking speed".to_string()),
            SpeedValue::Conditional {
                number,
                condition: Some(condition),
            } => Some(format!("{} ft. {}", number, condition)),
            SpeedValue::Conditional { number, .. } => Some(format!("{} ft.", number)),
            SpeedValue::EqualsWalk(false) | SpeedValue::Other(_) => None,
        }
    }
}

/// Full name for a size code ("M" -> "Medium"); unknown codes pass through.
pub fn size_name(code: &str) -> &str {
    match code {
        "F" => "Fine",
        "D" => "Diminutive",
        "T" => "Tiny",
        "S" => "Small",
        "M" => "Medium",
        "L" => "Large",
        "H" => "Huge",
        "G" => "Gargantuan",
        "C" => "Colossal",
        "V" => "Varies",
        other => other,
    }
}

/// Ability score increase: fixed bonuses and/or a choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityBonus {
    #[serde(default)]
    pub choose: Option<AbilityChoice>,
    /// Fixed bonuses keyed by ability abbreviation ("str", "dex", ...)
    #[serde(flatten)]
    pub fixed: BTreeMap<String, serde_json::Value>,
}

/// A choice of ability increases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityChoice {
    #[serde(default)]
    pub from: Vec<String>,
    #[serde(default)]
    pub count: Option<u8>,
    #[serde(default)]
    pub amount: Option<i32>,
}

impl AbilityBonus {
    /// Fixed bonuses as (ability, amount) pairs, skipping non-numeric values.
    pub fn fixed_bonuses(&self) -> Vec<(&str, i64)> {
        self.fixed
            .iter()
            .filter_map(|(ability, value)| value.as_i64().map(|amount| (ability.as_str(), amount)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_defaults_source() {
        let meta: RecordMeta = serde_json::from_value(json!({"name": "Elf"})).expect("parses");
        assert_eq!(meta.source, DEFAULT_SOURCE);
        assert!(meta.entries.is_empty());
    }

    #[test]
    fn speed_forms() {
        let walk: Speed = serde_json::from_value(json!(30)).expect("walk");
        assert_eq!(walk, Speed::Walk(30));

        let modes: Speed =
            serde_json::from_value(json!({"walk": 25, "swim": true, "fly": {"number": 50, "condition": "(hover)"}}))
                .expect("modes");
        match modes {
            Speed::Modes(modes) => {
                assert_eq!(modes.get("walk"), Some(&SpeedValue::Feet(25)));
                assert_eq!(modes.get("swim"), Some(&SpeedValue::EqualsWalk(true)));
                assert!(matches!(modes.get("fly"), Some(SpeedValue::Conditional { number: 50, .. })));
            }
            other => panic!("expected modes, got {:?}", other),
        }
    }

    #[test]
    fn speed_summary_puts_walk_first() {
        let speed: Speed = serde_json::from_value(
            json!({"fly": {"number": 50, "condition": "(hover)"}, "walk": 30, "canHover": true, "swim": true}),
        )
        .expect("modes");
        assert_eq!(
            speed.summary(),
            "30 ft., fly 50 ft. (hover), swim equal to walking speed"
        );
        assert_eq!(Speed::Walk(25).summary(), "25 ft.");
    }

    #[test]
    fn alternate_speeds_do_not_break_parsing() {
        let speed: Speed =
            serde_json::from_value(json!({"walk": 30, "alternate": {"walk": [{"number": 40}]}}))
                .expect("modes");
        assert_eq!(speed.summary(), "30 ft.");
    }

    #[test]
    fn size_names() {
        assert_eq!(size_name("M"), "Medium");
        assert_eq!(size_name("G"), "Gargantuan");
        assert_eq!(size_name("Q"), "Q");
    }

    #[test]
    fn ability_bonus_fixed_and_choice() {
        let bonus: AbilityBonus = serde_json::from_value(json!({
            "cha": 2,
            "choose": {"from": ["str", "dex"], "count": 2}
        }))
        .expect("parses");

        assert_eq!(bonus.fixed_bonuses(), vec![("cha", 2)]);
        let choice = bonus.choose.expect("choice");
        assert_eq!(choice.count, Some(2));
        assert_eq!(choice.from, vec!["str", "dex"]);
    }
}
