//! Character-building records: races, classes, class features, feats,
//! backgrounds and optional features.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::common::{AbilityBonus, RecordMeta, Speed};

/// A playable race (or species).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Size codes ("M", "S")
    #[serde(default)]
    pub size: Vec<String>,
    #[serde(default)]
    pub speed: Option<Speed>,
    #[serde(default)]
    pub ability: Vec<AbilityBonus>,
    /// Darkvision range in feet
    #[serde(default)]
    pub darkvision: Option<u32>,
}

/// Hit die, e.g. `{"number": 1, "faces": 10}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDie {
    pub number: u32,
    pub faces: u32,
}

/// A character class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(rename = "hd", default)]
    pub hit_die: Option<HitDie>,
    /// Saving throw proficiencies ("str", "con")
    #[serde(default)]
    pub proficiency: Vec<String>,
    #[serde(default)]
    pub spellcasting_ability: Option<String>,
    /// What subclasses are called ("Martial Archetype")
    #[serde(default)]
    pub subclass_title: Option<String>,
    /// Caster progression ("full", "1/2", "pact")
    #[serde(default)]
    pub caster_progression: Option<String>,
}

/// A class or subclass feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFeatureRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub class_source: Option<String>,
    #[serde(default)]
    pub level: Option<u8>,
    /// Set for subclass features
    #[serde(default)]
    pub subclass_short_name: Option<String>,
}

/// A feat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub prerequisite: Vec<Value>,
    #[serde(default)]
    pub ability: Vec<AbilityBonus>,
    /// Feat category code ("G" general, "O" origin, ...)
    #[serde(default)]
    pub category: Option<String>,
}

impl FeatRecord {
    pub fn prerequisites(&self) -> Vec<String> {
        summarize_prerequisites(&self.prerequisite)
    }
}

/// A character background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Proficiency maps: `{"insight": true, "religion": true}` or a `choose` object
    #[serde(default)]
    pub skill_proficiencies: Vec<BTreeMap<String, Value>>,
}

impl BackgroundRecord {
    /// Skills granted outright, in data order.
    pub fn granted_skills(&self) -> Vec<&str> {
        self.skill_proficiencies
            .iter()
            .flat_map(|set| {
                set.iter()
                    .filter(|(_, granted)| granted.as_bool() == Some(true))
                    .map(|(skill, _)| skill.as_str())
            })
            .collect()
    }
}

/// An optional class feature (invocations, maneuvers, metamagic, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalFeatureRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Feature type codes ("EI" eldritch invocation, "MM" metamagic, ...)
    #[serde(default)]
    pub feature_type: Vec<String>,
    #[serde(default)]
    pub prerequisite: Vec<Value>,
}

impl OptionalFeatureRecord {
    pub fn prerequisites(&self) -> Vec<String> {
        summarize_prerequisites(&self.prerequisite)
    }

    /// Human-readable feature types.
    pub fn feature_type_names(&self) -> Vec<&str> {
        self.feature_type
            .iter()
            .map(|code| optional_feature_type_name(code))
            .collect()
    }
}

fn optional_feature_type_name(code: &str) -> &str {
    match code {
        "EI" => "Eldritch Invocation",
        "MM" => "Metamagic",
        "MV:B" => "Maneuver, Battle Master",
        "FS:F" => "Fighting Style; Fighter",
        "FS:R" => "Fighting Style; Ranger",
        "FS:P" => "Fighting Style; Paladin",
        "AI" => "Artificer Infusion",
        "AS" => "Arcane Shot",
        "ED" => "Elemental Discipline",
        "PB" => "Pact Boon",
        "RN" => "Rune Knight Rune",
        other => other,
    }
}

/// Flatten prerequisite objects into short readable clauses.
///
/// Each array element is an alternative; keys inside one element are joined.
pub fn summarize_prerequisites(prerequisites: &[Value]) -> Vec<String> {
    prerequisites
        .iter()
        .filter_map(Value::as_object)
        .map(|prereq| {
            let mut parts = Vec::new();
            for (key, value) in prereq {
                match key.as_str() {
                    "level" => parts.push(describe_level(value)),
                    "race" | "background" | "feat" | "feature" => {
                        let names: Vec<String> = value
                            .as_array()
                            .map(|list| list.iter().filter_map(prerequisite_name).collect())
                            .unwrap_or_default();
                        if !names.is_empty() {
                            parts.push(names.join(" or "));
                        }
                    }
                    "ability" => {
                        let scores: Vec<String> = value
                            .as_array()
                            .map(|list| {
                                list.iter()
                                    .filter_map(Value::as_object)
                                    .flat_map(|scores| {
                                        scores.iter().map(|(ability, min)| {
                                            format!(
                                                "{} {}",
                                                ability.to_uppercase(),
                                                min.as_i64().unwrap_or_default()
                                            )
                                        })
                                    })
                                    .collect()
                            })
                            .unwrap_or_default();
                        if !scores.is_empty() {
                            parts.push(scores.join(" or "));
                        }
                    }
                    "spellcasting" | "spellcasting2020" if value.as_bool() == Some(true) => {
                        parts.push("The ability to cast at least one spell".to_string());
                    }
                    "pact" => {
                        if let Some(pact) = value.as_str() {
                            parts.push(format!("Pact of the {}", pact));
                        }
                    }
                    "proficiency" => parts.push("Proficiency".to_string()),
                    "other" | "otherSummary" => {
                        if let Some(text) = value.as_str().or_else(|| {
                            value.get("entry").and_then(Value::as_str)
                        }) {
                            parts.push(text.to_string());
                        }
                    }
                    _ => {}
                }
            }
            parts.join(", ")
        })
        .filter(|clause| !clause.is_empty())
        .collect()
}

fn describe_level(value: &Value) -> String {
    if let Some(level) = value.as_u64() {
        return format!("Level {}", level);
    }
    let level = value.get("level").and_then(Value::as_u64).unwrap_or(1);
    match value
        .get("class")
        .and_then(|class| class.get("name"))
        .and_then(Value::as_str)
    {
        Some(class) => format!("Level {} {}", level, class),
        None => format!("Level {}", level),
    }
}

fn prerequisite_name(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(name) => name.as_str(),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str)?,
        _ => return None,
    };
    let name = raw.split('|').next().unwrap_or(raw);
    Some(title_case(name))
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
