//! Things a party meets rather than builds: traps and hazards, vehicles,
//! objects and monsters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{RecordMeta, Speed};

/// A trap or hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrapRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// "MECH", "MAG", "SMPL", "CMPX", "HAZ", "ENV", ...
    #[serde(default)]
    pub trap_haz_type: Option<String>,
}

impl TrapRecord {
    pub fn type_name(&self) -> &str {
        match self.trap_haz_type.as_deref() {
            Some("MECH") => "Mechanical Trap",
            Some("MAG") => "Magical Trap",
            Some("SMPL") => "Simple Trap",
            Some("CMPX") => "Complex Trap",
            Some("HAZ") => "Hazard",
            Some("WTH") => "Weather",
            Some("ENV") => "Environmental Hazard",
            Some("WLD") => "Wilderness Hazard",
            Some("GEN") => "Generic",
            Some(other) => other,
            None => "Trap",
        }
    }
}

/// Armor class and hit points of a vehicle hull.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleHull {
    #[serde(default)]
    pub ac: Option<u32>,
    #[serde(default)]
    pub hp: Option<u32>,
}

/// A vehicle (ship, infernal war machine, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// "SHIP", "INFWAR", "CREATURE", "OBJECT", "SPELLJAMMER"
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub cap_crew: Option<u32>,
    #[serde(default)]
    pub cap_passenger: Option<u32>,
    #[serde(default)]
    pub hull: Option<VehicleHull>,
    #[serde(default)]
    pub speed: Option<Speed>,
}

/// An object with game statistics (siege weapons, statues, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// "SW" siege weapon, "GEN" generic, "U" unknown
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub size: Vec<String>,
    /// Number or `{"special": "..."}`
    #[serde(default)]
    pub ac: Option<Value>,
    #[serde(default)]
    pub hp: Option<Value>,
    #[serde(default)]
    pub speed: Option<Speed>,
}

/// Hit points of a monster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitPoints {
    #[serde(default)]
    pub average: Option<u32>,
    #[serde(default)]
    pub formula: Option<String>,
    #[serde(default)]
    pub special: Option<String>,
}

impl HitPoints {
    /// "58 (9d8 + 18)", or the special text.
    pub fn summary(&self) -> Option<String> {
        match (&self.average, &self.formula, &self.special) {
            (Some(average), Some(formula), _) => Some(format!("{} ({})", average, formula)),
            (Some(average), None, _) => Some(average.to_string()),
            (None, _, Some(special)) => Some(special.clone()),
            _ => None,
        }
    }
}

/// A creature stat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub size: Vec<String>,
    /// Type string ("dragon") or `{"type": "humanoid", "tags": ["elf"]}`
    #[serde(rename = "type", default)]
    pub creature_type: Option<Value>,
    /// Numbers or `{"ac": 19, "from": ["natural armor"]}` objects
    #[serde(default)]
    pub ac: Vec<Value>,
    #[serde(default)]
    pub hp: Option<HitPoints>,
    #[serde(default)]
    pub speed: Option<Speed>,
    #[serde(default)]
    pub str: Option<u8>,
    #[serde(default)]
    pub dex: Option<u8>,
    #[serde(default)]
    pub con: Option<u8>,
    #[serde(default)]
    pub int: Option<u8>,
    #[serde(default)]
    pub wis: Option<u8>,
    #[serde(default)]
    pub cha: Option<u8>,
    /// Challenge rating string ("1/4") or `{"cr": "5", "lair": "6"}`
    #[serde(default)]
    pub cr: Option<Value>,
}

impl MonsterRecord {
    /// Creature type with tags ("humanoid (elf)").
    pub fn type_text(&self) -> Option<String> {
        match self.creature_type.as_ref()? {
            Value::String(kind) => Some(kind.clone()),
            Value::Object(obj) => {
                let kind = match obj.get("type") {
                    Some(Value::String(kind)) => kind.clone(),
                    Some(Value::Object(choice)) => choice
                        .get("choose")
                        .and_then(Value::as_array)
                        .map(|kinds| {
                            kinds
                                .iter()
                                .filter_map(Value::as_str)
                                .collect::<Vec<_>>()
                                .join(" or ")
                        })
                        .unwrap_or_default(),
                    _ => return None,
                };
                let tags: Vec<&str> = obj
                    .get("tags")
                    .and_then(Value::as_array)
                    .map(|tags| {
                        tags.iter()
                            .filter_map(|tag| {
                                tag.as_str()
                                    .or_else(|| tag.get("tag").and_then(Value::as_str))
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                if tags.is_empty() {
                    Some(kind)
                } else {
                    Some(format!("{} ({})", kind, tags.join(", ")))
                }
            }
            _ => None,
        }
    }

    /// Armor class line ("17 (natural armor)").
    pub fn ac_text(&self) -> Option<String> {
        let parts: Vec<String> = self
            .ac
            .iter()
            .filter_map(|ac| match ac {
                Value::Number(n) => Some(n.to_string()),
                Value::Object(obj) => {
                    if let Some(special) = obj.get("special").and_then(Value::as_str) {
                        return Some(special.to_string());
                    }
                    let value = obj.get("ac")?.as_u64()?;
                    let from: Vec<&str> = obj
                        .get("from")
                        .and_then(Value::as_array)
                        .map(|from| from.iter().filter_map(Value::as_str).collect())
                        .unwrap_or_default();
                    if from.is_empty() {
                        Some(value.to_string())
                    } else {
                        Some(format!("{} ({})", value, from.join(", ")))
                    }
                }
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Challenge rating text.
    pub fn cr_text(&self) -> Option<String> {
        match self.cr.as_ref()? {
            Value::String(cr) => Some(cr.clone()),
            Value::Object(obj) => obj.get("cr").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }

    /// Ability scores in STR..CHA order, when all six are present.
    pub fn ability_scores(&self) -> Option<[(&'static str, u8); 6]> {
        Some([
            ("STR", self.str?),
            ("DEX", self.dex?),
            ("CON", self.con?),
            ("INT", self.int?),
            ("WIS", self.wis?),
            ("CHA", self.cha?),
        ])
    }
}

/// Ability modifier for a score, formatted with its sign ("+2", "-1").
pub fn ability_modifier(score: u8) -> String {
    let modifier = (i32::from(score) - 10).div_euclid(2);
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}
