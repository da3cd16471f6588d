//! Item records (magic items and mundane base items).

use serde::{Deserialize, Serialize};

use super::common::RecordMeta;

/// An item: weapon, armor, gear, or magic item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Type code ("M" melee weapon, "LA" light armor, "P" potion, ...),
    /// optionally suffixed with a source ("M|XPHB")
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    /// Weight in pounds
    #[serde(default)]
    pub weight: Option<f64>,
    /// Value in copper pieces
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub ac: Option<i64>,
    /// Primary damage die ("1d8")
    #[serde(default)]
    pub dmg1: Option<String>,
    /// Versatile damage die
    #[serde(default)]
    pub dmg2: Option<String>,
    /// Damage type code ("S", "P", "B", ...)
    #[serde(default)]
    pub dmg_type: Option<String>,
    /// Property codes ("F", "V", "2H", ...) or property objects
    #[serde(default)]
    pub property: Vec<serde_json::Value>,
    /// Range in feet ("80/320")
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub weapon_category: Option<String>,
    #[serde(default)]
    pub weapon: bool,
    #[serde(default)]
    pub armor: bool,
    /// `true` or a requirement string ("by a cleric")
    #[serde(default)]
    pub req_attune: Option<serde_json::Value>,
    #[serde(default)]
    pub wondrous: bool,
}

impl ItemRecord {
    /// The type code without its source suffix.
    pub fn type_code(&self) -> Option<&str> {
        self.item_type
            .as_deref()
            .map(|code| code.split('|').next().unwrap_or(code))
    }

    /// Property codes, ignoring source suffixes and object-form properties.
    pub fn property_codes(&self) -> Vec<&str> {
        self.property
            .iter()
            .filter_map(|p| match p {
                serde_json::Value::String(code) => code.split('|').next(),
                serde_json::Value::Object(obj) => obj
                    .get("uid")
                    .and_then(|u| u.as_str())
                    .and_then(|u| u.split('|').next()),
                _ => None,
            })
            .collect()
    }

    /// Whether the item is magical (has a rarity other than none).
    pub fn is_magic(&self) -> bool {
        matches!(self.rarity.as_deref(), Some(r) if r != "none" && r != "unknown")
    }

    /// Whether the item is a weapon, by flag or by type code.
    pub fn is_weapon(&self) -> bool {
        self.weapon || self.weapon_category.is_some() || matches!(self.type_code(), Some("M" | "R"))
    }

    /// Whether the item is armor, by flag or by type code.
    pub fn is_armor(&self) -> bool {
        self.armor || matches!(self.type_code(), Some("LA" | "MA" | "HA" | "S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_longsword() {
        let item: ItemRecord = serde_json::from_value(json!({
            "name": "Longsword",
            "source": "PHB",
            "page": 149,
            "type": "M",
            "rarity": "none",
            "weight": 3,
            "value": 1500,
            "weaponCategory": "martial",
            "property": ["V"],
            "dmg1": "1d8",
            "dmg2": "1d10",
            "dmgType": "S",
            "weapon": true
        }))
        .expect("longsword parses");

        assert_eq!(item.type_code(), Some("M"));
        assert_eq!(item.property_codes(), vec!["V"]);
        assert!(item.is_weapon());
        assert!(!item.is_armor());
        assert!(!item.is_magic());
        assert_eq!(item.value, Some(1500.0));
    }

    #[test]
    fn type_codes_drop_source_suffix() {
        let item: ItemRecord = serde_json::from_value(json!({
            "name": "Chain Mail",
            "type": "HA|XPHB",
            "ac": 16,
            "property": [{"uid": "H|XPHB", "note": "heavy"}]
        }))
        .expect("parses");

        assert_eq!(item.type_code(), Some("HA"));
        assert!(item.is_armor());
        assert_eq!(item.property_codes(), vec!["H"]);
    }

    #[test]
    fn rarity_marks_magic() {
        let item: ItemRecord = serde_json::from_value(json!({
            "name": "Bag of Holding",
            "source": "DMG",
            "rarity": "uncommon",
            "wondrous": true
        }))
        .expect("parses");
        assert!(item.is_magic());
    }
}
