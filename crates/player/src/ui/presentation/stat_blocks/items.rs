//! Item stat block.

use lorelink_domain::ItemRecord;
use serde_json::Value;

use super::{capitalize, StatBlock};

pub(super) fn render_item(item: &ItemRecord) -> String {
    let damage = item.dmg1.as_ref().map(|dice| {
        let kind = item.dmg_type.as_deref().map(damage_type_name).unwrap_or("");
        let base = format!("{} {}", dice, kind).trim_end().to_string();
        match &item.dmg2 {
            Some(versatile) => format!("{} (versatile {})", base, versatile),
            None => base,
        }
    });

    let properties: Vec<&str> = item.property_codes().into_iter().map(property_name).collect();

    StatBlock::new("item", &item.meta.name)
        .subtitle(type_line(item))
        .field_opt("Armor Class", item.ac.map(|ac| ac.to_string()))
        .field_opt("Damage", damage)
        .field_opt("Range", item.range.as_ref().map(|r| format!("{} ft.", r)))
        .field("Properties", properties.join(", "))
        .field_opt("Weight", item.weight.map(format_weight))
        .field_opt("Value", item.value.map(format_value))
        .entries(&item.meta.entries)
        .finish(&item.meta)
}

/// "Weapon (martial), uncommon (requires attunement)".
fn type_line(item: &ItemRecord) -> String {
    let mut kind = if item.wondrous {
        "Wondrous item".to_string()
    } else {
        item.type_code().map(type_name).unwrap_or("Item").to_string()
    };
    if let Some(category) = &item.weapon_category {
        kind = format!("{} ({})", kind, category);
    }

    let mut parts = vec![kind];
    if let Some(rarity) = item.rarity.as_deref().filter(|_| item.is_magic()) {
        parts.push(rarity.to_string());
    }
    let mut line = parts.join(", ");

    match &item.req_attune {
        Some(Value::Bool(true)) => line.push_str(" (requires attunement)"),
        Some(Value::String(by)) => line.push_str(&format!(" (requires attunement {})", by)),
        _ => {}
    }
    capitalize(&line)
}

fn type_name(code: &str) -> &str {
    match code {
        "M" => "Melee weapon",
        "R" => "Ranged weapon",
        "A" => "Ammunition",
        "LA" => "Light armor",
        "MA" => "Medium armor",
        "HA" => "Heavy armor",
        "S" => "Shield",
        "P" => "Potion",
        "RG" => "Ring",
        "RD" => "Rod",
        "WD" => "Wand",
        "ST" => "Staff",
        "SC" => "Scroll",
        "G" => "Adventuring gear",
        "AT" => "Artisan's tools",
        "T" => "Tools",
        "INS" => "Instrument",
        "GS" => "Gaming set",
        "SCF" => "Spellcasting focus",
        "TAH" => "Tack and harness",
        "MNT" => "Mount",
        "VEH" | "SHP" | "AIR" => "Vehicle",
        "FD" => "Food and drink",
        "TG" => "Trade good",
        "$" | "$C" | "$G" | "$A" => "Treasure",
        "EXP" => "Explosive",
        other => other,
    }
}

fn damage_type_name(code: &str) -> &str {
    match code {
        "A" => "acid",
        "B" => "bludgeoning",
        "C" => "cold",
        "F" => "fire",
        "O" => "force",
        "L" => "lightning",
        "N" => "necrotic",
        "P" => "piercing",
        "I" => "poison",
        "Y" => "psychic",
        "R" => "radiant",
        "S" => "slashing",
        "T" => "thunder",
        other => other,
    }
}

fn property_name(code: &str) -> &str {
    match code {
        "A" => "ammunition",
        "AF" => "ammunition (futuristic)",
        "BF" => "burst fire",
        "F" => "finesse",
        "H" => "heavy",
        "L" => "light",
        "LD" => "loading",
        "R" => "reach",
        "RLD" => "reload",
        "S" => "special",
        "T" => "thrown",
        "2H" => "two-handed",
        "V" => "versatile",
        other => other,
    }
}

/// "3 lb.", "0.25 lb."
fn format_weight(pounds: f64) -> String {
    format!("{} lb.", trim_number(pounds))
}

/// Copper pieces in the largest whole denomination: 1500 -> "15 gp".
fn format_value(copper: f64) -> String {
    if copper.fract() == 0.0 && copper >= 100.0 && copper % 100.0 == 0.0 {
        format!("{} gp", trim_number(copper / 100.0))
    } else if copper.fract() == 0.0 && copper >= 10.0 && copper % 10.0 == 0.0 {
        format!("{} sp", trim_number(copper / 10.0))
    } else {
        format!("{} cp", trim_number(copper))
    }
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(raw: serde_json::Value) -> ItemRecord {
        serde_json::from_value(raw).expect("item")
    }

    #[test]
    fn renders_longsword() {
        let html = render_item(&item(json!({
            "name": "Longsword", "source": "PHB", "page": 149, "type": "M", "rarity": "none",
            "weight": 3, "value": 1500, "dmg1": "1d8", "dmg2": "1d10", "dmgType": "S",
            "property": ["V"], "weaponCategory": "martial", "weapon": true
        })));

        assert!(html.contains("Melee weapon (martial)"));
        assert!(!html.contains("none"));
        assert!(html.contains("1d8 slashing (versatile 1d10)"));
        assert!(html.contains("<strong>Properties:</strong> versatile"));
        assert!(html.contains("<strong>Weight:</strong> 3 lb."));
        assert!(html.contains("<strong>Value:</strong> 15 gp"));
    }

    #[test]
    fn renders_magic_item_with_attunement() {
        let html = render_item(&item(json!({
            "name": "Holy Avenger", "source": "DMG", "type": "M|XDMG", "rarity": "legendary",
            "reqAttune": "by a paladin", "entries": ["You gain a +3 bonus..."]
        })));
        assert!(html.contains("Melee weapon, legendary (requires attunement by a paladin)"));

        let bag = render_item(&item(json!({
            "name": "Bag of Holding", "source": "DMG", "rarity": "uncommon", "wondrous": true
        })));
        assert!(bag.contains("Wondrous item, uncommon"));
    }

    #[test]
    fn value_denominations() {
        assert_eq!(format_value(1500.0), "15 gp");
        assert_eq!(format_value(20.0), "2 sp");
        assert_eq!(format_value(5.0), "5 cp");
        assert_eq!(format_value(0.5), "0.5 cp");
        assert_eq!(format_weight(0.25), "0.25 lb.");
    }
}
