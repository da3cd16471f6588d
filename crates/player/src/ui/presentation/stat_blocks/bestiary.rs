//! Traps, vehicles, objects and monsters.

use lorelink_domain::{
    ability_modifier, size_name, HitPoints, MonsterRecord, ObjectRecord, TrapRecord,
    VehicleRecord,
};
use serde_json::Value;

use super::{capitalize, StatBlock};

pub(super) fn render_trap(trap: &TrapRecord) -> String {
    StatBlock::new("trap", &trap.meta.name)
        .subtitle(trap.type_name())
        .entries(&trap.meta.entries)
        .finish(&trap.meta)
}

pub(super) fn render_vehicle(vehicle: &VehicleRecord) -> String {
    let kind = vehicle_type_name(vehicle.vehicle_type.as_deref());
    let subtitle = match vehicle.size.as_deref() {
        Some(size) => format!("{} {}", size_name(size), kind.to_lowercase()),
        None => kind.to_string(),
    };
    let hull = vehicle.hull.as_ref();

    StatBlock::new("vehicle", &vehicle.meta.name)
        .subtitle(capitalize(&subtitle))
        .field_opt("Creature Capacity", capacity(vehicle.cap_crew, vehicle.cap_passenger))
        .field_opt("Armor Class", hull.and_then(|h| h.ac).map(|ac| ac.to_string()))
        .field_opt("Hit Points", hull.and_then(|h| h.hp).map(|hp| hp.to_string()))
        .field_opt("Speed", vehicle.speed.as_ref().map(|s| s.summary()))
        .entries(&vehicle.meta.entries)
        .finish(&vehicle.meta)
}

pub(super) fn render_object(object: &ObjectRecord) -> String {
    let size = object
        .size
        .iter()
        .map(|code| size_name(code))
        .collect::<Vec<_>>()
        .join(" or ");
    let kind = match object.object_type.as_deref() {
        Some("SW") => "siege weapon",
        _ => "object",
    };

    StatBlock::new("object", &object.meta.name)
        .subtitle(capitalize(format!("{} {}", size, kind).trim()))
        .field_opt("Armor Class", object.ac.as_ref().and_then(value_text))
        .field_opt("Hit Points", object.hp.as_ref().and_then(value_text))
        .field_opt("Speed", object.speed.as_ref().map(|s| s.summary()))
        .entries(&object.meta.entries)
        .finish(&object.meta)
}

pub(super) fn render_monster(monster: &MonsterRecord) -> String {
    let size = monster
        .size
        .iter()
        .map(|code| size_name(code))
        .collect::<Vec<_>>()
        .join(" or ");
    let subtitle = match monster.type_text() {
        Some(kind) => format!("{} {}", size, kind),
        None => size,
    };

    let mut block = StatBlock::new("monster", &monster.meta.name)
        .subtitle(subtitle.trim().to_string())
        .field_opt("Armor Class", monster.ac_text())
        .field_opt("Hit Points", monster.hp.as_ref().and_then(HitPoints::summary))
        .field_opt("Speed", monster.speed.as_ref().map(|s| s.summary()));

    if let Some(scores) = monster.ability_scores() {
        block = block.section(ability_table(&scores));
    }

    block
        .field_opt("Challenge", monster.cr_text())
        .entries(&monster.meta.entries)
        .finish(&monster.meta)
}

fn ability_table(scores: &[(&str, u8); 6]) -> String {
    let header: String = scores
        .iter()
        .map(|(ability, _)| format!("<th>{}</th>", ability))
        .collect();
    let values: String = scores
        .iter()
        .map(|(_, score)| format!("<td>{} ({})</td>", score, ability_modifier(*score)))
        .collect();
    format!(
        r#"<table class="stat-block__abilities"><tr>{}</tr><tr>{}</tr></table>"#,
        header, values
    )
}

fn vehicle_type_name(code: Option<&str>) -> &str {
    match code {
        Some("SHIP") => "Ship",
        Some("SPELLJAMMER") => "Spelljammer ship",
        Some("INFWAR") => "Infernal war machine",
        Some("CREATURE") => "Creature",
        Some("OBJECT") => "Object",
        Some(other) => other,
        None => "Vehicle",
    }
}

/// "80 crew, 20 passengers".
fn capacity(crew: Option<u32>, passengers: Option<u32>) -> Option<String> {
    let parts: Vec<String> = [(crew, "crew"), (passengers, "passengers")]
        .into_iter()
        .filter_map(|(count, label)| count.map(|n| format!("{} {}", n, label)))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Number, string or `{"special": ...}` as display text.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(text) => Some(text.clone()),
        Value::Object(obj) => obj.get("special").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
