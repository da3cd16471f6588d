//! Spell stat block.

use lorelink_domain::{CastingTime, SpellComponents, SpellDuration, SpellRange, SpellRecord};

use super::{capitalize, render_entries, EntryLimits, StatBlock};

pub(super) fn render_spell(spell: &SpellRecord) -> String {
    let mut tags = Vec::new();
    if spell.flags.ritual {
        tags.push("Ritual");
    }
    if spell.requires_concentration() {
        tags.push("Concentration");
    }

    let higher_levels = render_entries(&spell.entries_higher_level, &EntryLimits::default());
    let higher_levels = if higher_levels.is_empty() {
        higher_levels
    } else {
        format!(
            r#"<div class="stat-block__higher-levels"><strong>At Higher Levels.</strong>{}</div>"#,
            higher_levels
        )
    };

    StatBlock::new("spell", &spell.meta.name)
        .subtitle(spell_level_line(spell.level, spell.school.as_deref()))
        .field("Casting Time", casting_time(&spell.time))
        .field_opt("Range", spell.range.as_ref().map(range))
        .field_opt("Components", spell.components.as_ref().map(components))
        .field("Duration", duration(&spell.duration))
        .field("Tags", tags.join(", "))
        .entries(&spell.meta.entries)
        .section(higher_levels)
        .finish(&spell.meta)
}

/// "Cantrip (evocation)" for level 0, "3rd-level evocation" otherwise.
pub fn spell_level_line(level: u8, school: Option<&str>) -> String {
    let school = school.map(school_name).map(str::to_ascii_lowercase);
    match (level, school) {
        (0, Some(school)) => format!("Cantrip ({})", school),
        (0, None) => "Cantrip".to_string(),
        (level, Some(school)) => format!("{}-level {}", ordinal(level.into()), school),
        (level, None) => format!("{}-level", ordinal(level.into())),
    }
}

/// 1st, 2nd, 3rd, 4th, ..., 11th, 12th, 13th, 21st.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn school_name(code: &str) -> &str {
    match code {
        "A" => "Abjuration",
        "C" => "Conjuration",
        "D" => "Divination",
        "E" => "Enchantment",
        "V" => "Evocation",
        "I" => "Illusion",
        "N" => "Necromancy",
        "T" => "Transmutation",
        "P" => "Psionic",
        other => other,
    }
}

fn casting_time(times: &[CastingTime]) -> String {
    times
        .iter()
        .map(|time| {
            let number = time.number.unwrap_or(1);
            let unit = match time.unit.as_str() {
                "bonus" => "bonus action",
                other => other,
            };
            let unit = if number == 1 {
                unit.to_string()
            } else {
                format!("{}s", unit)
            };
            match &time.condition {
                Some(condition) => format!("{} {}, {}", number, unit, condition),
                None => format!("{} {}", number, unit),
            }
        })
        .collect::<Vec<_>>()
        .join(" or ")
}

fn range(range: &SpellRange) -> String {
    let distance = range.distance.as_ref();
    let amount = distance.and_then(|d| d.amount);
    let distance_type = distance.map(|d| d.distance_type.as_str()).unwrap_or("");

    match range.range_type.as_str() {
        "special" => "Special".to_string(),
        "point" => match distance_type {
            "self" => "Self".to_string(),
            "touch" => "Touch".to_string(),
            "sight" => "Sight".to_string(),
            "unlimited" => "Unlimited".to_string(),
            unit => match amount {
                Some(amount) => format!("{} {}", amount, plural_unit(unit, amount)),
                None => capitalize(unit),
            },
        },
        // radius, cone, line, cube, sphere, emanation, ...
        shape => match amount {
            Some(amount) => format!(
                "Self ({}-{} {})",
                amount,
                singular_unit(distance_type),
                shape
            ),
            None => format!("Self ({})", shape),
        },
    }
}

fn plural_unit(unit: &str, amount: u32) -> String {
    match (unit, amount) {
        ("feet", 1) => "foot".to_string(),
        ("miles", 1) => "mile".to_string(),
        (unit, _) => unit.to_string(),
    }
}

fn singular_unit(unit: &str) -> &str {
    match unit {
        "feet" => "foot",
        "miles" => "mile",
        other => other,
    }
}

fn components(components: &SpellComponents) -> String {
    let mut parts = Vec::new();
    if components.v {
        parts.push("V".to_string());
    }
    if components.s {
        parts.push("S".to_string());
    }
    if let Some(material) = &components.m {
        match material.text() {
            Some(text) => parts.push(format!("M ({})", text)),
            None => parts.push("M".to_string()),
        }
    }
    if components.r {
        parts.push("R".to_string());
    }
    parts.join(", ")
}

fn duration(durations: &[SpellDuration]) -> String {
    durations
        .iter()
        .map(|d| match d.duration_type.as_str() {
            "instant" => "Instantaneous".to_string(),
            "timed" => {
                let amount = d
                    .duration
                    .as_ref()
                    .map(|a| {
                        let n = a.amount.unwrap_or(1);
                        let unit = if n == 1 {
                            a.unit.clone()
                        } else {
                            format!("{}s", a.unit)
                        };
                        let up_to = if a.up_to && !d.concentration { "up to " } else { "" };
                        format!("{}{} {}", up_to, n, unit)
                    })
                    .unwrap_or_default();
                if d.concentration {
                    format!("Concentration, up to {}", amount)
                } else {
                    amount
                }
            }
            "permanent" => {
                if d.ends.iter().any(|e| e == "dispel") {
                    if d.ends.iter().any(|e| e == "trigger") {
                        "Until dispelled or triggered".to_string()
                    } else {
                        "Until dispelled".to_string()
                    }
                } else {
                    "Permanent".to_string()
                }
            }
            "special" => "Special".to_string(),
            other => capitalize(other),
        })
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spell(raw: serde_json::Value) -> SpellRecord {
        serde_json::from_value(raw).expect("spell")
    }

    #[test]
    fn level_lines() {
        assert_eq!(spell_level_line(0, Some("V")), "Cantrip (evocation)");
        assert_eq!(spell_level_line(0, None), "Cantrip");
        assert_eq!(spell_level_line(3, Some("V")), "3rd-level evocation");
        assert_eq!(spell_level_line(1, Some("E")), "1st-level enchantment");
        assert_eq!(spell_level_line(2, None), "2nd-level");
        assert_eq!(spell_level_line(9, Some("C")), "9th-level conjuration");
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn renders_fireball() {
        let html = render_spell(&spell(json!({
            "name": "Fireball", "source": "PHB", "page": 241, "level": 3, "school": "V",
            "time": [{"number": 1, "unit": "action"}],
            "range": {"type": "point", "distance": {"type": "feet", "amount": 150}},
            "components": {"v": true, "s": true, "m": "a tiny ball of bat guano and sulfur"},
            "duration": [{"type": "instant"}],
            "entries": ["A bright streak flashes from your pointing finger."],
            "entriesHigherLevel": [{"type": "entries", "name": "At Higher Levels",
                "entries": ["The damage increases by {@scaledamage 8d6|3-9|1d6}."]}]
        })));

        assert!(html.contains("3rd-level evocation"));
        assert!(html.contains("<strong>Casting Time:</strong> 1 action"));
        assert!(html.contains("<strong>Range:</strong> 150 feet"));
        assert!(html.contains("V, S, M (a tiny ball of bat guano and sulfur)"));
        assert!(html.contains("<strong>Duration:</strong> Instantaneous"));
        assert!(html.contains("stat-block__higher-levels"));
        assert!(!html.contains("Tags:"));
        assert!(html.contains("PHB, p. 241"));
    }

    #[test]
    fn concentration_ritual_and_shapes() {
        let html = render_spell(&spell(json!({
            "name": "Detect Magic", "level": 1, "school": "D",
            "time": [{"number": 1, "unit": "action"}],
            "range": {"type": "radius", "distance": {"type": "feet", "amount": 30}},
            "components": {"v": true, "s": true},
            "duration": [{"type": "timed", "duration": {"type": "minute", "amount": 10}, "concentration": true}],
            "meta": {"ritual": true}
        })));

        assert!(html.contains("Self (30-foot radius)"));
        assert!(html.contains("Concentration, up to 10 minutes"));
        assert!(html.contains("<strong>Tags:</strong> Ritual, Concentration"));
    }

    #[test]
    fn reaction_with_trigger() {
        let html = render_spell(&spell(json!({
            "name": "Shield", "level": 1, "school": "A",
            "time": [{"number": 1, "unit": "reaction", "condition": "which you take when you are hit by an attack"}],
            "range": {"type": "point", "distance": {"type": "self"}},
            "duration": [{"type": "timed", "duration": {"type": "round", "amount": 1}}]
        })));
        assert!(html.contains("1 reaction, which you take when you are hit by an attack"));
        assert!(html.contains("<strong>Range:</strong> Self"));
        assert!(html.contains("<strong>Duration:</strong> 1 round"));
    }
}
