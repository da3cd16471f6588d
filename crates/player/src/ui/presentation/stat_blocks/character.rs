//! Character-building options: races, classes, class features, feats,
//! optional features and backgrounds.

use lorelink_domain::{
    size_name, AbilityBonus, BackgroundRecord, ClassFeatureRecord, ClassRecord, FeatRecord,
    OptionalFeatureRecord, RaceRecord,
};

use super::{ability_name, capitalize, spells::ordinal, StatBlock};

pub(super) fn render_race(race: &RaceRecord) -> String {
    let size = race
        .size
        .iter()
        .map(|code| size_name(code))
        .collect::<Vec<_>>()
        .join(" or ");

    StatBlock::new("race", &race.meta.name)
        .subtitle("Race")
        .field("Size", size)
        .field_opt("Speed", race.speed.as_ref().map(|s| s.summary()))
        .field("Ability Scores", ability_bonuses(&race.ability))
        .field_opt("Darkvision", race.darkvision.map(|feet| format!("{} ft.", feet)))
        .entries(&race.meta.entries)
        .finish(&race.meta)
}

pub(super) fn render_class(class: &ClassRecord) -> String {
    let saves = class
        .proficiency
        .iter()
        .map(|ability| ability_name(ability))
        .collect::<Vec<_>>()
        .join(", ");

    StatBlock::new("class", &class.meta.name)
        .subtitle("Class")
        .field_opt("Hit Die", class.hit_die.map(|hd| format!("d{}", hd.faces)))
        .field("Saving Throws", saves)
        .field_opt(
            "Spellcasting Ability",
            class
                .spellcasting_ability
                .as_deref()
                .map(|a| ability_name(a).to_string()),
        )
        .field_opt("Subclass", class.subclass_title.clone())
        .entries(&class.meta.entries)
        .finish(&class.meta)
}

pub(super) fn render_class_feature(feature: &ClassFeatureRecord) -> String {
    let owner = match (&feature.class_name, &feature.subclass_short_name) {
        (Some(class), Some(subclass)) => format!("{} ({}) feature", class, subclass),
        (Some(class), None) => format!("{} feature", class),
        (None, _) => "Class feature".to_string(),
    };
    let subtitle = match feature.level {
        Some(level) => format!("{}, {} level", owner, ordinal(level.into())),
        None => owner,
    };

    StatBlock::new("class-feature", &feature.meta.name)
        .subtitle(subtitle)
        .entries(&feature.meta.entries)
        .finish(&feature.meta)
}

pub(super) fn render_feat(feat: &FeatRecord) -> String {
    let category = feat.category.as_deref().map(feat_category_name);

    StatBlock::new("feat", &feat.meta.name)
        .subtitle(category.unwrap_or("Feat"))
        .field("Prerequisite", feat.prerequisites().join("; "))
        .field("Ability Score Increase", ability_bonuses(&feat.ability))
        .entries(&feat.meta.entries)
        .finish(&feat.meta)
}

pub(super) fn render_optional_feature(feature: &OptionalFeatureRecord) -> String {
    StatBlock::new("optional-feature", &feature.meta.name)
        .subtitle(feature.feature_type_names().join(", "))
        .field("Prerequisite", feature.prerequisites().join("; "))
        .entries(&feature.meta.entries)
        .finish(&feature.meta)
}

pub(super) fn render_background(background: &BackgroundRecord) -> String {
    let skills = background
        .granted_skills()
        .into_iter()
        .map(capitalize_words)
        .collect::<Vec<_>>()
        .join(", ");

    StatBlock::new("background", &background.meta.name)
        .subtitle("Background")
        .field("Skill Proficiencies", skills)
        .entries(&background.meta.entries)
        .finish(&background.meta)
}

/// "Charisma +2, Intelligence +1; choose 1 of Strength, Dexterity (+1)"
fn ability_bonuses(bonuses: &[AbilityBonus]) -> String {
    bonuses
        .iter()
        .map(|bonus| {
            let mut parts: Vec<String> = bonus
                .fixed_bonuses()
                .into_iter()
                .map(|(ability, amount)| format!("{} {:+}", ability_name(ability), amount))
                .collect();
            if let Some(choice) = &bonus.choose {
                let from = choice
                    .from
                    .iter()
                    .map(|a| ability_name(a))
                    .collect::<Vec<_>>()
                    .join(", ");
                let count = choice.count.unwrap_or(1);
                let amount = choice.amount.unwrap_or(1);
                parts.push(format!("choose {} of {} ({:+})", count, from, amount));
            }
            parts.join(", ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn feat_category_name(code: &str) -> &str {
    match code {
        "G" => "General Feat",
        "O" => "Origin Feat",
        "FS" => "Fighting Style Feat",
        "EB" => "Epic Boon Feat",
        other => other,
    }
}

fn capitalize_words(text: &str) -> String {
    text.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_tiefling() {
        let race: RaceRecord = serde_json::from_value(json!({
            "name": "Tiefling", "source": "PHB", "page": 42, "size": ["M"], "speed": 30,
            "ability": [{"cha": 2, "int": 1}], "darkvision": 60
        }))
        .expect("race");
        let html = render_race(&race);

        assert!(html.contains("<strong>Size:</strong> Medium"));
        assert!(html.contains("<strong>Speed:</strong> 30 ft."));
        assert!(html.contains("Charisma +2, Intelligence +1"));
        assert!(html.contains("<strong>Darkvision:</strong> 60 ft."));
    }

    #[test]
    fn ability_choice() {
        let bonuses: Vec<AbilityBonus> = serde_json::from_value(json!([
            {"choose": {"from": ["str", "dex"], "count": 1}}
        ]))
        .expect("bonuses");
        assert_eq!(ability_bonuses(&bonuses), "choose 1 of Strength, Dexterity (+1)");
    }

    #[test]
    fn renders_fighter_and_feature() {
        let class: ClassRecord = serde_json::from_value(json!({
            "name": "Fighter", "hd": {"number": 1, "faces": 10},
            "proficiency": ["str", "con"], "subclassTitle": "Martial Archetype"
        }))
        .expect("class");
        let html = render_class(&class);
        assert!(html.contains("<strong>Hit Die:</strong> d10"));
        assert!(html.contains("<strong>Saving Throws:</strong> Strength, Constitution"));
        assert!(html.contains("<strong>Subclass:</strong> Martial Archetype"));

        let feature: ClassFeatureRecord = serde_json::from_value(json!({
            "name": "Action Surge", "className": "Fighter", "level": 2
        }))
        .expect("feature");
        assert!(render_class_feature(&feature).contains("Fighter feature, 2nd level"));
    }

    #[test]
    fn renders_feat_prerequisites() {
        let feat: FeatRecord = serde_json::from_value(json!({
            "name": "Grappler", "category": "G",
            "prerequisite": [{"ability": [{"str": 13}]}]
        }))
        .expect("feat");
        let html = render_feat(&feat);
        assert!(html.contains("General Feat"));
        assert!(html.contains("<strong>Prerequisite:</strong> STR 13"));
    }

    #[test]
    fn renders_background_skills() {
        let background: BackgroundRecord = serde_json::from_value(json!({
            "name": "Acolyte", "skillProficiencies": [{"insight": true, "religion": true}]
        }))
        .expect("background");
        assert!(render_background(&background)
            .contains("<strong>Skill Proficiencies:</strong> Insight, Religion"));
    }
}
