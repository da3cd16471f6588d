//! Stat-block formatters: resolved entities to popup HTML.
//!
//! Pure functions, one per kind, dispatched by `match` on the entity union.
//! Text values are escaped with `escape_preserving_tags`, so references in
//! rules text stay as raw tags until the popup content is mounted.

mod bestiary;
mod character;
mod entries;
mod glossary;
mod items;
mod spells;

pub use entries::{render_entries, EntryLimits};
pub use spells::{ordinal, spell_level_line};

use lorelink_domain::{Entity, Entry, RecordMeta, ResolvedReference};

use crate::ui::presentation::text::{escape_html, escape_preserving_tags};

/// Render any entity.
pub fn render_entity(entity: &Entity) -> String {
    match entity {
        Entity::Race(race) => character::render_race(race),
        Entity::Class(class) => character::render_class(class),
        Entity::ClassFeature(feature) => character::render_class_feature(feature),
        Entity::Spell(spell) => spells::render_spell(spell),
        Entity::Item(item) => items::render_item(item),
        Entity::Background(background) => character::render_background(background),
        Entity::Condition(condition) => glossary::render_condition(condition),
        Entity::Skill(skill) => glossary::render_skill(skill),
        Entity::Action(action) => glossary::render_action(action),
        Entity::Feat(feat) => character::render_feat(feat),
        Entity::OptionalFeature(feature) => character::render_optional_feature(feature),
        Entity::Reward(reward) => glossary::render_reward(reward),
        Entity::Trap(trap) => bestiary::render_trap(trap),
        Entity::Vehicle(vehicle) => bestiary::render_vehicle(vehicle),
        Entity::Object(object) => bestiary::render_object(object),
        Entity::VariantRule(rule) => glossary::render_variant_rule(rule),
        Entity::Monster(monster) => bestiary::render_monster(monster),
    }
}

/// Render a resolution, including the not-found branch.
pub fn render_resolved(resolved: &ResolvedReference) -> String {
    match resolved {
        ResolvedReference::Found(entity) => render_entity(entity),
        ResolvedReference::NotFound { name, error } => render_not_found(name, error),
    }
}

/// Name plus inline error text.
pub fn render_not_found(name: &str, error: &str) -> String {
    format!(
        r#"<div class="tooltip-content stat-block stat-block--error"><h4 class="stat-block__name">{}</h4><p class="stat-block__error">{}</p></div>"#,
        escape_html(name),
        escape_html(error)
    )
}

/// Builder for the common stat-block layout: header, metadata, entries, footer.
pub(crate) struct StatBlock {
    variant: &'static str,
    name: String,
    subtitle: Option<String>,
    fields: Vec<(&'static str, String)>,
    sections: Vec<String>,
}

impl StatBlock {
    pub(crate) fn new(variant: &'static str, name: &str) -> Self {
        Self {
            variant,
            name: name.to_string(),
            subtitle: None,
            fields: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub(crate) fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        let subtitle = subtitle.into();
        if !subtitle.is_empty() {
            self.subtitle = Some(subtitle);
        }
        self
    }

    /// A `Label: value` line; empty values are dropped.
    pub(crate) fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.fields.push((label, value));
        }
        self
    }

    pub(crate) fn field_opt(self, label: &'static str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.field(label, value),
            None => self,
        }
    }

    /// Pre-rendered HTML section.
    pub(crate) fn section(mut self, html: String) -> Self {
        if !html.is_empty() {
            self.sections.push(html);
        }
        self
    }

    pub(crate) fn entries(self, entries: &[Entry]) -> Self {
        let html = render_entries(entries, &EntryLimits::default());
        self.section(html)
    }

    pub(crate) fn finish(self, meta: &RecordMeta) -> String {
        let mut out = format!(
            r#"<div class="tooltip-content stat-block stat-block--{}"><div class="stat-block__header"><h4 class="stat-block__name">{}</h4>"#,
            self.variant,
            escape_html(&self.name)
        );
        if let Some(subtitle) = &self.subtitle {
            out.push_str(&format!(
                r#"<div class="stat-block__subtitle">{}</div>"#,
                escape_preserving_tags(subtitle)
            ));
        }
        out.push_str("</div>");

        if !self.fields.is_empty() {
            out.push_str(r#"<div class="stat-block__meta">"#);
            for (label, value) in &self.fields {
                out.push_str(&format!(
                    "<div><strong>{}:</strong> {}</div>",
                    label,
                    escape_preserving_tags(value)
                ));
            }
            out.push_str("</div>");
        }

        for section in &self.sections {
            out.push_str(section);
        }

        out.push_str(&format!(
            r#"<div class="stat-block__footer">{}</div></div>"#,
            escape_html(&source_line(meta))
        ));
        out
    }
}

/// "PHB, p. 241" or just "PHB".
fn source_line(meta: &RecordMeta) -> String {
    match meta.page {
        Some(page) => format!("{}, p. {}", meta.source, page),
        None => meta.source.clone(),
    }
}

/// Full ability name for an abbreviation ("dex" -> "Dexterity").
pub(crate) fn ability_name(abbreviation: &str) -> &str {
    match abbreviation.to_ascii_lowercase().as_str() {
        "str" => "Strength",
        "dex" => "Dexterity",
        "con" => "Constitution",
        "int" => "Intelligence",
        "wis" => "Wisdom",
        "cha" => "Charisma",
        _ => abbreviation,
    }
}

/// Uppercase the first character.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorelink_domain::EntityKind;
    use serde_json::json;

    fn entity(kind: EntityKind, raw: serde_json::Value) -> Entity {
        Entity::from_record(kind, &raw).expect("valid record")
    }

    #[test]
    fn not_found_branch_shows_name_and_error() {
        let html = render_resolved(&ResolvedReference::not_found(
            EntityKind::Spell,
            "Nonexistent <Spell>",
        ));
        assert!(html.contains("stat-block--error"));
        assert!(html.contains("Nonexistent &lt;Spell&gt;"));
        assert!(html.contains("Spell not found"));
    }

    #[test]
    fn every_kind_renders_name_and_footer() {
        for kind in EntityKind::ALL {
            let html = render_entity(&entity(
                kind,
                json!({"name": "Sample", "source": "TST", "page": 7, "level": 1}),
            ));
            assert!(html.contains(">Sample</h4>"), "{kind}");
            assert!(html.contains("TST, p. 7"), "{kind}");
        }
    }

    #[test]
    fn tags_in_text_survive_for_mounting() {
        let html = render_entity(&entity(
            EntityKind::Condition,
            json!({"name": "Blinded", "entries": ["Fails checks that rely on sight & {@condition deafened}."]}),
        ));
        assert!(html.contains("sight &amp; {@condition deafened}."));
    }

    #[test]
    fn missing_page_shows_source_only() {
        let html = render_entity(&entity(EntityKind::Skill, json!({"name": "Athletics"})));
        assert!(html.contains(r#"<div class="stat-block__footer">PHB</div>"#));
    }
}
