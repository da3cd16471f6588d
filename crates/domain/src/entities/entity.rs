//! The typed entity union.
//!
//! Raw records are assigned a kind when they are loaded, so nothing
//! downstream has to guess what a record is from the fields it happens to
//! carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::bestiary::{MonsterRecord, ObjectRecord, TrapRecord, VehicleRecord};
use super::character_options::{
    BackgroundRecord, ClassFeatureRecord, ClassRecord, FeatRecord, OptionalFeatureRecord,
    RaceRecord,
};
use super::common::RecordMeta;
use super::entity_kind::EntityKind;
use super::entries::Entry;
use super::item::ItemRecord;
use super::rules::{ActionRecord, ConditionRecord, RewardRecord, SkillRecord, VariantRuleRecord};
use super::spell::SpellRecord;
use crate::DomainError;

/// A rules entity of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Entity {
    Race(RaceRecord),
    Class(ClassRecord),
    ClassFeature(ClassFeatureRecord),
    Spell(SpellRecord),
    Item(ItemRecord),
    Background(BackgroundRecord),
    Condition(ConditionRecord),
    Skill(SkillRecord),
    Action(ActionRecord),
    Feat(FeatRecord),
    OptionalFeature(OptionalFeatureRecord),
    Reward(RewardRecord),
    Trap(TrapRecord),
    Vehicle(VehicleRecord),
    Object(ObjectRecord),
    VariantRule(VariantRuleRecord),
    Monster(MonsterRecord),
}

impl Entity {
    /// Deserialize a raw record as the given kind.
    pub fn from_record(kind: EntityKind, raw: &Value) -> Result<Self, DomainError> {
        let invalid = |e: serde_json::Error| {
            let name = raw
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("<unnamed>");
            DomainError::invalid_record(kind.label(), name, e.to_string())
        };

        let entity = match kind {
            EntityKind::Race => Entity::Race(RaceRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::Class => Entity::Class(ClassRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::ClassFeature => {
                Entity::ClassFeature(ClassFeatureRecord::deserialize(raw).map_err(invalid)?)
            }
            EntityKind::Spell => Entity::Spell(SpellRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::Item => Entity::Item(ItemRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::Background => {
                Entity::Background(BackgroundRecord::deserialize(raw).map_err(invalid)?)
            }
            EntityKind::Condition => {
                Entity::Condition(ConditionRecord::deserialize(raw).map_err(invalid)?)
            }
            EntityKind::Skill => Entity::Skill(SkillRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::Action => Entity::Action(ActionRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::Feat => Entity::Feat(FeatRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::OptionalFeature => {
                Entity::OptionalFeature(OptionalFeatureRecord::deserialize(raw).map_err(invalid)?)
            }
            EntityKind::Reward => Entity::Reward(RewardRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::Trap => Entity::Trap(TrapRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::Vehicle => {
                Entity::Vehicle(VehicleRecord::deserialize(raw).map_err(invalid)?)
            }
            EntityKind::Object => Entity::Object(ObjectRecord::deserialize(raw).map_err(invalid)?),
            EntityKind::VariantRule => {
                Entity::VariantRule(VariantRuleRecord::deserialize(raw).map_err(invalid)?)
            }
            EntityKind::Monster => {
                Entity::Monster(MonsterRecord::deserialize(raw).map_err(invalid)?)
            }
        };
        Ok(entity)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Race(_) => EntityKind::Race,
            Entity::Class(_) => EntityKind::Class,
            Entity::ClassFeature(_) => EntityKind::ClassFeature,
            Entity::Spell(_) => EntityKind::Spell,
            Entity::Item(_) => EntityKind::Item,
            Entity::Background(_) => EntityKind::Background,
            Entity::Condition(_) => EntityKind::Condition,
            Entity::Skill(_) => EntityKind::Skill,
            Entity::Action(_) => EntityKind::Action,
            Entity::Feat(_) => EntityKind::Feat,
            Entity::OptionalFeature(_) => EntityKind::OptionalFeature,
            Entity::Reward(_) => EntityKind::Reward,
            Entity::Trap(_) => EntityKind::Trap,
            Entity::Vehicle(_) => EntityKind::Vehicle,
            Entity::Object(_) => EntityKind::Object,
            Entity::VariantRule(_) => EntityKind::VariantRule,
            Entity::Monster(_) => EntityKind::Monster,
        }
    }

    /// Shared identity and rules text.
    pub fn meta(&self) -> &RecordMeta {
        match self {
            Entity::Race(r) => &r.meta,
            Entity::Class(r) => &r.meta,
            Entity::ClassFeature(r) => &r.meta,
            Entity::Spell(r) => &r.meta,
            Entity::Item(r) => &r.meta,
            Entity::Background(r) => &r.meta,
            Entity::Condition(r) => &r.meta,
            Entity::Skill(r) => &r.meta,
            Entity::Action(r) => &r.meta,
            Entity::Feat(r) => &r.meta,
            Entity::OptionalFeature(r) => &r.meta,
            Entity::Reward(r) => &r.meta,
            Entity::Trap(r) => &r.meta,
            Entity::Vehicle(r) => &r.meta,
            Entity::Object(r) => &r.meta,
            Entity::VariantRule(r) => &r.meta,
            Entity::Monster(r) => &r.meta,
        }
    }

    pub fn name(&self) -> &str {
        &self.meta().name
    }

    pub fn source(&self) -> &str {
        &self.meta().source
    }

    pub fn page(&self) -> Option<u32> {
        self.meta().page
    }

    pub fn entries(&self) -> &[Entry] {
        &self.meta().entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_record_assigns_kind() {
        let raw = json!({"name": "Fireball", "source": "PHB", "level": 3, "school": "V"});
        let entity = Entity::from_record(EntityKind::Spell, &raw).expect("spell");
        assert_eq!(entity.kind(), EntityKind::Spell);
        assert_eq!(entity.name(), "Fireball");
        assert_eq!(entity.source(), "PHB");
    }

    #[test]
    fn same_record_different_kind() {
        // A record shaped like both a race and a class is whatever it was loaded as.
        let raw = json!({"name": "Dragonborn", "source": "PHB", "size": ["M"], "speed": 30});
        let race = Entity::from_record(EntityKind::Race, &raw).expect("race");
        assert_eq!(race.kind(), EntityKind::Race);

        let object = Entity::from_record(EntityKind::Object, &raw).expect("object");
        assert_eq!(object.kind(), EntityKind::Object);
    }

    #[test]
    fn invalid_record_names_kind_and_record() {
        let raw = json!({"name": "Broken", "level": "high"});
        let err = Entity::from_record(EntityKind::Spell, &raw).expect_err("bad level");
        match err {
            DomainError::InvalidRecord { kind, name, .. } => {
                assert_eq!(kind, "Spell");
                assert_eq!(name, "Broken");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_name_is_invalid() {
        let err = Entity::from_record(EntityKind::Skill, &json!({"ability": "dex"}))
            .expect_err("name required");
        assert!(err.to_string().contains("<unnamed>"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let raw = json!({"name": "Athletics", "ability": "str"});
        let entity = Entity::from_record(EntityKind::Skill, &raw).expect("skill");
        let value = serde_json::to_value(&entity).expect("serializes");
        assert_eq!(value["kind"], "skill");
        assert_eq!(value["record"]["name"], "Athletics");
    }
}
