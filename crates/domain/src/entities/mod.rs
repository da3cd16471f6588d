//! Domain entities - rules records as loaded from reference data

mod bestiary;
mod character_options;
mod common;
mod entity;
mod entity_kind;
mod entries;
mod item;
mod rules;
mod spell;

pub use bestiary::{
    ability_modifier, HitPoints, MonsterRecord, ObjectRecord, TrapRecord, VehicleHull,
    VehicleRecord,
};
pub use character_options::{
    summarize_prerequisites, BackgroundRecord, ClassFeatureRecord, ClassRecord, FeatRecord,
    HitDie, OptionalFeatureRecord, RaceRecord,
};
pub use common::{
    size_name, AbilityBonus, AbilityChoice, RecordMeta, Speed, SpeedValue, DEFAULT_SOURCE,
};
pub use entity::Entity;
pub use entity_kind::{EntityKind, MONSTER_DEFAULT_SOURCE};
pub use entries::{Entry, EntryBlock};
pub use item::ItemRecord;
pub use rules::{ActionRecord, ConditionRecord, RewardRecord, SkillRecord, VariantRuleRecord};
pub use spell::{
    CastingTime, Distance, DurationAmount, MaterialComponent, SpellComponents, SpellDuration,
    SpellFlags, SpellRange, SpellRecord,
};
