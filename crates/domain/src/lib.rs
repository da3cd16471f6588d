//! Lorelink domain: rules entities, reference tags and lookup value objects.
//!
//! Pure and synchronous. Loading, caching and rendering live in the engine
//! and player crates.

pub mod entities;
pub mod error;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    ability_modifier, size_name, summarize_prerequisites, AbilityBonus, AbilityChoice,
    ActionRecord, BackgroundRecord, CastingTime, ClassFeatureRecord, ClassRecord,
    ConditionRecord, Distance, DurationAmount, Entity, EntityKind, Entry, EntryBlock, FeatRecord,
    HitDie, HitPoints, ItemRecord, MaterialComponent, MonsterRecord, ObjectRecord,
    OptionalFeatureRecord, RaceRecord, RecordMeta, RewardRecord, SkillRecord, Speed, SpeedValue,
    SpellComponents, SpellDuration, SpellFlags, SpellRange, SpellRecord, TrapRecord,
    VariantRuleRecord, VehicleHull, VehicleRecord, DEFAULT_SOURCE, MONSTER_DEFAULT_SOURCE,
};

pub use error::DomainError;

pub use value_objects::{
    contains_tags, names_match, normalize_name, parse_reference_tags, split_segments, FormatTag,
    ReferenceKey, ReferenceLookup, ReferenceTag, ResolvedReference, TagType,
};
