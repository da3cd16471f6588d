//! Short rules entries: conditions, skills, actions, rewards and variant rules.

use lorelink_domain::{
    ActionRecord, ConditionRecord, RewardRecord, SkillRecord, VariantRuleRecord,
};

use super::{ability_name, StatBlock};

pub(super) fn render_condition(condition: &ConditionRecord) -> String {
    StatBlock::new("condition", &condition.meta.name)
        .subtitle("Condition")
        .entries(&condition.meta.entries)
        .finish(&condition.meta)
}

pub(super) fn render_skill(skill: &SkillRecord) -> String {
    let ability = skill.ability.as_deref().map(ability_name);

    StatBlock::new("skill", &skill.meta.name)
        .subtitle(match ability {
            Some(ability) => format!("Skill ({})", ability),
            None => "Skill".to_string(),
        })
        .entries(&skill.meta.entries)
        .finish(&skill.meta)
}

pub(super) fn render_action(action: &ActionRecord) -> String {
    StatBlock::new("action", &action.meta.name)
        .subtitle("Action")
        .field_opt("Time", action.time_summary())
        .entries(&action.meta.entries)
        .finish(&action.meta)
}

pub(super) fn render_reward(reward: &RewardRecord) -> String {
    StatBlock::new("reward", &reward.meta.name)
        .subtitle(reward.reward_type.as_deref().unwrap_or("Reward"))
        .entries(&reward.meta.entries)
        .finish(&reward.meta)
}

pub(super) fn render_variant_rule(rule: &VariantRuleRecord) -> String {
    StatBlock::new("variant-rule", &rule.meta.name)
        .subtitle(rule.rule_type_name())
        .entries(&rule.meta.entries)
        .finish(&rule.meta)
}
