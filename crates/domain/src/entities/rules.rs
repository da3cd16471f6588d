//! Rules-glossary records: skills, actions, conditions, variant rules, rewards.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::RecordMeta;

/// A skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Governing ability ("dex")
    #[serde(default)]
    pub ability: Option<String>,
}

/// A combat or general action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// `{"number": 1, "unit": "action"}` objects or free-text strings
    #[serde(default)]
    pub time: Vec<Value>,
}

impl ActionRecord {
    /// Readable time cost ("1 action", "Varies").
    pub fn time_summary(&self) -> Option<String> {
        let parts: Vec<String> = self
            .time
            .iter()
            .filter_map(|time| match time {
                Value::String(text) => Some(text.clone()),
                Value::Object(obj) => {
                    let unit = obj.get("unit").and_then(Value::as_str)?;
                    let number = obj.get("number").and_then(Value::as_u64).unwrap_or(1);
                    let unit = if unit == "bonus" { "bonus action" } else { unit };
                    Some(format!("{} {}", number, unit))
                }
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" or "))
        }
    }
}

/// A condition, disease or status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
}

/// A variant or optional rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRuleRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// "O" optional, "V" variant, "VO" variant optional
    #[serde(default)]
    pub rule_type: Option<String>,
}

impl VariantRuleRecord {
    pub fn rule_type_name(&self) -> &str {
        match self.rule_type.as_deref() {
            Some("O") => "Optional Rule",
            Some("V") => "Variant Rule",
            Some("VO") => "Variant Optional Rule",
            Some("VV") => "Variant Variant Rule",
            _ => "Rule",
        }
    }
}

/// A supernatural gift: blessing, charm, boon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(rename = "type", default)]
    pub reward_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_time_summary() {
        let action: ActionRecord = serde_json::from_value(json!({
            "name": "Dash",
            "time": [{"number": 1, "unit": "action"}, {"number": 1, "unit": "bonus"}]
        }))
        .expect("dash parses");
        assert_eq!(action.time_summary().as_deref(), Some("1 action or 1 bonus action"));

        let untimed: ActionRecord =
            serde_json::from_value(json!({"name": "Use an Object"})).expect("parses");
        assert_eq!(untimed.time_summary(), None);
    }

    #[test]
    fn skill_ability() {
        let skill: SkillRecord =
            serde_json::from_value(json!({"name": "Acrobatics", "ability": "dex"})).expect("parses");
        assert_eq!(skill.ability.as_deref(), Some("dex"));
    }

    #[test]
    fn variant_rule_type_names() {
        let rule: VariantRuleRecord =
            serde_json::from_value(json!({"name": "Encumbrance", "ruleType": "V"})).expect("parses");
        assert_eq!(rule.rule_type_name(), "Variant Rule");

        let untyped: VariantRuleRecord =
            serde_json::from_value(json!({"name": "Flanking"})).expect("parses");
        assert_eq!(untyped.rule_type_name(), "Rule");
    }

    #[test]
    fn reward_type() {
        let reward: RewardRecord = serde_json::from_value(json!({
            "name": "Blessing of Health",
            "source": "DMG",
            "type": "Blessing"
        }))
        .expect("parses");
        assert_eq!(reward.reward_type.as_deref(), Some("Blessing"));
        assert_eq!(reward.meta.source, "DMG");
    }
}
