//! Trigger/condition/action rules. Stored and round-tripped only; nothing in
//! the crate evaluates them yet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleTrigger {
    NewTab,
    Unlock,
    TimeWindow,
    PostBusyBlock,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    ShowMode,
    PinItem,
    StartTimer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ConditionValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub trigger: RuleTrigger,
    #[serde(default)]
    pub conditions: BTreeMap<String, ConditionValue>,
    pub action: RuleAction,
}
