//! Seed data used on first run and whenever a stored snapshot cannot be read.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{DurationBucket, MenuItem, Mode, Preference, Rule, RuleAction, RuleTrigger};
use crate::snapshot::Snapshot;

fn seed(
    mode: Mode,
    title: &str,
    start_step: &str,
    bucket: DurationBucket,
    category: &str,
    friction_score: f64,
    now: DateTime<Utc>,
) -> MenuItem {
    MenuItem::new(mode, title, start_step, bucket, now)
        .with_category(category)
        .with_friction(friction_score)
}

pub fn default_items(now: DateTime<Utc>) -> Vec<MenuItem> {
    use DurationBucket::*;
    use Mode::*;

    vec![
        seed(Do, "Write the next-step plan", "Open repo notes → write 3 bullets", TwoMinutes, "career", 1.0, now),
        seed(Do, "Seed tomorrow's first block", "Open calendar → reserve 60 minutes", TenMinutes, "tomorrow", 2.0, now),
        seed(Do, "Career-capital micro-rep", "Open PR stub → add 1 TODO", TwentyFiveMinutes, "career", 3.0, now),
        seed(Decide, "Pick the next constraint", "Choose time/energy/location", TwoMinutes, "career", 1.0, now),
        seed(Decide, "Pick the next deliverable", "Select the next artifact", TwoMinutes, "career", 1.0, now),
        seed(Drift, "10-minute walk", "Put on shoes → go outside", TenMinutes, "drift", 1.0, now),
        seed(Drift, "Watch one saved video", "Open watchlist → pick 1", TwentyFiveMinutes, "drift", 2.0, now),
    ]
}

pub fn default_rules() -> Vec<Rule> {
    vec![Rule {
        id: Uuid::new_v4().to_string(),
        trigger: RuleTrigger::NewTab,
        conditions: Default::default(),
        action: RuleAction::ShowMode,
    }]
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            items: default_items(Utc::now()),
            rules: default_rules(),
            sessions: Vec::new(),
            preferences: Preference::default(),
            categories: Vec::new(),
        }
    }
}
