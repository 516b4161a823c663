//! Session-related data models.
//!
//! A session records that the user acted on a menu item. Sessions are not
//! consumed by menu selection.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ParseError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    Done,
    Partial,
    Aborted,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Done => "done",
            SessionOutcome::Partial => "partial",
            SessionOutcome::Aborted => "aborted",
        }
    }
}

impl FromStr for SessionOutcome {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "done" => Ok(SessionOutcome::Done),
            "partial" => Ok(SessionOutcome::Partial),
            "aborted" => Ok(SessionOutcome::Aborted),
            other => Err(ParseError::Outcome(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Web,
    Mobile,
    Cli,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Web => "web",
            Device::Mobile => "mobile",
            Device::Cli => "cli",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub item_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub device: Device,
    pub outcome: SessionOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Session {
    /// A session opened when the user starts an item: still running, counted as partial.
    pub fn start(item_id: impl Into<String>, device: Device, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            item_id: item_id.into(),
            started_at: now,
            ended_at: None,
            device,
            outcome: SessionOutcome::Partial,
            notes: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    pub fn finish(&mut self, outcome: SessionOutcome, now: DateTime<Utc>) {
        self.ended_at = Some(now);
        self.outcome = outcome;
    }
}
