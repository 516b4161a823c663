//! Per-user selection preferences.
//!
//! The whole `Preference` object is persisted at once; there is no per-field
//! versioning. Missing fields in a stored object fall back to their defaults.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ParseError;
use super::menu_item::Mode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Caps {
    pub do_max: i64,
    pub decide_max: i64,
    pub drift_max: i64,
}

impl Caps {
    /// Number of items a menu for `mode` may show. Non-positive caps yield zero.
    pub fn for_mode(&self, mode: Mode) -> usize {
        let cap = match mode {
            Mode::Do => self.do_max,
            Mode::Decide => self.decide_max,
            Mode::Drift => self.drift_max,
        };
        usize::try_from(cap).unwrap_or(0)
    }

    pub fn set(&mut self, mode: Mode, cap: i64) {
        match mode {
            Mode::Do => self.do_max = cap,
            Mode::Decide => self.decide_max = cap,
            Mode::Drift => self.drift_max = cap,
        }
    }
}

impl Default for Caps {
    fn default() -> Self {
        Self {
            do_max: 5,
            decide_max: 3,
            drift_max: 3,
        }
    }
}

/// Sort strategy applied before capping.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Shortest duration bucket first.
    Duration,
    /// Most recently updated first.
    Recent,
}

impl Ordering {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ordering::Duration => "duration",
            Ordering::Recent => "recent",
        }
    }
}

impl Default for Ordering {
    fn default() -> Self {
        Ordering::Duration
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Ordering {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "duration" => Ok(Ordering::Duration),
            "recent" => Ok(Ordering::Recent),
            other => Err(ParseError::Ordering(other.to_string())),
        }
    }
}

// Stored snapshots may carry an ordering this build does not know; those sort
// by duration instead of failing the whole load.
impl<'de> Deserialize<'de> for Ordering {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|err: ParseError| {
            warn!("{err}; falling back to duration ordering");
            Ordering::Duration
        }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub small_widget_mode: Mode,
    pub medium_widget_modes: Vec<Mode>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            small_widget_mode: Mode::Do,
            medium_widget_modes: Mode::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Blocklists {
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Preference {
    pub caps: Caps,
    pub ordering: Ordering,
    pub widget_config: WidgetConfig,
    pub blocklists: Blocklists,
}
