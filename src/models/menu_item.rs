//! Menu item data models.
//!
//! A `MenuItem` is a single startable action. Items belong to exactly one
//! `Mode` and carry a coarse `DurationBucket` used by the duration ordering.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ParseError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Do,
    Decide,
    Drift,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Do, Mode::Decide, Mode::Drift];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Do => "do",
            Mode::Decide => "decide",
            Mode::Drift => "drift",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "do" => Ok(Mode::Do),
            "decide" => Ok(Mode::Decide),
            "drift" => Ok(Mode::Drift),
            other => Err(ParseError::Mode(other.to_string())),
        }
    }
}

/// Coarse time-cost estimate. Anything outside these three values is rejected
/// when a record is deserialized, so orderings never see an unknown bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DurationBucket {
    #[serde(rename = "2m")]
    TwoMinutes,
    #[serde(rename = "10m")]
    TenMinutes,
    #[serde(rename = "25m")]
    TwentyFiveMinutes,
}

impl DurationBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::TwoMinutes => "2m",
            DurationBucket::TenMinutes => "10m",
            DurationBucket::TwentyFiveMinutes => "25m",
        }
    }

    /// Position in the duration ordering: shortest first.
    pub fn rank(&self) -> u8 {
        match self {
            DurationBucket::TwoMinutes => 0,
            DurationBucket::TenMinutes => 1,
            DurationBucket::TwentyFiveMinutes => 2,
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DurationBucket {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "2m" => Ok(DurationBucket::TwoMinutes),
            "10m" => Ok(DurationBucket::TenMinutes),
            "25m" => Ok(DurationBucket::TwentyFiveMinutes),
            other => Err(ParseError::DurationBucket(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub mode: Mode,
    pub title: String,
    pub start_step: String,
    pub duration_bucket: DurationBucket,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub friction_score: f64,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Build a fresh, enabled item with a random id and both timestamps set to `now`.
    pub fn new(
        mode: Mode,
        title: impl Into<String>,
        start_step: impl Into<String>,
        duration_bucket: DurationBucket,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            mode,
            title: title.into(),
            start_step: start_step.into(),
            duration_bucket,
            category: None,
            tags: Vec::new(),
            friction_score: 1.0,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_friction(mut self, friction_score: f64) -> Self {
        self.friction_score = friction_score;
        self
    }

    /// Text scanned by the keyword blocklist.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.start_step).to_lowercase()
    }
}

/// Partial update applied by the item editor. `None` leaves a field untouched;
/// `category: Some(None)` clears the category.
#[derive(Debug, Clone, Default)]
pub struct MenuItemPatch {
    pub mode: Option<Mode>,
    pub title: Option<String>,
    pub start_step: Option<String>,
    pub duration_bucket: Option<DurationBucket>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub friction_score: Option<f64>,
    pub enabled: Option<bool>,
}

impl MenuItemPatch {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.title.is_none()
            && self.start_step.is_none()
            && self.duration_bucket.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.friction_score.is_none()
            && self.enabled.is_none()
    }

    pub fn apply(self, item: &mut MenuItem, now: DateTime<Utc>) {
        if let Some(mode) = self.mode {
            item.mode = mode;
        }
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(step) = self.start_step {
            item.start_step = step;
        }
        if let Some(bucket) = self.duration_bucket {
            item.duration_bucket = bucket;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(tags) = self.tags {
            item.tags = tags;
        }
        if let Some(score) = self.friction_score {
            item.friction_score = score;
        }
        if let Some(enabled) = self.enabled {
            item.enabled = enabled;
        }
        item.updated_at = now;
    }
}

/// Split comma-separated editor input into tags, trimming whitespace and
/// dropping empty entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validation for editor input.
pub mod validation {
    use std::collections::HashSet;

    use super::MenuItem;
    use anyhow::{bail, Context, Result};

    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            bail!("Title must not be empty");
        }
        Ok(())
    }

    pub fn validate_friction_score(score: f64) -> Result<()> {
        if !score.is_finite() || score <= 0.0 {
            bail!("Invalid friction score {score}. Must be a positive number");
        }
        Ok(())
    }

    pub fn validate_tags(tags: &[String]) -> Result<()> {
        if tags.iter().any(|tag| tag.trim().is_empty()) {
            bail!("Tags must not be blank");
        }
        Ok(())
    }

    pub fn validate_item(item: &MenuItem) -> Result<()> {
        validate_title(&item.title)?;
        validate_friction_score(item.friction_score)?;
        validate_tags(&item.tags)?;
        Ok(())
    }

    /// Validate records that did not come through the editor, such as an
    /// imported file. Ids must also be unique.
    pub fn validate_items(items: &[MenuItem]) -> Result<()> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            validate_item(item).with_context(|| format!("Invalid menu item {}", item.id))?;
            if !seen.insert(item.id.as_str()) {
                bail!("Duplicate menu item id {}", item.id);
            }
        }
        Ok(())
    }
}
