//! Home-screen widget data.
//!
//! The widget shows the first menu entry for each mode. Its data is written as
//! a standalone JSON document that the widget host reads on its own schedule.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::log_info;
use crate::models::{MenuItem, Mode, Preference};
use crate::selector::select_menu_refs;

const ENABLE_LOGS: bool = true;

pub const WIDGET_SNAPSHOT_FILE: &str = "widgetSnapshot.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_do: Option<MenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_decide: Option<MenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_drift: Option<MenuItem>,
}

impl WidgetSnapshot {
    pub fn top(&self, mode: Mode) -> Option<&MenuItem> {
        match mode {
            Mode::Do => self.top_do.as_ref(),
            Mode::Decide => self.top_decide.as_ref(),
            Mode::Drift => self.top_drift.as_ref(),
        }
    }
}

fn pick_top(items: &[MenuItem], mode: Mode, preference: &Preference) -> Option<MenuItem> {
    select_menu_refs(items, mode, preference)
        .first()
        .map(|item| (*item).clone())
}

/// Top selected item per mode; a mode whose menu is empty is left out.
pub fn generate_widget_snapshot(items: &[MenuItem], preference: &Preference) -> WidgetSnapshot {
    WidgetSnapshot {
        top_do: pick_top(items, Mode::Do, preference),
        top_decide: pick_top(items, Mode::Decide, preference),
        top_drift: pick_top(items, Mode::Drift, preference),
    }
}

/// Write the widget snapshot into `dir`, creating it if needed.
pub fn publish_widget_snapshot(dir: &Path, snapshot: &WidgetSnapshot) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create widget directory {}", dir.display()))?;

    let path = dir.join(WIDGET_SNAPSHOT_FILE);
    let serialized = serde_json::to_string(snapshot)?;
    fs::write(&path, serialized)
        .with_context(|| format!("Failed to write widget snapshot to {}", path.display()))?;

    log_info!(
        "Widget snapshot published to {} (do: {}, decide: {}, drift: {})",
        path.display(),
        snapshot.top_do.is_some(),
        snapshot.top_decide.is_some(),
        snapshot.top_drift.is_some(),
    );
    Ok(())
}
