use anyhow::Result;

use crate::{
    log_warn,
    widget::{generate_widget_snapshot, publish_widget_snapshot, WidgetSnapshot},
    AppState,
};

const ENABLE_LOGS: bool = true;

pub fn publish_widget(state: &AppState) -> Result<WidgetSnapshot> {
    let snapshot = state.store.snapshot()?;
    let widget = generate_widget_snapshot(&snapshot.items, &snapshot.preferences);
    publish_widget_snapshot(&state.config.widget_dir(), &widget)?;
    Ok(widget)
}

/// Republish after a change that can alter the menus. Failures are logged and
/// never fail the command that triggered them.
pub(crate) fn refresh_widget(state: &AppState) {
    if let Err(err) = publish_widget(state) {
        log_warn!("Widget update failed: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{memory_state, seed};
    use crate::models::{DurationBucket, Mode};
    use crate::widget::WIDGET_SNAPSHOT_FILE;

    #[test]
    fn item_changes_republish_the_widget() {
        let (state, _dir) = memory_state();
        let path = state.config.widget_dir().join(WIDGET_SNAPSHOT_FILE);
        assert!(!path.exists());

        crate::commands::items::create_item(
            &state,
            crate::commands::items::ItemInput {
                mode: Mode::Decide,
                title: "Pick a lane".into(),
                start_step: String::new(),
                duration_bucket: DurationBucket::TwoMinutes,
                category: None,
                tags: String::new(),
                friction_score: 1.0,
            },
        )
        .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["topDecide"]["title"], "Pick a lane");
        assert!(parsed.get("topDo").is_none());
    }

    #[test]
    fn publish_returns_what_was_written() {
        let (state, _dir) = memory_state();
        seed(&state, Mode::Drift, "Walk", DurationBucket::TenMinutes);

        let widget = publish_widget(&state).unwrap();
        assert_eq!(widget.top_drift.map(|item| item.title), Some("Walk".to_string()));
    }
}
