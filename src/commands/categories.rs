use anyhow::{bail, Result};

use crate::{commands::widget::refresh_widget, log_info, AppState};

const ENABLE_LOGS: bool = true;

pub fn list_categories(state: &AppState) -> Result<Vec<String>> {
    Ok(state.store.snapshot()?.categories)
}

/// Adding a category that already exists leaves the list unchanged.
pub fn add_category(state: &AppState, name: &str) -> Result<Vec<String>> {
    state.store.update(|snapshot| {
        if snapshot.add_category(name)? {
            log_info!("Added category '{}'", name.trim());
        }
        Ok(snapshot.categories.clone())
    })
}

/// Remove a category; items that used it keep everything else but lose the category.
pub fn delete_category(state: &AppState, name: &str) -> Result<usize> {
    let cleared = state.store.update(|snapshot| {
        if !snapshot.categories.iter().any(|existing| existing == name)
            && !snapshot
                .items
                .iter()
                .any(|item| item.category.as_deref() == Some(name))
        {
            bail!("Category '{name}' not found");
        }
        Ok(snapshot.delete_category(name))
    })?;

    log_info!("Deleted category '{name}', cleared from {cleared} item(s)");
    if cleared > 0 {
        refresh_widget(state);
    }
    Ok(cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::items::{create_item, ItemInput};
    use crate::commands::test_support::memory_state;
    use crate::models::{DurationBucket, Mode};

    #[test]
    fn delete_category_clears_items() {
        let (state, _dir) = memory_state();
        let item = create_item(
            &state,
            ItemInput {
                mode: Mode::Do,
                title: "Update CV".into(),
                start_step: String::new(),
                duration_bucket: DurationBucket::TwentyFiveMinutes,
                category: Some("career".into()),
                tags: String::new(),
                friction_score: 2.0,
            },
        )
        .unwrap();

        assert_eq!(list_categories(&state).unwrap(), vec!["career"]);
        assert_eq!(delete_category(&state, "career").unwrap(), 1);

        let snapshot = state.store.snapshot().unwrap();
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.item(&item.id).unwrap().category, None);
        assert!(delete_category(&state, "career").is_err());
    }

    #[test]
    fn add_category_ignores_duplicates_and_rejects_blank() {
        let (state, _dir) = memory_state();
        add_category(&state, "health").unwrap();
        assert_eq!(add_category(&state, " health ").unwrap(), vec!["health"]);
        assert!(add_category(&state, "  ").is_err());
    }
}
