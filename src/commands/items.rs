use anyhow::Result;
use chrono::Utc;

use crate::{
    commands::widget::refresh_widget,
    log_info,
    models::{parse_tags, DurationBucket, MenuItem, MenuItemPatch, Mode},
    AppState,
};

const ENABLE_LOGS: bool = true;

/// Editor input for a new item.
#[derive(Debug, Clone)]
pub struct ItemInput {
    pub mode: Mode,
    pub title: String,
    pub start_step: String,
    pub duration_bucket: DurationBucket,
    pub category: Option<String>,
    pub tags: String,
    pub friction_score: f64,
}

pub fn list_items(state: &AppState, mode: Option<Mode>) -> Result<Vec<MenuItem>> {
    let snapshot = state.store.snapshot()?;
    Ok(snapshot
        .items
        .into_iter()
        .filter(|item| mode.map_or(true, |mode| item.mode == mode))
        .collect())
}

pub fn create_item(state: &AppState, input: ItemInput) -> Result<MenuItem> {
    let mut item = MenuItem::new(
        input.mode,
        input.title.trim(),
        input.start_step.trim(),
        input.duration_bucket,
        Utc::now(),
    )
    .with_friction(input.friction_score);
    item.category = input
        .category
        .map(|category| category.trim().to_string())
        .filter(|category| !category.is_empty());
    item.tags = parse_tags(&input.tags);

    let created = item.clone();
    state.store.update(move |snapshot| {
        if let Some(category) = &item.category {
            snapshot.add_category(category)?;
        }
        snapshot.add_item(item)
    })?;

    log_info!("Created {} item {} ({})", created.mode, created.id, created.title);
    refresh_widget(state);
    Ok(created)
}

pub fn update_item(state: &AppState, id: &str, patch: MenuItemPatch) -> Result<MenuItem> {
    let updated = state.store.update(|snapshot| {
        if let Some(Some(category)) = &patch.category {
            snapshot.add_category(category)?;
        }
        snapshot.update_item(id, patch, Utc::now())
    })?;

    log_info!("Updated item {}", updated.id);
    refresh_widget(state);
    Ok(updated)
}

pub fn set_item_enabled(state: &AppState, id: &str, enabled: bool) -> Result<MenuItem> {
    update_item(
        state,
        id,
        MenuItemPatch {
            enabled: Some(enabled),
            ..Default::default()
        },
    )
}

pub fn delete_item(state: &AppState, id: &str) -> Result<MenuItem> {
    let removed = state.store.update(|snapshot| snapshot.delete_item(id))?;

    log_info!("Deleted item {} ({})", removed.id, removed.title);
    refresh_widget(state);
    Ok(removed)
}
