//! Moving data in and out of the app as JSON files.
//!
//! A full export is the snapshot itself and a full import replaces it. The
//! items-only form is `{"items": [...]}`; importing it swaps the item list and
//! keeps everything else.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::{
    commands::widget::refresh_widget,
    log_info,
    models::{validation, MenuItem},
    snapshot::Snapshot,
    AppState,
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferScope {
    Snapshot,
    Items,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub items: usize,
    pub sessions: usize,
    pub replaced_snapshot: bool,
}

#[derive(Serialize)]
struct ItemsExport<'a> {
    items: &'a [MenuItem],
}

pub fn export_snapshot(state: &AppState, scope: TransferScope) -> Result<String> {
    let snapshot = state.store.snapshot()?;
    let serialized = match scope {
        TransferScope::Snapshot => serde_json::to_string_pretty(&snapshot)?,
        TransferScope::Items => serde_json::to_string_pretty(&ItemsExport {
            items: &snapshot.items,
        })?,
    };
    Ok(serialized)
}

pub fn export_to_file(state: &AppState, scope: TransferScope, path: &Path) -> Result<()> {
    let serialized = export_snapshot(state, scope)?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    log_info!("Exported {scope:?} to {}", path.display());
    Ok(())
}

pub fn import_from_file(
    state: &AppState,
    path: &Path,
    scope: TransferScope,
) -> Result<ImportSummary> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read import file {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let summary = match scope {
        TransferScope::Snapshot => {
            let snapshot = parse_snapshot(value)?;
            let summary = ImportSummary {
                items: snapshot.items.len(),
                sessions: snapshot.sessions.len(),
                replaced_snapshot: true,
            };
            state.store.replace(snapshot)?;
            summary
        }
        TransferScope::Items => {
            let items = parse_items(value)?;
            let count = items.len();
            let sessions = state.store.update(move |snapshot| {
                for category in items
                    .iter()
                    .filter_map(|item| item.category.as_deref())
                    .filter(|category| !category.trim().is_empty())
                {
                    snapshot.add_category(category)?;
                }
                snapshot.items = items;
                Ok(snapshot.sessions.len())
            })?;
            ImportSummary {
                items: count,
                sessions,
                replaced_snapshot: false,
            }
        }
    };

    log_info!(
        "Imported {} item(s) from {} ({scope:?})",
        summary.items,
        path.display()
    );
    refresh_widget(state);
    Ok(summary)
}

fn require_items_array(value: &Value) -> Result<()> {
    match value.get("items") {
        Some(Value::Array(_)) => Ok(()),
        _ => bail!("Invalid import: items must be an array"),
    }
}

fn parse_snapshot(value: Value) -> Result<Snapshot> {
    require_items_array(&value)?;
    let snapshot: Snapshot =
        serde_json::from_value(value).context("Invalid import: not a quickstart snapshot")?;
    validation::validate_items(&snapshot.items)?;
    Ok(snapshot)
}

fn parse_items(mut value: Value) -> Result<Vec<MenuItem>> {
    require_items_array(&value)?;
    for key in ["preferences", "sessions", "rules"] {
        if value.get(key).is_some_and(|field| !field.is_null()) {
            bail!("Invalid import: only items allowed, found {key}");
        }
    }

    let raw = value.get_mut("items").map(Value::take).unwrap_or_default();
    let items: Vec<MenuItem> =
        serde_json::from_value(raw).context("Invalid import: malformed items")?;
    validation::validate_items(&items)?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sessions::start_item;
    use crate::commands::test_support::{memory_state, seed};
    use crate::models::{Device, DurationBucket, Mode, Ordering};

    #[test]
    fn full_export_restores_into_another_store() {
        let (source, dir) = memory_state();
        let item = seed(&source, Mode::Do, "Plan", DurationBucket::TwoMinutes);
        start_item(&source, &item.id, Device::Cli).unwrap();
        source
            .store
            .update(|snapshot| {
                snapshot.preferences.ordering = Ordering::Recent;
                Ok(())
            })
            .unwrap();

        let path = dir.path().join("quickstart-export.json");
        export_to_file(&source, TransferScope::Snapshot, &path).unwrap();

        let (target, _target_dir) = memory_state();
        let summary = import_from_file(&target, &path, TransferScope::Snapshot).unwrap();

        assert_eq!(summary.items, 1);
        assert_eq!(summary.sessions, 1);
        assert!(summary.replaced_snapshot);
        assert_eq!(target.store.snapshot().unwrap(), source.store.snapshot().unwrap());
    }

    #[test]
    fn items_export_contains_only_items() {
        let (state, _dir) = memory_state();
        seed(&state, Mode::Drift, "Walk", DurationBucket::TenMinutes);

        let exported = export_snapshot(&state, TransferScope::Items).unwrap();
        let value: Value = serde_json::from_str(&exported).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(value["items"][0]["title"], "Walk");
    }

    #[test]
    fn items_import_keeps_everything_else() {
        let (state, dir) = memory_state();
        let old = seed(&state, Mode::Do, "Old", DurationBucket::TwoMinutes);
        start_item(&state, &old.id, Device::Cli).unwrap();

        let incoming = MenuItem::new(
            Mode::Decide,
            "Pick",
            "",
            DurationBucket::TwoMinutes,
            chrono::Utc::now(),
        )
        .with_category("career");
        let path = dir.path().join("items.json");
        fs::write(&path, serde_json::json!({ "items": [incoming] }).to_string()).unwrap();

        let summary = import_from_file(&state, &path, TransferScope::Items).unwrap();
        assert_eq!(summary.items, 1);
        assert!(!summary.replaced_snapshot);

        let snapshot = state.store.snapshot().unwrap();
        assert_eq!(snapshot.items, vec![incoming]);
        assert_eq!(snapshot.sessions.len(), 1);
        assert_eq!(snapshot.categories, vec!["career"]);
    }

    #[test]
    fn items_import_rejects_other_sections() {
        let (state, dir) = memory_state();
        let before = state.store.snapshot().unwrap();

        let cases = [
            serde_json::json!({ "items": {} }),
            serde_json::json!({ "other": [] }),
            serde_json::json!({ "items": [], "preferences": {} }),
            serde_json::json!({ "items": [], "sessions": [] }),
            serde_json::json!({ "items": [], "rules": [] }),
        ];
        for (index, case) in cases.iter().enumerate() {
            let path = dir.path().join(format!("bad-{index}.json"));
            fs::write(&path, case.to_string()).unwrap();
            assert!(import_from_file(&state, &path, TransferScope::Items).is_err());
        }

        assert_eq!(state.store.snapshot().unwrap(), before);
    }

    #[test]
    fn snapshot_import_rejects_invalid_items() {
        let (state, dir) = memory_state();
        let item = MenuItem::new(
            Mode::Do,
            "Twice",
            "",
            DurationBucket::TwoMinutes,
            chrono::Utc::now(),
        );
        let mut snapshot = Snapshot::empty();
        snapshot.items = vec![item.clone(), item];

        let path = dir.path().join("dupes.json");
        fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        assert!(import_from_file(&state, &path, TransferScope::Snapshot).is_err());
        assert!(state.store.snapshot().unwrap().items.is_empty());
    }

    #[test]
    fn unreadable_import_file_is_an_error() {
        let (state, dir) = memory_state();
        let path = dir.path().join("garbage.json");
        fs::write(&path, "not json").unwrap();

        assert!(import_from_file(&state, &path, TransferScope::Snapshot).is_err());
        assert!(import_from_file(&state, &dir.path().join("missing.json"), TransferScope::Items)
            .is_err());
    }
}
