pub mod categories;
pub mod items;
pub mod menu;
pub mod preferences;
pub mod sessions;
pub mod transfer;
pub mod widget;

use anyhow::Result;

use crate::{log_warn, snapshot::Snapshot, AppState};

const ENABLE_LOGS: bool = true;

/// Throw away the stored snapshot and start again from the built-in defaults.
pub fn reset_snapshot(state: &AppState) -> Result<Snapshot> {
    let fresh = Snapshot::default();
    state.store.replace(fresh.clone())?;
    log_warn!("Snapshot reset to defaults");
    widget::refresh_widget(state);
    Ok(fresh)
}
