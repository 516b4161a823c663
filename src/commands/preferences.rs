use anyhow::{bail, Result};

use crate::{
    commands::widget::refresh_widget,
    log_info,
    models::{Mode, Ordering, Preference},
    AppState,
};

const ENABLE_LOGS: bool = true;

pub fn get_preferences(state: &AppState) -> Result<Preference> {
    Ok(state.store.snapshot()?.preferences)
}

/// Apply `change` to a copy of the preferences and persist the whole object.
fn update_preferences<F>(state: &AppState, change: F) -> Result<Preference>
where
    F: FnOnce(&mut Preference) -> Result<()>,
{
    let updated = state.store.update(|snapshot| {
        let mut preferences = snapshot.preferences.clone();
        change(&mut preferences)?;
        snapshot.update_preferences(preferences.clone());
        Ok(preferences)
    })?;

    refresh_widget(state);
    Ok(updated)
}

pub fn set_caps(
    state: &AppState,
    do_max: Option<i64>,
    decide_max: Option<i64>,
    drift_max: Option<i64>,
) -> Result<Preference> {
    if do_max.is_none() && decide_max.is_none() && drift_max.is_none() {
        bail!("No caps to update");
    }

    update_preferences(state, |pref| {
        for (mode, cap) in [
            (Mode::Do, do_max),
            (Mode::Decide, decide_max),
            (Mode::Drift, drift_max),
        ] {
            if let Some(cap) = cap {
                pref.caps.set(mode, cap);
                log_info!("Cap for {mode} set to {cap}");
            }
        }
        Ok(())
    })
}

pub fn set_ordering(state: &AppState, ordering: Ordering) -> Result<Preference> {
    update_preferences(state, |pref| {
        pref.ordering = ordering;
        Ok(())
    })
}

pub fn set_widget_modes(
    state: &AppState,
    small: Option<Mode>,
    medium: Option<Vec<Mode>>,
) -> Result<Preference> {
    update_preferences(state, |pref| {
        if let Some(mode) = small {
            pref.widget_config.small_widget_mode = mode;
        }
        if let Some(mut modes) = medium {
            let mut seen = Vec::with_capacity(modes.len());
            modes.retain(|mode| {
                let fresh = !seen.contains(mode);
                seen.push(*mode);
                fresh
            });
            pref.widget_config.medium_widget_modes = modes;
        }
        Ok(())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlocklistKind {
    Tag,
    Keyword,
}

impl BlocklistKind {
    fn list<'a>(&self, pref: &'a mut Preference) -> &'a mut Vec<String> {
        match self {
            BlocklistKind::Tag => &mut pref.blocklists.tags,
            BlocklistKind::Keyword => &mut pref.blocklists.keywords,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BlocklistKind::Tag => "tag",
            BlocklistKind::Keyword => "keyword",
        }
    }
}

/// Add an entry to a blocklist. Blank entries are rejected since an empty
/// keyword would hide every item.
pub fn block(state: &AppState, kind: BlocklistKind, entry: &str) -> Result<Preference> {
    let entry = entry.trim();
    if entry.is_empty() {
        bail!("Blocked {} must not be empty", kind.label());
    }

    update_preferences(state, |pref| {
        let list = kind.list(pref);
        if list.iter().any(|existing| existing == entry) {
            bail!("{} '{entry}' is already blocked", kind.label());
        }
        list.push(entry.to_string());
        log_info!("Blocked {} '{entry}'", kind.label());
        Ok(())
    })
}

pub fn unblock(state: &AppState, kind: BlocklistKind, entry: &str) -> Result<Preference> {
    let entry = entry.trim();
    update_preferences(state, |pref| {
        let list = kind.list(pref);
        let before = list.len();
        list.retain(|existing| existing != entry);
        if list.len() == before {
            bail!("{} '{entry}' is not blocked", kind.label());
        }
        log_info!("Unblocked {} '{entry}'", kind.label());
        Ok(())
    })
}
