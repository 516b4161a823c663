use anyhow::Result;
use chrono::Utc;

use crate::{
    log_info,
    models::{Device, Session, SessionOutcome},
    AppState,
};

const ENABLE_LOGS: bool = true;

pub fn start_item(state: &AppState, item_id: &str, device: Device) -> Result<Session> {
    let session = state
        .store
        .update(|snapshot| snapshot.start_session(item_id, device, Utc::now()))?;

    log_info!("Started session {} for item {}", session.id, session.item_id);
    Ok(session)
}

pub fn finish_session(
    state: &AppState,
    session_id: &str,
    outcome: SessionOutcome,
    notes: Option<String>,
) -> Result<Session> {
    let session = state.store.update(|snapshot| {
        let mut session = snapshot.finish_session(session_id, outcome, Utc::now())?;
        if let Some(notes) = notes {
            if let Some(stored) = snapshot.sessions.iter_mut().find(|s| s.id == session.id) {
                stored.notes = Some(notes.clone());
            }
            session.notes = Some(notes);
        }
        Ok(session)
    })?;

    log_info!("Finished session {} as {}", session.id, session.outcome.as_str());
    Ok(session)
}

/// Sessions newest first, each paired with the title of its item when the
/// item still exists.
pub fn list_sessions(
    state: &AppState,
    limit: Option<usize>,
) -> Result<Vec<(Session, Option<String>)>> {
    let snapshot = state.store.snapshot()?;
    let limit = limit.unwrap_or(usize::MAX);

    Ok(snapshot
        .sessions
        .iter()
        .take(limit)
        .map(|session| {
            let title = snapshot.item(&session.item_id).map(|item| item.title.clone());
            (session.clone(), title)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{memory_state, seed};
    use crate::models::{DurationBucket, Mode};

    #[test]
    fn start_and_finish_round() {
        let (state, _dir) = memory_state();
        let item = seed(&state, Mode::Do, "Plan", DurationBucket::TwoMinutes);

        let session = start_item(&state, &item.id, Device::Cli).unwrap();
        assert!(session.is_open());

        let finished =
            finish_session(&state, &session.id, SessionOutcome::Done, Some("went well".into()))
                .unwrap();
        assert_eq!(finished.outcome, SessionOutcome::Done);
        assert_eq!(finished.notes.as_deref(), Some("went well"));

        let listed = list_sessions(&state, None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0, finished);
        assert_eq!(listed[0].1.as_deref(), Some("Plan"));
    }

    #[test]
    fn list_respects_limit_and_order() {
        let (state, _dir) = memory_state();
        let item = seed(&state, Mode::Drift, "Walk", DurationBucket::TenMinutes);
        let first = start_item(&state, &item.id, Device::Cli).unwrap();
        let second = start_item(&state, &item.id, Device::Cli).unwrap();

        let listed = list_sessions(&state, Some(1)).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0.id, second.id);
        assert_ne!(listed[0].0.id, first.id);
    }

    #[test]
    fn starting_unknown_item_fails() {
        let (state, _dir) = memory_state();
        assert!(start_item(&state, "missing", Device::Cli).is_err());
        assert!(state.store.snapshot().unwrap().sessions.is_empty());
    }
}
