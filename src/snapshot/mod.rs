//! The persisted state bundle and the plain CRUD operations over it.
//!
//! None of these operations select or rank anything; menus are always derived
//! fresh from the current snapshot through [`crate::selector`].

pub mod store;

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    validation, Device, MenuItem, MenuItemPatch, Mode, Preference, Rule, Session, SessionOutcome,
};
use crate::selector::select_menu_items;

pub use store::{JsonFileBackend, MemoryBackend, SnapshotBackend, SnapshotStore};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub preferences: Preference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            rules: Vec::new(),
            sessions: Vec::new(),
            preferences: Preference::default(),
            categories: Vec::new(),
        }
    }

    pub fn menu(&self, mode: Mode) -> Vec<MenuItem> {
        select_menu_items(&self.items, mode, &self.preferences)
    }

    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut MenuItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| anyhow!("Menu item {id} not found"))
    }

    /// Insert a new item at the front of the list.
    pub fn add_item(&mut self, item: MenuItem) -> Result<()> {
        validation::validate_item(&item)?;
        if self.item(&item.id).is_some() {
            bail!("Menu item {} already exists", item.id);
        }
        self.items.insert(0, item);
        Ok(())
    }

    /// Apply an editor patch in place and bump `updatedAt`.
    pub fn update_item(
        &mut self,
        id: &str,
        patch: MenuItemPatch,
        now: DateTime<Utc>,
    ) -> Result<MenuItem> {
        if patch.is_empty() {
            bail!("No fields to update");
        }
        let item = self.item_mut(id)?;
        let mut updated = item.clone();
        patch.apply(&mut updated, now);
        validation::validate_item(&updated)?;
        *item = updated.clone();
        Ok(updated)
    }

    pub fn delete_item(&mut self, id: &str) -> Result<MenuItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| anyhow!("Menu item {id} not found"))?;
        Ok(self.items.remove(index))
    }

    /// Record that the user started an item. New sessions go first.
    pub fn start_session(
        &mut self,
        item_id: &str,
        device: Device,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        if self.item(item_id).is_none() {
            bail!("Menu item {item_id} not found");
        }
        let session = Session::start(item_id, device, now);
        self.sessions.insert(0, session.clone());
        Ok(session)
    }

    pub fn finish_session(
        &mut self,
        session_id: &str,
        outcome: SessionOutcome,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        let session = self
            .sessions
            .iter_mut()
            .find(|session| session.id == session_id)
            .ok_or_else(|| anyhow!("Session {session_id} not found"))?;
        if !session.is_open() {
            bail!("Session {session_id} already ended");
        }
        session.finish(outcome, now);
        Ok(session.clone())
    }

    pub fn update_preferences(&mut self, preferences: Preference) {
        self.preferences = preferences;
    }

    /// Returns `false` when the category was already present.
    pub fn add_category(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Category name must not be empty");
        }
        if self.categories.iter().any(|existing| existing == name) {
            return Ok(false);
        }
        self.categories.push(name.to_string());
        Ok(true)
    }

    /// Remove a category and clear it from every item that carried it.
    /// Returns how many items were touched.
    pub fn delete_category(&mut self, name: &str) -> usize {
        self.categories.retain(|existing| existing != name);

        let mut cleared = 0;
        for item in self
            .items
            .iter_mut()
            .filter(|item| item.category.as_deref() == Some(name))
        {
            item.category = None;
            cleared += 1;
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DurationBucket;

    fn now() -> DateTime<Utc> {
        "2026-01-27T00:00:00Z".parse().unwrap()
    }

    fn new_item(title: &str) -> MenuItem {
        MenuItem::new(Mode::Do, title, "start", DurationBucket::TwoMinutes, now())
    }

    #[test]
    fn add_item_prepends_and_rejects_duplicates() {
        let mut snapshot = Snapshot::empty();
        let first = new_item("first");
        let second = new_item("second");

        snapshot.add_item(first.clone()).unwrap();
        snapshot.add_item(second.clone()).unwrap();
        assert_eq!(snapshot.items[0].id, second.id);
        assert_eq!(snapshot.items[1].id, first.id);

        assert!(snapshot.add_item(first).is_err());
        assert_eq!(snapshot.items.len(), 2);
    }

    #[test]
    fn add_item_validates_title() {
        let mut snapshot = Snapshot::empty();
        assert!(snapshot.add_item(new_item("  ")).is_err());
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn update_item_replaces_in_place() {
        let mut snapshot = Snapshot::empty();
        let a = new_item("a");
        let b = new_item("b");
        snapshot.add_item(a.clone()).unwrap();
        snapshot.add_item(b.clone()).unwrap();

        let later = now() + chrono::Duration::hours(1);
        let patch = MenuItemPatch {
            title: Some("a2".into()),
            duration_bucket: Some(DurationBucket::TwentyFiveMinutes),
            ..Default::default()
        };
        let updated = snapshot.update_item(&a.id, patch, later).unwrap();

        assert_eq!(updated.title, "a2");
        assert_eq!(updated.updated_at, later);
        assert_eq!(snapshot.items[1], updated);
        assert_eq!(snapshot.items[0].id, b.id);
    }

    #[test]
    fn invalid_patch_leaves_item_untouched() {
        let mut snapshot = Snapshot::empty();
        let a = new_item("a");
        snapshot.add_item(a.clone()).unwrap();

        let patch = MenuItemPatch {
            friction_score: Some(-1.0),
            ..Default::default()
        };
        assert!(snapshot.update_item(&a.id, patch, now()).is_err());
        assert_eq!(snapshot.items[0], a);
    }

    #[test]
    fn update_and_delete_unknown_item_fail() {
        let mut snapshot = Snapshot::empty();
        let patch = MenuItemPatch {
            enabled: Some(false),
            ..Default::default()
        };
        assert!(snapshot.update_item("missing", patch, now()).is_err());
        assert!(snapshot.delete_item("missing").is_err());
    }

    #[test]
    fn delete_item_removes_exactly_one() {
        let mut snapshot = Snapshot::empty();
        let a = new_item("a");
        let b = new_item("b");
        snapshot.add_item(a.clone()).unwrap();
        snapshot.add_item(b.clone()).unwrap();

        let removed = snapshot.delete_item(&a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].id, b.id);
    }

    #[test]
    fn sessions_are_started_and_finished_once() {
        let mut snapshot = Snapshot::empty();
        let a = new_item("a");
        snapshot.add_item(a.clone()).unwrap();

        assert!(snapshot.start_session("missing", Device::Cli, now()).is_err());

        let first = snapshot.start_session(&a.id, Device::Cli, now()).unwrap();
        let second = snapshot.start_session(&a.id, Device::Web, now()).unwrap();
        assert_eq!(snapshot.sessions[0].id, second.id);

        let finished = snapshot
            .finish_session(&first.id, SessionOutcome::Done, now())
            .unwrap();
        assert_eq!(finished.outcome, SessionOutcome::Done);
        assert!(snapshot
            .finish_session(&first.id, SessionOutcome::Aborted, now())
            .is_err());
    }

    #[test]
    fn deleting_category_clears_it_from_items() {
        let mut snapshot = Snapshot::empty();
        snapshot.add_category("career").unwrap();
        assert!(!snapshot.add_category("career").unwrap());
        snapshot.add_item(new_item("a").with_category("career")).unwrap();
        snapshot.add_item(new_item("b").with_category("drift")).unwrap();

        assert_eq!(snapshot.delete_category("career"), 1);
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.items[1].category, None);
        assert_eq!(snapshot.items[0].category.as_deref(), Some("drift"));
    }

    #[test]
    fn reads_snapshot_without_categories() {
        let raw = r#"{"items": [], "rules": [], "sessions": [], "preferences": {}}"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert!(snapshot.categories.is_empty());

        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("categories").is_none());
    }
}
