//! Filter predicates for menu selection.
//!
//! Each predicate is pure; `apply_filters` runs them in their fixed order and
//! reports how many items each stage removed.

use std::collections::HashSet;

use crate::models::{Blocklists, MenuItem, Mode};

/// How many items each filter stage removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterStats {
    pub other_mode: usize,
    pub disabled: usize,
    pub blocked_by_tag: usize,
    pub blocked_by_keyword: usize,
}

/// Blocklists prepared once per selection: tags as a set, keywords lowercased.
pub struct PreparedBlocklists<'a> {
    tags: HashSet<&'a str>,
    keywords: Vec<String>,
}

impl<'a> PreparedBlocklists<'a> {
    pub fn new(blocklists: &'a Blocklists) -> Self {
        Self {
            tags: blocklists.tags.iter().map(String::as_str).collect(),
            keywords: blocklists
                .keywords
                .iter()
                .map(|keyword| keyword.to_lowercase())
                .collect(),
        }
    }

    pub fn passes_tags(&self, item: &MenuItem) -> bool {
        self.tags.is_empty() || !item.tags.iter().any(|tag| self.tags.contains(tag.as_str()))
    }

    /// Case-insensitive substring match against `"<title> <startStep>"`.
    /// An empty keyword entry matches every item.
    pub fn passes_keywords(&self, item: &MenuItem) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let text = item.search_text();
        !self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }
}

pub fn passes_mode(item: &MenuItem, mode: Mode) -> bool {
    item.mode == mode
}

pub fn is_enabled(item: &MenuItem) -> bool {
    item.enabled
}

pub fn apply_filters<'a>(
    items: &'a [MenuItem],
    mode: Mode,
    blocklists: &Blocklists,
) -> (Vec<&'a MenuItem>, FilterStats) {
    let prepared = PreparedBlocklists::new(blocklists);
    let mut stats = FilterStats::default();

    let kept = items
        .iter()
        .filter(|item| {
            if !passes_mode(item, mode) {
                stats.other_mode += 1;
                return false;
            }
            if !is_enabled(item) {
                stats.disabled += 1;
                return false;
            }
            if !prepared.passes_tags(item) {
                stats.blocked_by_tag += 1;
                return false;
            }
            if !prepared.passes_keywords(item) {
                stats.blocked_by_keyword += 1;
                return false;
            }
            true
        })
        .collect();

    (kept, stats)
}
