use std::collections::BTreeSet;

use serde::Serialize;

/// Ids chosen for bulk actions. Independent of the current filter and page:
/// ids that scroll out of view stay selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Flips membership of a single id. Returns whether it is now selected.
    pub fn toggle_one(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    /// Bistable "select all visible": if every visible id is already selected,
    /// all of them are removed; otherwise all of them are added.
    pub fn toggle_all_visible<S: AsRef<str>>(&mut self, visible_ids: &[S]) {
        let all_selected = visible_ids.iter().all(|id| self.0.contains(id.as_ref()));
        for id in visible_ids {
            if all_selected {
                self.0.remove(id.as_ref());
            } else {
                self.0.insert(id.as_ref().to_string());
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
