//! The set of incidents the user has picked in the table or on the map.
//!
//! A [`Selection`] is an immutable value. Toggling returns a new selection
//! and leaves the original untouched, so a [`FilterSpec`](crate::FilterSpec)
//! that was handed out earlier never changes underneath its holder.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Selected incident ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates the selected ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Returns a new selection with `id` added or removed.
    #[must_use]
    pub fn toggled(&self, id: &str) -> Self {
        let mut ids = self.ids.clone();
        if !ids.remove(id) {
            ids.insert(id.to_string());
        }
        Self { ids }
    }

    /// Returns a new selection with a whole group of ids toggled together.
    ///
    /// If every id in the group is already selected they are all removed;
    /// otherwise they are all added.
    #[must_use]
    pub fn toggled_all<'a, I>(&self, group: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let group: Vec<&str> = group.into_iter().collect();
        let all_selected = group.iter().all(|id| self.ids.contains(*id));
        let mut ids = self.ids.clone();
        for id in group {
            if all_selected {
                ids.remove(id);
            } else {
                ids.insert(id.to_string());
            }
        }
        Self { ids }
    }
}

impl FromIterator<String> for Selection {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
