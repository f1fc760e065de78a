use std::collections::HashMap;

use crate::row::RowId;

/// Term to row lookup of a single domain. Keys are unique; a later insert of the
/// same key replaces the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    entries: HashMap<String, RowId>,
}

impl TermIndex {
    /// Row registered under `term`.
    pub fn get(&self, term: &str) -> Option<RowId> {
        self.entries.get(term).copied()
    }

    /// `true` if `term` is a key of this index.
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the domain has no terms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RowId)> + '_ {
        self.entries.iter().map(|(term, &row)| (term.as_str(), row))
    }

    pub(crate) fn insert(&mut self, term: String, row: RowId) -> Option<RowId> {
        self.entries.insert(term, row)
    }

    /// Removes `term` only if it still points at `row`.
    pub(crate) fn remove_if(&mut self, term: &str, row: RowId) -> bool {
        if self.entries.get(term) == Some(&row) {
            self.entries.remove(term);
            true
        } else {
            false
        }
    }
}
