/// Shared handle to a [`Row`] stored in a [`crate::NameMap`].
///
/// A row is created once per concept and lives in the map's row arena. Every
/// domain that supplied a term for the concept indexes that term to the same
/// `RowId`, so an update made through one domain (see [`crate::NameMap::set`])
/// is seen through all of them. The aliasing is the point of the type: domains
/// share rows, they never hold copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(usize);

impl RowId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the row in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The aligned per-domain terms of one concept.
///
/// Slot `i` holds the term used in domain `i`; an empty slot means the domain
/// has no term for the concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    slots: Vec<String>,
}

impl Row {
    pub(crate) fn empty(width: usize) -> Self {
        Self { slots: vec![String::new(); width] }
    }

    pub(crate) fn from_slots(slots: Vec<String>) -> Self {
        Self { slots }
    }

    /// Number of slots, equal to the number of domains.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` for a row of a map without domains.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Term of `domain`; `None` when the slot is empty or out of range.
    pub fn get(&self, domain: usize) -> Option<&str> {
        self.slots.get(domain).map(String::as_str).filter(|term| !term.is_empty())
    }

    /// Raw slot values, empty strings included.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Replaces a slot and returns the previous value.
    pub(crate) fn replace(&mut self, domain: usize, value: String) -> String {
        std::mem::replace(&mut self.slots[domain], value)
    }

    pub(crate) fn push_empty(&mut self) {
        self.slots.push(String::new());
    }
}
