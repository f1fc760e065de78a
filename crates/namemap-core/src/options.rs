use serde::{Deserialize, Serialize};

/// What to do when a data row repeats a term that its domain already indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateTermPolicy {
    /// The later row takes over the key; the earlier row stays reachable through
    /// its other domains only.
    #[default]
    Overwrite,
    /// Abort the load with [`crate::NameMapError::DuplicateTerm`].
    Reject,
}

/// Options for [`crate::NameMap::load_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub duplicate_terms: DuplicateTermPolicy,
}

impl LoadOptions {
    /// Options that reject duplicate terms.
    pub fn strict() -> Self {
        Self { duplicate_terms: DuplicateTermPolicy::Reject }
    }
}
