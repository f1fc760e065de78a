use std::collections::HashMap;

use namemap_xsx::table::Column;

use crate::error::{NameMapError, Result};

/// Name to index table of the domains of a map.
///
/// Indices are assigned in declaration order starting at zero and never change.
/// At most one domain is the standard domain.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    names: Vec<String>,
    indices: HashMap<String, usize>,
    standard: Option<usize>,
}

impl DomainRegistry {
    /// Builds a registry from table header columns; the meta flag marks the
    /// standard domain.
    pub fn from_columns(columns: &[Column]) -> Result<Self> {
        let mut registry = Self::default();
        for column in columns {
            let idx = registry.add(&column.name)?;
            if column.meta {
                if let Some(first) = registry.standard {
                    return Err(NameMapError::AmbiguousStandardDomain {
                        first: registry.names[first].clone(),
                        second: column.name.clone(),
                    });
                }
                registry.standard = Some(idx);
            }
        }
        if registry.is_empty() {
            return Err(NameMapError::EmptyDomainSet);
        }
        Ok(registry)
    }

    /// Index of the domain called `name`.
    pub fn index(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Name of the domain at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of the standard domain, if one is set.
    pub fn standard(&self) -> Option<usize> {
        self.standard
    }

    /// Number of domains.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` when no domain is declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Domain names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub(crate) fn add(&mut self, name: &str) -> Result<usize> {
        if self.indices.contains_key(name) {
            return Err(NameMapError::DuplicateDomain { name: name.to_string() });
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.indices.insert(name.to_string(), idx);
        Ok(idx)
    }

    pub(crate) fn set_standard(&mut self, index: usize) {
        debug_assert!(index < self.names.len());
        self.standard = Some(index);
    }
}
