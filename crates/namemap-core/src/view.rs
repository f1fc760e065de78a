//! Pre-resolved views on a [`NameMap`].
//!
//! Call sites that map many terms between the same domains can resolve the
//! domain names once and keep a view:
//!
//! * [`MapFrom`] binds the source domain,
//! * [`MapTo`] binds an ordered list of target domains,
//! * [`MapFromTo`] binds both.
//!
//! Binding never fails. An unresolved binding is reported by `check`, or turned
//! into a panic by `verify` where a valid binding is a precondition.
//!
//! Views that bind targets report the **position in the bound target list**
//! rather than a domain index.

use crate::error::{NameMapError, Result};
use crate::name_map::NameMap;

impl NameMap {
    /// Binds the source domain `name`. If it is unknown and `fallback` is set the
    /// standard domain is bound instead.
    pub fn from_domain(&self, name: &str, fallback: bool) -> MapFrom<'_> {
        MapFrom { map: self, from: self.resolve_source(name, fallback) }
    }

    /// Binds the standard domain as source.
    pub fn from_standard(&self) -> MapFrom<'_> {
        MapFrom { map: self, from: self.standard_index() }
    }

    /// Binds the target domains `names`, in order. Unknown names are dropped.
    /// With `append_standard` the standard domain is added at the end unless it
    /// is already in the list.
    pub fn to_domains(&self, append_standard: bool, names: &[&str]) -> MapTo<'_> {
        let mut targets: Vec<usize> =
            names.iter().filter_map(|name| self.domain_index(name)).collect();
        if append_standard {
            if let Some(standard) = self.standard_index() {
                if !targets.contains(&standard) {
                    targets.push(standard);
                }
            }
        }
        MapTo { map: self, targets }
    }

    fn resolve_source(&self, name: &str, fallback: bool) -> Option<usize> {
        self.domain_index(name).or(if fallback { self.standard_index() } else { None })
    }
}

/// A map with a bound source domain.
#[derive(Debug, Clone, Copy)]
pub struct MapFrom<'a> {
    map: &'a NameMap,
    from: Option<usize>,
}

impl<'a> MapFrom<'a> {
    /// The bound source domain.
    pub fn source(&self) -> Option<usize> {
        self.from
    }

    /// Fails with [`NameMapError::UnknownDomain`] if no source is bound.
    pub fn check(&self, map_hint: &str, domain_hint: &str) -> Result<()> {
        match self.from {
            Some(_) => Ok(()),
            None => Err(NameMapError::unknown_domain(map_hint, domain_hint)),
        }
    }

    /// Like [`MapFrom::check`] but panics on failure.
    pub fn verify(self, map_hint: &str, domain_hint: &str) -> Self {
        if let Err(err) = self.check(map_hint, domain_hint) {
            panic!("{err}");
        }
        self
    }

    /// See [`NameMap::map`]; the match is a domain index.
    pub fn map(&self, term: &'a str, to: &[usize]) -> (&'a str, Option<usize>) {
        match self.from {
            Some(from) => self.map.map(from, term, to),
            None => (term, None),
        }
    }

    /// [`MapFrom::map`] with targets given by name; unknown names are skipped.
    pub fn map_by_name(&self, term: &'a str, to: &[&str]) -> (&'a str, Option<usize>) {
        let to: Vec<usize> = to.iter().filter_map(|name| self.map.domain_index(name)).collect();
        self.map(term, &to)
    }

    /// Adds a target binding.
    pub fn to_domains(&self, append_standard: bool, names: &[&str]) -> MapFromTo<'a> {
        MapFromTo { to: self.map.to_domains(append_standard, names), from: self.from }
    }

    /// The underlying map.
    pub fn base(&self) -> &'a NameMap {
        self.map
    }
}

/// A map with a bound, ordered list of target domains.
#[derive(Debug, Clone)]
pub struct MapTo<'a> {
    map: &'a NameMap,
    targets: Vec<usize>,
}

impl<'a> MapTo<'a> {
    /// The bound target domains, in preference order.
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Fails with [`NameMapError::UnknownDomain`] if no target is bound.
    pub fn check(&self, map_hint: &str, domain_hint: &str) -> Result<()> {
        if self.targets.is_empty() {
            return Err(NameMapError::unknown_domain(map_hint, domain_hint));
        }
        Ok(())
    }

    /// Like [`MapTo::check`] but panics on failure.
    pub fn verify(self, map_hint: &str, domain_hint: &str) -> Self {
        if let Err(err) = self.check(map_hint, domain_hint) {
            panic!("{err}");
        }
        self
    }

    /// Maps `term` of domain `from` to the first bound target that has a term.
    /// The match is the position in [`MapTo::targets`].
    pub fn map(&self, from: usize, term: &'a str) -> (&'a str, Option<usize>) {
        if let Some(row) = self.map.row(from, term) {
            for (pos, &domain) in self.targets.iter().enumerate() {
                if let Some(value) = row.get(domain) {
                    return (value, Some(pos));
                }
            }
        }
        (term, None)
    }

    /// [`MapTo::map`] with the source given by name.
    pub fn map_by_name(&self, from: &str, term: &'a str) -> (&'a str, Option<usize>) {
        match self.map.domain_index(from) {
            Some(from) => self.map(from, term),
            None => (term, None),
        }
    }

    /// Adds a source binding; see [`NameMap::from_domain`].
    pub fn from_domain(self, name: &str, fallback: bool) -> MapFromTo<'a> {
        let from = self.map.resolve_source(name, fallback);
        MapFromTo { to: self, from }
    }

    /// Adds the standard domain as source binding.
    pub fn from_standard(self) -> MapFromTo<'a> {
        let from = self.map.standard_index();
        MapFromTo { to: self, from }
    }

    /// The underlying map.
    pub fn base(&self) -> &'a NameMap {
        self.map
    }
}

/// A map with bound source and targets.
#[derive(Debug, Clone)]
pub struct MapFromTo<'a> {
    to: MapTo<'a>,
    from: Option<usize>,
}

impl<'a> MapFromTo<'a> {
    /// The bound source domain.
    pub fn source(&self) -> Option<usize> {
        self.from
    }

    /// The bound target domains, in preference order.
    pub fn targets(&self) -> &[usize] {
        self.to.targets()
    }

    /// Fails with [`NameMapError::UnknownDomain`] if the source or all targets
    /// are unresolved.
    pub fn check(&self, map_hint: &str, domain_hint: &str) -> Result<()> {
        if self.from.is_none() {
            return Err(NameMapError::unknown_domain(map_hint, domain_hint));
        }
        self.to.check(map_hint, domain_hint)
    }

    /// Like [`MapFromTo::check`] but panics on failure.
    pub fn verify(self, map_hint: &str, domain_hint: &str) -> Self {
        if let Err(err) = self.check(map_hint, domain_hint) {
            panic!("{err}");
        }
        self
    }

    /// Maps `term`; the match is the position in [`MapFromTo::targets`].
    pub fn map(&self, term: &'a str) -> (&'a str, Option<usize>) {
        match self.from {
            Some(from) => self.to.map(from, term),
            None => (term, None),
        }
    }

    /// The underlying map.
    pub fn base(&self) -> &'a NameMap {
        self.to.base()
    }
}
