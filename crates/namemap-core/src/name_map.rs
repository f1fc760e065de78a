use tracing::{debug, warn};

use crate::domain::DomainRegistry;
use crate::error::{NameMapError, Result};
use crate::options::DuplicateTermPolicy;
use crate::row::{Row, RowId};
use crate::term_index::TermIndex;

/// Maps terms between naming domains.
///
/// A `NameMap` holds a [`DomainRegistry`], one [`TermIndex`] per domain and the
/// arena of [`Row`]s those indices point into. Build it once (by loading a
/// definition or through [`NameMap::define`] and friends) and then share it
/// read-only; all lookups take `&self`.
///
/// Structural edits take `&mut self`. There is no internal locking, so a map that
/// is shared between threads must be wrapped by the caller (for example in a
/// `RwLock`) before it is edited.
///
/// # Example
///
/// ```rust
/// use namemap_core::NameMap;
///
/// let nm: NameMap = r"[\input output l10n:EN l10n:DE]
///     (note rem    remark  \undef)
///     (warn warnig warning Warnung)"
///     .parse()
///     .unwrap();
///
/// let (label, domain) = nm.map_by_name("input", "note", &["l10n:DE", "l10n:EN"]);
/// assert_eq!(label, "remark");
/// assert_eq!(domain, nm.domain_index("l10n:EN"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    domains: DomainRegistry,
    indices: Vec<TermIndex>,
    rows: Vec<Row>,
}

impl NameMap {
    /// Creates a map without any domains.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map with the given domains, in order.
    pub fn with_domains<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for name in names {
            map.add_domain(name.as_ref())?;
        }
        Ok(map)
    }

    pub(crate) fn from_registry(domains: DomainRegistry) -> Self {
        let indices = vec![TermIndex::default(); domains.len()];
        Self { domains, indices, rows: Vec::new() }
    }

    /// The domain registry of this map.
    pub fn domains(&self) -> &DomainRegistry {
        &self.domains
    }

    /// Index of the domain called `name`.
    pub fn domain_index(&self, name: &str) -> Option<usize> {
        self.domains.index(name)
    }

    /// Name of the domain at `index`.
    pub fn domain_name(&self, index: usize) -> Option<&str> {
        self.domains.name(index)
    }

    /// Index of the standard domain.
    pub fn standard_index(&self) -> Option<usize> {
        self.domains.standard()
    }

    /// Number of domains.
    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    /// Domain names in declaration order.
    pub fn domain_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.domains.names()
    }

    /// Term index of `domain`.
    pub fn term_index(&self, domain: usize) -> Option<&TermIndex> {
        self.indices.get(domain)
    }

    /// Number of terms known in `domain`; zero for an unknown domain.
    pub fn term_count(&self, domain: usize) -> usize {
        self.indices.get(domain).map_or(0, TermIndex::len)
    }

    /// Row that `term` belongs to in `domain`.
    pub fn row(&self, domain: usize, term: &str) -> Option<&Row> {
        let id = self.indices.get(domain)?.get(term)?;
        Some(&self.rows[id.index()])
    }

    /// Row stored under `id`.
    pub fn row_by_id(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.index())
    }

    /// Maps `term` of domain `from` to the first domain of `to` that has a term
    /// for the same concept.
    ///
    /// Candidates are tried in the given order; empty slots and out-of-range
    /// indices are skipped. Returns the translation and the index of the domain
    /// it came from, or the unchanged `term` and `None` when nothing matched, so
    /// the first element can always be used as display text.
    pub fn map<'a>(&'a self, from: usize, term: &'a str, to: &[usize]) -> (&'a str, Option<usize>) {
        if let Some(row) = self.row(from, term) {
            for &domain in to {
                if let Some(value) = row.get(domain) {
                    return (value, Some(domain));
                }
            }
        }
        (term, None)
    }

    /// Like [`NameMap::map`], with domains given by name. Unknown target names
    /// are skipped; an unknown source name yields no match.
    pub fn map_by_name<'a>(
        &'a self,
        from: &str,
        term: &'a str,
        to: &[&str],
    ) -> (&'a str, Option<usize>) {
        let Some(from) = self.domain_index(from) else {
            return (term, None);
        };
        let to: Vec<usize> = to.iter().filter_map(|name| self.domain_index(name)).collect();
        self.map(from, term, &to)
    }

    /// Calls `visit` with every term of `domain`, in no particular order.
    pub fn for_each_term(&self, domain: usize, mut visit: impl FnMut(&str)) {
        if let Some(index) = self.indices.get(domain) {
            index.terms().for_each(|term| visit(term));
        }
    }

    /// Rows indexed by the standard domain, in creation order.
    pub fn standard_rows(&self) -> Result<impl Iterator<Item = &Row> + '_> {
        let standard = self.standard_index().ok_or(NameMapError::NoStandardDomain)?;
        let mut ids: Vec<RowId> = self.indices[standard].iter().map(|(_, id)| id).collect();
        ids.sort_unstable();
        Ok(ids.into_iter().map(move |id| &self.rows[id.index()]))
    }

    /// Rows holding at least one term but none in `domain`.
    pub(crate) fn rows_without_term(&self, domain: usize) -> usize {
        self.rows
            .iter()
            .filter(|row| row.get(domain).is_none() && row.slots().iter().any(|s| !s.is_empty()))
            .count()
    }

    /// Appends a domain and returns its index. Existing rows get an empty slot.
    pub fn add_domain(&mut self, name: &str) -> Result<usize> {
        let idx = self.domains.add(name)?;
        self.indices.push(TermIndex::default());
        for row in &mut self.rows {
            row.push_empty();
        }
        debug!(domain = name, index = idx, "Added domain");
        Ok(idx)
    }

    /// Makes `name` the standard domain, replacing any earlier choice.
    pub fn set_standard_domain(&mut self, name: &str) -> Result<usize> {
        let idx = self
            .domain_index(name)
            .ok_or_else(|| NameMapError::unknown_domain("<name map>", name))?;
        self.domains.set_standard(idx);
        Ok(idx)
    }

    /// Introduces one concept from `(domain, term)` pairs.
    ///
    /// Domains not declared yet are added in the order they appear. Empty terms
    /// leave their slot empty. Non-empty terms become keys of their domain,
    /// replacing earlier entries with the same key.
    pub fn define<S, T>(&mut self, pairs: &[(S, T)]) -> Result<RowId>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut targets = Vec::with_capacity(pairs.len());
        for (domain, _) in pairs {
            let domain = domain.as_ref();
            let idx = match self.domain_index(domain) {
                Some(idx) => idx,
                None => self.add_domain(domain)?,
            };
            targets.push(idx);
        }

        let mut row = Row::empty(self.domain_count());
        for (&idx, (_, term)) in targets.iter().zip(pairs) {
            row.replace(idx, term.as_ref().to_string());
        }
        self.insert_row(row, DuplicateTermPolicy::Overwrite, self.rows.len())
    }

    /// Sets the term of domain `to` in the row that `term` belongs to in `from`.
    ///
    /// The row is shared, so the change is visible from every domain that
    /// indexes it. The previous key of `to` is dropped, and a non-empty `value`
    /// becomes the new key. If `term` is unknown in `from` a new row is created
    /// holding just `term` and `value`. Returns `false` and changes nothing when
    /// an index is out of range or `term` is empty.
    pub fn set(&mut self, from: usize, term: &str, to: usize, value: &str) -> bool {
        let width = self.domain_count();
        if from >= width || to >= width || term.is_empty() {
            return false;
        }

        let id = match self.indices[from].get(term) {
            Some(id) => id,
            None => {
                let id = RowId::new(self.rows.len());
                let mut row = Row::empty(width);
                row.replace(from, term.to_string());
                self.rows.push(row);
                self.indices[from].insert(term.to_string(), id);
                id
            }
        };

        let previous = self.rows[id.index()].replace(to, value.to_string());
        if !previous.is_empty() {
            self.indices[to].remove_if(&previous, id);
        }
        if !value.is_empty() {
            self.indices[to].insert(value.to_string(), id);
        }
        true
    }

    /// Stores a row and registers its non-empty slots. `row_no` is only used for
    /// diagnostics.
    pub(crate) fn insert_row(
        &mut self,
        row: Row,
        policy: DuplicateTermPolicy,
        row_no: usize,
    ) -> Result<RowId> {
        for (domain, term) in row.slots().iter().enumerate() {
            if term.is_empty() || !self.indices[domain].contains(term) {
                continue;
            }
            let domain_name = self.domains.name(domain).unwrap_or_default();
            match policy {
                DuplicateTermPolicy::Reject => {
                    return Err(NameMapError::DuplicateTerm {
                        domain: domain_name.to_string(),
                        term: term.clone(),
                        row: row_no,
                    });
                }
                DuplicateTermPolicy::Overwrite => {
                    warn!(
                        domain = domain_name,
                        term = %term,
                        row = row_no,
                        "Duplicate term replaces earlier entry"
                    );
                }
            }
        }

        let id = RowId::new(self.rows.len());
        for (domain, term) in row.slots().iter().enumerate() {
            if !term.is_empty() {
                self.indices[domain].insert(term.clone(), id);
            }
        }
        self.rows.push(row);
        Ok(id)
    }
}

/// Drops the match indicator of a mapping result.
pub fn ignore_domain<T>((value, _): (T, Option<usize>)) -> T {
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NameMap {
        let mut nm = NameMap::new();
        nm.define(&[("input", "note"), ("output", "rem"), ("l10n:EN", "remark")]).unwrap();
        nm.define(&[
            ("input", "warn"),
            ("output", "warnig"),
            ("l10n:EN", "warning"),
            ("l10n:DE", "Warnung"),
        ])
        .unwrap();
        nm.set_standard_domain("input").unwrap();
        nm
    }

    #[test]
    fn define_adds_domains_in_order() {
        let nm = sample();
        let names: Vec<_> = nm.domain_names().collect();
        assert_eq!(names, ["input", "output", "l10n:EN", "l10n:DE"]);
        assert_eq!(nm.standard_index(), Some(0));
        // the first row was widened when l10n:DE appeared
        assert_eq!(nm.row(0, "note").map(Row::len), Some(4));
    }

    #[test]
    fn unmapped_slot_echoes_input() {
        let nm = sample();
        let de = nm.domain_index("l10n:DE").unwrap();
        assert_eq!(nm.map(0, "note", &[de]), ("note", None));
    }

    #[test]
    fn set_is_visible_from_every_domain() {
        let mut nm = sample();
        let input = nm.domain_index("input").unwrap();
        let de = nm.domain_index("l10n:DE").unwrap();
        let output = nm.domain_index("output").unwrap();

        assert!(nm.set(input, "note", de, "Bemerkung"));
        assert_eq!(nm.map(input, "note", &[de]), ("Bemerkung", Some(de)));
        assert_eq!(nm.map(de, "Bemerkung", &[input]), ("note", Some(input)));
        assert_eq!(nm.map_by_name("l10n:DE", "Bemerkung", &["output"]), ("rem", Some(output)));
    }

    #[test]
    fn set_replaces_the_old_key() {
        let mut nm = sample();
        let de = nm.domain_index("l10n:DE").unwrap();
        assert!(nm.set(0, "warn", de, "Achtung"));
        assert!(nm.row(de, "Warnung").is_none());
        assert_eq!(nm.map(de, "Achtung", &[0]), ("warn", Some(0)));

        assert!(nm.set(0, "warn", de, ""));
        assert!(nm.row(de, "Achtung").is_none());
        assert_eq!(nm.map(0, "warn", &[de]), ("warn", None));
    }

    #[test]
    fn set_creates_a_row_for_unknown_terms() {
        let mut nm = NameMap::with_domains(["key", "local"]).unwrap();
        assert!(nm.set(0, "akey", 1, "aloc"));
        assert_eq!(nm.map(1, "aloc", &[0]), ("akey", Some(0)));
    }

    #[test]
    fn set_rejects_bad_indices() {
        let mut nm = NameMap::with_domains(["key", "local"]).unwrap();
        assert!(!nm.set(0, "akey", 2, "x"));
        assert!(!nm.set(5, "akey", 1, "x"));
        assert!(!nm.set(0, "", 1, "x"));
        assert_eq!(nm.term_count(0), 0);
    }

    #[test]
    fn out_of_range_source_matches_nothing() {
        let nm = sample();
        assert_eq!(nm.map(17, "note", &[1]), ("note", None));
    }

    #[test]
    fn for_each_term_visits_every_key() {
        let nm = sample();
        let mut seen = Vec::new();
        nm.for_each_term(2, |t| seen.push(t.to_string()));
        seen.sort();
        assert_eq!(seen, ["remark", "warning"]);

        let mut none = 0;
        nm.for_each_term(42, |_| none += 1);
        assert_eq!(none, 0);
    }

    #[test]
    fn duplicate_domain_is_an_error() {
        let mut nm = NameMap::with_domains(["a"]).unwrap();
        assert!(matches!(nm.add_domain("a"), Err(NameMapError::DuplicateDomain { .. })));
    }

    #[test]
    fn unknown_standard_domain_is_an_error() {
        let mut nm = NameMap::with_domains(["a"]).unwrap();
        assert!(matches!(nm.set_standard_domain("b"), Err(NameMapError::UnknownDomain { .. })));
    }

    #[test]
    fn ignore_domain_keeps_the_value() {
        let nm = sample();
        assert_eq!(ignore_domain(nm.map_by_name("input", "warn", &["l10n:DE"])), "Warnung");
    }

    #[test]
    fn rows_without_term_counts_only_populated_rows() {
        let mut nm = sample();
        assert_eq!(nm.rows_without_term(0), 0);
        nm.define(&[("output", "orphan")]).unwrap();
        assert_eq!(nm.rows_without_term(0), 1);
        assert_eq!(nm.rows_without_term(3), 2);
    }
}
