use std::io::{self, Read, Write};

use namemap_core::{DuplicateTermPolicy, LoadOptions, NameMap, NameMapError};

const CANONICAL: &str = r"[\input output l10n:EN l10n:DE]
          ( note  rem    remark  \undef)
          ( warn  warnig warning Warnung)";

#[test]
fn load_declares_domains_in_order() {
    let nm = NameMap::load(
        r"[\id lang: lang:de]
          (1 foo baz)
          (2 bar quux)"
            .as_bytes(),
    )
    .unwrap();

    assert_eq!(nm.standard_index(), Some(0));
    assert_eq!(nm.domain_index("id"), Some(0));
    assert_eq!(nm.domain_index("lang:"), Some(1));
    assert_eq!(nm.domain_index("lang:de"), Some(2));
    assert_eq!(nm.domain_index("lang:en"), None);
    assert_eq!(nm.domain_name(1), Some("lang:"));
    assert_eq!(nm.domain_name(3), None);

    let (mapped, domain) = nm.map(0, "2", &[2]);
    assert_eq!(mapped, "quux");
    assert_eq!(domain, Some(2));
}

#[test]
fn canonical_example_maps_by_name() {
    let nm: NameMap = CANONICAL.parse().unwrap();

    let (mapped, domain) = nm.map_by_name("input", "warn", &["l10n:DE", "l10n:EN"]);
    assert_eq!(mapped, "Warnung");
    assert_eq!(domain.and_then(|d| nm.domain_name(d)), Some("l10n:DE"));

    let (mapped, domain) = nm.map_by_name("output", "rem", &["l10n:DE", "l10n:EN"]);
    assert_eq!(mapped, "remark");
    assert_eq!(domain.and_then(|d| nm.domain_name(d)), Some("l10n:EN"));
}

#[test]
fn meta_atoms_are_empty_slots() {
    let nm: NameMap = CANONICAL.parse().unwrap();
    let de = nm.domain_index("l10n:DE").unwrap();
    let row = nm.row(0, "note").unwrap();
    assert_eq!(row.get(de), None);
    assert_eq!(row.slots()[de], "");
    assert!(!nm.term_index(de).unwrap().contains("undef"));
}

#[test]
fn rows_are_shared_between_domains() {
    let nm: NameMap = CANONICAL.parse().unwrap();
    let by_input = nm.term_index(0).unwrap().get("warn").unwrap();
    let by_german = nm.term_index(3).unwrap().get("Warnung").unwrap();
    assert_eq!(by_input, by_german);
    assert_eq!(nm.row_by_id(by_input).unwrap().get(1), Some("warnig"));
}

#[test]
fn header_errors() {
    assert!(matches!(
        "[a b a] (1 2 3)".parse::<NameMap>(),
        Err(NameMapError::DuplicateDomain { name }) if name == "a"
    ));
    assert!(matches!(
        r"[\a \b]".parse::<NameMap>(),
        Err(NameMapError::AmbiguousStandardDomain { .. })
    ));
    assert!(matches!("[]".parse::<NameMap>(), Err(NameMapError::EmptyDomainSet)));
}

#[test]
fn header_without_standard_domain_loads() {
    let nm: NameMap = "[key local] (akey aloc)".parse().unwrap();
    assert_eq!(nm.standard_index(), None);
    assert_eq!(nm.map(0, "akey", &[1]), ("aloc", Some(1)));
}

#[test]
fn duplicate_term_overwrites_by_default() {
    let text = r"[\key label] (a first) (b first)";
    let nm: NameMap = text.parse().unwrap();
    // the later row owns the key, the earlier one is still reachable by its own key
    assert_eq!(nm.map(1, "first", &[0]), ("b", Some(0)));
    assert_eq!(nm.map(0, "a", &[1]), ("first", Some(1)));
    assert_eq!(nm.term_count(1), 1);
}

#[test]
fn duplicate_term_can_be_rejected() {
    let text = r"[\key label] (a first) (b first)";
    let err = NameMap::load_with(text.as_bytes(), &LoadOptions::strict()).unwrap_err();
    match err {
        NameMapError::DuplicateTerm { domain, term, row } => {
            assert_eq!(domain, "label");
            assert_eq!(term, "first");
            assert_eq!(row, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn same_term_in_different_domains_is_not_a_duplicate() {
    let options = LoadOptions { duplicate_terms: DuplicateTermPolicy::Reject };
    let nm = NameMap::load_with(r"[\a b] (x x) (y z)".as_bytes(), &options).unwrap();
    assert_eq!(nm.map(1, "x", &[0]), ("x", Some(0)));
}

#[test]
fn load_file_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CANONICAL.as_bytes()).unwrap();
    let nm = NameMap::load_file(file.path()).unwrap();
    assert_eq!(nm.domain_count(), 4);
}

#[test]
fn load_file_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = NameMap::load_file(dir.path().join("missing.nmap")).unwrap_err();
    assert!(matches!(err, NameMapError::Io(_)));
}

/// Hands out `data` once, then fails every read.
struct FailingReader {
    data: &'static [u8],
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::Other, "disk gone"));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn read_error_after_header_aborts_load() {
    let result = NameMap::load(FailingReader { data: b"[\\a b]\n(k v)\n" });
    let err = result.unwrap_err();
    assert!(matches!(&err, NameMapError::Io(e) if e.to_string() == "disk gone"));
    assert_eq!(err.category(), "io");
}

#[test]
fn options_deserialize_from_json() {
    let options: LoadOptions = serde_json::from_str(r#"{"duplicate_terms":"reject"}"#).unwrap();
    assert_eq!(options, LoadOptions::strict());
    let options: LoadOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options.duplicate_terms, DuplicateTermPolicy::Overwrite);
}
