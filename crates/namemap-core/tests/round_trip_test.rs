use std::io::{self, Write};

use namemap_core::{NameMap, NameMapError};
use proptest::prelude::*;

/// Collects every (domain, term) key with the full row it points to.
fn key_rows(nm: &NameMap) -> Vec<(String, String, Vec<String>)> {
    let mut out = Vec::new();
    for (idx, domain) in nm.domain_names().enumerate() {
        nm.for_each_term(idx, |term| {
            let row = nm.row(idx, term).unwrap();
            out.push((domain.to_string(), term.to_string(), row.slots().to_vec()));
        });
    }
    out.sort();
    out
}

#[test]
fn save_and_reload_keep_content() {
    let original: NameMap = r#"[\input output l10n:EN l10n:DE]
        (note rem    remark  \undef)
        (warn warnig warning Warnung)
        ("two words" \- "a (b)" "")"#
        .parse()
        .unwrap();

    let text = original.save_to_string("null").unwrap();
    let reloaded: NameMap = text.parse().unwrap();

    assert_eq!(
        original.domain_names().collect::<Vec<_>>(),
        reloaded.domain_names().collect::<Vec<_>>()
    );
    assert_eq!(original.standard_index(), reloaded.standard_index());
    assert_eq!(key_rows(&original), key_rows(&reloaded));
}

#[test]
fn save_output_is_stable() {
    let nm: NameMap = r"[\input output l10n:EN l10n:DE]
        (note rem    remark  \undef)
        (warn warnig warning Warnung)"
        .parse()
        .unwrap();
    let expected = concat!(
        "[\\input output l10n:EN l10n:DE]\n",
        "(note rem remark \\null)\n",
        "(warn warnig warning Warnung)\n",
    );
    assert_eq!(nm.save_to_string("null").unwrap(), expected);
}

#[test]
fn standard_domain_in_the_middle_is_kept() {
    let nm: NameMap = r"[key \label] (k1 one) (k2 two)".parse().unwrap();
    let text = nm.save_to_string("none").unwrap();
    assert!(text.starts_with("[key \\label]\n"));
    let back: NameMap = text.parse().unwrap();
    assert_eq!(back.standard_index(), Some(1));
    assert_eq!(back.map(1, "two", &[0]), ("k2", Some(0)));
}

#[test]
fn rows_without_standard_term_are_dropped() {
    let nm: NameMap = r"[\a b] (k v) (\x y)".parse().unwrap();
    assert!(nm.row(1, "y").is_some());

    let text = nm.save_to_string("null").unwrap();
    assert_eq!(text, "[\\a b]\n(k v)\n");

    let reloaded: NameMap = text.parse().unwrap();
    assert!(reloaded.row(1, "y").is_none());
    assert_eq!(reloaded.map(1, "y", &[0]), ("y", None));
    assert_eq!(reloaded.map(1, "v", &[0]), ("k", Some(0)));
}

/// Sink whose every write fails.
struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "sink gone"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "sink gone"))
    }
}

#[test]
fn write_error_fails_save() {
    let nm: NameMap = r"[\a b] (k v)".parse().unwrap();
    let err = nm.save(FailingSink, "null").unwrap_err();
    assert!(matches!(&err, NameMapError::Io(e) if e.to_string() == "sink gone"));
    assert_eq!(err.category(), "io");
}

fn slot() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-zA-Z0-9 ():\"]{1,6}"]
}

proptest! {
    #[test]
    fn round_trip_preserves_rows(rows in prop::collection::vec((slot(), slot()), 0..12)) {
        let mut nm = NameMap::with_domains(["std", "a", "b"]).unwrap();
        nm.set_standard_domain("std").unwrap();
        for (i, (a, b)) in rows.iter().enumerate() {
            let key = format!("k{i}");
            nm.define(&[("std", key.as_str()), ("a", a.as_str()), ("b", b.as_str())]).unwrap();
        }

        let text = nm.save_to_string("null").unwrap();
        let back: NameMap = text.parse().unwrap();

        prop_assert_eq!(back.standard_index(), Some(0));
        for i in 0..rows.len() {
            let key = format!("k{i}");
            prop_assert_eq!(
                back.row(0, &key).map(|r| r.slots().to_vec()),
                nm.row(0, &key).map(|r| r.slots().to_vec())
            );
        }
    }
}
