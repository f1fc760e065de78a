//! Reading and writing name-map definitions.
//!
//! A definition is a header naming the domains, optionally marking one as the
//! standard domain with `\`, followed by one row per concept:
//!
//! ```text
//! [\input output l10n:EN l10n:DE]
//! (note rem    remark  \undef)
//! (warn warnig warning Warnung)
//! ```
//!
//! Any meta atom in a row (`\undef` above) stands for "no term in this domain".

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

use namemap_xsx::table::{self, Expr};
use namemap_xsx::{Bracket, PullParser, Quoting, Writer};
use tracing::{debug, instrument, warn};

use crate::domain::DomainRegistry;
use crate::error::{NameMapError, Result};
use crate::name_map::NameMap;
use crate::options::LoadOptions;
use crate::row::Row;

impl NameMap {
    /// Loads a definition with default [`LoadOptions`].
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        Self::load_with(reader, &LoadOptions::default())
    }

    /// Loads a definition. Any error aborts the whole load.
    #[instrument(skip(reader))]
    pub fn load_with<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        let mut parser = PullParser::new(BufReader::new(reader));
        let columns = table::read_definition(&mut parser)?.ok_or(NameMapError::EmptyDomainSet)?;
        let mut map = NameMap::from_registry(DomainRegistry::from_columns(&columns)?);

        let mut row_no = 0;
        while let Some(items) = table::next_row(&mut parser)? {
            let row = row_from_items(row_no, items, map.domain_count())?;
            map.insert_row(row, options.duplicate_terms, row_no)?;
            row_no += 1;
        }

        debug!(
            domains = map.domain_count(),
            rows = row_no,
            standard = ?map.standard_index(),
            "Loaded name map"
        );
        Ok(map)
    }

    /// Opens `path` and loads it with default options.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading name map file");
        Self::load(File::open(path)?)
    }

    /// Writes the map as a definition.
    ///
    /// One row is written per term of the standard domain, in creation order.
    /// Empty slots are written as the meta atom `placeholder`, so they read back
    /// as empty. Rows without a standard-domain term are not written.
    #[instrument(skip(self, writer))]
    pub fn save<W: Write>(&self, writer: W, placeholder: &str) -> Result<()> {
        let standard = self.standard_index().ok_or(NameMapError::NoStandardDomain)?;
        let mut out = Writer::new(writer);

        out.begin(Bracket::Square, false)?;
        for (idx, name) in self.domain_names().enumerate() {
            out.atom(name, idx == standard, Quoting::Conditional)?;
        }
        out.end()?;

        let mut written = 0;
        for row in self.standard_rows()? {
            out.begin(Bracket::Paren, false)?;
            for slot in row.slots() {
                if slot.is_empty() {
                    out.atom(placeholder, true, Quoting::Conditional)?;
                } else {
                    out.atom(slot, false, Quoting::Conditional)?;
                }
            }
            out.end()?;
            written += 1;
        }
        out.flush()?;

        let skipped = self.rows_without_term(standard);
        if skipped > 0 {
            warn!(skipped, "Rows without a standard-domain term were not written");
        }
        debug!(rows = written, "Saved name map");
        Ok(())
    }

    /// [`NameMap::save`] into a `String`.
    pub fn save_to_string(&self, placeholder: &str) -> Result<String> {
        let mut buf = Vec::new();
        self.save(&mut buf, placeholder)?;
        String::from_utf8(buf)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
    }
}

impl FromStr for NameMap {
    type Err = NameMapError;

    fn from_str(text: &str) -> Result<Self> {
        Self::load(text.as_bytes())
    }
}

/// Turns the items of one data row into a row of slot values.
fn row_from_items(row_no: usize, items: Vec<Expr>, width: usize) -> Result<Row> {
    if items.len() != width {
        return Err(NameMapError::MalformedRow {
            row: row_no,
            column: items.len().min(width),
            message: format!("expected {width} items, found {}", items.len()),
        });
    }

    let mut slots = Vec::with_capacity(width);
    for (column, item) in items.into_iter().enumerate() {
        match item {
            Expr::Atom(atom) if atom.meta => slots.push(String::new()),
            Expr::Atom(atom) => slots.push(atom.text),
            Expr::List { .. } => {
                return Err(NameMapError::MalformedRow {
                    row: row_no,
                    column,
                    message: "item is not an atom".to_string(),
                });
            }
        }
    }
    Ok(Row::from_slots(slots))
}
