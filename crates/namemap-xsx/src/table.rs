//! Tables on top of the token stream.
//!
//! A table is a `[ ... ]` header of column atoms followed by any number of
//! `( ... )` rows. The header's meta flags are handed to the caller untouched;
//! what they mean is up to the consumer. Rows are returned item by item and are
//! not checked against the header width, so callers can report misaligned rows
//! in their own terms.

use std::io::BufRead;

use crate::error::{Result, XsxError};
use crate::parser::{Atom, Bracket, Event, PullParser};

/// One header column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name as written in the header.
    pub name: String,
    /// Set when the column token carried the meta marker.
    pub meta: bool,
}

/// One item of a data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A flat atom.
    Atom(Atom),
    /// A nested group with its items.
    List {
        /// Delimiter kind.
        bracket: Bracket,
        /// Meta flag of the group opener.
        meta: bool,
        /// Items inside the group.
        items: Vec<Expr>,
    },
}

impl Expr {
    /// Returns the atom if this item is one.
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Expr::Atom(atom) => Some(atom),
            Expr::List { .. } => None,
        }
    }
}

/// Reads the table header.
///
/// Returns `Ok(None)` when the input holds no tokens at all.
pub fn read_definition<R: BufRead>(parser: &mut PullParser<R>) -> Result<Option<Vec<Column>>> {
    match parser.next_event()? {
        None => return Ok(None),
        Some(Event::Begin { bracket: Bracket::Square, .. }) => {}
        Some(_) => {
            let message = "expected '[' to open the table header";
            return Err(XsxError::syntax(parser.position(), message));
        }
    }

    let mut columns = Vec::new();
    loop {
        match parser.next_event()? {
            Some(Event::Atom(atom)) => columns.push(Column { name: atom.text, meta: atom.meta }),
            Some(Event::End { .. }) => return Ok(Some(columns)),
            Some(Event::Begin { .. }) => {
                return Err(XsxError::syntax(parser.position(), "header columns must be atoms"));
            }
            None => return Err(XsxError::UnexpectedEof { expected: Bracket::Square.close() }),
        }
    }
}

/// Reads the next data row, or `Ok(None)` at the end of the table.
pub fn next_row<R: BufRead>(parser: &mut PullParser<R>) -> Result<Option<Vec<Expr>>> {
    match parser.next_event()? {
        None => Ok(None),
        Some(Event::Begin { bracket: Bracket::Paren, .. }) => read_items(parser).map(Some),
        Some(_) => Err(XsxError::syntax(parser.position(), "expected '(' to open a table row")),
    }
}

/// Collects items up to the end of the group that was just opened.
fn read_items<R: BufRead>(parser: &mut PullParser<R>) -> Result<Vec<Expr>> {
    let mut items = Vec::new();
    loop {
        match parser.next_event()? {
            Some(Event::Atom(atom)) => items.push(Expr::Atom(atom)),
            Some(Event::Begin { bracket, meta }) => {
                let nested = read_items(parser)?;
                items.push(Expr::List { bracket, meta, items: nested });
            }
            Some(Event::End { .. }) => return Ok(items),
            // the parser reports an open group at end of input itself
            None => return Err(XsxError::UnexpectedEof { expected: Bracket::Paren.close() }),
        }
    }
}
