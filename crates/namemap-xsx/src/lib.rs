//! Namemap XSX
//!
//! A small reader and writer for the parenthesized token syntax used by name-map
//! definition files. Groups open with `(`, `[` or `{`, atoms are bare words or
//! `"quoted strings"`, and a leading `\` marks an atom or group as *meta*.
//!
//! ```text
//! [\input output l10n:EN l10n:DE]
//! (note rem    remark  \undef)
//! (warn warnig warning Warnung)
//! ```
//!
//! The [`PullParser`] yields one [`Event`] at a time, the [`table`] module reads a
//! header plus data rows on top of it, and the [`Writer`] emits the same syntax
//! with conditional quoting.

#![deny(missing_docs)]

mod error;
mod parser;
pub mod table;
mod writer;

pub use error::{Result, XsxError};
pub use parser::{Atom, Bracket, Event, PullParser};
pub use writer::{Quoting, Writer, needs_quotes};
