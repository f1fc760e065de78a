use std::io::Write;

use crate::error::{Result, XsxError};
use crate::parser::{Bracket, is_delimiter};

/// How atoms are quoted on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Quote only when the text would not read back as a single bare atom.
    #[default]
    Conditional,
    /// Always quote.
    Always,
}

/// Returns `true` when `text` cannot be written as a bare atom.
pub fn needs_quotes(text: &str) -> bool {
    text.is_empty() || text.chars().any(is_delimiter)
}

/// Pretty writer for token syntax.
///
/// Items inside a group are separated by one space; every top-level group or
/// atom is terminated by a newline.
pub struct Writer<W: Write> {
    out: W,
    open: Vec<Bracket>,
    at_group_start: bool,
}

impl<W: Write> Writer<W> {
    /// Creates a writer emitting into `out`.
    pub fn new(out: W) -> Self {
        Self { out, open: Vec::new(), at_group_start: true }
    }

    /// Opens a group.
    pub fn begin(&mut self, bracket: Bracket, meta: bool) -> Result<()> {
        self.separate()?;
        if meta {
            self.out.write_all(b"\\")?;
        }
        write!(self.out, "{}", bracket.open())?;
        self.open.push(bracket);
        self.at_group_start = true;
        Ok(())
    }

    /// Closes the innermost open group.
    pub fn end(&mut self) -> Result<()> {
        let bracket = self.open.pop().ok_or(XsxError::Unbalanced)?;
        write!(self.out, "{}", bracket.close())?;
        self.at_group_start = false;
        if self.open.is_empty() {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Writes one atom.
    pub fn atom(&mut self, text: &str, meta: bool, quoting: Quoting) -> Result<()> {
        self.separate()?;
        if meta {
            self.out.write_all(b"\\")?;
        }
        if quoting == Quoting::Always || needs_quotes(text) {
            let mut quoted = String::with_capacity(text.len() + 2);
            quoted.push('"');
            for c in text.chars() {
                match c {
                    '"' => quoted.push_str("\\\""),
                    '\\' => quoted.push_str("\\\\"),
                    '\n' => quoted.push_str("\\n"),
                    '\t' => quoted.push_str("\\t"),
                    '\r' => quoted.push_str("\\r"),
                    c => quoted.push(c),
                }
            }
            quoted.push('"');
            self.out.write_all(quoted.as_bytes())?;
        } else {
            self.out.write_all(text.as_bytes())?;
        }
        self.at_group_start = false;
        if self.open.is_empty() {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Returns the sink; fails if a group is still open.
    pub fn into_inner(mut self) -> Result<W> {
        if !self.open.is_empty() {
            return Err(XsxError::Unbalanced);
        }
        self.flush()?;
        Ok(self.out)
    }

    fn separate(&mut self) -> Result<()> {
        if !self.open.is_empty() && !self.at_group_start {
            self.out.write_all(b" ")?;
        }
        Ok(())
    }
}
