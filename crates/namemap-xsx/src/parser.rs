use std::io::BufRead;

use crate::error::{Result, XsxError};

const META: char = '\\';
const QUOTE: char = '"';

/// The three kinds of group delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    /// `( ... )`
    Paren,
    /// `[ ... ]`
    Square,
    /// `{ ... }`
    Curly,
}

impl Bracket {
    /// Opening character of the group.
    pub fn open(self) -> char {
        match self {
            Bracket::Paren => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }

    /// Closing character of the group.
    pub fn close(self) -> char {
        match self {
            Bracket::Paren => ')',
            Bracket::Square => ']',
            Bracket::Curly => '}',
        }
    }

    fn from_open(c: char) -> Option<Self> {
        match c {
            '(' => Some(Bracket::Paren),
            '[' => Some(Bracket::Square),
            '{' => Some(Bracket::Curly),
            _ => None,
        }
    }

    fn from_close(c: char) -> Option<Self> {
        match c {
            ')' => Some(Bracket::Paren),
            ']' => Some(Bracket::Square),
            '}' => Some(Bracket::Curly),
            _ => None,
        }
    }
}

/// A single atom: a bare word or a quoted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// Unescaped text of the atom.
    pub text: String,
    /// Set when the atom was prefixed with `\`.
    pub meta: bool,
    /// Set when the atom was written in double quotes.
    pub quoted: bool,
}

impl Atom {
    /// Plain, unquoted atom.
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), meta: false, quoted: false }
    }

    /// Meta atom, as written with a leading `\`.
    pub fn meta(text: impl Into<String>) -> Self {
        Self { text: text.into(), meta: true, quoted: false }
    }
}

/// One step of the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A group was opened.
    Begin {
        /// Delimiter kind.
        bracket: Bracket,
        /// Set when the opener was prefixed with `\`.
        meta: bool,
    },
    /// The innermost open group was closed.
    End {
        /// Delimiter kind.
        bracket: Bracket,
    },
    /// An atom inside or outside of a group.
    Atom(Atom),
}

/// Pull-style tokenizer over any buffered reader.
///
/// Input is consumed one line at a time, so large definition files are never
/// held in memory as a whole. Every call to [`PullParser::next_event`] returns the
/// next token, `Ok(None)` at a clean end of input, or an error carrying the
/// position of the offending token.
pub struct PullParser<R> {
    reader: R,
    line_buf: Vec<char>,
    pos: usize,
    line: usize,
    exhausted: bool,
    open: Vec<Bracket>,
    token_start: (usize, usize),
}

impl<R: BufRead> PullParser<R> {
    /// Creates a parser reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buf: Vec::new(),
            pos: 0,
            line: 0,
            exhausted: false,
            open: Vec::new(),
            token_start: (1, 1),
        }
    }

    /// Line and column (both 1-based) where the last returned token started.
    pub fn position(&self) -> (usize, usize) {
        self.token_start
    }

    /// Number of groups that are currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Returns the next token of the stream.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        self.skip_whitespace()?;
        self.token_start = self.here();

        let Some(mut c) = self.peek()? else {
            return match self.open.last() {
                Some(bracket) => Err(XsxError::UnexpectedEof { expected: bracket.close() }),
                None => Ok(None),
            };
        };

        let meta = c == META;
        if meta {
            self.pos += 1;
            c = match self.peek()? {
                Some(next) if !next.is_whitespace() => next,
                _ => return Err(XsxError::syntax(self.token_start, "dangling meta marker")),
            };
        }

        if let Some(bracket) = Bracket::from_open(c) {
            self.pos += 1;
            self.open.push(bracket);
            return Ok(Some(Event::Begin { bracket, meta }));
        }

        if let Some(bracket) = Bracket::from_close(c) {
            if meta {
                return Err(XsxError::syntax(
                    self.token_start,
                    "meta marker before closing bracket",
                ));
            }
            return match self.open.pop() {
                Some(open) if open == bracket => {
                    self.pos += 1;
                    Ok(Some(Event::End { bracket }))
                }
                Some(open) => Err(XsxError::syntax(
                    self.token_start,
                    format!("expected '{}', found '{c}'", open.close()),
                )),
                None => Err(XsxError::syntax(self.token_start, format!("unbalanced '{c}'"))),
            };
        }

        if c == QUOTE {
            self.pos += 1;
            let text = self.quoted()?;
            return Ok(Some(Event::Atom(Atom { text, meta, quoted: true })));
        }

        if c == META {
            return Err(XsxError::syntax(self.token_start, "doubled meta marker"));
        }

        let text = self.bare()?;
        Ok(Some(Event::Atom(Atom { text, meta, quoted: false })))
    }

    fn here(&self) -> (usize, usize) {
        (self.line.max(1), self.pos + 1)
    }

    /// Makes sure `line_buf[pos]` is valid; returns `false` at end of input.
    fn fill(&mut self) -> Result<bool> {
        while self.pos >= self.line_buf.len() {
            if self.exhausted {
                return Ok(false);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                self.exhausted = true;
                return Ok(false);
            }
            self.line_buf = line.chars().collect();
            self.pos = 0;
            self.line += 1;
        }
        Ok(true)
    }

    fn peek(&mut self) -> Result<Option<char>> {
        Ok(if self.fill()? { Some(self.line_buf[self.pos]) } else { None })
    }

    fn bump(&mut self) -> Result<Option<char>> {
        let c = self.peek()?;
        if c.is_some() {
            self.pos += 1;
        }
        Ok(c)
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(c) = self.peek()? {
            if !c.is_whitespace() {
                break;
            }
            self.pos += 1;
        }
        Ok(())
    }

    fn bare(&mut self) -> Result<String> {
        let mut text = String::new();
        while let Some(c) = self.peek()? {
            if is_delimiter(c) {
                break;
            }
            text.push(c);
            self.pos += 1;
        }
        Ok(text)
    }

    fn quoted(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.bump()? {
                None => return Err(XsxError::UnexpectedEof { expected: QUOTE }),
                Some(QUOTE) => return Ok(text),
                Some(META) => {
                    let escape_at = self.here();
                    match self.bump()? {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some('r') => text.push('\r'),
                        Some(c @ (QUOTE | META)) => text.push(c),
                        Some(other) => {
                            return Err(XsxError::syntax(
                                escape_at,
                                format!("unknown escape '\\{other}'"),
                            ));
                        }
                        None => return Err(XsxError::UnexpectedEof { expected: QUOTE }),
                    }
                }
                Some(c) => text.push(c),
            }
        }
    }
}

/// Characters that terminate a bare atom.
pub(crate) fn is_delimiter(c: char) -> bool {
    c.is_whitespace()
        || c == QUOTE
        || c == META
        || Bracket::from_open(c).is_some()
        || Bracket::from_close(c).is_some()
}
