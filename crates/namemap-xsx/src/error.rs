use thiserror::Error;

/// Errors raised while reading or writing token syntax.
#[derive(Error, Debug)]
pub enum XsxError {
    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not well formed.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
        /// Human-readable description.
        message: String,
    },

    /// Input ended inside a group or a quoted atom.
    #[error("unexpected end of input, expected '{expected}'")]
    UnexpectedEof {
        /// The character that would have closed the open construct.
        expected: char,
    },

    /// `Writer::end` was called without an open group.
    #[error("no open group to close")]
    Unbalanced,
}

/// Result alias used across this crate.
pub type Result<T> = std::result::Result<T, XsxError>;

impl XsxError {
    pub(crate) fn syntax(position: (usize, usize), message: impl Into<String>) -> Self {
        Self::Syntax { line: position.0, column: position.1, message: message.into() }
    }
}
