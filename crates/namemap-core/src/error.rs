//! Error types for loading, saving and binding name maps.
//!
//! Mapping itself never fails: a missing translation is reported through the
//! match indicator of [`crate::NameMap::map`]. Only loading, saving, structural
//! edits and view validation produce a [`NameMapError`].

use namemap_xsx::XsxError;
use thiserror::Error;

/// Error type for name-map operations.
#[derive(Error, Debug)]
pub enum NameMapError {
    /// A domain name was declared twice.
    #[error("duplicate domain '{name}'")]
    DuplicateDomain { name: String },

    /// More than one header column carried the standard-domain marker.
    #[error("ambiguous standard domain: both '{first}' and '{second}' are marked")]
    AmbiguousStandardDomain { first: String, second: String },

    /// The header declared no domains, or the input was empty.
    #[error("empty domain definition")]
    EmptyDomainSet,

    /// A data row does not fit the header.
    #[error("malformed row {row}, column {column}: {message}")]
    MalformedRow { row: usize, column: usize, message: String },

    /// A term occurred twice in one domain while duplicates were rejected.
    #[error("duplicate term '{term}' in domain '{domain}' at row {row}")]
    DuplicateTerm { domain: String, term: String, row: usize },

    /// Saving needs a standard domain to enumerate rows from.
    #[error("no standard domain set")]
    NoStandardDomain,

    /// A view could not resolve its domain binding.
    #[error("unknown domain '{domain_hint}' in map '{map_hint}'")]
    UnknownDomain { map_hint: String, domain_hint: String },

    /// The definition text is not well formed.
    #[error(transparent)]
    Syntax(XsxError),

    /// Reading or writing the definition failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<XsxError> for NameMapError {
    fn from(err: XsxError) -> Self {
        match err {
            XsxError::Io(io) => NameMapError::Io(io),
            other => NameMapError::Syntax(other),
        }
    }
}

impl NameMapError {
    /// Short label for logs.
    pub fn category(&self) -> &'static str {
        match self {
            NameMapError::DuplicateDomain { .. }
            | NameMapError::AmbiguousStandardDomain { .. }
            | NameMapError::EmptyDomainSet => "header",
            NameMapError::MalformedRow { .. } | NameMapError::DuplicateTerm { .. } => "row",
            NameMapError::NoStandardDomain => "save",
            NameMapError::UnknownDomain { .. } => "binding",
            NameMapError::Syntax(_) => "syntax",
            NameMapError::Io(_) => "io",
        }
    }

    /// Builds an [`NameMapError::UnknownDomain`].
    pub fn unknown_domain(map_hint: impl Into<String>, domain_hint: impl Into<String>) -> Self {
        NameMapError::UnknownDomain { map_hint: map_hint.into(), domain_hint: domain_hint.into() }
    }
}

/// Result alias for name-map operations.
pub type Result<T> = std::result::Result<T, NameMapError>;
