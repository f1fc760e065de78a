//! Name maps: one concept, many names.
//!
//! Software that mediates between data sources often has to deal with one thing
//! being called differently in each source: an internal key, an output label,
//! a label per UI language. A [`NameMap`] keeps those names together as rows of
//! aligned terms, one column per *domain*, and maps a term from one domain into
//! the first of a preferred list of other domains that has a name for it.
//!
//! One domain may be marked as the *standard domain*. It is used as a fallback
//! source by [`NameMap::from_domain`], as a fallback target by
//! [`NameMap::to_domains`] and as the row enumeration when saving.
//!
//! Maps are usually loaded from a definition:
//!
//! ```rust
//! use namemap_core::NameMap;
//!
//! let nm = NameMap::load(
//!     r"[\id lang: lang:de]
//!       (1 foo baz)
//!       (2 bar quux)"
//!         .as_bytes(),
//! )
//! .unwrap();
//!
//! assert_eq!(nm.standard_index(), Some(0));
//! assert_eq!(nm.map(0, "2", &[2]), ("quux", Some(2)));
//! ```

mod codec;
pub mod domain;
pub mod error;
mod name_map;
pub mod options;
pub mod row;
pub mod term_index;
pub mod view;

pub use domain::DomainRegistry;
pub use error::{NameMapError, Result};
pub use name_map::{NameMap, ignore_domain};
pub use options::{DuplicateTermPolicy, LoadOptions};
pub use row::{Row, RowId};
pub use term_index::TermIndex;
pub use view::{MapFrom, MapFromTo, MapTo};
