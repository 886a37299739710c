//! pom-sort - Maven pom.xml sorter
//!
//! Reorders the elements of a pom file into a canonical order described by
//! a sort order document, and checks whether a pom already is in that order.
//!
//! # Architecture
//!
//! ```text
//! text -> Document -> Sorter (OrderNode + DependencySortOrder) -> Formatter -> text
//!                                                                    |
//!                                                                 Verifier
//! ```
//!
//! [`PomSorter`] drives the pipeline for strings and files; everything it
//! needs comes from one immutable [`SortParameters`].
//!
//! ```no_run
//! use pom_sort::{PomSorter, SortParameters};
//!
//! let params = SortParameters::builder()
//!     .sort_dependencies("scope,groupId,artifactId")
//!     .build()?;
//! let sorter = PomSorter::new(params)?;
//! sorter.sort_pom()?;
//! # Ok::<(), pom_sort::SortError>(())
//! ```

pub mod config;
pub mod dependency;
pub mod document;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod order;
pub mod sorter;
pub mod verifier;
mod writer;

pub use config::{
    ConfigError, Indent, LineSeparator, OrderSource, ParametersBuilder, Settings, SortParameters,
    VerifyFailType,
};
pub use dependency::{DependencySortOrder, Scope, SortField};
pub use document::{Document, ElementNode, ParseError};
pub use encoding::{Encoding, EncodingError};
pub use engine::{FileStatus, PomSorter};
pub use error::SortError;
pub use formatter::{FormatOptions, Formatter};
pub use order::OrderNode;
pub use sorter::Sorter;
pub use verifier::VerifyOutcome;
