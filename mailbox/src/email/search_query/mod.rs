//! # Search emails query
//!
//! This module exposes [`SearchEmailsQuery`], the combination of an
//! optional [`filter::SearchEmailsFilter`] and a
//! [`sort::SearchEmailsSorter`], applied by the email list pipeline.
//!
//! The sorter can be parsed from a string, see the [`sort::parser`]
//! module for more details.

pub mod filter;
pub mod sort;

use std::result;

use thiserror::Error;

use self::{filter::SearchEmailsFilter, sort::SearchEmailsSorter};

/// The global `Result` alias of the module.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the module.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse search emails sort query `{1}`")]
    ParseSortQueryError(Vec<String>, String),
}

/// The search emails query.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchEmailsQuery {
    /// The optional filter. When `None`, all the emails of the folder
    /// are kept.
    pub filter: Option<SearchEmailsFilter>,

    /// The sorter applied after filtering.
    pub sorter: SearchEmailsSorter,
}

impl SearchEmailsQuery {
    /// Builds a query from a raw search term and a sorter. An empty
    /// term means no filter.
    pub fn new(term: impl AsRef<str>, sorter: SearchEmailsSorter) -> Self {
        Self {
            filter: SearchEmailsFilter::new(term),
            sorter,
        }
    }
}
