use std::result;

use thiserror::Error;

/// The global `Result` alias of the library.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the library.
///
/// Each module owns its own error type, this one only gathers them
/// so that callers can use a single `?` across modules.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IndexError(#[from] crate::index::Error),
    #[error(transparent)]
    StorageError(#[from] crate::storage::Error),
    #[error(transparent)]
    SearchQueryError(#[from] crate::search_query::Error),
    #[error("cannot find email {0} in mailbox {1}")]
    FindEmailError(String, String),
}
