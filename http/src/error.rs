//! # Error
//!
//! Module dedicated to HTTP errors. It contains an [`Error`] enum
//! based on [`thiserror::Error`] and a type alias [`Result`].

use thiserror::Error;
use ureq::http::Uri;

/// The global `Result` alias of the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The global `Error` enum of the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot fetch {1}: server answered HTTP {0}")]
    FetchStatusError(u16, Uri),
    #[error("cannot fetch {1}")]
    FetchError(#[source] ureq::Error, Uri),
    #[error("cannot read response body of {1}")]
    ReadBodyError(#[source] ureq::Error, Uri),

    #[error(transparent)]
    UriError(#[from] ureq::http::uri::InvalidUri),
    #[cfg(feature = "tokio")]
    #[error(transparent)]
    JoinError(#[from] tokio::task::JoinError),
}

impl Error {
    /// Returns the HTTP status code that caused the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchStatusError(status, _) => Some(*status),
            _ => None,
        }
    }
}
