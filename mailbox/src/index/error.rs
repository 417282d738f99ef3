use std::{io, result};

use thiserror::Error;

/// The global `Result` alias of the module.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the module.
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(feature = "http")]
    #[error("cannot fetch part {1} of mailbox {2}")]
    FetchPartError(#[source] http::Error, usize, String),
    #[error("cannot find part {0} of mailbox {1}")]
    MissingPartError(usize, String),
    #[error("cannot read part {1} of mailbox {2}")]
    ReadPartError(#[source] io::Error, usize, String),
    #[error("cannot parse part {1} of mailbox {2}")]
    ParsePartError(#[source] serde_json::Error, usize, String),
    #[error("cannot load mailbox {1}")]
    LoadIndexError(#[source] Box<Error>, String),
}

impl Error {
    /// Returns the HTTP status that caused the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            #[cfg(feature = "http")]
            Self::FetchPartError(err, ..) => err.status(),
            Self::LoadIndexError(err, _) => err.status(),
            _ => None,
        }
    }

    /// Returns the message to display to the user.
    pub fn user_message(&self) -> String {
        match self.status() {
            Some(status) => format!(
                "Failed to load mailbox data (HTTP {status}). Please check that the mailbox exists."
            ),
            None => format!("Failed to load mailbox data: {self}"),
        }
    }
}
