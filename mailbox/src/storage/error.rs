use std::{io, path::PathBuf, result};

use thiserror::Error;

/// The global `Result` alias of the module.
pub type Result<T> = result::Result<T, Error>;

/// The global `Error` enum of the module.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read storage file at {1}")]
    ReadFileError(#[source] io::Error, PathBuf),
    #[error("cannot write storage file at {1}")]
    WriteFileError(#[source] io::Error, PathBuf),
    #[error("cannot parse storage file at {1}")]
    ParseFileError(#[source] serde_json::Error, PathBuf),
    #[error("cannot serialize storage entries")]
    SerializeEntriesError(#[source] serde_json::Error),
    #[error("cannot parse value of storage key {1}")]
    ParseValueError(#[source] serde_json::Error, String),
    #[error("cannot serialize value of storage key {1}")]
    SerializeValueError(#[source] serde_json::Error, String),
    #[error("cannot parse flag {0}")]
    ParseFlagError(String),
}
