//! Module dedicated to the file system shard source.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tracing::debug;

use super::{load::ShardSource, part_file_name, Error, MailboxIndex, Result};

/// The file system shard source.
///
/// Parts are read from the same layout the HTTP source fetches:
/// `{root}/mail/{mailbox}/index.json` and
/// `{root}/mail/{mailbox}/index-part-{n}.json`.
#[derive(Clone, Debug, Default)]
pub struct FsShardSource {
    root: PathBuf,
}

impl FsShardSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_owned(),
        }
    }

    /// Returns the path of the given part.
    pub fn part_path(&self, mailbox: &str, part: usize) -> PathBuf {
        self.root
            .join("mail")
            .join(mailbox)
            .join(part_file_name(part))
    }
}

#[async_trait]
impl ShardSource for FsShardSource {
    async fn fetch_part(&self, mailbox: &str, part: usize) -> Result<MailboxIndex> {
        let path = self.part_path(mailbox, part);
        debug!("reading index part {part} at {}", path.display());

        let json = fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::MissingPartError(part, mailbox.to_owned()),
            _ => Error::ReadPartError(err, part, mailbox.to_owned()),
        })?;

        serde_json::from_str(&json)
            .map_err(|err| Error::ParsePartError(err, part, mailbox.to_owned()))
    }
}
