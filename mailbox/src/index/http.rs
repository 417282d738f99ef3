//! Module dedicated to the HTTP shard source.

use async_trait::async_trait;
use tracing::debug;

use super::{load::ShardSource, part_file_name, Error, MailboxIndex, Result};

/// The HTTP shard source.
///
/// Parts are fetched from `{base_url}/mail/{mailbox}/index.json`
/// and `{base_url}/mail/{mailbox}/index-part-{n}.json`.
#[derive(Clone, Debug, Default)]
pub struct HttpShardSource {
    client: http::Client,
    base_url: String,
}

impl HttpShardSource {
    pub fn new(base_url: impl ToString) -> Self {
        Self {
            client: http::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Returns the URI of the given part.
    pub fn part_uri(&self, mailbox: &str, part: usize) -> String {
        format!(
            "{}/mail/{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(mailbox),
            part_file_name(part)
        )
    }
}

#[async_trait]
impl ShardSource for HttpShardSource {
    async fn fetch_part(&self, mailbox: &str, part: usize) -> Result<MailboxIndex> {
        let uri = self.part_uri(mailbox, part);
        debug!("fetching index part {part} at {uri}");

        let text = self
            .client
            .fetch_text(&uri)
            .await
            .map_err(|err| Error::FetchPartError(err, part, mailbox.to_owned()))?;

        serde_json::from_str(&text)
            .map_err(|err| Error::ParsePartError(err, part, mailbox.to_owned()))
    }
}
