//! Module dedicated to index loading.
//!
//! The first part of an index is fetched alone, since it announces
//! the number of parts. All the following parts are then fetched
//! concurrently. A part that cannot be fetched is skipped: the
//! mailbox is loaded without its emails.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{Error, MailboxIndex, Result};

/// The shard source trait.
///
/// A shard source knows how to fetch a given part of the index of a
/// mailbox. Parts start from 1.
#[async_trait]
pub trait ShardSource: Send + Sync {
    async fn fetch_part(&self, mailbox: &str, part: usize) -> Result<MailboxIndex>;
}

#[async_trait]
impl<T: ShardSource + ?Sized> ShardSource for Box<T> {
    async fn fetch_part(&self, mailbox: &str, part: usize) -> Result<MailboxIndex> {
        (**self).fetch_part(mailbox, part).await
    }
}

/// The index loader.
#[derive(Clone, Debug)]
pub struct IndexLoader<S: ShardSource> {
    source: S,
}

impl<S: ShardSource> IndexLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Loads the whole index of the given mailbox.
    pub async fn load(&self, mailbox: &str) -> Result<MailboxIndex> {
        self.load_with_progress(mailbox, |_, _| ()).await
    }

    /// Same as [`IndexLoader::load`], calling `progress` with the
    /// number of loaded parts and the total number of parts each
    /// time a part is done, successfully or not.
    pub async fn load_with_progress<F>(&self, mailbox: &str, progress: F) -> Result<MailboxIndex>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        info!("loading index of mailbox {mailbox}");

        let mut index = self
            .source
            .fetch_part(mailbox, 1)
            .await
            .map_err(|err| Error::LoadIndexError(Box::new(err), mailbox.to_owned()))?;

        let total = index.total_parts();
        progress(1, total);

        if total == 1 {
            debug!("mailbox {mailbox} has a single index part");
            return Ok(index);
        }

        debug!("loading {} remaining index parts concurrently", total - 1);
        let loaded = AtomicUsize::new(1);

        let parts = join_all((2..=total).map(|part| {
            let loaded = &loaded;
            let progress = &progress;
            async move {
                let res = self.source.fetch_part(mailbox, part).await;
                progress(loaded.fetch_add(1, Ordering::SeqCst) + 1, total);

                match res {
                    Ok(part) => part,
                    Err(err) => {
                        warn!("cannot load part {part} of mailbox {mailbox}, skipping it: {err}");
                        debug!("{err:?}");
                        MailboxIndex::default()
                    }
                }
            }
        }))
        .await;

        for part in parts {
            index.merge(part);
        }

        info!(
            "loaded {} emails and {} events from mailbox {mailbox}",
            index.emails.len(),
            index.events.len()
        );

        Ok(index)
    }
}
