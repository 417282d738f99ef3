use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::Flag;
use crate::storage::{Error, KvStore, Result};

/// The per-mailbox flag store.
///
/// Holds the identifiers of the read and starred emails of one
/// mailbox, and writes them back to the underlying [`KvStore`] as
/// JSON arrays after each change.
#[derive(Debug)]
pub struct FlagStore<S: KvStore> {
    store: S,
    mailbox: String,
    prefix: String,
    read: BTreeSet<String>,
    starred: BTreeSet<String>,
}

impl<S: KvStore> FlagStore<S> {
    /// Loads the flags of the given mailbox.
    ///
    /// A missing or unreadable flag set is treated as empty.
    pub fn load(store: S, mailbox: impl ToString, prefix: impl ToString) -> Self {
        let mailbox = mailbox.to_string();
        let prefix = prefix.to_string();

        let read = load_set(&store, &Flag::Seen.storage_key(&prefix, &mailbox));
        let starred = load_set(&store, &Flag::Flagged.storage_key(&prefix, &mailbox));

        debug!(
            "loaded {} read and {} starred emails of mailbox {mailbox}",
            read.len(),
            starred.len()
        );

        Self {
            store,
            mailbox,
            prefix,
            read,
            starred,
        }
    }

    pub fn mailbox(&self) -> &str {
        &self.mailbox
    }

    pub fn is_read(&self, id: &str) -> bool {
        self.read.contains(id)
    }

    pub fn is_starred(&self, id: &str) -> bool {
        self.starred.contains(id)
    }

    pub fn contains(&self, id: &str, flag: Flag) -> bool {
        match flag {
            Flag::Seen => self.is_read(id),
            Flag::Flagged => self.is_starred(id),
        }
    }

    /// Marks the given email as read. Does nothing if it is already
    /// read.
    pub fn mark_as_read(&mut self, id: impl ToString) {
        if self.read.insert(id.to_string()) {
            self.save(Flag::Seen);
        }
    }

    /// Toggles the read flag and returns the new state.
    pub fn toggle_read(&mut self, id: impl ToString) -> bool {
        self.toggle(id, Flag::Seen)
    }

    /// Toggles the starred flag and returns the new state.
    pub fn toggle_star(&mut self, id: impl ToString) -> bool {
        self.toggle(id, Flag::Flagged)
    }

    pub fn toggle(&mut self, id: impl ToString, flag: Flag) -> bool {
        let id = id.to_string();
        let set = self.set_mut(flag);

        let flagged = if set.remove(&id) {
            false
        } else {
            set.insert(id);
            true
        };

        self.save(flag);
        flagged
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn set(&self, flag: Flag) -> &BTreeSet<String> {
        match flag {
            Flag::Seen => &self.read,
            Flag::Flagged => &self.starred,
        }
    }

    fn set_mut(&mut self, flag: Flag) -> &mut BTreeSet<String> {
        match flag {
            Flag::Seen => &mut self.read,
            Flag::Flagged => &mut self.starred,
        }
    }

    fn save(&mut self, flag: Flag) {
        let key = flag.storage_key(&self.prefix, &self.mailbox);

        let res = serde_json::to_string(self.set(flag))
            .map_err(|err| Error::SerializeValueError(err, key.clone()))
            .and_then(|value| self.store.set(&key, &value));

        if let Err(err) = res {
            warn!("cannot save {flag} flags of mailbox {}: {err}", self.mailbox);
            debug!("{err:?}");
        }
    }
}

fn load_set(store: &impl KvStore, key: &str) -> BTreeSet<String> {
    let parse = |value: String| -> Result<BTreeSet<String>> {
        serde_json::from_str(&value).map_err(|err| Error::ParseValueError(err, key.to_owned()))
    };

    match store.get(key).and_then(|value| value.map(parse).transpose()) {
        Ok(set) => set.unwrap_or_default(),
        Err(err) => {
            warn!("cannot load flags {key}, starting empty: {err}");
            debug!("{err:?}");
            BTreeSet::new()
        }
    }
}
