//! # Index module
//!
//! Module dedicated to mailbox indexes.
//!
//! A mailbox index is a static JSON document describing the folders,
//! the emails and the calendar events of a mailbox. Big mailboxes
//! split their emails across several numbered parts: the first part
//! announces the total number of parts.
//!
//! The [`load`] module fetches and merges those parts through a
//! [`load::ShardSource`]. The [`http`] module provides the source
//! fetching parts from a static web server, the [`fs`] module the
//! source reading them from a local copy of the archive.

mod error;
pub mod fs;
#[cfg(feature = "http")]
pub mod http;
pub mod load;

use serde::{Deserialize, Serialize};

#[doc(inline)]
pub use self::error::{Error, Result};
use crate::{calendar::CalendarEvent, email::Emails, folder::Folders};

/// The mailbox index, or one of its parts.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MailboxIndex {
    /// The name of the mailbox, for example `bailey-s`.
    #[serde(default)]
    pub mailbox: String,

    #[serde(default)]
    pub folders: Folders,

    #[serde(default)]
    pub emails: Emails,

    #[serde(default)]
    pub events: Vec<CalendarEvent>,

    /// The number of parts of the index. Only meaningful in the first
    /// part, absent means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_parts: Option<usize>,
}

impl MailboxIndex {
    /// Returns the number of parts announced by the index, at least
    /// 1.
    pub fn total_parts(&self) -> usize {
        self.total_parts.unwrap_or(1).max(1)
    }

    /// Appends the emails and the events of the given part.
    ///
    /// The folders and the name of the part are ignored: only the
    /// first part defines them.
    pub fn merge(&mut self, part: MailboxIndex) {
        self.emails.extend(part.emails);
        self.events.extend(part.events);
    }
}

/// Returns the file name of the given part, starting from 1.
pub fn part_file_name(part: usize) -> String {
    if part <= 1 {
        String::from("index.json")
    } else {
        format!("index-part-{part}.json")
    }
}
