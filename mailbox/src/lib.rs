#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
//! Rust library to browse archived mailboxes.
//!
//! An archived mailbox is a static, pre-built JSON index (folders,
//! emails and calendar events), optionally split across several
//! numbered shard files. This library loads such an index and
//! exposes render-agnostic view models for a folder list, a
//! paginated email list, an email detail and a calendar.
//!
//! The main entry points are:
//!
//! - [`IndexLoader`](crate::index::load::IndexLoader), which fetches
//!   the index shards of a mailbox concurrently,
//! - [`Mailbox`], built from a loaded index, which runs the
//!   filter-sort-paginate pipeline against an [`AppState`],
//! - [`Calendar`](crate::calendar::Calendar), which holds the
//!   calendar view state and computes day, week and month ranges.
//!
//! Persistence of the read and starred flags goes through the
//! [`KvStore`](crate::storage::KvStore) trait.

pub mod calendar;
pub mod config;
mod de;
pub mod email;
mod error;
pub mod folder;
pub mod index;
mod mailbox;
pub mod permalink;
pub mod sanitize;
pub mod session;
pub mod state;
pub mod storage;

#[doc(inline)]
pub use crate::{
    config::MailboxConfig,
    email::{flag, list, search_query},
    error::{Error, Result},
    mailbox::Mailbox,
    state::AppState,
};
