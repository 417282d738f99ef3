//! Module dedicated to email flags.
//!
//! Archived emails are immutable, but the user can still mark them
//! as read or starred. Those flags are kept aside, per mailbox, in a
//! [`FlagStore`].

mod store;

use std::{fmt, str::FromStr};

#[doc(inline)]
pub use self::store::FlagStore;
use crate::storage;

/// The email flag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Flag {
    /// Flag used when the email has been opened.
    Seen,

    /// Flag used as a bookmark, displayed as a star.
    Flagged,
}

impl Flag {
    /// Returns the storage key of the flag set of the given mailbox.
    pub fn storage_key(&self, prefix: &str, mailbox: &str) -> String {
        match self {
            Flag::Seen => format!("{prefix}read_{mailbox}"),
            Flag::Flagged => format!("{prefix}starred_{mailbox}"),
        }
    }
}

impl FromStr for Flag {
    type Err = storage::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            seen if seen.eq_ignore_ascii_case("seen") => Ok(Flag::Seen),
            read if read.eq_ignore_ascii_case("read") => Ok(Flag::Seen),
            flagged if flagged.eq_ignore_ascii_case("flagged") => Ok(Flag::Flagged),
            starred if starred.eq_ignore_ascii_case("starred") => Ok(Flag::Flagged),
            unknown => Err(storage::Error::ParseFlagError(unknown.to_owned())),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Seen => write!(f, "seen"),
            Flag::Flagged => write!(f, "flagged"),
        }
    }
}
