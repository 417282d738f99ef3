//! # Search emails filter
//!
//! The filter keeps emails whose subject, sender or one of the
//! recipients contains a given term, case-insensitively.

use crate::email::Email;

/// The search emails filter.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SearchEmailsFilter {
    /// The search term as typed, never empty.
    term: String,

    /// The lowercased term used for matching.
    needle: String,
}

impl SearchEmailsFilter {
    /// Builds a filter from the given term. Returns `None` if the
    /// term is empty.
    pub fn new(term: impl AsRef<str>) -> Option<Self> {
        let term = term.as_ref();

        if term.is_empty() {
            None
        } else {
            Some(Self {
                term: term.to_owned(),
                needle: term.to_lowercase(),
            })
        }
    }

    /// Returns the term as typed, used for display.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns `true` if the given email matches the filter.
    ///
    /// Only the `to` recipients are searched, carbon copies are
    /// not.
    pub fn matches(&self, email: &Email) -> bool {
        email.subject.to_lowercase().contains(&self.needle)
            || email
                .from
                .as_ref()
                .map(|from| from.contains(&self.needle))
                .unwrap_or_default()
            || email.to.iter().any(|to| to.contains(&self.needle))
    }
}
