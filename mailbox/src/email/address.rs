//! Module dedicated to email addresses.
//!
//! This core concept of this module is the [Address] structure, which
//! represents a sender or a recipient of an archived email.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The email address.
///
/// Archived addresses are loose: the name, the email or both may be
/// missing or empty. [`Address::display_name`] defines which one
/// should be shown.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Address {
    /// Builds a new address from an optional name and an email
    /// address.
    pub fn new(name: Option<impl ToString>, email: impl ToString) -> Self {
        Self {
            name: name.map(|name| name.to_string()),
            email: Some(email.to_string()),
        }
    }

    /// Builds a new address from an email address only.
    pub fn new_nameless(email: impl ToString) -> Self {
        Self::new(Option::<String>::None, email)
    }

    /// Returns the name if not empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns the email if not empty.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    /// Returns the name, then the email, if any of them is not
    /// empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name().or_else(|| self.email())
    }

    /// Same as [`Address::display_name`], with a fallback.
    pub fn display_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.display_name().unwrap_or(fallback)
    }

    /// Returns `true` if either the name or the email contains the
    /// given lowercased term.
    pub fn contains(&self, term: &str) -> bool {
        let name = self.name.as_deref().unwrap_or_default();
        let email = self.email.as_deref().unwrap_or_default();
        name.to_lowercase().contains(term) || email.to_lowercase().contains(term)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self.email()) {
            (Some(name), Some(email)) => write!(f, "{name} <{email}>"),
            (Some(name), None) => write!(f, "{name}"),
            (None, Some(email)) => write!(f, "{email}"),
            (None, None) => Ok(()),
        }
    }
}
