//! # Search emails sort query
//!
//! This module exposes [`SearchEmailsSorter`], a structure that
//! helps you to sort emails.
//!
//! The sorter can be parsed from a string, see the [`parser::sorter`]
//! parser for more details.

pub mod parser;

use std::{cmp::Ordering, fmt, str::FromStr};

use chumsky::Parser;

use super::Error;
use crate::email::{date, Email};

/// The search emails sorter.
///
/// The sorter is composed of a kind (date, from, subject) and an
/// order (ascending, descending). The default sorter shows the most
/// recent emails first.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SearchEmailsSorter(
    /// The search emails sorter kind.
    pub SearchEmailsSorterKind,
    /// The search emails sorter order.
    pub SearchEmailsSorterOrder,
);

impl SearchEmailsSorter {
    /// Create a new search emails sorter from a kind and an order.
    pub fn new(kind: SearchEmailsSorterKind, order: SearchEmailsSorterOrder) -> Self {
        Self(kind, order)
    }

    /// Compares two emails according to the sorter.
    pub fn compare(&self, a: &Email, b: &Email) -> Ordering {
        self.1.apply(self.0.key(a).cmp(&self.0.key(b)))
    }

    /// Sorts the given emails in place.
    ///
    /// The sort is stable: emails with equal keys keep their
    /// relative order, whatever the sort order.
    pub fn sort(&self, emails: &mut Vec<&Email>) {
        let mut keyed: Vec<_> = emails
            .drain(..)
            .map(|email| (self.0.key(email), email))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| self.1.apply(a.cmp(b)));
        emails.extend(keyed.into_iter().map(|(_, email)| email));
    }
}

impl Default for SearchEmailsSorter {
    fn default() -> Self {
        Self(
            SearchEmailsSorterKind::Date,
            SearchEmailsSorterOrder::Descending,
        )
    }
}

impl From<(SearchEmailsSorterKind, SearchEmailsSorterOrder)> for SearchEmailsSorter {
    fn from((kind, order): (SearchEmailsSorterKind, SearchEmailsSorterOrder)) -> Self {
        SearchEmailsSorter::new(kind, order)
    }
}

impl From<(SearchEmailsSorterKind, Option<SearchEmailsSorterOrder>)> for SearchEmailsSorter {
    fn from((kind, order): (SearchEmailsSorterKind, Option<SearchEmailsSorterOrder>)) -> Self {
        (kind, order.unwrap_or_default()).into()
    }
}

impl From<SearchEmailsSorterKind> for SearchEmailsSorter {
    fn from(kind: SearchEmailsSorterKind) -> Self {
        (kind, None).into()
    }
}

impl FromStr for SearchEmailsSorter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();

        let sorter = parser::sorter()
            .parse(input.as_str())
            .into_result()
            .map_err(|errs| {
                let errs = errs.into_iter().map(|err| err.to_string()).collect();
                Error::ParseSortQueryError(errs, s.to_owned())
            });

        sorter
    }
}

impl fmt::Display for SearchEmailsSorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

/// The search emails sorter kind.
///
/// Represents the property the sorter should sort emails from.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SearchEmailsSorterKind {
    /// Sort emails by date. Unknown dates count as the epoch.
    Date,

    /// Sort emails by sender display name, case-insensitively.
    From,

    /// Sort emails by subject, case-insensitively.
    Subject,
}

impl SearchEmailsSorterKind {
    fn key(&self, email: &Email) -> SortKey {
        match self {
            Self::Date => SortKey::Timestamp(date::timestamp_millis(email.date().as_ref())),
            Self::From => SortKey::Text(
                email
                    .from_display_name()
                    .unwrap_or_default()
                    .to_lowercase(),
            ),
            Self::Subject => SortKey::Text(email.subject.to_lowercase()),
        }
    }
}

impl fmt::Display for SearchEmailsSorterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::From => write!(f, "from"),
            Self::Subject => write!(f, "subject"),
        }
    }
}

/// The search emails sorter order.
///
/// Defines in which order emails should be sorted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SearchEmailsSorterOrder {
    /// Sort emails by ascending order.
    #[default]
    Ascending,

    /// Sort emails by descending order.
    Descending,
}

impl SearchEmailsSorterOrder {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SearchEmailsSorterOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum SortKey {
    Timestamp(i64),
    Text(String),
}
