//! # Search emails sort query string parser
//!
//! This module contains parsers needed to parse a search emails sort
//! query from a string slice.
//!
//! Parsing is based on the great lib [`chumsky`].

use chumsky::prelude::*;

use super::{SearchEmailsSorter, SearchEmailsSorterKind, SearchEmailsSorterOrder};

pub(crate) type ParserError<'a> = extra::Err<Rich<'a, char>>;

/// The emails search sort query string parser.
///
/// A sort query string should be composed of a kind (sort key)
/// followed by an optional order, separated by spaces.
///
/// # Kinds
///
/// There is actually 3 kinds, as defined in
/// [`SearchEmailsSorterKind`]:
///
/// - `date [order]`
/// - `from [order]`
/// - `subject [order]`
///
/// The order can be omitted. If so, the ascending order is used by
/// default.
///
/// # Orders
///
/// There is actually 2 orders, as defined in
/// [`SearchEmailsSorterOrder`]:
///
/// - `<kind> asc`
/// - `<kind> desc`
pub fn sorter<'a>() -> impl Parser<'a, &'a str, SearchEmailsSorter, ParserError<'a>> + Clone {
    kind()
        .then(
            just(' ')
                .labelled("space after sort kind")
                .repeated()
                .at_least(1)
                .ignore_then(order())
                .or_not(),
        )
        .then_ignore(end())
        .map(SearchEmailsSorter::from)
}

fn kind<'a>() -> impl Parser<'a, &'a str, SearchEmailsSorterKind, ParserError<'a>> + Clone {
    choice((
        just("date")
            .labelled("`date`")
            .to(SearchEmailsSorterKind::Date),
        just("from")
            .labelled("`from`")
            .to(SearchEmailsSorterKind::From),
        just("subject")
            .labelled("`subject`")
            .to(SearchEmailsSorterKind::Subject),
    ))
}

fn order<'a>() -> impl Parser<'a, &'a str, SearchEmailsSorterOrder, ParserError<'a>> + Clone {
    choice((
        just("asc")
            .labelled("`asc`")
            .to(SearchEmailsSorterOrder::Ascending),
        just("desc")
            .labelled("`desc`")
            .to(SearchEmailsSorterOrder::Descending),
    ))
}
