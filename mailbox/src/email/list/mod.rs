//! Module dedicated to email listing.
//!
//! Listing a folder runs the filter-sort-paginate pipeline: keep the
//! emails of the folder, keep those matching the search query, sort
//! them, then cut the requested page.

pub mod cache;

use std::ops::Range;

use chrono::NaiveDateTime;
use tracing::debug;

use self::cache::{Fingerprint, FolderCache};
use super::{date, flag::FlagStore, Email, UNKNOWN_SENDER};
use crate::{search_query::SearchEmailsQuery, storage::KvStore};

/// The default number of emails per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// The list emails options.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListEmailsOptions {
    /// The size of a page. A page size of 0 disables the pagination
    /// and shows all emails on a single page.
    pub page_size: usize,

    /// The requested page, starting from 1. Out of range pages are
    /// clamped to the nearest valid page.
    pub page: usize,

    pub query: Option<SearchEmailsQuery>,
}

impl Default for ListEmailsOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
            query: None,
        }
    }
}

/// A page of emails, with the information needed to navigate across
/// pages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<'a> {
    /// The emails of the page, filtered and sorted.
    pub emails: Vec<&'a Email>,

    /// The page number, starting from 1.
    pub page: usize,

    pub page_size: usize,

    /// The number of emails matching the query, across all pages.
    pub total: usize,

    /// The number of pages, 0 when nothing matches.
    pub total_pages: usize,

    /// The search term, when a search is active.
    pub search: Option<String>,
}

impl<'a> Page<'a> {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` when there is more than one page to navigate.
    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1
    }

    /// Returns the pagination summary, for example `Page 2 of 5 (212
    /// emails)`.
    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} ({} emails)",
            self.page, self.total_pages, self.total
        )
    }

    /// Returns the search summary when a search is active, for
    /// example `3 results found for "gas"`.
    pub fn search_summary(&self) -> Option<String> {
        let term = self.search.as_ref()?;
        let plural = if self.total == 1 { "" } else { "s" };
        Some(format!("{} result{plural} found for \"{term}\"", self.total))
    }

    /// Returns the message to display when the page is empty.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.is_empty() {
            None
        } else if self.search.is_some() {
            Some("No emails found matching your search")
        } else {
            Some("No emails found")
        }
    }

    /// Builds the displayable rows of the page.
    pub fn rows<S: KvStore>(&self, flags: &FlagStore<S>, now: NaiveDateTime) -> Vec<EmailRow> {
        self.emails
            .iter()
            .map(|email| EmailRow::new(email, flags, now))
            .collect()
    }
}

/// The displayable row of an email in a list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmailRow {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub date: String,
    pub has_attachments: bool,
    pub read: bool,
    pub starred: bool,
}

impl EmailRow {
    pub fn new<S: KvStore>(email: &Email, flags: &FlagStore<S>, now: NaiveDateTime) -> Self {
        Self {
            id: email.id.clone(),
            from: email.from_display_name().unwrap_or(UNKNOWN_SENDER).to_owned(),
            subject: email.subject_or_placeholder().to_owned(),
            date: date::format_list_date(email.date().as_ref(), now),
            has_attachments: email.has_attachments,
            read: flags.is_read(&email.id),
            starred: flags.is_starred(&email.id),
        }
    }
}

/// Returns the positions of the emails belonging to the given
/// folder, in index order.
pub fn folder_positions(emails: &[Email], folder: &str) -> Vec<usize> {
    emails
        .iter()
        .enumerate()
        .filter(|(_, email)| email.folder == folder)
        .map(|(pos, _)| pos)
        .collect()
}

/// Filters then sorts the given emails.
pub fn apply_query<'a>(
    emails: impl IntoIterator<Item = &'a Email>,
    query: &SearchEmailsQuery,
) -> Vec<&'a Email> {
    let mut emails: Vec<&Email> = match &query.filter {
        Some(filter) => emails
            .into_iter()
            .filter(|email| filter.matches(email))
            .collect(),
        None => emails.into_iter().collect(),
    };

    query.sorter.sort(&mut emails);
    emails
}

/// Computes the bounds of a page.
///
/// Returns the clamped page number, the total number of pages and
/// the range of the page in a list of `total` items.
pub fn paginate(total: usize, page: usize, page_size: usize) -> (usize, usize, Range<usize>) {
    if total == 0 {
        return (1, 0, 0..0);
    }

    if page_size == 0 {
        return (1, 1, 0..total);
    }

    let total_pages = total.div_ceil(page_size);
    let page = page.clamp(1, total_pages);
    let page_begin = (page - 1) * page_size;
    let page_end = total.min(page_begin + page_size);
    debug!("page {page}/{total_pages}: {page_begin}..{page_end}");

    (page, total_pages, page_begin..page_end)
}

/// Lists the emails of the given folder.
pub fn select<'a>(emails: &'a [Email], folder: &str, opts: &ListEmailsOptions) -> Page<'a> {
    let positions = folder_positions(emails, folder);
    build_page(emails, &positions, opts)
}

/// Same as [`select`], reusing the folder positions stored in the
/// given cache when the query has no search term.
pub fn select_cached<'a>(
    emails: &'a [Email],
    folder: &str,
    opts: &ListEmailsOptions,
    cache: &mut FolderCache,
) -> Page<'a> {
    let search = opts
        .query
        .as_ref()
        .and_then(|query| query.filter.as_ref())
        .map(|filter| filter.term())
        .unwrap_or_default();

    let fingerprint = Fingerprint::new(folder, search);
    let positions = cache.get_or_insert_with(fingerprint, || folder_positions(emails, folder));
    build_page(emails, &positions, opts)
}

fn build_page<'a>(emails: &'a [Email], positions: &[usize], opts: &ListEmailsOptions) -> Page<'a> {
    let folder_emails = positions.iter().filter_map(|pos| emails.get(*pos));

    let default_query = SearchEmailsQuery::default();
    let query = opts.query.as_ref().unwrap_or(&default_query);
    let mut filtered = apply_query(folder_emails, query);

    let total = filtered.len();
    let (page, total_pages, range) = paginate(total, opts.page, opts.page_size);
    filtered.truncate(range.end);
    let emails = filtered.split_off(range.start);

    Page {
        emails,
        page,
        page_size: opts.page_size,
        total,
        total_pages,
        search: query
            .filter
            .as_ref()
            .map(|filter| filter.term().to_owned()),
    }
}
