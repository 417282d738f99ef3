//! Module dedicated to the application state.
//!
//! The [`AppState`] holds everything the user can change while
//! browsing a mailbox. Transitions are plain methods: rendering is
//! left to the caller, who runs [`Mailbox::list`](crate::Mailbox::list)
//! or [`Mailbox::open`](crate::Mailbox::open) against the new state.

use tracing::trace;

use crate::{
    list::ListEmailsOptions,
    search_query::{sort::SearchEmailsSorter, SearchEmailsQuery},
    MailboxConfig,
};

/// The application state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppState {
    /// The name of the browsed mailbox.
    pub mailbox: String,

    /// The current folder, `None` when the mailbox has no folder.
    pub folder: Option<String>,

    /// The current page, starting from 1.
    pub page: usize,

    pub page_size: usize,

    /// The email list search term.
    pub search: String,

    pub sorter: SearchEmailsSorter,

    /// The identifier of the opened email.
    pub open_email: Option<String>,

    /// The in-body search term of the opened email.
    pub body_search: String,

    /// The position of the selected row in the current page.
    pub selected: Option<usize>,

    pub folder_search: String,
    pub show_all_folders: bool,
}

impl AppState {
    pub fn new(mailbox: impl ToString, config: &MailboxConfig) -> Self {
        Self {
            mailbox: mailbox.to_string(),
            folder: None,
            page: 1,
            page_size: config.page_size(),
            search: String::new(),
            sorter: config.default_sort(),
            open_email: None,
            body_search: String::new(),
            selected: None,
            folder_search: String::new(),
            show_all_folders: false,
        }
    }

    /// Builds the list options matching the state.
    pub fn list_options(&self) -> ListEmailsOptions {
        ListEmailsOptions {
            page_size: self.page_size,
            page: self.page,
            query: Some(SearchEmailsQuery::new(&self.search, self.sorter.clone())),
        }
    }

    pub fn is_viewing_email(&self) -> bool {
        self.open_email.is_some()
    }

    /// Opens the given folder, resetting the page, the search and the
    /// opened email.
    pub fn open_folder(&mut self, folder: impl ToString) {
        self.folder = Some(folder.to_string());
        self.page = 1;
        self.search.clear();
        self.close_email();
        self.selected = None;
        trace!("state after opening folder: {self:?}");
    }

    /// Applies a search term.
    ///
    /// When an email is opened, the term only highlights the email
    /// body. Otherwise it filters the email list from the first
    /// page.
    pub fn search(&mut self, term: impl ToString) {
        let term = term.to_string();

        if self.is_viewing_email() {
            self.body_search = term.trim().to_owned();
        } else {
            self.search = term;
            self.page = 1;
            self.selected = None;
        }
    }

    /// Changes the sort of the email list, from the first page.
    pub fn sort_by(&mut self, sorter: SearchEmailsSorter) {
        self.sorter = sorter;
        self.page = 1;
        self.selected = None;
    }

    /// Goes to the next page, if any.
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page < total_pages {
            self.page += 1;
            self.selected = None;
            true
        } else {
            false
        }
    }

    /// Goes to the previous page, if any.
    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            self.selected = None;
            true
        } else {
            false
        }
    }

    /// Jumps to the given page. Out of range pages are ignored.
    pub fn jump_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if (1..=total_pages).contains(&page) {
            self.page = page;
            self.selected = None;
            true
        } else {
            false
        }
    }

    /// Selects the next row. Selects the first one when none is
    /// selected.
    pub fn select_next(&mut self, rows: usize) {
        self.selected = match self.selected {
            _ if rows == 0 => None,
            None => Some(0),
            Some(pos) => Some((pos + 1).min(rows - 1)),
        };
    }

    /// Selects the previous row. Selects the first one when none is
    /// selected.
    pub fn select_previous(&mut self, rows: usize) {
        self.selected = match self.selected {
            _ if rows == 0 => None,
            None => Some(0),
            Some(pos) => Some(pos.saturating_sub(1).min(rows - 1)),
        };
    }

    pub fn open_email(&mut self, id: impl ToString) {
        self.open_email = Some(id.to_string());
        self.body_search.clear();
    }

    pub fn close_email(&mut self) {
        self.open_email = None;
        self.body_search.clear();
    }

    pub fn search_folders(&mut self, term: impl ToString) {
        self.folder_search = term.to_string();
    }

    pub fn toggle_show_all_folders(&mut self) {
        self.show_all_folders = !self.show_all_folders;
    }
}
