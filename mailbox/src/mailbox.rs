//! Module dedicated to loaded mailboxes.
//!
//! The [`Mailbox`] is the entry point of the library once an index
//! is loaded: it builds the folder listing, the email pages, the
//! email details and the calendar from an [`AppState`].

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    calendar::{Calendar, CalendarEvent},
    email::{detail::EmailDetail, flag::FlagStore, Emails},
    folder::{
        list::{FolderListing, ListFoldersOptions},
        Folder, Folders,
    },
    index::{
        load::{IndexLoader, ShardSource},
        MailboxIndex,
    },
    list::{self, cache::FolderCache, Page},
    permalink::Permalink,
    sanitize::{DefaultSanitizer, Sanitize},
    session,
    storage::KvStore,
    AppState, Error, MailboxConfig, Result,
};

/// The loaded mailbox.
#[derive(Clone, Debug)]
pub struct Mailbox {
    name: String,
    index: MailboxIndex,
    config: MailboxConfig,
}

impl Mailbox {
    pub fn new(name: impl ToString, index: MailboxIndex, config: MailboxConfig) -> Self {
        Self {
            name: name.to_string(),
            index,
            config,
        }
    }

    /// Loads the index of the given mailbox using the given loader.
    pub async fn load<S: ShardSource>(
        loader: &IndexLoader<S>,
        name: &str,
        config: MailboxConfig,
    ) -> Result<Self> {
        let index = loader.load(name).await?;
        Ok(Self::new(name, index, config))
    }

    /// Returns the name the mailbox was requested with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the title of the mailbox, for example `WebMail: Bailey
    /// S`.
    pub fn title(&self) -> String {
        let name = if self.index.mailbox.is_empty() {
            &self.name
        } else {
            &self.index.mailbox
        };

        format!("WebMail: {}", session::format_mailbox_name(name))
    }

    pub fn config(&self) -> &MailboxConfig {
        &self.config
    }

    pub fn index(&self) -> &MailboxIndex {
        &self.index
    }

    pub fn folders(&self) -> &Folders {
        &self.index.folders
    }

    pub fn emails(&self) -> &Emails {
        &self.index.emails
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.index.events
    }

    pub fn default_folder(&self) -> Option<&Folder> {
        self.index.folders.default_folder()
    }

    /// Builds the initial state of the mailbox from a permalink.
    ///
    /// An unknown folder falls back to the default folder, an
    /// unknown email is not opened.
    pub fn resolve(&self, link: &Permalink) -> AppState {
        let mut state = AppState::new(&self.name, &self.config);

        let folder = link
            .folder
            .as_deref()
            .filter(|folder| {
                let exists = self.index.folders.contains(folder);
                if !exists {
                    debug!("folder {folder} not found, opening the default folder");
                }
                exists
            })
            .or_else(|| self.default_folder().map(|folder| folder.name.as_str()));

        if let Some(folder) = folder {
            state.open_folder(folder);
        }

        if let Some(id) = link.email.as_deref() {
            if self.index.emails.find(id).is_some() {
                state.open_email(id);
            } else {
                debug!("email {id} not found in mailbox {}, ignoring it", self.name);
            }
        }

        state
    }

    /// Builds the folder listing of the given state.
    pub fn folder_listing(&self, state: &AppState) -> FolderListing<'_> {
        let opts = ListFoldersOptions {
            search: state.folder_search.clone(),
            show_all: state.show_all_folders,
            ..self.config.list_folders_options()
        };

        FolderListing::new(&self.index.folders, &opts)
    }

    /// Lists the emails of the current folder of the given state.
    pub fn list(&self, state: &AppState, cache: &mut FolderCache) -> Page<'_> {
        let folder = state.folder.as_deref().unwrap_or_default();
        list::select_cached(&self.index.emails, folder, &state.list_options(), cache)
    }

    /// Opens the given email, marking it as read.
    pub fn open<S: KvStore>(
        &self,
        state: &AppState,
        id: &str,
        flags: &mut FlagStore<S>,
    ) -> Result<EmailDetail> {
        self.open_with(state, id, flags, &DefaultSanitizer)
    }

    /// Same as [`Mailbox::open`], with a custom body sanitizer.
    pub fn open_with<S: KvStore>(
        &self,
        state: &AppState,
        id: &str,
        flags: &mut FlagStore<S>,
        sanitizer: &impl Sanitize,
    ) -> Result<EmailDetail> {
        let email = self
            .index
            .emails
            .find(id)
            .ok_or_else(|| Error::FindEmailError(id.to_owned(), self.name.clone()))?;

        info!("opening email {id} of mailbox {}", self.name);
        flags.mark_as_read(id);

        Ok(EmailDetail::new(email, &state.mailbox, sanitizer))
    }

    /// Loads the flags of the mailbox from the given store.
    pub fn flags<S: KvStore>(&self, store: S) -> FlagStore<S> {
        FlagStore::load(store, &self.name, self.config.storage_prefix())
    }

    /// Opens the calendar of the mailbox.
    pub fn calendar(&self, today: NaiveDate) -> Calendar {
        Calendar::new(self.config.calendar_year(), today)
    }
}
