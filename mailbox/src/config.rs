//! # Configuration
//!
//! Module dedicated to the mailbox browser configuration. All the
//! options are optional: accessors fall back to sane defaults.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    calendar::DEFAULT_YEAR,
    folder::list::{ListFoldersOptions, DEFAULT_FOLDERS_LIMIT},
    list::DEFAULT_PAGE_SIZE,
    search_query::sort::SearchEmailsSorter,
};

/// The mailbox browser configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MailboxConfig {
    /// The base URL of the static server hosting the mailbox
    /// indexes. Defaults to an empty string, which makes index
    /// URLs relative to the server root.
    pub base_url: Option<String>,

    /// The number of emails per page.
    ///
    /// A page size of 0 disables the pagination and shows all
    /// emails of a folder.
    pub page_size: Option<usize>,

    /// The sort applied when opening a folder, for example `date
    /// desc` or `subject asc`.
    pub default_sort: Option<String>,

    /// The number of regular folders shown before the "show more"
    /// toggle.
    pub folders_limit: Option<usize>,

    /// The prefix of the keys used to persist flags and the current
    /// mailbox.
    pub storage_prefix: Option<String>,

    /// The year the calendar opens on.
    pub calendar_year: Option<i32>,
}

impl MailboxConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or_default()
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Parses the default sort. An invalid sort is reported then
    /// replaced by the default one.
    pub fn default_sort(&self) -> SearchEmailsSorter {
        let Some(sort) = self.default_sort.as_deref() else {
            return SearchEmailsSorter::default();
        };

        sort.parse().unwrap_or_else(|err| {
            warn!("invalid default sort {sort:?}, using date desc: {err}");
            SearchEmailsSorter::default()
        })
    }

    pub fn folders_limit(&self) -> usize {
        self.folders_limit.unwrap_or(DEFAULT_FOLDERS_LIMIT)
    }

    pub fn storage_prefix(&self) -> &str {
        self.storage_prefix.as_deref().unwrap_or_default()
    }

    pub fn calendar_year(&self) -> i32 {
        self.calendar_year.unwrap_or(DEFAULT_YEAR)
    }

    pub fn list_folders_options(&self) -> ListFoldersOptions {
        ListFoldersOptions {
            limit: self.folders_limit(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MailboxConfig;
    use crate::search_query::sort::{
        SearchEmailsSorter, SearchEmailsSorterKind::*, SearchEmailsSorterOrder::*,
    };

    #[test]
    fn defaults() {
        let config = MailboxConfig::default();
        assert_eq!(config.base_url(), "");
        assert_eq!(config.page_size(), 50);
        assert_eq!(config.default_sort(), SearchEmailsSorter(Date, Descending));
        assert_eq!(config.folders_limit(), 10);
        assert_eq!(config.storage_prefix(), "");
        assert_eq!(config.calendar_year(), 2001);
    }

    #[test]
    fn deserialize_kebab_case() {
        let config: MailboxConfig = serde_json::from_str(
            r#"{
                "base-url": "https://archive.example.org",
                "page-size": 0,
                "default-sort": "subject",
                "storage-prefix": "enron_"
            }"#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "https://archive.example.org");
        assert_eq!(config.page_size(), 0);
        assert_eq!(config.default_sort(), SearchEmailsSorter(Subject, Ascending));
        assert_eq!(config.storage_prefix(), "enron_");
        assert_eq!(config.folders_limit(), 10);
    }

    #[test]
    fn invalid_sort_falls_back() {
        let config = MailboxConfig {
            default_sort: Some("size".into()),
            ..Default::default()
        };
        assert_eq!(config.default_sort(), SearchEmailsSorter::default());
    }
}
