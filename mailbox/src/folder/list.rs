//! Module dedicated to the folder listing.
//!
//! The listing shows special folders first, always, then regular
//! folders filtered by the folder search, sorted by name and
//! truncated to a limit unless the user asked to see them all.

use super::{Folder, Folders};

/// The default number of regular folders shown before truncating.
pub const DEFAULT_FOLDERS_LIMIT: usize = 10;

/// The list folders options.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListFoldersOptions {
    /// The folder search term, matched case-insensitively against
    /// folder names and display names.
    pub search: String,

    /// Shows all regular folders, regardless of the limit.
    pub show_all: bool,

    pub limit: usize,
}

impl Default for ListFoldersOptions {
    fn default() -> Self {
        Self {
            search: String::new(),
            show_all: false,
            limit: DEFAULT_FOLDERS_LIMIT,
        }
    }
}

/// The folder listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FolderListing<'a> {
    pub special: Vec<&'a Folder>,

    /// The regular folders to display.
    pub regular: Vec<&'a Folder>,

    /// The number of regular folders hidden by the limit.
    pub hidden: usize,

    /// The label of the show more/less toggle, when the toggle
    /// applies.
    pub toggle_label: Option<String>,
}

impl<'a> FolderListing<'a> {
    pub fn new(folders: &'a Folders, opts: &ListFoldersOptions) -> Self {
        let (special, regular) = folders.partition();
        let search = opts.search.to_lowercase();

        let mut regular: Vec<_> = regular
            .into_iter()
            .filter(|folder| {
                search.is_empty()
                    || folder.name.to_lowercase().contains(&search)
                    || folder.display_name().to_lowercase().contains(&search)
            })
            .collect();

        regular.sort_by_cached_key(|folder| folder.name.to_lowercase());

        let total = regular.len();
        let show_all = opts.show_all || !search.is_empty() || total <= opts.limit;

        let hidden = if show_all {
            0
        } else {
            regular.truncate(opts.limit);
            total - opts.limit
        };

        let toggle_label = if total > opts.limit && search.is_empty() {
            Some(if show_all {
                String::from("- Show Less")
            } else {
                format!("+ Show More ({hidden} more)")
            })
        } else {
            None
        };

        Self {
            special,
            regular,
            hidden,
            toggle_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FolderListing, ListFoldersOptions};
    use crate::folder::{Folder, Folders};

    fn folders() -> Folders {
        let mut folders: Folders = (0..13)
            .map(|i| Folder::new(format!("bailey-s/Project {:02}", 12 - i), i))
            .collect();
        folders.push(Folder::new("bailey-s/archive", 1));
        folders.push(Folder::new("bailey-s/Inbox", 3));
        folders
    }

    fn names<'a>(folders: &[&'a Folder]) -> Vec<&'a str> {
        folders.iter().map(|folder| folder.name.as_str()).collect()
    }

    #[test]
    fn truncates_regular_folders() {
        let folders = folders();
        let listing = FolderListing::new(&folders, &ListFoldersOptions::default());

        assert_eq!(names(&listing.special), vec!["bailey-s/Inbox"]);
        assert_eq!(listing.regular.len(), 10);
        assert_eq!(listing.regular[0].name, "bailey-s/archive");
        assert_eq!(listing.regular[1].name, "bailey-s/Project 00");
        assert_eq!(listing.hidden, 4);
        assert_eq!(
            listing.toggle_label.as_deref(),
            Some("+ Show More (4 more)")
        );
    }

    #[test]
    fn shows_all_folders() {
        let folders = folders();
        let opts = ListFoldersOptions {
            show_all: true,
            ..Default::default()
        };
        let listing = FolderListing::new(&folders, &opts);

        assert_eq!(listing.regular.len(), 14);
        assert_eq!(listing.hidden, 0);
        assert_eq!(listing.toggle_label.as_deref(), Some("- Show Less"));
    }

    #[test]
    fn searches_folders() {
        let folders = folders();
        let opts = ListFoldersOptions {
            search: "PROJECT 1".into(),
            ..Default::default()
        };
        let listing = FolderListing::new(&folders, &opts);

        assert_eq!(
            names(&listing.regular),
            vec![
                "bailey-s/Project 10",
                "bailey-s/Project 11",
                "bailey-s/Project 12"
            ]
        );
        assert_eq!(names(&listing.special), vec!["bailey-s/Inbox"]);
        assert_eq!(listing.toggle_label, None);
    }
}
