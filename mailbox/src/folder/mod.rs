//! # Folder module
//!
//! Module dedicated to archived folders.
//!
//! The main entities are [`FolderKind`], [`Folder`] and [`Folders`].
//! The [`list`] module builds the folder listing displayed next to
//! the email list.

pub mod list;

use std::{
    collections::BTreeMap,
    fmt,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Deserializer, Serialize};

pub const INBOX: &str = "Inbox";
pub const SENT: &str = "Sent";

/// The special folder kind enumeration.
///
/// Special folders are pinned on top of the folder listing, they are
/// never filtered nor truncated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FolderKind {
    Inbox,
    SentItems,
    Sent,
    AllDocuments,
    AllMail,
    AllItems,
}

impl FolderKind {
    /// All the special folder kinds, in matching order.
    pub const ALL: [FolderKind; 6] = [
        Self::Inbox,
        Self::SentItems,
        Self::Sent,
        Self::AllDocuments,
        Self::AllMail,
        Self::AllItems,
    ];

    /// Returns the lowercased pattern of the kind.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::SentItems => "sent items",
            Self::Sent => "sent",
            Self::AllDocuments => "all documents",
            Self::AllMail => "all mail",
            Self::AllItems => "all items",
        }
    }

    /// Finds the kind of the given folder name.
    ///
    /// A name matches a kind when, lowercased, it equals its pattern
    /// or ends with `/` followed by its pattern.
    pub fn from_name(name: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref().to_lowercase();

        Self::ALL.into_iter().find(|kind| {
            let pattern = kind.pattern();
            name == pattern
                || name
                    .strip_suffix(pattern)
                    .map(|prefix| prefix.ends_with('/'))
                    .unwrap_or_default()
        })
    }

    /// Return `true` if the given string matches the Inbox variant.
    pub fn matches_inbox(folder: impl AsRef<str>) -> bool {
        matches!(Self::from_name(folder), Some(Self::Inbox))
    }
}

impl fmt::Display for FolderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pattern())
    }
}

/// The folder structure.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Folder {
    /// The path of the folder, matched against the `folder` field
    /// of emails.
    pub name: String,

    /// The number of emails of the folder, as announced by the
    /// index.
    #[serde(default)]
    pub count: usize,
}

impl Folder {
    pub fn new(name: impl ToString, count: usize) -> Self {
        Self {
            name: name.to_string(),
            count,
        }
    }

    /// Returns the last segment of the folder path, or `Inbox` when
    /// empty.
    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Returns the display name of the given folder path.
pub fn display_name(name: &str) -> &str {
    let name = name.trim_start_matches('/');

    match name.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => INBOX,
    }
}

/// The list of folders.
///
/// In an index, folders are either a list of `{name, count}` objects
/// or a map of folder names to email identifiers. Both shapes
/// deserialize to the same list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Folders(Vec<Folder>);

impl Folders {
    pub fn find(&self, name: &str) -> Option<&Folder> {
        self.iter().find(|folder| folder.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Returns the default folder: the first one containing `Inbox`,
    /// otherwise the first one.
    pub fn default_folder(&self) -> Option<&Folder> {
        self.iter()
            .find(|folder| folder.name.contains(INBOX))
            .or_else(|| self.first())
    }

    /// Splits the folders into special and regular ones.
    ///
    /// Only the first folder of each special kind is special, the
    /// following ones are regular. Special folders are ordered Inbox
    /// first, then Sent, then the others in index order.
    pub fn partition(&self) -> (Vec<&Folder>, Vec<&Folder>) {
        let mut seen = Vec::new();
        let mut special = Vec::new();
        let mut regular = Vec::new();

        for folder in self.iter() {
            match FolderKind::from_name(&folder.name) {
                Some(kind) if !seen.contains(&kind) => {
                    seen.push(kind);
                    special.push(folder);
                }
                _ => regular.push(folder),
            }
        }

        special.sort_by_key(|folder| {
            if folder.name.contains(INBOX) {
                0
            } else if folder.name.contains(SENT) {
                1
            } else {
                2
            }
        });

        (special, regular)
    }
}

impl Deref for Folders {
    type Target = Vec<Folder>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Folders {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Folder>> for Folders {
    fn from(folders: Vec<Folder>) -> Self {
        Self(folders)
    }
}

impl FromIterator<Folder> for Folders {
    fn from_iter<T: IntoIterator<Item = Folder>>(iter: T) -> Self {
        Folders(iter.into_iter().collect())
    }
}

impl IntoIterator for Folders {
    type Item = Folder;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FoldersRepr {
    List(Vec<Folder>),
    Map(BTreeMap<String, serde_json::Value>),
}

impl<'de> Deserialize<'de> for Folders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let folders = match FoldersRepr::deserialize(deserializer)? {
            FoldersRepr::List(folders) => folders,
            FoldersRepr::Map(map) => map
                .into_iter()
                .map(|(name, ids)| {
                    let count = ids.as_array().map(Vec::len).unwrap_or_default();
                    Folder::new(name, count)
                })
                .collect(),
        };

        Ok(Self(folders))
    }
}

#[cfg(test)]
mod tests {
    use super::{display_name, Folder, FolderKind, Folders};

    fn folders(names: &[&str]) -> Folders {
        names.iter().map(|name| Folder::new(name, 0)).collect()
    }

    #[test]
    fn folder_kinds() {
        assert_eq!(FolderKind::from_name("INBOX"), Some(FolderKind::Inbox));
        assert_eq!(
            FolderKind::from_name("bailey-s/Sent Items"),
            Some(FolderKind::SentItems)
        );
        assert_eq!(FolderKind::from_name("lay-k/sent"), Some(FolderKind::Sent));
        assert_eq!(FolderKind::from_name("lay-k/unsent"), None);
        assert_eq!(FolderKind::from_name("inbox/projects"), None);
        assert!(FolderKind::matches_inbox("bailey-s/Inbox"));
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("bailey-s/Inbox/Projects"), "Projects");
        assert_eq!(display_name("/Deleted Items"), "Deleted Items");
        assert_eq!(display_name(""), "Inbox");
        assert_eq!(display_name("bailey-s/"), "Inbox");
    }

    #[test]
    fn default_folder() {
        let names = folders(&["a/Notes", "a/Inbox", "a/Sent"]);
        assert_eq!(names.default_folder().unwrap().name, "a/Inbox");

        let names = folders(&["a/Notes", "a/Sent"]);
        assert_eq!(names.default_folder().unwrap().name, "a/Notes");

        assert_eq!(Folders::default().default_folder(), None);
    }

    #[test]
    fn partition_special_folders() {
        let names = folders(&[
            "a/All Documents",
            "a/Sent Items",
            "a/Projects",
            "a/Inbox",
            "b/Inbox",
        ]);
        let (special, regular) = names.partition();

        let special: Vec<_> = special.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(special, vec!["a/Inbox", "a/Sent Items", "a/All Documents"]);

        let regular: Vec<_> = regular.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(regular, vec!["a/Projects", "b/Inbox"]);
    }

    #[test]
    fn deserialize_both_shapes() {
        let list: Folders =
            serde_json::from_str(r#"[{"name":"a/Inbox","count":2},{"name":"a/Sent"}]"#).unwrap();
        assert_eq!(list[0], Folder::new("a/Inbox", 2));
        assert_eq!(list[1], Folder::new("a/Sent", 0));

        let map: Folders =
            serde_json::from_str(r#"{"a/Sent":["3"],"a/Inbox":["1","2"],"a/Odd":7}"#).unwrap();
        assert_eq!(map.find("a/Inbox"), Some(&Folder::new("a/Inbox", 2)));
        assert_eq!(map.find("a/Sent"), Some(&Folder::new("a/Sent", 1)));
        assert_eq!(map.find("a/Odd"), Some(&Folder::new("a/Odd", 0)));
    }
}
