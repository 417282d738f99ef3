//! Module dedicated to archived emails.
//!
//! An archived email is an immutable record loaded from the mailbox
//! index. The mutable part (read and starred state) lives aside, in
//! the [`flag`] module.

pub mod address;
pub mod date;
pub mod detail;
pub mod flag;
pub mod list;
pub mod search_query;

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[doc(inline)]
pub use self::address::Address;
use crate::de::{lenient_date, null_as_default};

pub const NO_SUBJECT: &str = "(No Subject)";
pub const UNKNOWN_SENDER: &str = "Unknown";

/// The archived email.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Email {
    /// The unique identifier of the email inside its mailbox.
    pub id: String,

    /// The path of the folder the email belongs to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub folder: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,

    #[serde(default)]
    pub from: Option<Address>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub to: Vec<Address>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub cc: Vec<Address>,

    /// The raw date, as found in the index. Numeric timestamps are
    /// converted to RFC 3339.
    ///
    /// Use [`Email::date`] to get the parsed version.
    #[serde(default, rename = "date", deserialize_with = "lenient_date")]
    pub raw_date: Option<String>,

    /// The body markup. It is untrusted and needs to be sanitized
    /// before being displayed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub has_attachments: bool,
}

impl Email {
    /// Parses the raw date of the email.
    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.raw_date.as_deref().and_then(date::parse_datetime)
    }

    /// Returns the sender display name, if any.
    pub fn from_display_name(&self) -> Option<&str> {
        self.from.as_ref().and_then(Address::display_name)
    }

    /// Returns the subject, or a placeholder when empty.
    pub fn subject_or_placeholder(&self) -> &str {
        if self.subject.is_empty() {
            NO_SUBJECT
        } else {
            &self.subject
        }
    }
}

/// Wrapper around the list of emails.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Emails(Vec<Email>);

impl Emails {
    /// Finds an email by its identifier.
    pub fn find(&self, id: &str) -> Option<&Email> {
        self.iter().find(|email| email.id == id)
    }
}

impl Deref for Emails {
    type Target = Vec<Email>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Emails {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Email>> for Emails {
    fn from(emails: Vec<Email>) -> Self {
        Self(emails)
    }
}

impl FromIterator<Email> for Emails {
    fn from_iter<T: IntoIterator<Item = Email>>(iter: T) -> Self {
        Emails(iter.into_iter().collect())
    }
}

impl IntoIterator for Emails {
    type Item = Email;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The email attachment.
///
/// Attachments are not part of the index: only their name and their
/// path relative to the mailbox directory are.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl Attachment {
    /// Returns the filename, then the name, then `attachment`.
    pub fn display_name(&self) -> &str {
        self.filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.name.as_deref().filter(|name| !name.is_empty()))
            .unwrap_or("attachment")
    }

    /// Returns the link of the attachment, relative to the server
    /// root, or `#` when the attachment has no path.
    pub fn href(&self, mailbox: &str) -> String {
        match self.path.as_deref().filter(|path| !path.is_empty()) {
            Some(path) => format!("/mail/{mailbox}/{path}"),
            None => String::from("#"),
        }
    }

    /// Returns the kind of the attachment, based on the extension of
    /// its display name.
    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::from_filename(self.display_name())
    }
}

/// The attachment kind enumeration, used to pick an icon.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AttachmentKind {
    Image,
    Pdf,
    Document,
    Spreadsheet,
    Presentation,
    Archive,
    Text,
    File,
}

impl AttachmentKind {
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" => Self::Image,
            "pdf" => Self::Pdf,
            "doc" | "docx" => Self::Document,
            "xls" | "xlsx" | "csv" => Self::Spreadsheet,
            "ppt" | "pptx" => Self::Presentation,
            "zip" | "rar" | "7z" | "tar" | "gz" => Self::Archive,
            "txt" | "log" | "md" => Self::Text,
            _ => Self::File,
        }
    }

    /// Returns the textual icon of the kind.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Image => "[IMG]",
            Self::Pdf => "[PDF]",
            Self::Document => "[DOC]",
            Self::Spreadsheet => "[XLS]",
            Self::Presentation => "[PPT]",
            Self::Archive => "[ZIP]",
            Self::Text => "[TXT]",
            Self::File => "[FILE]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Attachment, AttachmentKind, Email, NO_SUBJECT};

    #[test]
    fn deserialize_minimal_email() {
        let email: Email = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_eq!(email.id, "1");
        assert_eq!(email.date(), None);
        assert_eq!(email.from_display_name(), None);
        assert_eq!(email.subject_or_placeholder(), NO_SUBJECT);
    }

    #[test]
    fn deserialize_full_email() {
        let email: Email = serde_json::from_str(
            r#"{
                "id": "42",
                "folder": "bailey-s/Inbox",
                "subject": "Gas report",
                "from": {"name": "", "email": "kenneth.lay@enron.com"},
                "to": [{"name": "Susan Bailey", "email": "susan.bailey@enron.com"}],
                "date": "2001-05-14T16:39:00-07:00",
                "body": "<p>Hello</p>",
                "attachments": [{"filename": "report.XLS", "path": "attachments/1/report.XLS"}],
                "has_attachments": true
            }"#,
        )
        .unwrap();

        assert_eq!(email.from_display_name(), Some("kenneth.lay@enron.com"));
        assert!(email.date().is_some());
        assert_eq!(email.attachments[0].kind(), AttachmentKind::Spreadsheet);
        assert_eq!(
            email.attachments[0].href("bailey-s"),
            "/mail/bailey-s/attachments/1/report.XLS"
        );
    }

    #[test]
    fn deserialize_loose_email() {
        let email: Email = serde_json::from_str(
            r#"{
                "id": "7",
                "subject": null,
                "to": null,
                "date": 989876543000,
                "body": null,
                "attachments": null,
                "has_attachments": null
            }"#,
        )
        .unwrap();

        assert_eq!(email.subject_or_placeholder(), NO_SUBJECT);
        assert!(email.to.is_empty());
        assert_eq!(
            email.date().map(|date| date.timestamp_millis()),
            Some(989876543000)
        );

        let email: Email = serde_json::from_str(r#"{"id":"8","date":{"$date":1}}"#).unwrap();
        assert_eq!(email.raw_date, None);
    }

    #[test]
    fn attachment_fallbacks() {
        let att = Attachment {
            name: Some("memo.pdf".into()),
            ..Default::default()
        };
        assert_eq!(att.display_name(), "memo.pdf");
        assert_eq!(att.href("lay-k"), "#");
        assert_eq!(att.kind().icon(), "[PDF]");

        let att = Attachment::default();
        assert_eq!(att.display_name(), "attachment");
        assert_eq!(att.kind(), AttachmentKind::File);
    }
}
