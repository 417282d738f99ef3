//! Module dedicated to the email detail view.
//!
//! The detail view is built from an [`Email`] when it is opened: it
//! resolves every fallback (sender, subject, date), collapses long
//! recipient and attachment lists and sanitizes the body.

use regex::RegexBuilder;

use super::{date, Address, Attachment, Email, UNKNOWN_SENDER};
use crate::sanitize::Sanitize;

/// The number of recipients or attachments shown before collapsing
/// the rest.
pub const VISIBLE_ITEMS: usize = 3;

pub const NO_CONTENT: &str = "<em>(No content)</em>";

/// A list split into a visible head and a hidden tail.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Collapsed<T> {
    pub visible: Vec<T>,
    pub hidden: Vec<T>,
}

impl<T> Collapsed<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        let hidden = if items.len() > VISIBLE_ITEMS {
            items.split_off(VISIBLE_ITEMS)
        } else {
            Vec::new()
        };

        Self {
            visible: items,
            hidden,
        }
    }

    pub fn len(&self) -> usize {
        self.visible.len() + self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().chain(self.hidden.iter())
    }

    /// Returns the `+N more` label when items are hidden.
    pub fn more_label(&self) -> Option<String> {
        if self.hidden.is_empty() {
            None
        } else {
            Some(format!("+{} more", self.hidden.len()))
        }
    }
}

impl Collapsed<String> {
    fn from_addresses(addrs: &[Address]) -> Self {
        Self::new(
            addrs
                .iter()
                .map(|addr| addr.display_name_or(UNKNOWN_SENDER).to_owned())
                .collect(),
        )
    }

    /// Joins the visible names with `; `.
    pub fn visible_line(&self) -> String {
        self.visible.join("; ")
    }

    /// Joins all the names with `; `.
    pub fn full_line(&self) -> String {
        self.iter().map(String::as_str).collect::<Vec<_>>().join("; ")
    }
}

/// The displayable attachment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachmentView {
    pub name: String,
    pub href: String,
    pub icon: &'static str,
}

impl AttachmentView {
    pub fn new(attachment: &Attachment, mailbox: &str) -> Self {
        Self {
            name: attachment.display_name().to_owned(),
            href: attachment.href(mailbox),
            icon: attachment.kind().icon(),
        }
    }
}

/// The email detail view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmailDetail {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub date: String,

    /// The `to` recipients. Never empty: an email without recipient
    /// shows a single `Unknown` one.
    pub to: Collapsed<String>,

    /// The `cc` recipients, omitted when empty.
    pub cc: Option<Collapsed<String>>,

    pub attachments: Collapsed<AttachmentView>,

    /// The sanitized body.
    pub body: String,
}

impl EmailDetail {
    pub fn new(email: &Email, mailbox: &str, sanitizer: &impl Sanitize) -> Self {
        let to = if email.to.is_empty() {
            Collapsed::new(vec![UNKNOWN_SENDER.to_owned()])
        } else {
            Collapsed::from_addresses(&email.to)
        };

        let cc = if email.cc.is_empty() {
            None
        } else {
            Some(Collapsed::from_addresses(&email.cc))
        };

        let attachments = Collapsed::new(
            email
                .attachments
                .iter()
                .map(|attachment| AttachmentView::new(attachment, mailbox))
                .collect(),
        );

        let body = if email.body.trim().is_empty() {
            NO_CONTENT.to_owned()
        } else {
            sanitizer.sanitize(&email.body)
        };

        Self {
            id: email.id.clone(),
            from: email.from_display_name().unwrap_or(UNKNOWN_SENDER).to_owned(),
            subject: email.subject_or_placeholder().to_owned(),
            date: date::format_detail_date(email.date().as_ref()),
            to,
            cc,
            attachments,
            body,
        }
    }
}

/// A piece of text, highlighted or not.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Highlight(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Plain(text) | Self::Highlight(text) => text,
        }
    }
}

/// Splits the given text into plain and highlighted segments.
///
/// Occurrences of the term are found case-insensitively, from left
/// to right, without overlapping. An empty term highlights nothing.
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    let re = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) if !term.is_empty() => re,
        _ => return vec![Segment::Plain(text)],
    };

    let mut segments = Vec::new();
    let mut last = 0;

    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Plain(&text[last..m.start()]));
        }
        segments.push(Segment::Highlight(m.as_str()));
        last = m.end();
    }

    if last < text.len() || segments.is_empty() {
        segments.push(Segment::Plain(&text[last..]));
    }

    segments
}
