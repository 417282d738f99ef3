//! Module dedicated to permalinks.
//!
//! A permalink is the query string locating a mailbox, a folder and
//! an email: `mailbox=bailey-s&folder=bailey-s%2FInbox&email=42`.

use std::fmt;

use tracing::debug;
use url::form_urlencoded;

use crate::AppState;

/// The permalink structure.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Permalink {
    pub mailbox: Option<String>,
    pub folder: Option<String>,
    pub email: Option<String>,
}

impl Permalink {
    /// Parses a query string, with or without its leading `?`.
    ///
    /// Unknown parameters are ignored, empty ones are considered
    /// absent.
    pub fn parse(query: &str) -> Self {
        let mut link = Self::default();
        let query = query.trim_start_matches('?');

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                "mailbox" => link.mailbox = Some(value.into_owned()),
                "folder" => link.folder = Some(value.into_owned()),
                "email" => link.email = Some(value.into_owned()),
                key => debug!("ignoring permalink parameter {key}"),
            }
        }

        link
    }

    /// Builds the permalink of the given state.
    pub fn from_state(state: &AppState) -> Self {
        Self {
            mailbox: Some(state.mailbox.clone()).filter(|mailbox| !mailbox.is_empty()),
            folder: state.folder.clone(),
            email: state.open_email.clone(),
        }
    }

    /// Builds the query string, without leading `?`.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        for (key, value) in [
            ("mailbox", &self.mailbox),
            ("folder", &self.folder),
            ("email", &self.email),
        ] {
            if let Some(value) = value {
                query.append_pair(key, value);
            }
        }

        query.finish()
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::Permalink;
    use crate::{AppState, MailboxConfig};

    #[test]
    fn parse_query() {
        let link = Permalink::parse("?mailbox=bailey-s&folder=bailey-s%2FSent+Items&email=&x=1");
        assert_eq!(link.mailbox.as_deref(), Some("bailey-s"));
        assert_eq!(link.folder.as_deref(), Some("bailey-s/Sent Items"));
        assert_eq!(link.email, None);

        assert_eq!(Permalink::parse(""), Permalink::default());
    }

    #[test]
    fn parse_percent_and_plus_encodings() {
        let link = Permalink::parse("folder=lay-k%2FAll+Documents%20%26+Notes&mailbox&=x&email=1%2B2");
        assert_eq!(link.folder.as_deref(), Some("lay-k/All Documents & Notes"));
        assert_eq!(link.mailbox, None);
        assert_eq!(link.email.as_deref(), Some("1+2"));
    }

    #[test]
    fn from_state() {
        let mut state = AppState::new("bailey-s", &MailboxConfig::default());
        state.open_folder("bailey-s/Sent Items");
        state.open_email("a&b");

        let link = Permalink::from_state(&state);
        assert_eq!(
            link.to_string(),
            "?mailbox=bailey-s&folder=bailey-s%2FSent+Items&email=a%26b"
        );
        assert_eq!(Permalink::parse(&link.to_query()), link);
    }
}
