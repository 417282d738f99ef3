//! Module dedicated to the mailbox session.
//!
//! The session remembers which mailbox is being browsed. A mailbox
//! given in the URL always wins and becomes the current one; logging
//! out forgets it.

use tracing::{debug, info, warn};

use crate::storage::KvStore;

/// The storage key of the current mailbox, without prefix.
pub const CURRENT_MAILBOX_KEY: &str = "current_mailbox";

/// The mailboxes available in the archive.
pub const KNOWN_MAILBOXES: &[&str] = &[
    "allen-p", "arnold-j", "arora-h", "bailey-s", "badeer-r", "bass-e", "baughman-d", "beck-s",
    "benson-r", "blair-l", "brawner-s", "buy-r", "campbell-l", "carson-m", "cash-m",
    "causholli-m", "corman-s", "crandall-s", "cuilla-m", "dasovich-j", "davis-d", "dean-c",
    "dean-c2", "delainey-d", "derrick-j", "dickson-s", "donoho-l", "donohoe-t", "dorland-c",
    "ermis-f", "farmer-d", "fischer-m", "fischer-m2", "forney-j", "fossum-d", "gang-l", "gay-r",
    "geaccone-t", "germany-c", "gilbertsmith-d", "giron-d", "griffith-j", "grigsby-m", "guzman-m",
    "haedicke-m", "hain-m", "harris-s", "hayslett-r", "heard-m", "hendrickson-s", "hernandez-j",
    "hodge-j", "hodge-j2", "holst-k", "horton-s", "hyatt-k", "hyvl-d", "jones-t", "kaminski-v",
    "kean-s", "keavey-p", "keiser-k", "king-j", "kitchen-l", "kuykendall-t", "lavorato-j",
    "lay-k", "lenhart-m", "lewis-a", "linder-e", "lokay-m", "lokey-t", "love-p", "lucci-p",
    "maggi-m", "mann-k", "martin-t", "may-l", "mccarty-d", "mcconnell-m", "mckay-b", "mckay-j",
    "mclaughlin-e", "merris-s", "meyers-a", "mims-p", "motley-m", "neal-s", "nemec-g", "panus-s",
    "parks-j", "pereira-s", "perlingiere-d", "pimenov-v", "platter-p", "presto-k", "quenet-j",
    "quigley-d", "rapp-b", "reitmeyer-j", "richey-c", "ring-a", "ring-r", "rodrigue-r",
    "rogers-b", "ruscitti-k", "sager-e", "saibi-e", "salisbury-h", "sanchez-m", "sanders-r",
    "scholtes-d", "schoolcraft-d", "schwieger-j", "scott-s", "semperger-c", "shackleton-s",
    "shankman-j", "shapiro-r", "shively-h", "skilling-j", "slinger-r", "smith-m", "solberg-g",
    "south-s", "staab-t", "stclair-c", "stepenovitch-j", "steffes-j", "stokley-c", "storey-g",
    "sturm-f", "swerzbin-m", "symes-k", "taylor-m", "tholt-j", "thomas-p", "townsend-j",
    "tycholiz-b", "watson-k", "ward-k", "whalley-g", "weldon-c", "white-s", "whitt-m",
    "williams-b", "williams-j", "wolfe-j", "ybarbo-p", "zipper-a", "zufferli-j",
];

/// Returns `true` if the given mailbox is part of the archive,
/// case-insensitively.
pub fn is_known_mailbox(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    KNOWN_MAILBOXES.contains(&name.as_str())
}

/// Formats a mailbox name for display: `bailey-s` becomes `Bailey
/// S`.
pub fn format_mailbox_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The landing redirection enumeration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Redirect {
    /// Redirects to the mail viewer of the given known mailbox.
    MailViewer(String),

    /// Redirects back to the landing page.
    Landing,
}

impl Redirect {
    /// Decides where the given landing page input leads.
    pub fn from_input(input: &str) -> Self {
        let mailbox = input.trim().to_lowercase();

        if is_known_mailbox(&mailbox) {
            Self::MailViewer(mailbox)
        } else {
            Self::Landing
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::MailViewer(_) => "/mail/index.html",
            Self::Landing => "index.html",
        }
    }
}

/// The mailbox session.
#[derive(Debug)]
pub struct Session<S: KvStore> {
    store: S,
    prefix: String,
}

impl<S: KvStore> Session<S> {
    pub fn new(store: S, prefix: impl ToString) -> Self {
        Self {
            store,
            prefix: prefix.to_string(),
        }
    }

    fn key(&self) -> String {
        format!("{}{CURRENT_MAILBOX_KEY}", self.prefix)
    }

    /// Resolves the current mailbox.
    ///
    /// A non-empty mailbox coming from the URL is persisted and
    /// returned, otherwise the persisted one is returned.
    pub fn current_mailbox(&mut self, from_url: Option<&str>) -> Option<String> {
        let key = self.key();

        if let Some(mailbox) = from_url.filter(|mailbox| !mailbox.is_empty()) {
            if let Err(err) = self.store.set(&key, mailbox) {
                warn!("cannot persist current mailbox {mailbox}: {err}");
                debug!("{err:?}");
            }
            return Some(mailbox.to_owned());
        }

        match self.store.get(&key) {
            Ok(mailbox) => mailbox.filter(|mailbox| !mailbox.is_empty()),
            Err(err) => {
                warn!("cannot read current mailbox: {err}");
                debug!("{err:?}");
                None
            }
        }
    }

    /// Handles the landing page input: known mailboxes become the
    /// current one.
    pub fn login(&mut self, input: &str) -> Redirect {
        let redirect = Redirect::from_input(input);

        if let Redirect::MailViewer(mailbox) = &redirect {
            info!("opening mailbox {mailbox}");
            self.current_mailbox(Some(mailbox));
        }

        redirect
    }

    /// Forgets the current mailbox.
    pub fn logout(&mut self) {
        let key = self.key();

        if let Err(err) = self.store.delete(&key) {
            warn!("cannot forget current mailbox: {err}");
            debug!("{err:?}");
        }
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
