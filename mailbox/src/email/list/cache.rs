//! # Folder cache
//!
//! The list of emails contained in a folder never changes once the
//! index is loaded, so scanning the whole mailbox for a folder only
//! needs to happen once. The cache keeps, per [`Fingerprint`], the
//! positions of the folder's emails in the mailbox.

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, trace};

/// The cache key of a filtered email list: a folder and a search
/// term.
///
/// Only fingerprints without search term are cached, searches are
/// always recomputed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fingerprint {
    pub folder: String,
    pub search: String,
}

impl Fingerprint {
    pub fn new(folder: impl ToString, search: impl ToString) -> Self {
        Self {
            folder: folder.to_string(),
            search: search.to_string(),
        }
    }

    pub fn is_cacheable(&self) -> bool {
        self.search.is_empty()
    }
}

/// The folder cache.
#[derive(Clone, Debug, Default)]
pub struct FolderCache {
    entries: HashMap<Fingerprint, Arc<[usize]>>,
}

impl FolderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached positions for the given fingerprint, or
    /// computes them with `f`.
    ///
    /// The result of `f` is stored only if the fingerprint is
    /// cacheable.
    pub fn get_or_insert_with(
        &mut self,
        fingerprint: Fingerprint,
        f: impl FnOnce() -> Vec<usize>,
    ) -> Arc<[usize]> {
        if !fingerprint.is_cacheable() {
            trace!("fingerprint {fingerprint:?} not cacheable, computing positions");
            return f().into();
        }

        if let Some(positions) = self.entries.get(&fingerprint) {
            debug!("reusing cached positions of folder {}", fingerprint.folder);
            return positions.clone();
        }

        let positions: Arc<[usize]> = f().into();
        debug!(
            "caching {} positions of folder {}",
            positions.len(),
            fingerprint.folder
        );
        self.entries.insert(fingerprint, positions.clone());
        positions
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
