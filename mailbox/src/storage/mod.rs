//! Module dedicated to key-value storage.
//!
//! The [`KvStore`] trait is the only persistence surface of the
//! library: get, set and delete string values by string key. It is
//! used to persist the read and starred flags and the current
//! mailbox.
//!
//! Two implementations are provided: [`MemoryStore`] and
//! [`JsonFileStore`].

mod error;
mod file;

use std::collections::HashMap;

#[doc(inline)]
pub use self::{
    error::{Error, Result},
    file::JsonFileStore,
};

/// The key-value store trait.
pub trait KvStore {
    /// Gets the value associated to the given key, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Associates the given value to the given key, replacing the
    /// previous value if any.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the given key. Removing a missing key is not an
    /// error.
    fn delete(&mut self, key: &str) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

impl<T: KvStore + ?Sized> KvStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// The in-memory key-value store.
///
/// Values are lost when the store is dropped.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MemoryStore(HashMap<String, String>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.0.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KvStore, MemoryStore};

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("key").unwrap(), None);

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));

        store.delete("key").unwrap();
        store.delete("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }
}
