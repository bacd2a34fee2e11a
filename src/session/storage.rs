//! Key-value storage capability used to persist a session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

/// String key-value storage.
///
/// The session only needs to read, write and delete whole values by key.
/// Platform layers back this with whatever local storage they have.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn read_key(&self, name: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn write_key(&self, name: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove the value stored under `name`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn delete_key(&self, name: &str) -> Result<(), Self::Error>;
}

/// In-memory store. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn read_key(&self, name: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(name).cloned())
    }

    fn write_key(&self, name: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete_key(&self, name: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.read_key("save").unwrap(), None);

        store.write_key("save", "{}").unwrap();
        store.write_key("save", "{\"round\":2}").unwrap();
        assert_eq!(store.read_key("save").unwrap().as_deref(), Some("{\"round\":2}"));
        assert_eq!(store.len(), 1);

        store.delete_key("save").unwrap();
        store.delete_key("missing").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.write_key("onGameStart", "true").unwrap();
        assert_eq!(handle.read_key("onGameStart").unwrap().as_deref(), Some("true"));
    }
}
