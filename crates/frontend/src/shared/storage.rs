use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::window;

/// Synchronous key-value storage port (localStorage in the browser)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    /// Err carries the browser's reason, e.g. a full quota
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str);
}

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// None when storage is disabled or there is no window
    pub fn open() -> Option<Self> {
        let storage = window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.storage
            .set_item(key, value)
            .map_err(|err| format!("{:?}", err))
    }

    fn remove_item(&self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}

/// Non-persistent storage, used when localStorage is unavailable
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k"), None);

        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").as_deref(), Some("v"));

        storage.set_item("k", "w").unwrap();
        assert_eq!(storage.get_item("k").as_deref(), Some("w"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("k");
        storage.remove_item("k");
        assert!(storage.is_empty());
    }
}
