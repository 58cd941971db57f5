//! Persistence of the single "highest level reached" scalar.

use crate::error::{StorageError, js_detail};

/// Where the highest reached level survives page reloads.
pub trait MaxLevelStore {
    /// Raw stored value, `None` when absent.
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&mut self, level: u8) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Interpret a stored value: absent, unparsable or zero means level 1.
/// Values past the last level are clamped to it.
pub fn parse_stored_level(raw: Option<&str>, levels: u8) -> u8 {
    raw.and_then(|s| s.trim().parse::<u8>().ok())
        .filter(|&l| l >= 1)
        .unwrap_or(1)
        .min(levels.max(1))
}

/// In-memory store for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self { value: Some(value.into()) }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl MaxLevelStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, level: u8) -> Result<(), StorageError> {
        self.value = Some(level.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.value = None;
        Ok(())
    }
}

/// Browser `window.localStorage` entry.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Js { op: "localStorage", detail: js_detail(&e) })?
            .ok_or(StorageError::Unavailable)
    }
}

impl MaxLevelStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Js { op: "getItem", detail: js_detail(&e) })
    }

    fn save(&mut self, level: u8) -> Result<(), StorageError> {
        self.storage()?
            .set_item(&self.key, &level.to_string())
            .map_err(|e| StorageError::Js { op: "setItem", detail: js_detail(&e) })
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| StorageError::Js { op: "removeItem", detail: js_detail(&e) })
    }
}
