//! Browser LocalStorage store (wasm32)

use super::{ScoreStore, StoreError, parse_score};

#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".to_string()))
    }
}

impl ScoreStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(key) {
            Ok(Some(raw)) => parse_score(key, &raw).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Unavailable(format!("{:?}", e))),
        }
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
