//! JSON file store for native builds
//!
//! The whole file is one JSON object of key -> score. Writes go to a
//! temporary sibling first and are renamed into place.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{ScoreStore, StoreError, parse_score};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let values = self.read_all()?;
        match values.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| StoreError::Corrupt {
                key: key.to_string(),
                value: n.to_string(),
            }),
            // Older saves kept the score as a string
            Some(Value::String(s)) => parse_score(key, s).map(Some),
            Some(other) => Err(StoreError::Corrupt {
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking the write
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), Value::from(value));

        let json = serde_json::to_string_pretty(&values)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Wrote {} = {} to {}", key, value, self.path.display());
        Ok(())
    }
}
