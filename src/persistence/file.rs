//! JSON file storage
//!
//! The whole store is one JSON object mapping keys to their (UTF-8) values.
//! Writes go to a sibling `.tmp` file which is then renamed over the save,
//! so a failed write leaves the previous save intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PersistenceError, Storage};

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        let value: serde_json::Value = serde_json::from_str(&text)?;
        match value {
            serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(PersistenceError::Malformed(format!(
                "expected an object in {}, found {}",
                self.path.display(),
                other
            ))),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(values)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.read_all()?.remove(key).map(String::into_bytes))
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), PersistenceError> {
        let value = String::from_utf8(value)?;
        // Corrupt contents are discarded on write; I/O errors are not
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(e @ (PersistenceError::Json(_) | PersistenceError::Malformed(_))) => {
                log::warn!("Replacing unreadable store {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_owned(), value);
        self.write_all(&values)
    }
}
