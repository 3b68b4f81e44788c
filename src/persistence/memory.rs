//! In-process storage, for tests and hosts without a disk

use std::collections::HashMap;

use super::{PersistenceError, Storage};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), PersistenceError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}
