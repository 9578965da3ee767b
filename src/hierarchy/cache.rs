//! Folder display-name cache
//!
//! Holds both successful and failed lookups for the lifetime of one report
//! run, so a folder id is looked up at most once.

use std::collections::HashMap;

/// Cached folder names keyed by bare folder id
#[derive(Debug, Default)]
pub struct NameCache {
    names: HashMap<String, String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, folder_id: &str) -> Option<&str> {
        self.names.get(folder_id).map(String::as_str)
    }

    /// Record a lookup result. Entries are never replaced.
    pub fn insert(&mut self, folder_id: &str, name: String) -> &str {
        self.names.entry(folder_id.to_string()).or_insert(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
