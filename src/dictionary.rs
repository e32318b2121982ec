//! Language dictionaries.
//!
//! One dictionary per supported language, loaded from a flat JSON object:
//!
//! ```json
//! {
//!   "greeting": "Hello",
//!   "nav.home": "Home",
//!   "footer-note": "Built with care"
//! }
//! ```
//!
//! Keys must use the placeholder alphabet (see [`crate::naming`]); a key the
//! renderer could never match is rejected at load time instead of silently
//! doing nothing. The reserved `.name` key is also rejected since the page
//! name always wins over the dictionary.
//!
//! Entries are kept in a sorted map, so a loaded dictionary debug-prints
//! and compares the same way every run. Duplicate keys in the JSON source follow
//! `serde_json` semantics: the last occurrence wins.

use crate::naming::{self, NAME_KEY};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid key '{0}': keys may only contain letters, digits, '-' and '.'")]
    InvalidKey(String),
    #[error("Key '.name' is reserved for the page name")]
    ReservedKey,
}

/// Key → replacement text for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: BTreeMap<String, String>,
}

impl Dictionary {
    /// Build a dictionary, validating every key.
    pub fn new(entries: BTreeMap<String, String>) -> Result<Self, DictionaryError> {
        for key in entries.keys() {
            if key == NAME_KEY {
                return Err(DictionaryError::ReservedKey);
            }
            if !naming::is_valid_key(key) {
                return Err(DictionaryError::InvalidKey(key.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a flat JSON object of string values.
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read and parse a dictionary file.
pub fn load_dictionary(path: &Path) -> Result<Dictionary, DictionaryError> {
    let content = fs::read_to_string(path)?;
    Dictionary::from_json(&content)
}
