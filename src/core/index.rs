// File: src/core/index.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lookup key form: surrounding whitespace trimmed, lower-cased.
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Maps a normalized term in one language to the ordered synonym list it was
/// paired with in the source. Stored values keep their original casing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationIndex {
    entries: HashMap<String, Vec<String>>,
}

impl TranslationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `synonyms` under the normalized form of `term`.
    /// A later insert for the same key replaces the earlier one.
    /// Returns false when the term is blank and nothing was stored.
    pub fn insert(&mut self, term: &str, synonyms: Vec<String>) -> bool {
        let key = normalize(term);
        if key.is_empty() {
            return false;
        }
        self.entries.insert(key, synonyms);
        true
    }

    /// O(k) in the key length. The caller's word is normalized before lookup.
    pub fn get(&self, term: &str) -> Option<&[String]> {
        self.entries.get(&normalize(term)).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(&normalize(term))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
