//! Words left without a parent by a level transform.

use crate::error::Result;
use crate::storage::{writers, TabularFormat};
use crate::MapId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Unknown word → identifiers of the maps where it occurred.
///
/// An identifier is repeated when the word occurs several times in the same
/// map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownReport {
    words: BTreeMap<String, Vec<MapId>>,
}

impl UnknownReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of an unmapped word.
    pub fn record(&mut self, word: &str, map_id: MapId) {
        match self.words.get_mut(word) {
            Some(ids) => ids.push(map_id),
            None => {
                self.words.insert(word.to_string(), vec![map_id]);
            }
        }
    }

    /// Maps where an unknown word occurred.
    pub fn get(&self, word: &str) -> Option<&[MapId]> {
        self.words.get(word).map(Vec::as_slice)
    }

    /// Checks if a word was reported.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Iterates `(word, map ids)` pairs, sorted by word.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MapId])> {
        self.words.iter().map(|(w, ids)| (w.as_str(), ids.as_slice()))
    }

    /// Number of distinct unknown words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Checks if every word had a parent.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of unknown occurrences.
    pub fn total_occurrences(&self) -> usize {
        self.words.values().map(Vec::len).sum()
    }

    /// Writes `word;id;id;...` rows, sorted by word.
    pub fn dump<P: AsRef<Path>>(&self, path: P, format: &TabularFormat) -> Result<()> {
        writers::write_report(path, format, self)
    }
}
