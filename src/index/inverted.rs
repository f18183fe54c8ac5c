//! Inverted index from words to the places they were enunciated.

use crate::{MapId, MapSet, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One occurrence of a word: which map, at which 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Posting {
    /// Identifier of the map.
    pub map_id: MapId,
    /// 1-based rank of the word in the map.
    pub position: Position,
}

impl Posting {
    /// Creates a new posting.
    pub fn new(map_id: MapId, position: Position) -> Self {
        Self { map_id, position }
    }
}

/// Inverted index mapping words to their postings.
///
/// Words iterate in sorted order. The postings of a word follow the map
/// order, then the position order inside each map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordIndex {
    posting_lists: BTreeMap<String, Vec<Posting>>,
}

impl WordIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index of a map set.
    pub fn from_maps(maps: &MapSet) -> Self {
        let mut index = Self::new();
        for (&map_id, words) in maps {
            for (offset, word) in words.iter().enumerate() {
                index.insert(word, Posting::new(map_id, offset as Position + 1));
            }
        }
        index
    }

    /// Appends a posting to a word's list.
    pub fn insert(&mut self, word: &str, posting: Posting) {
        match self.posting_lists.get_mut(word) {
            Some(list) => list.push(posting),
            None => {
                self.posting_lists.insert(word.to_string(), vec![posting]);
            }
        }
    }

    /// Returns the postings of a word.
    pub fn get(&self, word: &str) -> Option<&[Posting]> {
        self.posting_lists.get(word).map(Vec::as_slice)
    }

    /// Checks if a word is indexed.
    pub fn contains(&self, word: &str) -> bool {
        self.posting_lists.contains_key(word)
    }

    /// Raw number of occurrences of a word.
    pub fn frequency(&self, word: &str) -> usize {
        self.posting_lists.get(word).map_or(0, Vec::len)
    }

    /// Indexed words, sorted.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.posting_lists.keys().map(String::as_str)
    }

    /// Iterates `(word, postings)` pairs, sorted by word.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Posting])> {
        self.posting_lists
            .iter()
            .map(|(w, list)| (w.as_str(), list.as_slice()))
    }

    /// Identifiers of the maps where a word occurs, once per occurrence.
    pub fn map_ids(&self, word: &str) -> Vec<MapId> {
        self.get(word)
            .map(|list| list.iter().map(|p| p.map_id).collect())
            .unwrap_or_default()
    }

    /// Returns the number of distinct words.
    pub fn len(&self) -> usize {
        self.posting_lists.len()
    }

    /// Checks if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.posting_lists.is_empty()
    }

    /// Total number of postings. Equals the number of words in the maps.
    pub fn total_postings(&self) -> usize {
        self.posting_lists.values().map(Vec::len).sum()
    }

    /// Returns statistics about the index.
    pub fn stats(&self) -> IndexStats {
        let total_postings = self.total_postings();
        let max_list = self
            .posting_lists
            .iter()
            .max_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| b.0.cmp(a.0)));
        let max_position = self
            .posting_lists
            .values()
            .flatten()
            .map(|p| p.position)
            .max()
            .unwrap_or(0);
        let avg_list_size = if self.posting_lists.is_empty() {
            0.0
        } else {
            total_postings as f64 / self.posting_lists.len() as f64
        };

        IndexStats {
            num_words: self.posting_lists.len(),
            total_postings,
            max_list_size: max_list.map_or(0, |(_, list)| list.len()),
            most_frequent: max_list.map(|(word, _)| word.clone()),
            max_position,
            avg_list_size,
        }
    }
}

/// Statistics about the inverted index.
#[derive(Debug, Clone)]
pub struct IndexStats {
    /// Number of distinct words.
    pub num_words: usize,
    /// Total number of (word, map, position) entries.
    pub total_postings: usize,
    /// Size of the largest posting list.
    pub max_list_size: usize,
    /// Word owning the largest posting list (first in order on ties).
    pub most_frequent: Option<String>,
    /// Largest position seen (length of the longest map).
    pub max_position: Position,
    /// Average number of postings per word.
    pub avg_list_size: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_maps() -> MapSet {
        let mut maps = MapSet::new();
        maps.insert(1, vec!["mer".into(), "nickel".into(), "mer".into()]);
        maps.insert(4, vec!["nickel".into(), "argent".into()]);
        maps.insert(2, vec!["argent".into()]);
        maps
    }

    #[test]
    fn test_index_creation() {
        let index = WordIndex::from_maps(&create_test_maps());

        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
        assert_eq!(index.total_postings(), 6);
    }

    #[test]
    fn test_postings_are_one_based_and_ordered() {
        let index = WordIndex::from_maps(&create_test_maps());

        assert_eq!(
            index.get("mer").unwrap(),
            &[Posting::new(1, 1), Posting::new(1, 3)]
        );
        assert_eq!(
            index.get("argent").unwrap(),
            &[Posting::new(4, 2), Posting::new(2, 1)]
        );
        assert_eq!(index.map_ids("nickel"), vec![1, 4]);
        assert!(index.get("perle").is_none());
        assert!(index.map_ids("perle").is_empty());
    }

    #[test]
    fn test_words_sorted() {
        let index = WordIndex::from_maps(&create_test_maps());
        let words: Vec<&str> = index.words().collect();
        assert_eq!(words, vec!["argent", "mer", "nickel"]);
    }

    #[test]
    fn test_frequency() {
        let index = WordIndex::from_maps(&create_test_maps());
        assert_eq!(index.frequency("mer"), 2);
        assert_eq!(index.frequency("perle"), 0);
    }

    #[test]
    fn test_stats() {
        let index = WordIndex::from_maps(&create_test_maps());
        let stats = index.stats();

        assert_eq!(stats.num_words, 3);
        assert_eq!(stats.total_postings, 6);
        assert_eq!(stats.max_list_size, 2);
        assert_eq!(stats.most_frequent.as_deref(), Some("argent"));
        assert_eq!(stats.max_position, 3);
        assert!((stats.avg_list_size - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_index() {
        let index = WordIndex::from_maps(&MapSet::new());
        assert!(index.is_empty());
        let stats = index.stats();
        assert_eq!(stats.max_list_size, 0);
        assert_eq!(stats.most_frequent, None);
    }
}
