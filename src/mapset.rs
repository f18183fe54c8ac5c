//! Map sets: maps by identifier, in the order they were first inserted.

use crate::MapId;
use std::collections::HashMap;
use std::ops::Index;

type Entry = (MapId, Vec<String>);

/// Maps by identifier. Words keep their enunciation order.
///
/// Iteration follows insertion order, so a loaded set dumps back in the row
/// order of its file. Replacing a map keeps the position of the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSet {
    entries: Vec<Entry>,
    slots: HashMap<MapId, usize>,
}

impl MapSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a map. Returns the replaced words.
    pub fn insert(&mut self, map_id: MapId, words: Vec<String>) -> Option<Vec<String>> {
        match self.slots.get(&map_id) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, words)),
            None => {
                self.slots.insert(map_id, self.entries.len());
                self.entries.push((map_id, words));
                None
            }
        }
    }

    /// Words of a map.
    pub fn get(&self, map_id: &MapId) -> Option<&Vec<String>> {
        self.slots.get(map_id).map(|&slot| &self.entries[slot].1)
    }

    /// Checks if a map is present.
    pub fn contains_key(&self, map_id: &MapId) -> bool {
        self.slots.contains_key(map_id)
    }

    /// Identifiers, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &MapId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Maps, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Vec<String>> {
        self.entries.iter().map(|(_, words)| words)
    }

    /// `(identifier, words)` pairs, in insertion order.
    pub fn iter<'a>(&'a self) -> Iter<'a> {
        let split: fn(&'a Entry) -> (&'a MapId, &'a Vec<String>) = split_entry;
        self.entries.iter().map(split)
    }

    /// Number of maps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if there is no map.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_entry(entry: &Entry) -> (&MapId, &Vec<String>) {
    (&entry.0, &entry.1)
}

/// Iterator over the maps of a [`MapSet`].
pub type Iter<'a> =
    std::iter::Map<std::slice::Iter<'a, Entry>, fn(&'a Entry) -> (&'a MapId, &'a Vec<String>)>;

impl<'a> IntoIterator for &'a MapSet {
    type Item = (&'a MapId, &'a Vec<String>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<&MapId> for MapSet {
    type Output = Vec<String>;

    fn index(&self, map_id: &MapId) -> &Self::Output {
        match self.get(map_id) {
            Some(words) => words,
            None => panic!("no map with identifier {}", map_id),
        }
    }
}

impl FromIterator<Entry> for MapSet {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        let mut maps = Self::new();
        for (map_id, words) in iter {
            maps.insert(map_id, words);
        }
        maps
    }
}
