//! Controlled vocabulary: the chained level mappings of the thesaurus.
//!
//! Words are raised one [`Level`] at a time:
//!
//! ```text
//! base -> concept -> mother -> gd_mother
//! ```
//!
//! Each transition is a [`Thesaurus`]. A word without an entry resolves to
//! [`UNKNOWN_CONCEPT`](crate::UNKNOWN_CONCEPT).

mod level;

pub use level::Level;

use crate::UNKNOWN_CONCEPT;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of [`Thesaurus::insert_checked`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// New mapping, or the same mapping seen again.
    Inserted,
    /// An existing mapping to another word was replaced.
    Overridden {
        /// The word the source used to map to.
        previous: String,
    },
    /// Source or destination was empty: nothing inserted.
    Empty,
}

/// Mapping from a word at one level to its parent at the next level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thesaurus {
    entries: HashMap<String, String>,
}

impl Thesaurus {
    /// Creates an empty thesaurus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mapping without any check. Last write wins.
    pub fn insert(&mut self, src: impl Into<String>, dst: impl Into<String>) -> Option<String> {
        self.entries.insert(src.into(), dst.into())
    }

    /// Inserts a mapping of already normalized words.
    ///
    /// Empty words are rejected. A mapping that contradicts an earlier one
    /// replaces it.
    pub fn insert_checked(&mut self, src: &str, dst: &str) -> InsertOutcome {
        if src.is_empty() || dst.is_empty() {
            return InsertOutcome::Empty;
        }
        match self.entries.insert(src.to_string(), dst.to_string()) {
            Some(previous) if previous != dst => InsertOutcome::Overridden { previous },
            _ => InsertOutcome::Inserted,
        }
    }

    /// Returns the parent of a word, if mapped.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    /// Returns the parent of a word, or the unknown concept.
    pub fn resolve<'a>(&'a self, word: &str) -> &'a str {
        self.get(word).unwrap_or(UNKNOWN_CONCEPT)
    }

    /// Checks whether a word has a real mapping.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Iterates over `(word, parent)` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of mapped words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the thesaurus is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct parent words.
    pub fn num_parents(&self) -> usize {
        let mut parents: Vec<&str> = self.entries.values().map(String::as_str).collect();
        parents.sort_unstable();
        parents.dedup();
        parents.len()
    }
}

impl<S: Into<String>, D: Into<String>> FromIterator<(S, D)> for Thesaurus {
    fn from_iter<T: IntoIterator<Item = (S, D)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(s, d)| (s.into(), d.into())).collect(),
        }
    }
}

/// Chains two transitions: `src` then `dst`.
///
/// Words whose parent has no mapping in `dst` go to the unknown concept.
pub fn compose(src: &Thesaurus, dst: &Thesaurus) -> Thesaurus {
    src.iter()
        .map(|(word, parent)| (word, dst.resolve(parent)))
        .collect()
}

/// One [`Thesaurus`] per target level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThesaurusMap {
    concept: Thesaurus,
    mother: Thesaurus,
    grand_mother: Thesaurus,
}

impl ThesaurusMap {
    /// Creates an empty set of mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping *into* the given level. `Base` has none.
    pub fn for_level(&self, level: Level) -> Option<&Thesaurus> {
        match level {
            Level::Base => None,
            Level::Concept => Some(&self.concept),
            Level::Mother => Some(&self.mother),
            Level::GrandMother => Some(&self.grand_mother),
        }
    }

    /// Mutable mapping into the given level. `Base` has none.
    pub fn for_level_mut(&mut self, level: Level) -> Option<&mut Thesaurus> {
        match level {
            Level::Base => None,
            Level::Concept => Some(&mut self.concept),
            Level::Mother => Some(&mut self.mother),
            Level::GrandMother => Some(&mut self.grand_mother),
        }
    }

    /// Adds the three edges of a thesaurus row, logging anomalies.
    ///
    /// Words must already be normalized.
    pub fn insert_row(&mut self, word: &str, concept: &str, mother: &str, grand_mother: &str) {
        let edges = [
            (Level::Concept, word, concept),
            (Level::Mother, concept, mother),
            (Level::GrandMother, mother, grand_mother),
        ];
        for (level, src, dst) in edges {
            let Some(thesaurus) = self.for_level_mut(level) else {
                continue;
            };
            match thesaurus.insert_checked(src, dst) {
                InsertOutcome::Inserted => {}
                InsertOutcome::Overridden { previous } => warn!(
                    "thesaurus at {}: {} -> {} overridden by {}",
                    level, src, previous, dst
                ),
                InsertOutcome::Empty => {
                    warn!("thesaurus at {}: empty mapping '{}' -> '{}'", level, src, dst)
                }
            }
        }
    }

    /// Total number of mappings across all levels.
    pub fn len(&self) -> usize {
        self.concept.len() + self.mother.len() + self.grand_mother.len()
    }

    /// Checks if no level has a mapping.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
