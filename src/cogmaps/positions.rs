//! Per-position word histograms.

use crate::{MapSet, Position};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// For each 1-based position, how many times each word was enunciated there.
///
/// Independent of any weighting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionHistograms {
    positions: BTreeMap<Position, BTreeMap<String, usize>>,
    /// Rank of each word's first appearance, scanning maps then positions.
    first_seen: HashMap<String, usize>,
}

impl PositionHistograms {
    /// Builds the histograms of a map set.
    pub fn from_maps(maps: &MapSet) -> Self {
        let mut histograms = Self::default();
        for words in maps.values() {
            for (offset, word) in words.iter().enumerate() {
                let rank = histograms.first_seen.len();
                histograms.first_seen.entry(word.clone()).or_insert(rank);
                *histograms
                    .positions
                    .entry(offset as Position + 1)
                    .or_default()
                    .entry(word.clone())
                    .or_insert(0) += 1;
            }
        }
        histograms
    }

    /// Word counts at a position.
    pub fn get(&self, position: Position) -> Option<&BTreeMap<String, usize>> {
        self.positions.get(&position)
    }

    /// Number of times `word` was enunciated at `position`.
    pub fn count(&self, position: Position, word: &str) -> usize {
        self.get(position)
            .and_then(|counts| counts.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// Words at a position, most common first.
    ///
    /// Equal counts keep the order in which the words first appear in the maps.
    pub fn most_common(&self, position: Position) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .get(position)
            .map(|counts| counts.iter().map(|(w, &n)| (w.as_str(), n)).collect())
            .unwrap_or_default();
        counts.sort_by_key(|&(word, count)| {
            (
                std::cmp::Reverse(count),
                self.first_seen.get(word).copied().unwrap_or(usize::MAX),
            )
        });
        counts
    }

    /// Positions present, ascending.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.keys().copied()
    }

    /// Number of distinct positions, i.e. the length of the longest map.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Checks if there is no position at all.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
