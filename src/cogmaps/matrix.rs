//! Position-weighted co-occurrence matrix.

use crate::weights::Weights;
use crate::{MapSet, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Word × word table of accumulated, position-weighted joint appearances.
///
/// For every map and every ordered pair of its entries `(a, b)`, the cell
/// `[word_a][word_b]` receives `weights.delta(|pos_a - pos_b|)`: `1.0` for
/// an entry against itself, the configured delta weight otherwise. Entries of
/// different maps never meet. The diagonal `[w][w]` works as a weighted
/// occurrence count of `w`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CooccurrenceMatrix {
    rows: BTreeMap<String, BTreeMap<String, f64>>,
}

impl CooccurrenceMatrix {
    /// Computes the matrix of a map set.
    ///
    /// Quadratic in the length of each map; maps are a few tens of words.
    pub fn compute(maps: &MapSet, weights: &Weights) -> Self {
        let mut matrix = Self::default();
        for words in maps.values() {
            for (pos_row, word_row) in words.iter().enumerate() {
                for (pos_col, word_col) in words.iter().enumerate() {
                    let delta = pos_row.abs_diff(pos_col) as Position;
                    *matrix.cell_mut(word_row, word_col) += weights.delta(delta);
                }
            }
        }
        matrix
    }

    fn cell_mut(&mut self, row: &str, col: &str) -> &mut f64 {
        self.rows
            .entry(row.to_string())
            .or_default()
            .entry(col.to_string())
            .or_insert(0.0)
    }

    /// Value of a cell, `0.0` for words that never met.
    pub fn get(&self, row: &str, col: &str) -> f64 {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    /// Self co-occurrence of a word.
    pub fn diagonal(&self, word: &str) -> f64 {
        self.get(word, word)
    }

    /// Non-empty cells of a row, sorted by column word.
    pub fn row(&self, word: &str) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(word)
    }

    /// Row words, sorted.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Checks if the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Off-diagonal cells whose value reaches `threshold`, row-major.
    ///
    /// Each unordered pair appears twice, once per direction.
    pub fn edges(&self, threshold: f64) -> Vec<(&str, &str, f64)> {
        self.rows
            .iter()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .filter(move |(col, value)| *col != row && **value >= threshold)
                    .map(move |(col, &value)| (row.as_str(), col.as_str(), value))
            })
            .collect()
    }
}
