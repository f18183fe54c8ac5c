//! Position weightings.
//!
//! A [`Weights`] table assigns a non-negative real to a 1-based position in a
//! map (occurrence weighting) or to a position delta (co-occurrence
//! weighting). Lookups of unset keys yield `0.0`.

pub mod presets;

use crate::error::{CogMapsError, Result};
use crate::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A weight table over positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    table: BTreeMap<Position, f64>,
}

impl Weights {
    /// Creates an empty table: every lookup yields `0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions `1..=max_len` all weighted `1.0`.
    ///
    /// With this weighting the occurrence total of a word equals its raw
    /// frequency, as long as no map is longer than `max_len`.
    pub fn uniform(max_len: Position) -> Self {
        (1..=max_len).map(|pos| (pos, 1.0)).collect()
    }

    /// Looks up a weight, defaulting to `0.0`.
    #[inline]
    pub fn get(&self, position: Position) -> f64 {
        self.get_or(position, 0.0)
    }

    /// Looks up a weight with an explicit fallback.
    #[inline]
    pub fn get_or(&self, position: Position, fallback: f64) -> f64 {
        self.table.get(&position).copied().unwrap_or(fallback)
    }

    /// Weight of a position delta in the co-occurrence matrix.
    ///
    /// A delta of zero always weighs `1.0`, whatever the table holds.
    #[inline]
    pub fn delta(&self, delta: Position) -> f64 {
        if delta == 0 {
            1.0
        } else {
            self.get(delta)
        }
    }

    /// Sets the weight of a position, returning the previous one.
    pub fn insert(&mut self, position: Position, weight: f64) -> Option<f64> {
        self.table.insert(position, weight)
    }

    /// Iterates `(position, weight)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        self.table.iter().map(|(&pos, &w)| (pos, w))
    }

    /// Number of explicitly set positions.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Checks if no position is set.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Largest explicitly set position.
    pub fn max_position(&self) -> Option<Position> {
        self.table.keys().next_back().copied()
    }

    /// Checks that weights never increase with the position.
    #[cfg(test)]
    pub(crate) fn is_non_increasing(&self) -> bool {
        let values: Vec<f64> = self.table.values().copied().collect();
        values.windows(2).all(|w| w[1] <= w[0])
    }
}

impl FromIterator<(Position, f64)> for Weights {
    fn from_iter<T: IntoIterator<Item = (Position, f64)>>(iter: T) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}

/// Named weighting schemes, in the order they were declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightSchemes {
    schemes: Vec<(String, Weights)>,
}

impl WeightSchemes {
    /// Creates an empty set of schemes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scheme, replacing one with the same name in place.
    pub fn push(&mut self, name: impl Into<String>, weights: Weights) {
        let name = name.into();
        match self.schemes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = weights,
            None => self.schemes.push((name, weights)),
        }
    }

    /// Returns the scheme with the given name.
    pub fn get(&self, name: &str) -> Result<&Weights> {
        self.schemes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| w)
            .ok_or_else(|| CogMapsError::UnknownScheme(name.to_string()))
    }

    /// Mutable access to a named scheme, used while loading.
    pub(crate) fn get_mut(&mut self, name: &str) -> Result<&mut Weights> {
        self.schemes
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, w)| w)
            .ok_or_else(|| CogMapsError::UnknownScheme(name.to_string()))
    }

    /// Scheme names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates `(name, weights)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Weights)> {
        self.schemes.iter().map(|(n, w)| (n.as_str(), w))
    }

    /// Number of schemes.
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Checks if there is no scheme.
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}
