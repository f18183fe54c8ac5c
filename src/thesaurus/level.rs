//! Abstraction levels of the controlled vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An abstraction tier of the thesaurus, from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Words as enunciated by the respondents.
    Base,
    /// First grouping of words.
    Concept,
    /// Parent of a concept.
    Mother,
    /// Parent of a mother concept.
    GrandMother,
}

impl Level {
    /// All levels, in raising order.
    pub const ALL: [Level; 4] = [Level::Base, Level::Concept, Level::Mother, Level::GrandMother];

    /// The next coarser level, if any.
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Base => Some(Level::Concept),
            Level::Concept => Some(Level::Mother),
            Level::Mother => Some(Level::GrandMother),
            Level::GrandMother => None,
        }
    }

    /// Ordered `(from, to)` transitions.
    pub fn transitions() -> impl Iterator<Item = (Level, Level)> {
        Self::ALL
            .into_iter()
            .filter_map(|level| level.next().map(|next| (level, next)))
    }

    /// Name used in output file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Base => "base",
            Level::Concept => "concept",
            Level::Mother => "mother",
            Level::GrandMother => "gd_mother",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
