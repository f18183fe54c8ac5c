//! # cogmaps - Cognitive Map Aggregation Engine
//!
//! A cognitive map is the ordered list of words a respondent enunciated. This
//! crate loads sets of such maps, normalizes them through a multi-level
//! thesaurus and derives the tables used by the visualization tools.
//!
//! ## Overview
//!
//! - Maps are read from `;`-delimited files (`identifier;word;word;...`),
//!   words trimmed and lowercased, sentinel words (`null`, empty) dropped.
//! - The inverted index records, for every word, the `(map, position)` pairs
//!   where it occurs. Positions are 1-based.
//! - Positions are weighted: a word's occurrence total sums the weights of
//!   its positions, and the co-occurrence matrix weights pairs of words by
//!   the distance between their positions.
//! - The thesaurus raises words one level at a time, from the enunciated
//!   words up to concepts, mother concepts and grand-mother concepts.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cogmaps::{CogMaps, Level, storage};
//!
//! let mut maps = CogMaps::load("cartes.csv")?;
//! println!("{} different words", maps.index().len());
//!
//! let schemes = storage::read_weights("coefficients.csv", maps.format())?;
//! maps.set_weights(schemes.get("arithmetique")?.clone());
//! maps.dump_matrix("cartes_matrice.csv")?;
//!
//! let thesaurus = storage::read_thesaurus("thesaurus.csv", maps.format(), &Default::default())?;
//! let results = maps.apply_many(&thesaurus, false);
//! let concepts = results.maps_at(Level::Concept).unwrap();
//! ```
//!
//! ## Architecture
//!
//! - [`text`] - Word normalization
//! - [`weights`] - Position weightings and built-in schemes
//! - [`thesaurus`] - Levels and level mappings
//! - [`mapset`] - Maps by identifier, in file order
//! - [`index`] - Inverted index
//! - [`cogmaps`] - The [`CogMaps`] engine and its derived views
//! - [`storage`] - Tabular input and output files
//! - [`pipeline`] - Whole-run orchestration used by the CLI

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cogmaps;
pub mod config;
pub mod error;
pub mod index;
pub mod mapset;
pub mod pipeline;
pub mod storage;
pub mod text;
pub mod thesaurus;
pub mod weights;

// Re-export commonly used types
pub use cogmaps::{
    CogMaps, CooccurrenceMatrix, LevelResults, Occurrences, PositionHistograms, UnknownReport,
};
pub use config::{Config, FormatConfig, PipelineConfig, TextConfig};
pub use error::{CogMapsError, Result};
pub use index::{IndexStats, Posting, WordIndex};
pub use mapset::MapSet;
pub use pipeline::{generate_results, Inputs};
pub use storage::TabularFormat;
pub use text::Normalizer;
pub use thesaurus::{Level, Thesaurus, ThesaurusMap};
pub use weights::{WeightSchemes, Weights};

/// Identifier of a map.
pub type MapId = u32;

/// 1-based rank of a word in its map, or a distance between two ranks.
pub type Position = u32;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Concept of a word that has no thesaurus mapping.
pub const UNKNOWN_CONCEPT: &str = "__inconnu__";

/// Number of positions covered by the default uniform weighting.
pub const DEFAULT_MAX_LEN: Position = 15;

/// Weighting scheme used for the matrix when none is named.
pub const DEFAULT_WEIGHTS_NAME: &str = "arithmetique";
