//! The cognitive map aggregation engine.
//!
//! A [`CogMaps`] owns a map set and derives four views from it on demand:
//!
//! - the [`WordIndex`] (word → postings),
//! - the weighted [`Occurrences`] of every word,
//! - the [`PositionHistograms`],
//! - the [`CooccurrenceMatrix`].
//!
//! Views are computed on first access and cached. Replacing the maps drops
//! every view; replacing the weights drops the occurrences and the matrix.
//! Mutators take `&mut self`, so no view can be read while another is being
//! invalidated. The caches are not `Sync`: a `CogMaps` lives on one thread.

mod matrix;
mod positions;
mod report;

pub use matrix::CooccurrenceMatrix;
pub use positions::PositionHistograms;
pub use report::UnknownReport;

use crate::error::{CogMapsError, Result};
use crate::index::WordIndex;
use crate::storage::{readers, writers, TabularFormat};
use crate::text::Normalizer;
use crate::thesaurus::{Level, Thesaurus, ThesaurusMap};
use crate::weights::{WeightSchemes, Weights};
use crate::{MapId, MapSet, DEFAULT_MAX_LEN, UNKNOWN_CONCEPT};
use log::{debug, info};
use once_cell::unsync::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Weighted occurrence total of each word, sorted by word.
pub type Occurrences = BTreeMap<String, f64>;

/// A set of cognitive maps and its cached derived views.
#[derive(Debug, Clone)]
pub struct CogMaps {
    /// File the maps were read from, or named after for derived maps.
    source: Option<PathBuf>,
    /// Map id → ordered words.
    maps: MapSet,
    /// Mapping used by [`CogMaps::apply`].
    thesaurus: Thesaurus,
    /// Weights of positions (occurrences) and deltas (matrix).
    weights: Weights,
    /// Description of the maps this one was derived from.
    parent: Option<String>,
    /// Format used by the dumps.
    format: TabularFormat,

    index: OnceCell<WordIndex>,
    occurrences: OnceCell<Occurrences>,
    positions: OnceCell<PositionHistograms>,
    matrix: OnceCell<CooccurrenceMatrix>,
}

impl Default for CogMaps {
    fn default() -> Self {
        Self::new()
    }
}

impl CogMaps {
    /// Creates an empty set, uniformly weighted.
    pub fn new() -> Self {
        Self {
            source: None,
            maps: MapSet::new(),
            thesaurus: Thesaurus::new(),
            weights: Weights::uniform(DEFAULT_MAX_LEN),
            parent: None,
            format: TabularFormat::default(),
            index: OnceCell::new(),
            occurrences: OnceCell::new(),
            positions: OnceCell::new(),
            matrix: OnceCell::new(),
        }
    }

    /// Creates a set from already normalized maps.
    pub fn from_maps(maps: MapSet) -> Self {
        Self {
            maps,
            ..Self::new()
        }
    }

    /// Loads every map of a file with the default format and normalization.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, TabularFormat::default(), &Normalizer::default(), |_| true)
    }

    /// Loads the maps of a file whose identifier passes `predicate`.
    pub fn load_filtered<P, F>(path: P, predicate: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(MapId) -> bool,
    {
        Self::load_with(path, TabularFormat::default(), &Normalizer::default(), predicate)
    }

    /// Loads maps with an explicit format and normalizer.
    pub fn load_with<P, F>(
        path: P,
        format: TabularFormat,
        normalizer: &Normalizer,
        predicate: F,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(MapId) -> bool,
    {
        let path = path.as_ref();
        let maps = readers::read_maps(path, &format, normalizer, predicate)?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            maps,
            format,
            ..Self::new()
        })
    }

    /// Drops every cached view.
    pub fn invalidate(&mut self) {
        self.index.take();
        self.occurrences.take();
        self.positions.take();
        self.matrix.take();
    }

    /// File the maps come from (or are named after, for derived maps).
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The maps themselves.
    pub fn maps(&self) -> &MapSet {
        &self.maps
    }

    /// Replaces the maps, dropping every cached view.
    pub fn set_maps(&mut self, maps: MapSet) {
        self.maps = maps;
        self.invalidate();
    }

    /// The index is derived from the maps and cannot be assigned.
    pub fn set_index(&mut self, _index: WordIndex) -> Result<()> {
        Err(CogMapsError::ReadOnly("index"))
    }

    /// The occurrences are derived from the maps and cannot be assigned.
    pub fn set_occurrences(&mut self, _occurrences: Occurrences) -> Result<()> {
        Err(CogMapsError::ReadOnly("occurrences"))
    }

    /// Mapping used by [`CogMaps::apply`].
    pub fn thesaurus(&self) -> &Thesaurus {
        &self.thesaurus
    }

    /// Sets the mapping used by [`CogMaps::apply`].
    pub fn set_thesaurus(&mut self, thesaurus: Thesaurus) {
        self.thesaurus = thesaurus;
    }

    /// Current weights.
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Replaces the weights, dropping the occurrences and the matrix.
    pub fn set_weights(&mut self, weights: Weights) {
        self.weights = weights;
        self.occurrences.take();
        self.matrix.take();
    }

    /// Description of the parent maps, for derived maps.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Format used by the dumps.
    pub fn format(&self) -> &TabularFormat {
        &self.format
    }

    /// Sets the format used by the dumps.
    pub fn set_format(&mut self, format: TabularFormat) {
        self.format = format;
    }

    /// Number of maps.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Checks if there is no map.
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Number of words over all maps.
    pub fn total_words(&self) -> usize {
        self.maps.values().map(Vec::len).sum()
    }

    /// Distinct words, sorted.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.index().words()
    }

    /// Inverted index, built on first access.
    pub fn index(&self) -> &WordIndex {
        self.index.get_or_init(|| {
            debug!("CogMaps::index({})", self.len());
            let index = WordIndex::from_maps(&self.maps);
            info!("CogMaps::index: {} different words", index.len());
            index
        })
    }

    /// Weighted occurrence totals under the current weights.
    ///
    /// The total of a word is the sum of the weights of the positions where it
    /// occurs. Unset positions weigh nothing.
    pub fn occurrences(&self) -> &Occurrences {
        self.occurrences.get_or_init(|| {
            debug!("CogMaps::occurrences({})", self.len());
            self.occurrences_with(&self.weights)
        })
    }

    /// Weighted occurrence totals under any weighting, bypassing the cache.
    pub fn occurrences_with(&self, weights: &Weights) -> Occurrences {
        self.index()
            .iter()
            .map(|(word, postings)| {
                let total: f64 = postings.iter().map(|p| weights.get(p.position)).sum();
                (word.to_string(), total)
            })
            .collect()
    }

    /// Occurrence totals for several schemes in one pass over the index.
    ///
    /// Each row holds one total per scheme, in scheme order.
    pub fn occurrences_many(&self, schemes: &WeightSchemes) -> BTreeMap<String, Vec<f64>> {
        debug!("CogMaps::occurrences_many({}, {} schemes)", self.len(), schemes.len());
        self.index()
            .iter()
            .map(|(word, postings)| {
                let totals = schemes
                    .iter()
                    .map(|(_, weights)| postings.iter().map(|p| weights.get(p.position)).sum::<f64>())
                    .collect();
                (word.to_string(), totals)
            })
            .collect()
    }

    /// Per-position histograms, built on first access.
    pub fn occurrences_in_position(&self) -> &PositionHistograms {
        self.positions.get_or_init(|| {
            debug!("CogMaps::occurrences_in_position({})", self.len());
            let histograms = PositionHistograms::from_maps(&self.maps);
            info!(
                "CogMaps::occurrences_in_position: {} positions (longest map)",
                histograms.len()
            );
            histograms
        })
    }

    /// Co-occurrence matrix under the current weights, built on first access.
    pub fn matrix(&self) -> &CooccurrenceMatrix {
        self.matrix.get_or_init(|| {
            debug!("CogMaps::matrix({})", self.len());
            let start = Instant::now();
            let matrix = CooccurrenceMatrix::compute(&self.maps, &self.weights);
            info!(
                "CogMaps::matrix: {} words, duration {:.2}ms",
                matrix.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            matrix
        })
    }

    /// Raises every word one level through the current thesaurus.
    ///
    /// Returns the derived maps and the report of words without a mapping.
    /// Unmapped words become the unknown concept when `with_unknown` is set
    /// and are dropped otherwise. The derived maps get a copy of the weights
    /// and remember this set as their parent.
    pub fn apply(&self, with_unknown: bool) -> (CogMaps, UnknownReport) {
        debug!(
            "CogMaps::apply({} maps, {} entries thesaurus, with_unknown={})",
            self.len(),
            self.thesaurus.len(),
            with_unknown
        );

        let mut report = UnknownReport::new();
        let mut raised = MapSet::new();

        for (&map_id, words) in &self.maps {
            let mut parents = Vec::with_capacity(words.len());
            for word in words {
                match self.thesaurus.get(word) {
                    Some(parent) => parents.push(parent.to_string()),
                    None => {
                        report.record(word, map_id);
                        if with_unknown {
                            parents.push(UNKNOWN_CONCEPT.to_string());
                        }
                    }
                }
            }
            raised.insert(map_id, parents);
        }

        info!(
            "CogMaps::apply: {} maps with {} words ({} unknown concept)",
            raised.len(),
            raised.values().map(Vec::len).sum::<usize>(),
            if with_unknown { "with" } else { "without" }
        );
        info!(
            "CogMaps::apply: {} unknown words ({}) in {} places",
            report.len(),
            UNKNOWN_CONCEPT,
            report.total_occurrences()
        );

        let derived = CogMaps {
            source: self.source.as_deref().map(derived_name),
            maps: raised,
            weights: self.weights.clone(),
            parent: Some(self.to_string()),
            format: self.format.clone(),
            ..CogMaps::new()
        };
        (derived, report)
    }

    /// Raises the maps through every level of the thesaurus.
    ///
    /// Produces the maps of the four levels and the unknown word report of
    /// each of the three transitions, each level feeding the next one.
    pub fn apply_many(self, thesauri: &ThesaurusMap, with_unknown: bool) -> LevelResults {
        debug!("CogMaps::apply_many({}, {} mappings)", self.len(), thesauri.len());
        let mut results = LevelResults::default();
        let mut current = self;

        for (from, to) in Level::transitions() {
            current.set_thesaurus(thesauri.for_level(to).cloned().unwrap_or_default());
            let (next, report) = current.apply(with_unknown);
            results.maps.insert(from, current);
            results.reports.insert(to, report);
            current = next;
        }
        results.maps.insert(Level::GrandMother, current);

        results
    }

    /// Writes the maps back in the input format.
    pub fn dump<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("CogMaps::dump({}, {})", self.len(), path.display());
        writers::write_maps(path, &self.format, &self.maps)?;
        info!("CogMaps::dump to {}", path.display());
        Ok(())
    }

    /// Writes raw counts and totals under the current weights.
    pub fn dump_occurrences<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut schemes = WeightSchemes::new();
        schemes.push(CURRENT_WEIGHTS_COLUMN, self.weights.clone());
        self.dump_occurrences_many(path, &schemes)
    }

    /// Writes raw counts and totals for each scheme, one column per scheme.
    pub fn dump_occurrences_many<P: AsRef<Path>>(
        &self,
        path: P,
        schemes: &WeightSchemes,
    ) -> Result<()> {
        let path = path.as_ref();
        let totals = self.occurrences_many(schemes);
        writers::write_occurrences(path, &self.format, self.index(), schemes, &totals)?;
        info!("CogMaps::dump_occurrences_many to {}", path.display());
        Ok(())
    }

    /// Writes the per-position histograms, most common words first.
    pub fn dump_occurrences_in_position<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        writers::write_positions(path, &self.format, self.occurrences_in_position())?;
        info!("CogMaps::dump_occurrences_in_position to {}", path.display());
        Ok(())
    }

    /// Writes the co-occurrence matrix with sorted rows and columns.
    pub fn dump_matrix<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let words: Vec<&str> = self.words().collect();
        writers::write_matrix(path, &self.format, self.matrix(), &words)?;
        info!("CogMaps::dump_matrix to {}", path.display());
        Ok(())
    }
}

/// Column name of the current weights in [`CogMaps::dump_occurrences`].
pub const CURRENT_WEIGHTS_COLUMN: &str = "ponderation";

fn derived_name(path: &Path) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    PathBuf::from(format!("concepts_of_{}{}", stem, ext))
}

impl fmt::Display for CogMaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.parent, &self.source) {
            (Some(parent), _) => write!(f, "<CogMaps of length {} from parent {}>", self.len(), parent),
            (None, Some(source)) => {
                write!(f, "<CogMaps of length {} from '{}'>", self.len(), source.display())
            }
            (None, None) => write!(f, "<CogMaps of length {}>", self.len()),
        }
    }
}

/// Maps of every level and reports of every transition.
#[derive(Debug, Clone, Default)]
pub struct LevelResults {
    /// Maps at each level, `Base` being the input.
    pub maps: BTreeMap<Level, CogMaps>,
    /// Unknown words of the transition *into* each level.
    pub reports: BTreeMap<Level, UnknownReport>,
}

impl LevelResults {
    /// Maps at a level.
    pub fn maps_at(&self, level: Level) -> Option<&CogMaps> {
        self.maps.get(&level)
    }

    /// Report of the transition into a level.
    pub fn report_at(&self, level: Level) -> Option<&UnknownReport> {
        self.reports.get(&level)
    }
}
