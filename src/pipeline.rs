//! Result generation: load the inputs, raise the maps through every level and
//! dump every table.
//!
//! For an input `maps.csv` the output directory receives, per level
//! (`base`, `concept`, `mother`, `gd_mother`):
//!
//! ```text
//! maps_<level>.csv                       the maps at that level
//! maps_<level>_occurrences.csv           counts and totals for every scheme
//! maps_<level>_positions.csv             per-position histograms
//! maps_<level>_matrice_<scheme>.csv      co-occurrence matrix
//! ```
//!
//! and, per transition, `maps_<level>_inconnus.csv` listing the words left
//! without a parent.

use crate::cogmaps::{CogMaps, LevelResults};
use crate::config::Config;
use crate::error::{CogMapsError, Result};
use crate::storage::{read_thesaurus, read_weights, TabularFormat};
use crate::text::Normalizer;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Input files and output directory of a run.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Map file.
    pub maps: PathBuf,
    /// Thesaurus file.
    pub thesaurus: PathBuf,
    /// Weights file.
    pub weights: PathBuf,
    /// Directory receiving the results.
    pub output_dir: PathBuf,
}

/// Standard name of a result file: `<dir>/<stem of base>_<suffix>.csv`.
pub fn output_filename(dir: &Path, base: &Path, suffix: &str) -> PathBuf {
    let stem = base.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    dir.join(format!("{}_{}.csv", stem, suffix))
}

/// Fails on the first path that is not an existing file.
pub fn check_inputs(paths: &[&Path]) -> Result<()> {
    match paths.iter().find(|p| !p.is_file()) {
        Some(missing) => Err(CogMapsError::FileNotFound(missing.to_path_buf())),
        None => Ok(()),
    }
}

/// Runs the whole pipeline and returns the maps of every level.
///
/// Every input is loaded and checked before the output directory is touched,
/// so a failing run writes nothing.
pub fn generate_results(inputs: &Inputs, config: &Config) -> Result<LevelResults> {
    debug!("generate_results({:?}, {:?})", inputs, config.pipeline);
    check_inputs(&[
        inputs.maps.as_path(),
        inputs.thesaurus.as_path(),
        inputs.weights.as_path(),
    ])?;

    let format = TabularFormat::from_config(&config.format);
    let normalizer = Normalizer::new(config.text.clone());
    let pipeline = &config.pipeline;

    let thesaurus = read_thesaurus(&inputs.thesaurus, &format, &normalizer)?;
    let schemes = read_weights(&inputs.weights, &format)?;
    let matrix_weights = schemes.get(&pipeline.weights_name)?.clone();
    let maps = CogMaps::load_with(&inputs.maps, format.clone(), &normalizer, |_| true)?;

    let mut results = maps.apply_many(&thesaurus, pipeline.with_unknown);

    fs::create_dir_all(&inputs.output_dir)?;
    let name = |suffix: String| output_filename(&inputs.output_dir, &inputs.maps, &suffix);

    for (level, level_maps) in results.maps.iter_mut() {
        level_maps.dump(name(level.to_string()))?;
        level_maps.dump_occurrences_many(
            name(format!("{}_{}", level, pipeline.occurrences_suffix)),
            &schemes,
        )?;
        level_maps.dump_occurrences_in_position(name(format!(
            "{}_{}",
            level, pipeline.positions_suffix
        )))?;
        level_maps.set_weights(matrix_weights.clone());
        level_maps.dump_matrix(name(format!(
            "{}_{}_{}",
            level, pipeline.matrix_suffix, pipeline.weights_name
        )))?;
    }

    for (level, report) in &results.reports {
        report.dump(
            name(format!("{}_{}", level, pipeline.unknown_suffix)),
            &format,
        )?;
    }

    info!(
        "generate_results: {} levels written to {}",
        results.maps.len(),
        inputs.output_dir.display()
    );
    Ok(results)
}
