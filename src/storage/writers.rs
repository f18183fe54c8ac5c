//! Dumps of maps and derived tables.
//!
//! These files are consumed by the visualization tools and never read back,
//! except the map dump, which uses the input format.

use super::TabularFormat;
use crate::cogmaps::{CooccurrenceMatrix, PositionHistograms, UnknownReport};
use crate::error::Result;
use crate::index::WordIndex;
use crate::weights::WeightSchemes;
use crate::MapSet;
use std::collections::BTreeMap;
use std::path::Path;

/// Writes `identifier;word;word;...` rows in map order.
pub fn write_maps<P: AsRef<Path>>(path: P, format: &TabularFormat, maps: &MapSet) -> Result<()> {
    let mut writer = format.writer(path)?;
    for (map_id, words) in maps {
        let mut row = Vec::with_capacity(words.len() + 1);
        row.push(map_id.to_string());
        row.extend(words.iter().cloned());
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `word;id;id;...` rows, sorted by word.
pub fn write_report<P: AsRef<Path>>(
    path: P,
    format: &TabularFormat,
    report: &UnknownReport,
) -> Result<()> {
    let mut writer = format.writer(path)?;
    for (word, map_ids) in report.iter() {
        let mut row = Vec::with_capacity(map_ids.len() + 1);
        row.push(word.to_string());
        row.extend(map_ids.iter().map(|id| id.to_string()));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the occurrence table.
///
/// Header `mot;nb_occurrences;<scheme>...`, then one row per word in sorted
/// order: raw count followed by one rounded total per scheme.
pub fn write_occurrences<P: AsRef<Path>>(
    path: P,
    format: &TabularFormat,
    index: &WordIndex,
    schemes: &WeightSchemes,
    totals: &BTreeMap<String, Vec<f64>>,
) -> Result<()> {
    let mut writer = format.writer(path)?;

    let mut header = vec!["mot".to_string(), "nb_occurrences".to_string()];
    header.extend(schemes.names().map(str::to_string));
    writer.write_record(&header)?;

    for word in index.words() {
        let mut row = vec![word.to_string(), index.frequency(word).to_string()];
        if let Some(values) = totals.get(word) {
            row.extend(values.iter().map(|&v| format.format_real(v)));
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the per-position histograms side by side.
///
/// Header `mot 1;nb 1;mot 2;nb 2;...`; row `k` holds the `k`-th most common
/// word of each position. Shorter columns are padded with empty pairs.
pub fn write_positions<P: AsRef<Path>>(
    path: P,
    format: &TabularFormat,
    histograms: &PositionHistograms,
) -> Result<()> {
    let mut writer = format.writer(path)?;

    let columns: Vec<Vec<(&str, usize)>> = histograms
        .positions()
        .map(|pos| histograms.most_common(pos))
        .collect();

    let header: Vec<String> = histograms
        .positions()
        .flat_map(|pos| [format!("mot {}", pos), format!("nb {}", pos)])
        .collect();
    writer.write_record(&header)?;

    let depth = columns.iter().map(Vec::len).max().unwrap_or(0);
    for rank in 0..depth {
        let mut row = Vec::with_capacity(columns.len() * 2);
        for column in &columns {
            match column.get(rank) {
                Some((word, count)) => {
                    row.push(word.to_string());
                    row.push(count.to_string());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the matrix restricted to `words`, in that order for rows and columns.
///
/// Header `/;word;word;...`, then `word;value;value;...` rounded rows.
pub fn write_matrix<P: AsRef<Path>>(
    path: P,
    format: &TabularFormat,
    matrix: &CooccurrenceMatrix,
    words: &[&str],
) -> Result<()> {
    let mut writer = format.writer(path)?;

    let mut header = Vec::with_capacity(words.len() + 1);
    header.push("/".to_string());
    header.extend(words.iter().map(|w| w.to_string()));
    writer.write_record(&header)?;

    for row_word in words {
        let mut row = Vec::with_capacity(words.len() + 1);
        row.push(row_word.to_string());
        row.extend(
            words
                .iter()
                .map(|col_word| format.format_real(matrix.get(row_word, col_word))),
        );
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
