//! Loaders for the three input files: maps, thesaurus and weights.

use super::TabularFormat;
use crate::error::{CogMapsError, Result};
use crate::text::Normalizer;
use crate::thesaurus::{Level, ThesaurusMap};
use crate::weights::{WeightSchemes, Weights};
use crate::{MapId, MapSet, Position};
use csv::StringRecord;
use log::{debug, info, warn};
use std::path::Path;

/// Number of fields of a thesaurus row.
pub const THESAURUS_ROW_LEN: usize = 7;

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

/// Loads a map file, keeping only the maps whose identifier passes `predicate`.
///
/// Each row is `identifier;word;word;...`. Words are normalized and sentinels
/// dropped, keeping the order of the others. A row whose identifier is not an
/// integer aborts the whole load.
pub fn read_maps<P, F>(
    path: P,
    format: &TabularFormat,
    normalizer: &Normalizer,
    predicate: F,
) -> Result<MapSet>
where
    P: AsRef<Path>,
    F: Fn(MapId) -> bool,
{
    let path = path.as_ref();
    debug!("read_maps({})", path.display());

    let mut reader = format.reader(path)?;
    let mut maps = MapSet::new();

    for record in reader.records() {
        let record = record?;
        let Some(id_field) = record.get(0) else {
            continue;
        };
        if record.len() == 1 && id_field.trim().is_empty() {
            continue;
        }

        let identifier: MapId = id_field.trim().parse().map_err(|_| {
            CogMapsError::parse(line_of(&record), format!("invalid map identifier '{}'", id_field))
        })?;

        if predicate(identifier) {
            let words = normalizer.normalize_row(record.iter().skip(1));
            if maps.insert(identifier, words).is_some() {
                warn!("read_maps: map {} defined twice, keeping the last one", identifier);
            }
        }
    }

    info!(
        "read_maps: {} maps with {} words in total",
        maps.len(),
        maps.values().map(Vec::len).sum::<usize>()
    );
    Ok(maps)
}

/// Loads named weighting schemes.
///
/// The header row names the schemes (its first cell is ignored); each
/// following row is `position;weight1;weight2;...`. Empty cells leave the
/// position unset for that scheme. A name repeated in the header denotes a
/// single scheme, later columns overwriting earlier ones.
pub fn read_weights<P: AsRef<Path>>(path: P, format: &TabularFormat) -> Result<WeightSchemes> {
    let path = path.as_ref();
    debug!("read_weights({})", path.display());

    let mut reader = format.reader(path)?;
    let mut records = reader.records();

    let header = records
        .next()
        .transpose()?
        .ok_or_else(|| CogMapsError::EmptyInput(format!("no header in {}", path.display())))?;

    let mut schemes = WeightSchemes::new();
    let names: Vec<String> = header.iter().skip(1).map(|n| n.trim().to_string()).collect();
    for name in &names {
        schemes.push(name.clone(), Weights::new());
    }

    for record in records {
        let record = record?;
        let line = line_of(&record);
        let Some(pos_field) = record.get(0) else {
            continue;
        };
        if record.len() == 1 && pos_field.trim().is_empty() {
            continue;
        }

        let position: Position = pos_field
            .trim()
            .parse()
            .map_err(|_| CogMapsError::parse(line, format!("invalid position '{}'", pos_field)))?;

        for (column, cell) in record.iter().skip(1).enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let weight: f64 = cell
                .parse()
                .map_err(|_| CogMapsError::parse(line, format!("invalid weight '{}'", cell)))?;
            let name = names.get(column).ok_or_else(|| {
                CogMapsError::parse(line, format!("weight in column {} has no scheme name", column + 2))
            })?;
            schemes.get_mut(name)?.insert(position, weight);
        }
    }

    info!(
        "read_weights: {} schemes ({})",
        schemes.len(),
        schemes.names().collect::<Vec<_>>().join(", ")
    );
    Ok(schemes)
}

/// Loads the thesaurus into its three chained level mappings.
///
/// Rows are `word;code;concept;mother;code;grand_mother;code`. A row of the
/// wrong length is reported and still parsed, missing fields reading as
/// empty. Conflicting mappings are reported and the last one wins.
pub fn read_thesaurus<P: AsRef<Path>>(
    path: P,
    format: &TabularFormat,
    normalizer: &Normalizer,
) -> Result<ThesaurusMap> {
    let path = path.as_ref();
    debug!("read_thesaurus({})", path.display());

    let mut reader = format.reader(path)?;
    let mut thesaurus = ThesaurusMap::new();

    for record in reader.records() {
        let record = record?;
        if record.len() != THESAURUS_ROW_LEN {
            warn!(
                "read_thesaurus: line {} has {} fields instead of {}",
                line_of(&record),
                record.len(),
                THESAURUS_ROW_LEN
            );
        }

        let field = |i: usize| -> String {
            let cleaned = normalizer.clean_word(record.get(i).unwrap_or(""));
            if normalizer.is_empty_word(&cleaned) {
                String::new()
            } else {
                cleaned
            }
        };

        thesaurus.insert_row(&field(0), &field(2), &field(3), &field(5));
    }

    info!(
        "read_thesaurus: {} mappings over 3 levels, {} concepts",
        thesaurus.len(),
        thesaurus
            .for_level(Level::Concept)
            .map_or(0, |concepts| concepts.num_parents())
    );
    Ok(thesaurus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_maps_normalizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maps.csv");
        fs::write(&path, "3; Mer ;NULL;Nickel;;mer\n1;argent\n").unwrap();

        let maps = read_maps(&path, &TabularFormat::default(), &Normalizer::default(), |_| true)
            .unwrap();

        assert_eq!(maps.len(), 2);
        assert_eq!(maps[&3], vec!["mer", "nickel", "mer"]);
        assert_eq!(maps[&1], vec!["argent"]);
        assert_eq!(maps.keys().copied().collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_read_maps_predicate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maps.csv");
        fs::write(&path, "1;a\n2;b\n3;c\n").unwrap();

        let maps = read_maps(&path, &TabularFormat::default(), &Normalizer::default(), |id| id != 2)
            .unwrap();

        assert_eq!(maps.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_read_maps_bad_identifier() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maps.csv");
        fs::write(&path, "1;a\nabc;b\n").unwrap();

        let err = read_maps(&path, &TabularFormat::default(), &Normalizer::default(), |_| true)
            .unwrap_err();

        match err {
            CogMapsError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_read_maps_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_maps(
            dir.path().join("missing.csv"),
            &TabularFormat::default(),
            &Normalizer::default(),
            |_| true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_read_weights() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.csv");
        fs::write(&path, "position;flat;decay\n1;1.0;1.0\n2;1.0;0.5\n3;1.0;\n").unwrap();

        let schemes = read_weights(&path, &TabularFormat::default()).unwrap();

        assert_eq!(schemes.names().collect::<Vec<_>>(), vec!["flat", "decay"]);
        let decay = schemes.get("decay").unwrap();
        assert_eq!(decay.get(2), 0.5);
        assert_eq!(decay.get(3), 0.0);
        assert_eq!(decay.len(), 2);
        assert_eq!(schemes.get("flat").unwrap().len(), 3);
    }

    #[test]
    fn test_read_weights_repeated_scheme_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.csv");
        fs::write(&path, "position;a;a;b\n1;1.0;0.9;0.5\n2;0.8;;0.25\n").unwrap();

        let schemes = read_weights(&path, &TabularFormat::default()).unwrap();

        assert_eq!(schemes.names().collect::<Vec<_>>(), vec!["a", "b"]);
        let a = schemes.get("a").unwrap();
        assert_eq!(a.get(1), 0.9);
        assert_eq!(a.get(2), 0.8);
        let b = schemes.get("b").unwrap();
        assert_eq!(b.get(1), 0.5);
        assert_eq!(b.get(2), 0.25);
    }

    #[test]
    fn test_read_weights_bad_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.csv");
        fs::write(&path, "position;flat\n1;beaucoup\n").unwrap();

        let err = read_weights(&path, &TabularFormat::default()).unwrap_err();
        assert!(matches!(err, CogMapsError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_read_weights_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.csv");
        fs::write(&path, "").unwrap();

        let err = read_weights(&path, &TabularFormat::default()).unwrap_err();
        assert!(matches!(err, CogMapsError::EmptyInput(_)));
    }

    #[test]
    fn test_read_thesaurus() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("thesaurus.csv");
        fs::write(
            &path,
            "Nickel;1;Minerai;Ressource;10;Économie;100\n\
             Mer;2;Nature;Environnement;20;Milieu;200\n\
             Boom;3;null;;;;\n\
             Cobalt;4;Minerai;Ressource\n",
        )
        .unwrap();

        let thesaurus =
            read_thesaurus(&path, &TabularFormat::default(), &Normalizer::default()).unwrap();

        let concept = thesaurus.for_level(Level::Concept).unwrap();
        assert_eq!(concept.resolve("nickel"), "minerai");
        assert_eq!(concept.resolve("cobalt"), "minerai");
        assert_eq!(concept.resolve("boom"), crate::UNKNOWN_CONCEPT);
        assert_eq!(
            thesaurus.for_level(Level::Mother).unwrap().resolve("nature"),
            "environnement"
        );
        assert_eq!(
            thesaurus.for_level(Level::GrandMother).unwrap().resolve("ressource"),
            "économie"
        );
    }
}
