//! Integration tests for the cognitive map aggregation engine.

use cogmaps::storage::{read_thesaurus, read_weights};
use cogmaps::{
    generate_results, CogMaps, CogMapsError, Config, Inputs, Level, Normalizer, TabularFormat,
    Weights, UNKNOWN_CONCEPT,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const DUMP_CONTENT: &str = "1;pollution;inondation;boom;travail;retombée
2;richesse;malédiction;travail;destruction;histoire;frein;blocage;coutumier
4;travail;pollution;plainte
5;argent;pollution;nickel;production;nature;réparation;mer;inégalité
6;extraction;montagne;pollution;mineur;train;diversité;évolution
7;pollution;nickel;argent;mer;camion
8;centre minier;village;économie;production;travail;environnement;revenu
9;camion;contracteur;caillou;terre rouge;géologie;laboratoire;perle;argent;travail;aide
10;emploi;environnement;pollution;aide;reboisement;porte d’entrée;inondation
";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn load_small() -> CogMaps {
    CogMaps::load(fixture("cartes_cog_small.csv")).unwrap()
}

fn arithmetic_weights() -> Weights {
    let schemes = read_weights(fixture("coefficients.csv"), &TabularFormat::default()).unwrap();
    schemes.get("arithmetique").unwrap().clone()
}

#[test]
fn test_load() {
    let maps = load_small();
    assert_eq!(maps.len(), 9);
    assert_eq!(
        maps.maps()[&1],
        vec!["pollution", "inondation", "boom", "travail", "retombée"]
    );
    assert!(!maps.maps().contains_key(&3));
}

#[test]
fn test_load_filtered() {
    let maps = CogMaps::load_filtered(fixture("cartes_cog_small.csv"), |id| id <= 5).unwrap();
    assert_eq!(maps.maps().keys().copied().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
}

#[test]
fn test_dump() {
    let maps = load_small();
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump.csv");
    maps.dump(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), DUMP_CONTENT);

    let reloaded = CogMaps::load(&path).unwrap();
    assert_eq!(reloaded.maps(), maps.maps());
}

#[test]
fn test_dump_keeps_row_order() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("unsorted.csv");
    let content = "10;emploi;aide\n2;richesse;travail\n7;camion\n";
    fs::write(&input, content).unwrap();

    let maps = CogMaps::load(&input).unwrap();
    let output = dir.path().join("dump.csv");
    maps.dump(&output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), content);
}

#[test]
fn test_index_covers_every_word() {
    let maps = load_small();
    let index = maps.index();
    assert_eq!(index.len(), 42);

    for (&map_id, words) in maps.maps() {
        for (i, word) in words.iter().enumerate() {
            let position = i as u32 + 1;
            assert!(index
                .get(word)
                .unwrap()
                .iter()
                .any(|p| p.map_id == map_id && p.position == position));
        }
    }

    let stats = index.stats();
    assert_eq!(stats.most_frequent.as_deref(), Some("pollution"));
    assert_eq!(stats.max_list_size, 6);
    assert_eq!(stats.max_position, 10);
}

#[test]
fn test_uniform_occurrences_are_counts() {
    let maps = load_small();
    let occurrences = maps.occurrences();
    assert_eq!(occurrences.len(), 42);
    assert_eq!(occurrences["pollution"], 6.0);
    assert_eq!(occurrences["travail"], 5.0);
    assert_eq!(occurrences["boom"], 1.0);
}

#[test]
fn test_weighted_occurrences() {
    let mut maps = load_small();
    maps.set_weights(arithmetic_weights());

    // travail is at positions 4, 3, 1, 5 and 9
    assert!((maps.occurrences()["travail"] - 3.99).abs() < 1e-9);

    let dir = tempdir().unwrap();
    let path = dir.path().join("occurrences.csv");
    maps.dump_occurrences(&path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("mot;nb_occurrences;ponderation\n"));
    assert!(content.contains("\ntravail;5;3.99\n"));
}

#[test]
fn test_occurrences_in_position() {
    let maps = load_small();
    let histograms = maps.occurrences_in_position();
    assert_eq!(histograms.len(), 10);
    assert_eq!(histograms.count(1, "pollution"), 2);
    assert_eq!(histograms.count(1, "travail"), 1);
    assert_eq!(histograms.most_common(1)[0], ("pollution", 2));
    assert_eq!(histograms.most_common(10), vec![("aide", 1)]);
}

#[test]
fn test_matrix() {
    let mut maps = load_small();
    maps.set_weights(arithmetic_weights());
    let matrix = maps.matrix();

    assert_eq!(matrix.len(), 42);
    assert_eq!(matrix.get("pollution", "pollution"), 6.0);
    // 5: argent at 1, nickel at 3; 7: nickel at 2, argent at 3
    let expected = 0.94 + 1.00;
    assert!((matrix.get("nickel", "argent") - expected).abs() < 1e-9);
    assert_eq!(matrix.get("nickel", "argent"), matrix.get("argent", "nickel"));
    assert_eq!(matrix.get("boom", "emploi"), 0.0);
}

#[test]
fn test_apply_without_unknown() {
    let maps = load_small();
    let thesauri = read_thesaurus(
        fixture("thesaurus.csv"),
        maps.format(),
        &Normalizer::default(),
    )
    .unwrap();

    let results = maps.apply_many(&thesauri, false);
    assert_eq!(results.maps.len(), 4);
    assert_eq!(results.reports.len(), 3);

    let concepts = results.maps_at(Level::Concept).unwrap();
    assert_eq!(concepts.len(), 9);
    assert_eq!(concepts.maps()[&1], vec!["pollution", "catastrophe", "emploi"]);
    assert_eq!(concepts.index().len(), 7);
    assert!(!concepts.index().contains(UNKNOWN_CONCEPT));

    let report = results.report_at(Level::Concept).unwrap();
    assert_eq!(report.len(), 34);
    assert_eq!(report.get("boom"), Some(&[1][..]));
    assert_eq!(report.get("environnement"), Some(&[8, 10][..]));
    assert!(!report.contains("travail"));

    assert!(results.report_at(Level::Mother).unwrap().is_empty());

    let grand_mothers = results.maps_at(Level::GrandMother).unwrap();
    assert_eq!(
        grand_mothers.maps()[&7],
        vec![
            "nature et territoire",
            "économie",
            "économie",
            "nature et territoire",
            "économie"
        ]
    );
    assert_eq!(grand_mothers.occurrences()["économie"], 13.0);
    assert_eq!(grand_mothers.occurrences()["nature et territoire"], 10.0);
}

#[test]
fn test_apply_with_unknown() {
    let maps = load_small();
    let thesauri = read_thesaurus(
        fixture("thesaurus.csv"),
        maps.format(),
        &Normalizer::default(),
    )
    .unwrap();

    let results = maps.apply_many(&thesauri, true);
    let concepts = results.maps_at(Level::Concept).unwrap();
    assert_eq!(concepts.total_words(), results.maps_at(Level::Base).unwrap().total_words());
    assert_eq!(concepts.maps()[&4], vec!["emploi", "pollution", UNKNOWN_CONCEPT]);

    // the unknown concept has no mother
    let report = results.report_at(Level::Mother).unwrap();
    assert_eq!(report.len(), 1);
    assert!(report.contains(UNKNOWN_CONCEPT));
}

#[test]
fn test_generate_results() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("output");
    let inputs = Inputs {
        maps: fixture("cartes_cog_small.csv"),
        thesaurus: fixture("thesaurus.csv"),
        weights: fixture("coefficients.csv"),
        output_dir: output_dir.clone(),
    };

    let results = generate_results(&inputs, &Config::default()).unwrap();
    assert_eq!(results.maps.len(), 4);

    let mut files: Vec<String> = fs::read_dir(&output_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files.len(), 19);

    for level in ["base", "concept", "mother", "gd_mother"] {
        for suffix in ["", "_occurrences", "_positions", "_matrice_arithmetique"] {
            let name = format!("cartes_cog_small_{}{}.csv", level, suffix);
            assert!(files.contains(&name), "missing {}", name);
        }
    }
    for level in ["concept", "mother", "gd_mother"] {
        let name = format!("cartes_cog_small_{}_inconnus.csv", level);
        assert!(files.contains(&name), "missing {}", name);
    }

    let base = fs::read_to_string(output_dir.join("cartes_cog_small_base.csv")).unwrap();
    assert_eq!(base, DUMP_CONTENT);

    let occurrences =
        fs::read_to_string(output_dir.join("cartes_cog_small_base_occurrences.csv")).unwrap();
    assert!(occurrences.starts_with("mot;nb_occurrences;arithmetique;inverse\n"));
    assert!(occurrences.contains("\ntravail;5;3.99;"));

    let matrix =
        fs::read_to_string(output_dir.join("cartes_cog_small_gd_mother_matrice_arithmetique.csv"))
            .unwrap();
    assert!(matrix.starts_with("/;nature et territoire;économie\n"));
}

#[test]
fn test_generate_results_unknown_scheme() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("output");
    let inputs = Inputs {
        maps: fixture("cartes_cog_small.csv"),
        thesaurus: fixture("thesaurus.csv"),
        weights: fixture("coefficients.csv"),
        output_dir: output_dir.clone(),
    };
    let mut config = Config::default();
    config.pipeline.weights_name = "geometrique".to_string();

    match generate_results(&inputs, &config) {
        Err(CogMapsError::UnknownScheme(name)) => assert_eq!(name, "geometrique"),
        other => panic!("unexpected result: {:?}", other.map(|r| r.maps.len())),
    }
    assert!(!output_dir.exists());
}

#[test]
fn test_generate_results_missing_input() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("output");
    let inputs = Inputs {
        maps: fixture("cartes_cog_small.csv"),
        thesaurus: dir.path().join("missing.csv"),
        weights: fixture("coefficients.csv"),
        output_dir: output_dir.clone(),
    };

    assert!(matches!(
        generate_results(&inputs, &Config::default()),
        Err(CogMapsError::FileNotFound(_))
    ));
    assert!(!output_dir.exists());
}
