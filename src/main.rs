//! cogmaps CLI - Cognitive Map Aggregation Engine
//!
//! Command-line interface for computing the tables of a set of cognitive maps.

use clap::{ArgAction, Parser, Subcommand};
use cogmaps::weights::presets;
use cogmaps::{
    generate_results, CogMaps, Config, Inputs, Level, Normalizer, Result, TabularFormat,
};
use log::error;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cogmaps")]
#[command(version)]
#[command(about = "Cognitive map processing tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity: -v for info, -vv for debug
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every table for every thesaurus level
    Generate {
        /// Map file (identifier;word 1;word 2;...)
        #[arg(short, long, default_value = "input/cartes_cog_la_mine.csv")]
        maps: PathBuf,

        /// Thesaurus file (word;code;concept;mother;code;grand mother;code)
        #[arg(short, long, default_value = "input/thesaurus.csv")]
        thesaurus: PathBuf,

        /// Weights file (position;weight A;weight B;...)
        #[arg(short, long, default_value = "input/coefficients.csv")]
        weights: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Keep words without concept as the unknown concept
        #[arg(short, long)]
        unknown: bool,

        /// Weighting scheme used for the co-occurrence matrices
        #[arg(short, long, default_value = cogmaps::DEFAULT_WEIGHTS_NAME)]
        scheme: String,
    },

    /// Show statistics about a map file
    Info {
        /// Map file to inspect
        maps: PathBuf,

        /// Only consider maps with identifiers in this inclusive range (e.g. "1-100")
        #[arg(short, long)]
        range: Option<String>,
    },

    /// Write the built-in weighting schemes in the weights file format
    Weights {
        /// Output weights file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of positions
        #[arg(short = 'n', long, default_value_t = cogmaps::DEFAULT_MAX_LEN)]
        max_len: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Generate {
            maps,
            thesaurus,
            weights,
            output,
            unknown,
            scheme,
        } => generate(maps, thesaurus, weights, output, unknown, scheme),

        Commands::Info { maps, range } => show_info(maps, range),

        Commands::Weights { output, max_len } => write_presets(output, max_len),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate(
    maps: PathBuf,
    thesaurus: PathBuf,
    weights: PathBuf,
    output: PathBuf,
    unknown: bool,
    scheme: String,
) -> Result<()> {
    let start_time = Instant::now();

    let mut config = Config::default();
    config.pipeline.with_unknown = unknown;
    config.pipeline.weights_name = scheme;

    let inputs = Inputs {
        maps,
        thesaurus,
        weights,
        output_dir: output,
    };
    let results = generate_results(&inputs, &config)?;

    for level in Level::ALL {
        if let Some(level_maps) = results.maps_at(level) {
            print!(
                "{:>10}: {} maps, {} words, {} different",
                level.as_str(),
                level_maps.len(),
                level_maps.total_words(),
                level_maps.index().len()
            );
            match results.report_at(level) {
                Some(report) => println!(", {} unknown", report.len()),
                None => println!(),
            }
        }
    }
    println!();
    println!(
        "Results written to {} in {:.2}s",
        inputs.output_dir.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn parse_range(range: &str) -> Result<(u32, u32)> {
    let invalid = || cogmaps::CogMapsError::Config(format!("invalid range '{}'", range));
    let (low, high) = range.split_once('-').ok_or_else(invalid)?;
    let low = low.trim().parse().map_err(|_| invalid())?;
    let high = high.trim().parse().map_err(|_| invalid())?;
    Ok((low, high))
}

fn show_info(path: PathBuf, range: Option<String>) -> Result<()> {
    let maps = match range {
        Some(range) => {
            let (low, high) = parse_range(&range)?;
            CogMaps::load_with(
                &path,
                TabularFormat::default(),
                &Normalizer::default(),
                move |id| (low..=high).contains(&id),
            )?
        }
        None => CogMaps::load(&path)?,
    };

    let stats = maps.index().stats();

    println!("Maps Information");
    println!("================");
    println!("File:            {}", path.display());
    println!("Maps:            {}", maps.len());
    println!("Words:           {}", maps.total_words());
    println!("Different words: {}", stats.num_words);
    println!("Longest map:     {}", stats.max_position);
    println!("Avg. frequency:  {:.2}", stats.avg_list_size);
    if let Some(word) = &stats.most_frequent {
        let mut map_ids = maps.index().map_ids(word);
        map_ids.dedup();
        println!(
            "Most frequent:   {} ({} times in {} maps)",
            word,
            stats.max_list_size,
            map_ids.len()
        );
    }

    println!();
    println!("First position, most common words:");
    for (word, count) in maps.occurrences_in_position().most_common(1).into_iter().take(10) {
        println!("  {:>5}  {}", count, word);
    }

    // each pair appears once per direction
    let mut pairs: Vec<(&str, &str, f64)> = maps
        .matrix()
        .edges(f64::MIN_POSITIVE)
        .into_iter()
        .filter(|(a, b, _)| a < b)
        .collect();
    pairs.sort_by(|x, y| y.2.total_cmp(&x.2));

    println!();
    println!("Strongest co-occurrences:");
    for (a, b, value) in pairs.into_iter().take(10) {
        println!("  {:>7.2}  {} / {}", value, a, b);
    }

    Ok(())
}

fn write_presets(output: PathBuf, max_len: u32) -> Result<()> {
    let schemes = presets::builtin(max_len);
    let format = TabularFormat::default();
    let mut writer = format.writer(&output)?;

    let mut header = vec!["position".to_string()];
    header.extend(schemes.names().map(str::to_string));
    writer.write_record(&header)?;

    for position in 1..=max_len {
        let mut row = vec![position.to_string()];
        // unset positions stay empty cells
        row.extend(schemes.iter().map(|(_, weights)| {
            weights
                .iter()
                .find(|&(p, _)| p == position)
                .map_or_else(String::new, |(_, w)| format.format_real(w))
        }));
        writer.write_record(&row)?;
    }
    writer.flush()?;

    println!("Wrote {} schemes to {}", schemes.len(), output.display());
    Ok(())
}
