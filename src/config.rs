//! Configuration for the cognitive map engine.

use serde::{Deserialize, Serialize};

/// Main configuration for the engine and the result pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Word normalization configuration.
    pub text: TextConfig,

    /// Tabular file format configuration.
    pub format: FormatConfig,

    /// Result generation configuration.
    pub pipeline: PipelineConfig,
}

/// Word normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Strip surrounding whitespace.
    /// Default: true.
    pub trim: bool,

    /// Convert all words to lowercase.
    /// Default: true.
    pub lowercase: bool,

    /// Apply Unicode normalization (NFC) before comparing words.
    /// Default: false.
    pub unicode_normalize: bool,

    /// Cleaned words treated as absent and dropped at load time.
    /// Default: `["null", ""]`.
    pub empty_words: Vec<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            trim: true,
            lowercase: true,
            unicode_normalize: false,
            empty_words: vec!["null".to_string(), String::new()],
        }
    }
}

/// Tabular file format configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Field delimiter.
    /// Default: `;`.
    pub delimiter: u8,

    /// Quote character.
    /// Default: `"`.
    pub quote: u8,

    /// Number of decimals kept for real values in dumps.
    /// Default: 2.
    pub decimals: u32,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            quote: b'"',
            decimals: 2,
        }
    }
}

/// Result generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Keep words without a thesaurus mapping (as the unknown concept).
    /// Default: false.
    pub with_unknown: bool,

    /// Weighting scheme used for the co-occurrence matrix.
    /// Default: "arithmetique".
    pub weights_name: String,

    /// Suffix of the occurrence dumps.
    /// Default: "occurrences".
    pub occurrences_suffix: String,

    /// Suffix of the per-position histogram dumps.
    /// Default: "positions".
    pub positions_suffix: String,

    /// Suffix of the matrix dumps.
    /// Default: "matrice".
    pub matrix_suffix: String,

    /// Suffix of the unknown word reports.
    /// Default: "inconnus".
    pub unknown_suffix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            with_unknown: false,
            weights_name: crate::DEFAULT_WEIGHTS_NAME.to_string(),
            occurrences_suffix: "occurrences".to_string(),
            positions_suffix: "positions".to_string(),
            matrix_suffix: "matrice".to_string(),
            unknown_suffix: "inconnus".to_string(),
        }
    }
}
