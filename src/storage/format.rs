//! Tabular file format shared by every input and output file.
//!
//! ## Layout
//!
//! ```text
//! identifier;word1;word2;...         maps (no header)
//! word;code;concept;mother;code;grand_mother;code
//!                                    thesaurus (no header, 7 fields)
//! position;scheme1;scheme2;...       weights (header names the schemes)
//! ```
//!
//! Fields are separated by `;` and may be quoted with `"`. Rows may have
//! different lengths. Output rows end with `\n`.

use crate::config::FormatConfig;
use crate::error::Result;
use csv::{QuoteStyle, Reader, ReaderBuilder, Terminator, Writer, WriterBuilder};
use std::fs::File;
use std::path::Path;

/// Builds readers and writers for the tabular format.
#[derive(Debug, Clone)]
pub struct TabularFormat {
    delimiter: u8,
    quote: u8,
    decimals: u32,
}

impl TabularFormat {
    /// Creates a format from its configuration.
    pub fn from_config(config: &FormatConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            quote: config.quote,
            decimals: config.decimals,
        }
    }

    /// Opens a reader. No header handling, ragged rows allowed.
    pub fn reader<P: AsRef<Path>>(&self, path: P) -> Result<Reader<File>> {
        let reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        Ok(reader)
    }

    /// Creates (or truncates) a file and opens a writer on it.
    pub fn writer<P: AsRef<Path>>(&self, path: P) -> Result<Writer<File>> {
        let writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_path(path)?;
        Ok(writer)
    }

    /// Number of decimals kept for real values.
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Formats a real value rounded to the configured decimals.
    ///
    /// The shortest representation is used, always with a fractional part:
    /// `1.0`, `3.99`, `0.33`.
    pub fn format_real(&self, value: f64) -> String {
        format_real(value, self.decimals)
    }
}

impl Default for TabularFormat {
    fn default() -> Self {
        Self::from_config(&FormatConfig::default())
    }
}

/// Rounds `value` to `decimals` places and prints it in shortest form.
///
/// Rounding works on the exact binary value, exact halves going to the even
/// digit: `0.125` prints as `0.12`, `0.375` as `0.38`.
pub fn format_real(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.*}", decimals as usize, value);
    let rounded: f64 = fixed.parse().unwrap_or(value);
    // avoid printing "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:?}", rounded)
}
