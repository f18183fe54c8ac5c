//! Storage module: the `;`-delimited tabular files read and written by the engine.

mod format;
pub mod readers;
pub mod writers;

pub use format::{format_real, TabularFormat};
pub use readers::{read_maps, read_thesaurus, read_weights};
