//! Text module: normalization of the words read from input files.

mod normalizer;

pub use normalizer::Normalizer;
