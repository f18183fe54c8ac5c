//! Inverted index over a map set.

mod inverted;

pub use inverted::{IndexStats, Posting, WordIndex};
