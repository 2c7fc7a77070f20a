//! Genre catalog extraction.
//!
//! Produces the set of distinct genre labels across the whole movie
//! catalog, used by callers to populate their genre pickers.

use data_loader::Dataset;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Lists the distinct genre labels present in the movie catalog.
///
/// ## Algorithm
/// 1. Split every movie's pipe-delimited genre string into labels
/// 2. Trim surrounding whitespace, discard empty labels
/// 3. Deduplicate and sort lexicographically ascending
///
/// An empty catalog yields an empty list; there are no failure modes.
#[derive(Clone)]
pub struct GenreCatalog {
    /// Shared reference to the dataset (read-only, so no Mutex needed)
    dataset: Arc<Dataset>,
}

impl GenreCatalog {
    /// Create a new GenreCatalog over the shared dataset
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// All distinct genre labels, sorted ascending.
    ///
    /// Recomputed per call; the result is a fresh allocation and the
    /// dataset is never mutated.
    pub fn list_genres(&self) -> Vec<String> {
        // BTreeSet gives us dedup and lexicographic order in one pass
        let labels: BTreeSet<&str> = self
            .dataset
            .movies()
            .flat_map(|movie| movie.genre_labels())
            .collect();

        debug!("Collected {} distinct genre labels", labels.len());
        labels.into_iter().map(String::from).collect()
    }
}
