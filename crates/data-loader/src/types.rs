//! Core domain types for the movie-ratings dataset.
//!
//! This module defines the fundamental data structures used throughout the
//! system:
//! - Type aliases for domain clarity (MovieId)
//! - The `Movie` and `Rating` row types decoded straight from CSV
//! - The immutable `Dataset` that every query operation reads from

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the catalog.
///
/// The struct deserializes directly from a `movies.csv` row; extra columns
/// in the file are ignored and `title` is tolerated but not required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    /// Raw pipe-delimited genre tags, e.g. "Animation|Children's|Comedy".
    ///
    /// Kept in source form because genre queries match on the raw string
    /// (case-insensitive substring), not on the split labels.
    pub genres: String,
}

impl Movie {
    /// Iterate over the individual genre labels of this movie.
    ///
    /// Labels are trimmed and empty segments are skipped, so a movie with
    /// an empty `genres` string contributes nothing.
    pub fn genre_labels(&self) -> impl Iterator<Item = &str> {
        self.genres
            .split('|')
            .map(|label| label.trim())
            .filter(|label| !label.is_empty())
    }
}

// =============================================================================
// Rating Type
// =============================================================================

/// Represents a single rating event for a movie.
///
/// Deserializes directly from a `ratings.csv` row. Columns beyond
/// {movieId, rating, timestamp} (e.g. a userId) are ignored. A rating may
/// reference a movie that is not in the catalog; such rows are legal and
/// are silently excluded from genre-based aggregation later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Rating value, e.g. 0.5 to 5.0 in MovieLens exports
    pub rating: f32,
    /// Unix timestamp (epoch seconds) when the rating was made
    pub timestamp: i64,
}

// =============================================================================
// Dataset - The Shared In-Memory Tables
// =============================================================================

/// Holds the two loaded tables: the movie catalog and the ratings log.
///
/// A `Dataset` is built once at process start (see `load_from_dir`) and is
/// then shared read-only behind an `Arc`. Every query operation allocates
/// and returns new derived values; nothing here mutates after load, so
/// concurrent readers need no locking.
#[derive(Debug)]
pub struct Dataset {
    pub(crate) movies: HashMap<MovieId, Movie>,
    pub(crate) ratings: Vec<Rating>,
}

impl Dataset {
    /// Creates a new, empty Dataset
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
            ratings: Vec::new(),
        }
    }

    // Getters - These return references (&T) not owned values (T)

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Iterate over all movies in the catalog (unordered)
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    /// All ratings in load order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    // Mutators - Used during data loading and by test fixtures

    /// Insert a movie into the catalog
    pub fn insert_movie(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    /// Append a rating to the log
    pub fn insert_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Get counts for logging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}
