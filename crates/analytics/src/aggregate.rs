//! Per-genre, per-year rating aggregation.
//!
//! This module joins the ratings log to the movie catalog by genre, derives
//! a UTC calendar year from each rating's timestamp, and computes the
//! arithmetic mean rating per year. It is the numeric backbone of every
//! chart the system serves.
//!
//! ## Matching rule
//! A movie matches a queried genre iff the query appears anywhere in the
//! movie's raw genre string, case-insensitively. This is substring
//! matching, not exact label matching: querying "om" matches both
//! "Romance" and "Comedy". Deliberate, and preserved exactly.

use chrono::{DateTime, Datelike};
use data_loader::{Dataset, MovieId};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Average rating for one calendar year. Derived per query, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyAverage {
    pub year: i32,
    pub avg_rating: f64,
}

/// Inclusive year range restriction for a query.
///
/// A query carries `Option<YearRange>`: `None` means full history. An
/// inverted range (start > end) matches nothing and yields an empty
/// result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

/// UTC calendar year of an epoch-seconds timestamp.
///
/// Returns None for timestamps outside chrono's representable date range;
/// load-time validation rejects those, so query paths just skip them.
pub fn utc_year(timestamp: i64) -> Option<i32> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.year())
}

/// Group (year, rating) rows by year and compute the mean per group,
/// ascending by year.
fn yearly_means(rows: Vec<(i32, f32)>) -> Vec<YearlyAverage> {
    let mut buckets: BTreeMap<i32, (f64, u32)> = BTreeMap::new();
    for (year, rating) in rows {
        let bucket = buckets.entry(year).or_insert((0.0, 0));
        bucket.0 += f64::from(rating);
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(year, (sum, count))| YearlyAverage {
            year,
            avg_rating: sum / f64::from(count),
        })
        .collect()
}

/// Mean rating per UTC year across the ENTIRE ratings log, all genres
/// combined. This is the training input for the yearly rating predictor.
pub fn global_yearly_averages(dataset: &Dataset) -> Vec<YearlyAverage> {
    let rows: Vec<(i32, f32)> = dataset
        .ratings()
        .par_iter()
        .filter_map(|r| utc_year(r.timestamp).map(|year| (year, r.rating)))
        .collect();

    yearly_means(rows)
}

/// Computes per-genre yearly rating series over the shared dataset.
///
/// All methods are pure reads: they allocate and return new derived values
/// and never mutate shared state, so concurrent callers need no locking.
#[derive(Clone)]
pub struct RatingsAggregator {
    /// Shared reference to the dataset (read-only, so no Mutex needed)
    dataset: Arc<Dataset>,
}

impl RatingsAggregator {
    /// Create a new RatingsAggregator over the shared dataset
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// IDs of movies whose raw genre string contains `genre`,
    /// case-insensitively.
    fn matching_movie_ids(&self, genre: &str) -> HashSet<MovieId> {
        let query = genre.to_lowercase();
        self.dataset
            .movies()
            .filter(|movie| movie.genres.to_lowercase().contains(&query))
            .map(|movie| movie.id)
            .collect()
    }

    /// Distinct UTC years with at least one rating for the genre,
    /// ascending. A genre that matches nothing yields an empty list.
    pub fn years_for_genre(&self, genre: &str) -> Vec<i32> {
        let matching = self.matching_movie_ids(genre);
        debug!("Genre '{}' matched {} movies", genre, matching.len());

        let years: BTreeSet<i32> = self
            .dataset
            .ratings()
            .par_iter()
            .filter(|r| matching.contains(&r.movie_id))
            .filter_map(|r| utc_year(r.timestamp))
            .collect();

        years.into_iter().collect()
    }

    /// Average rating per UTC year for the genre, ascending by year.
    ///
    /// ## Algorithm
    /// 1. Find movies matching the genre (substring rule above)
    /// 2. Inner-join the ratings log against that set; ratings for
    ///    non-matching or unknown movies are dropped silently
    /// 3. Derive each retained rating's UTC calendar year
    /// 4. When a range is supplied, keep only years inside it (inclusive)
    /// 5. Group by year and compute the arithmetic mean per group
    pub fn averages_for_genre(
        &self,
        genre: &str,
        range: Option<YearRange>,
    ) -> Vec<YearlyAverage> {
        let matching = self.matching_movie_ids(genre);
        debug!(
            "Aggregating genre '{}' over {} matching movies (range: {:?})",
            genre,
            matching.len(),
            range
        );

        let rows: Vec<(i32, f32)> = self
            .dataset
            .ratings()
            .par_iter()
            .filter(|r| matching.contains(&r.movie_id))
            .filter_map(|r| utc_year(r.timestamp).map(|year| (year, r.rating)))
            .filter(|(year, _)| range.is_none_or(|range| range.contains(*year)))
            .collect();

        let averages = yearly_means(rows);
        debug!(
            "Genre '{}' produced {} yearly averages",
            genre,
            averages.len()
        );
        averages
    }
}
