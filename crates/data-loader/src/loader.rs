//! Dataset loading and validation.
//!
//! This module builds the `Dataset` from the two CSV files:
//! - Parse movies.csv and ratings.csv in parallel
//! - Build the in-memory tables
//! - Validate the loaded values

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::Dataset;
use chrono::DateTime;
use std::path::Path;

impl Dataset {
    /// Load the dataset from a directory containing movies.csv and
    /// ratings.csv.
    ///
    /// This is the main entry point for loading data, invoked once at
    /// process start. After it returns, the dataset never mutates.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let movies_path = data_dir.join("movies.csv");
        let ratings_path = data_dir.join("ratings.csv");

        // Parse both files in parallel. Rayon's `join` runs the two
        // closures on separate threads and both return Result<Vec<T>>.
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        let mut dataset = Dataset::new();
        for movie in movies {
            dataset.insert_movie(movie);
        }
        for rating in ratings {
            dataset.insert_rating(rating);
        }

        dataset.validate()?;
        Ok(dataset)
    }

    /// Validate the loaded values.
    ///
    /// CSV decoding already guarantees the required columns exist and are
    /// numeric; this pass rejects values that decoded but that the query
    /// layer cannot work with:
    /// - non-finite rating values (NaN/inf would poison every average)
    /// - timestamps with no representable UTC date
    ///
    /// Ratings that reference a movie missing from the catalog are NOT an
    /// error: genre aggregation drops them silently (inner-join semantics).
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if !rating.rating.is_finite() {
                return Err(DataLoadError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
            if DateTime::from_timestamp(rating.timestamp, 0).is_none() {
                return Err(DataLoadError::InvalidValue {
                    field: "timestamp".to_string(),
                    value: rating.timestamp.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Dataset, Movie, Rating};

    fn movie(id: u32, genres: &str) -> Movie {
        Movie {
            id,
            title: None,
            genres: genres.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_data() {
        let mut dataset = Dataset::new();
        dataset.insert_movie(movie(1, "Comedy"));
        dataset.insert_rating(Rating {
            movie_id: 1,
            rating: 4.0,
            timestamp: 964982703,
        });

        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_rating() {
        let mut dataset = Dataset::new();
        dataset.insert_rating(Rating {
            movie_id: 1,
            rating: f32::NAN,
            timestamp: 964982703,
        });

        assert!(dataset.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unrepresentable_timestamp() {
        let mut dataset = Dataset::new();
        dataset.insert_rating(Rating {
            movie_id: 1,
            rating: 3.0,
            timestamp: i64::MAX,
        });

        assert!(dataset.validate().is_err());
    }

    #[test]
    fn test_validate_allows_rating_for_unknown_movie() {
        // Dangling movie references are dropped at join time, not at load
        let mut dataset = Dataset::new();
        dataset.insert_rating(Rating {
            movie_id: 999,
            rating: 3.0,
            timestamp: 964982703,
        });

        assert!(dataset.validate().is_ok());
    }
}
