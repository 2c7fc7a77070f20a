//! # Data Loader Crate
//!
//! This crate handles loading the movie catalog and ratings log from CSV.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Dataset)
//! - **parser**: Decode the .csv files into Rust structs
//! - **loader**: Build and validate the Dataset
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! // Load both tables once at startup
//! let dataset = Dataset::load_from_dir(Path::new("data/csv"))?;
//!
//! let (movies, ratings) = dataset.counts();
//! println!("Loaded {} movies and {} ratings", movies, ratings);
//! ```
//!
//! The dataset is immutable after load and is shared read-only (behind an
//! `Arc`) by every query operation for the lifetime of the process.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    MovieId,
    // Core types
    Movie,
    Rating,
    Dataset,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_creation() {
        // Test that we can create an empty Dataset
        let dataset = Dataset::new();
        let (movies, ratings) = dataset.counts();

        assert_eq!(movies, 0);
        assert_eq!(ratings, 0);
    }

    #[test]
    fn test_insert_movie() {
        let mut dataset = Dataset::new();

        let movie = Movie {
            id: 1,
            title: Some("Toy Story (1995)".to_string()),
            genres: "Animation|Children|Comedy".to_string(),
        };

        dataset.insert_movie(movie.clone());

        let retrieved = dataset.get_movie(1).unwrap();
        assert_eq!(retrieved.id, 1);
        assert_eq!(retrieved.genre_labels().count(), 3);
    }

    #[test]
    fn test_insert_rating() {
        let mut dataset = Dataset::new();

        let rating = Rating {
            movie_id: 1193,
            rating: 5.0,
            timestamp: 978300760,
        };

        dataset.insert_rating(rating);

        assert_eq!(dataset.ratings().len(), 1);
        assert_eq!(dataset.ratings()[0].rating, 5.0);
    }

    #[test]
    fn test_empty_queries() {
        let dataset = Dataset::new();

        // Querying non-existent data should return None or empty slices
        assert!(dataset.get_movie(999).is_none());
        assert!(dataset.ratings().is_empty());
        assert_eq!(dataset.movies().count(), 0);
    }
}
