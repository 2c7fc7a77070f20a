//! Analytics over the loaded dataset.
//!
//! This crate provides:
//! - GenreCatalog for listing the distinct genre labels
//! - RatingsAggregator for per-genre, per-year average rating series
//! - The global yearly average series used to train the rating predictor
//!
//! ## Architecture
//! Both components hold an `Arc<Dataset>` and expose pure read operations:
//! every call recomputes its result from the immutable tables and returns
//! a fresh allocation. There is no caching layer and no shared mutable
//! state, so any number of callers may query concurrently.
//!
//! ## Example Usage
//! ```ignore
//! use analytics::{GenreCatalog, RatingsAggregator, YearRange};
//!
//! let catalog = GenreCatalog::new(dataset.clone());
//! let aggregator = RatingsAggregator::new(dataset.clone());
//!
//! let genres = catalog.list_genres();
//! let series = aggregator.averages_for_genre("Comedy", Some(YearRange::new(1996, 2005)));
//! ```

pub mod genres;
pub mod aggregate;

// Re-export main types
pub use genres::GenreCatalog;
pub use aggregate::{
    RatingsAggregator,
    YearRange,
    YearlyAverage,
    global_yearly_averages,
    utc_year,
};
