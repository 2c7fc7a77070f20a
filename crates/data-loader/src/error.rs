//! Error types for the data-loader crate.
//!
//! All loader failures are fatal at startup: either a file could not be
//! read, a CSV row could not be decoded into a domain type, or a decoded
//! value fails validation. Nothing here is retried.

use thiserror::Error;

/// Errors that can occur during data loading and validation
///
/// The `#[derive(Error)]` macro from thiserror implements the
/// `std::error::Error` trait and `Display` based on our `#[error(...)]`
/// attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error occurred while opening or reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A CSV row could not be decoded (missing required column,
    /// non-numeric movieId/rating/timestamp, malformed quoting, ...)
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A decoded field had a value the rest of the system cannot work with
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
