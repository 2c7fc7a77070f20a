//! Parser for the CSV input files.
//!
//! This module handles decoding the two tables:
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating,timestamp
//!
//! Decoding goes through serde, so each row lands directly in a `Movie` or
//! `Rating` struct. Columns are matched by header name; extra columns (like
//! `userId`, which this system never uses) are ignored. A missing required
//! column or a non-numeric field surfaces as `DataLoadError::CsvError` and
//! aborts the load.

use crate::error::{DataLoadError, Result};
use crate::types::{Movie, Rating};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Decode every row of a CSV stream into `T`.
///
/// Generic over the reader so tests can parse from in-memory bytes while
/// the loader parses from files. `file` is only used to label errors.
fn parse_csv<T: DeserializeOwned, R: Read>(reader: R, file: &str) -> Result<Vec<T>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for row in csv_reader.deserialize() {
        let row: T = row.map_err(|source| DataLoadError::CsvError {
            file: file.to_string(),
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Parse a movies.csv file into the catalog rows
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = File::open(path)?;
    parse_movies_from_reader(file, &path.display().to_string())
}

/// Parse movies from any reader (used by tests with in-memory CSV)
pub fn parse_movies_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<Movie>> {
    parse_csv(reader, file)
}

/// Parse a ratings.csv file into the ratings log
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = File::open(path)?;
    parse_ratings_from_reader(file, &path.display().to_string())
}

/// Parse ratings from any reader (used by tests with in-memory CSV)
pub fn parse_ratings_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<Rating>> {
    parse_csv(reader, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movies() {
        let csv = "movieId,title,genres\n\
                   1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy\n\
                   2,Jumanji (1995),Adventure|Children|Fantasy\n";

        let movies = parse_movies_from_reader(csv.as_bytes(), "movies.csv").unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, 1);
        assert_eq!(movies[0].title.as_deref(), Some("Toy Story (1995)"));
        assert_eq!(movies[1].genres, "Adventure|Children|Fantasy");
    }

    #[test]
    fn test_parse_movies_without_title_column() {
        // The upstream contract only requires movieId and genres
        let csv = "movieId,genres\n1,Comedy\n";

        let movies = parse_movies_from_reader(csv.as_bytes(), "movies.csv").unwrap();
        assert_eq!(movies.len(), 1);
        assert!(movies[0].title.is_none());
        assert_eq!(movies[0].genres, "Comedy");
    }

    #[test]
    fn test_parse_ratings_ignores_extra_columns() {
        // MovieLens exports carry a userId column this system never reads
        let csv = "userId,movieId,rating,timestamp\n\
                   1,31,2.5,1260759144\n\
                   7,31,3.0,851868750\n";

        let ratings = parse_ratings_from_reader(csv.as_bytes(), "ratings.csv").unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].movie_id, 31);
        assert_eq!(ratings[0].rating, 2.5);
        assert_eq!(ratings[1].timestamp, 851868750);
    }

    #[test]
    fn test_parse_ratings_rejects_non_numeric_rating() {
        let csv = "movieId,rating,timestamp\n31,not-a-number,1260759144\n";

        let err = parse_ratings_from_reader(csv.as_bytes(), "ratings.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::CsvError { .. }));
    }

    #[test]
    fn test_parse_movies_rejects_missing_genres_column() {
        let csv = "movieId,title\n1,Toy Story (1995)\n";

        let err = parse_movies_from_reader(csv.as_bytes(), "movies.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::CsvError { .. }));
    }

    #[test]
    fn test_genre_labels_trim_and_skip_empty() {
        let movie = Movie {
            id: 1,
            title: None,
            genres: " Action | Adventure ||Sci-Fi".to_string(),
        };

        let labels: Vec<&str> = movie.genre_labels().collect();
        assert_eq!(labels, vec!["Action", "Adventure", "Sci-Fi"]);
    }
}
