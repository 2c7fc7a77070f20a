//! # Chart Orchestrator
//!
//! This module coordinates the query pipeline behind every chart:
//! 1. Load-time: receive the shared dataset, train the trend model once
//! 2. Per request: aggregate the per-genre yearly rating series
//! 3. Optionally evaluate the trend model for a requested year
//! 4. Return a render-ready numeric series to the caller
//!
//! The orchestrator owns no per-request state: genre, year range, and
//! prediction year arrive as explicit parameters on every call, and every
//! result is a fresh allocation. Rendering the series as a chart or HTTP
//! response is the consumer's job.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use analytics::{GenreCatalog, RatingsAggregator, YearRange, YearlyAverage};
use data_loader::Dataset;
use predictor::YearlyRatingPredictor;

/// A single predicted rating, annotated onto a chart series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedPoint {
    pub year: i32,
    pub rating: f64,
}

/// Final numeric series returned to the rendering layer
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub genre: String,
    /// Display title, e.g. "Ratings for Genre: Comedy (1996-2005)"
    pub title: String,
    pub points: Vec<YearlyAverage>,
    pub prediction: Option<PredictedPoint>,
}

/// Main orchestrator that wires the dataset, aggregation, and prediction
/// together.
///
/// Construction trains the global trend model exactly once; afterwards the
/// orchestrator is read-only and can be cloned cheaply across request
/// handlers.
#[derive(Clone)]
pub struct ChartOrchestrator {
    dataset: Arc<Dataset>,
    catalog: GenreCatalog,
    aggregator: RatingsAggregator,
    predictor: YearlyRatingPredictor,
}

impl ChartOrchestrator {
    /// Create a new orchestrator over a loaded dataset.
    ///
    /// Trains the yearly rating trend model as part of construction, so a
    /// dataset with no ratings is a startup failure, not a latent one.
    pub fn new(dataset: Arc<Dataset>) -> Result<Self> {
        let (movies, ratings) = dataset.counts();
        info!("Building orchestrator over {} movies, {} ratings", movies, ratings);

        let catalog = GenreCatalog::new(dataset.clone());
        let aggregator = RatingsAggregator::new(dataset.clone());

        let start = Instant::now();
        let mut predictor = YearlyRatingPredictor::new();
        predictor
            .train(&dataset)
            .context("Failed to train rating trend model")?;
        info!("Trained trend model in {:.2?}", start.elapsed());

        Ok(Self {
            dataset,
            catalog,
            aggregator,
            predictor,
        })
    }

    /// All distinct genre labels in the catalog, sorted ascending
    pub fn list_genres(&self) -> Vec<String> {
        self.catalog.list_genres()
    }

    /// Distinct years with at least one rating for the genre, ascending
    pub fn years_for_genre(&self, genre: &str) -> Vec<i32> {
        self.aggregator.years_for_genre(genre)
    }

    /// Predicted average rating for a year, from the global trend model
    pub fn predict(&self, year: i32) -> Result<f64> {
        self.predictor
            .predict(year)
            .context("Prediction failed")
    }

    /// Assemble the full numeric series for one chart request.
    ///
    /// The historical aggregation runs on a blocking worker thread (it
    /// scans the whole ratings log); the optional prediction is a single
    /// line evaluation and happens inline once the series is back.
    pub async fn chart_series(
        &self,
        genre: &str,
        range: Option<YearRange>,
        prediction_year: Option<i32>,
    ) -> Result<ChartSeries> {
        let start = Instant::now();

        let points = {
            let aggregator = self.aggregator.clone();
            let genre = genre.to_string();
            tokio::task::spawn_blocking(move || aggregator.averages_for_genre(&genre, range))
                .await
                .context("Aggregation task panicked")?
        };

        let prediction = match prediction_year {
            Some(year) => Some(PredictedPoint {
                year,
                rating: self.predict(year)?,
            }),
            None => None,
        };

        info!(
            "Chart series for '{}': {} points, prediction: {} ({:.2?})",
            genre,
            points.len(),
            prediction.map_or("none".to_string(), |p| p.year.to_string()),
            start.elapsed()
        );

        Ok(ChartSeries {
            genre: genre.to_string(),
            title: Self::title_for(genre, range),
            points,
            prediction,
        })
    }

    /// Compose the chart title the way the rendering layer displays it
    fn title_for(genre: &str, range: Option<YearRange>) -> String {
        match range {
            Some(range) => format!(
                "Ratings for Genre: {} ({}-{})",
                genre, range.start, range.end
            ),
            None => format!("Ratings for Genre: {}", genre),
        }
    }

    /// Counts of the underlying tables, for logging and harnesses
    pub fn dataset_counts(&self) -> (usize, usize) {
        self.dataset.counts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, Rating};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    // Midnight UTC on January 1st of each year
    const T2000: i64 = 946684800;
    const T2001: i64 = 978307200;
    const T2002: i64 = 1009843200;

    /// Dataset whose global yearly averages form a perfect line of slope 1:
    /// {2000: 3.0, 2001: 4.0, 2002: 5.0}
    fn build_test_dataset() -> Arc<Dataset> {
        let mut dataset = Dataset::new();

        dataset.insert_movie(Movie {
            id: 1,
            title: Some("Comedy Night (1999)".to_string()),
            genres: "Comedy".to_string(),
        });
        dataset.insert_movie(Movie {
            id: 2,
            title: Some("Quiet Drama (1998)".to_string()),
            genres: "Drama|Romance".to_string(),
        });

        dataset.insert_rating(Rating { movie_id: 1, rating: 3.0, timestamp: T2000 });
        dataset.insert_rating(Rating { movie_id: 1, rating: 4.0, timestamp: T2001 });
        dataset.insert_rating(Rating { movie_id: 2, rating: 5.0, timestamp: T2002 });

        Arc::new(dataset)
    }

    fn build_test_orchestrator() -> ChartOrchestrator {
        ChartOrchestrator::new(build_test_dataset()).expect("Failed to build orchestrator")
    }

    // ============================================================================
    // Construction
    // ============================================================================

    #[test]
    fn test_construction_trains_the_model() {
        let orchestrator = build_test_orchestrator();

        // Slope 1 line extrapolates to 6.0 in 2003
        let predicted = orchestrator.predict(2003).unwrap();
        assert!((predicted - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_construction_fails_on_empty_dataset() {
        let result = ChartOrchestrator::new(Arc::new(Dataset::new()));
        assert!(result.is_err(), "Empty ratings log should fail at startup");
    }

    // ============================================================================
    // Catalog and year passthroughs
    // ============================================================================

    #[test]
    fn test_list_genres() {
        let orchestrator = build_test_orchestrator();
        assert_eq!(
            orchestrator.list_genres(),
            vec!["Comedy", "Drama", "Romance"]
        );
    }

    #[test]
    fn test_years_for_genre() {
        let orchestrator = build_test_orchestrator();
        assert_eq!(orchestrator.years_for_genre("Comedy"), vec![2000, 2001]);
        assert!(orchestrator.years_for_genre("Western").is_empty());
    }

    // ============================================================================
    // Chart series assembly
    // ============================================================================

    #[tokio::test]
    async fn test_chart_series_without_prediction() {
        let orchestrator = build_test_orchestrator();

        let series = orchestrator
            .chart_series("Comedy", None, None)
            .await
            .expect("chart_series failed");

        assert_eq!(series.genre, "Comedy");
        assert_eq!(series.title, "Ratings for Genre: Comedy");
        assert!(series.prediction.is_none());

        let years: Vec<i32> = series.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2000, 2001]);
    }

    #[tokio::test]
    async fn test_chart_series_with_prediction() {
        let orchestrator = build_test_orchestrator();

        let series = orchestrator
            .chart_series("Comedy", None, Some(2003))
            .await
            .expect("chart_series failed");

        let prediction = series.prediction.expect("prediction point missing");
        assert_eq!(prediction.year, 2003);
        assert!((prediction.rating - 6.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_chart_series_with_year_range() {
        let orchestrator = build_test_orchestrator();

        let series = orchestrator
            .chart_series("Comedy", Some(YearRange::new(2001, 2001)), None)
            .await
            .expect("chart_series failed");

        assert_eq!(series.title, "Ratings for Genre: Comedy (2001-2001)");
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].year, 2001);
    }

    #[tokio::test]
    async fn test_chart_series_for_unknown_genre_is_empty() {
        let orchestrator = build_test_orchestrator();

        let series = orchestrator
            .chart_series("Western", None, Some(2010))
            .await
            .expect("chart_series failed");

        // No historical points, but the global model still predicts
        assert!(series.points.is_empty());
        assert!(series.prediction.is_some());
    }

    #[tokio::test]
    async fn test_chart_series_is_idempotent() {
        let orchestrator = build_test_orchestrator();

        let first = orchestrator
            .chart_series("Drama", None, Some(2005))
            .await
            .expect("chart_series failed");
        let second = orchestrator
            .chart_series("Drama", None, Some(2005))
            .await
            .expect("chart_series failed");

        assert_eq!(first.points, second.points);
        assert_eq!(first.prediction, second.prediction);
    }
}
