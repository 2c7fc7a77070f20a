//! Yearly rating trend prediction.
//!
//! This crate fits a single ordinary-least-squares line over the global
//! (year, average rating) series and evaluates it for arbitrary years.
//! The model is:
//! - global: trained over ALL ratings, not per genre, even though the
//!   charts it annotates are genre-specific (existing behavior, preserved)
//! - trained exactly once per process lifetime, at startup
//! - immutable afterwards, read concurrently by any number of callers
//!
//! Training goes through `linfa-linear`; the fitted line is reduced to a
//! plain (slope, intercept) pair so prediction is a single multiply-add
//! with no bounds checking: extrapolating far outside the trained year
//! span is allowed and unguarded.

use analytics::{YearlyAverage, global_yearly_averages};
use data_loader::Dataset;
use linfa::traits::Fit;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when training or evaluating the trend model
#[derive(Error, Debug)]
pub enum PredictorError {
    /// The ratings log was empty: there is nothing to fit a line to
    #[error("Cannot train a trend model on an empty ratings log")]
    EmptyDataset,

    /// The least-squares solver rejected the training data
    #[error("Least-squares fit failed: {0}")]
    Fit(String),

    /// predict() was called before train(); fail fast instead of
    /// returning a meaningless value
    #[error("Prediction requested before a model was trained")]
    ModelNotReady,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PredictorError>;

/// A fitted rating trend line: `rating(year) = slope * year + intercept`.
///
/// Opaque to consumers beyond prediction; produced once by
/// `YearlyRatingPredictor::train` and copied around freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    slope: f64,
    intercept: f64,
}

impl TrendModel {
    /// Fit a line to the given yearly averages by ordinary least squares.
    ///
    /// Degenerate input is handled explicitly rather than left to solver
    /// defaults:
    /// - zero points: `EmptyDataset`
    /// - one distinct year: a line through a single point is
    ///   underdetermined, so the model is the flat line at that year's
    ///   average (slope 0)
    pub fn fit(points: &[YearlyAverage]) -> Result<Self> {
        match points {
            [] => Err(PredictorError::EmptyDataset),
            [only] => {
                debug!(
                    "Single distinct year {} in training data, using flat fallback",
                    only.year
                );
                Ok(Self {
                    slope: 0.0,
                    intercept: only.avg_rating,
                })
            }
            _ => {
                let years: Vec<f64> = points.iter().map(|p| f64::from(p.year)).collect();
                let averages: Vec<f64> = points.iter().map(|p| p.avg_rating).collect();

                // Single explanatory variable, so records is an (n, 1) matrix
                let records = Array2::from_shape_vec((points.len(), 1), years)
                    .map_err(|e| PredictorError::Fit(e.to_string()))?;
                let targets = Array1::from_vec(averages);

                let training = linfa::Dataset::new(records, targets);
                let fitted = LinearRegression::new()
                    .fit(&training)
                    .map_err(|e| PredictorError::Fit(e.to_string()))?;

                Ok(Self {
                    slope: fitted.params()[0],
                    intercept: fitted.intercept(),
                })
            }
        }
    }

    /// Evaluate the fitted line for any year, historical or future
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * f64::from(year) + self.intercept
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Trains and holds the global rating trend model.
///
/// `train` is invoked once at startup; after that the predictor is a
/// read-only wrapper around the fitted line. Calling `predict` before
/// `train` is a precondition violation and fails with `ModelNotReady`.
#[derive(Debug, Clone, Default)]
pub struct YearlyRatingPredictor {
    model: Option<TrendModel>,
}

impl YearlyRatingPredictor {
    /// Create an untrained predictor
    pub fn new() -> Self {
        Self { model: None }
    }

    /// Train the trend model over the full ratings log.
    ///
    /// Derives the UTC calendar year of every rating (ignoring genre),
    /// averages ratings per year, and least-squares-fits a line to the
    /// resulting series. Deterministic: the same dataset always produces
    /// the same model.
    pub fn train(&mut self, dataset: &Dataset) -> Result<TrendModel> {
        let points = global_yearly_averages(dataset);
        let model = TrendModel::fit(&points)?;

        info!(
            "Trained rating trend over {} years: slope={:.6}, intercept={:.3}",
            points.len(),
            model.slope,
            model.intercept
        );
        self.model = Some(model);
        Ok(model)
    }

    /// Whether a model has been trained yet
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Predicted average rating for the given year.
    ///
    /// No bounds checking: any integer year is accepted.
    pub fn predict(&self, year: i32) -> Result<f64> {
        let model = self.model.ok_or(PredictorError::ModelNotReady)?;
        Ok(model.predict(year))
    }
}
