//! Simple test harness for the chart orchestrator.
//!
//! This binary exercises the end-to-end pipeline: load the CSV dataset,
//! train the trend model, and request a chart series for the first genre
//! in the catalog.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use data_loader::Dataset;
use server::ChartOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,analytics=debug,predictor=debug")
        .init();

    info!("Starting ReelTrends server test harness");

    info!("Loading dataset...");
    let path = Path::new("data/csv");
    let dataset = Arc::new(
        Dataset::load_from_dir(path).context("Failed to load CSV dataset")?,
    );

    let orchestrator = ChartOrchestrator::new(dataset)?;
    let (movies, ratings) = orchestrator.dataset_counts();
    info!("Loaded {} movies and {} ratings", movies, ratings);

    let genres = orchestrator.list_genres();
    info!("Catalog lists {} genres", genres.len());
    let Some(genre) = genres.first() else {
        bail!("Catalog contains no genres");
    };

    let years = orchestrator.years_for_genre(genre);
    info!(
        "Genre '{}' has ratings in {} years ({:?}..{:?})",
        genre,
        years.len(),
        years.first(),
        years.last()
    );

    // Ask for the full history plus a prediction one year past the data
    let prediction_year = years.last().map(|last| last + 1);
    let series = orchestrator
        .chart_series(genre, None, prediction_year)
        .await?;

    info!("{}", series.title);
    for point in &series.points {
        info!("  {}: {:.3}", point.year, point.avg_rating);
    }
    if let Some(prediction) = series.prediction {
        info!("  predicted {}: {:.3}", prediction.year, prediction.rating);
    }

    Ok(())
}
