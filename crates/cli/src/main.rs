use analytics::YearRange;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Dataset;
use server::ChartOrchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// ReelTrends - Genre Rating Trends Explorer
#[derive(Parser)]
#[command(name = "reel-trends")]
#[command(about = "Explore average movie ratings per genre and year", long_about = None)]
struct Cli {
    /// Path to the directory containing movies.csv and ratings.csv
    #[arg(short, long, default_value = "data/csv")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every genre present in the movie catalog
    Genres,

    /// Show the years that have ratings for a genre
    Years {
        /// Genre to query (case-insensitive substring match)
        #[arg(long)]
        genre: String,
    },

    /// Show the yearly average rating series for a genre
    Chart {
        /// Genre to query (case-insensitive substring match)
        #[arg(long)]
        genre: String,

        /// First year of the range (only applied together with --end-year)
        #[arg(long, requires = "end_year")]
        start_year: Option<i32>,

        /// Last year of the range (only applied together with --start-year)
        #[arg(long, requires = "start_year")]
        end_year: Option<i32>,

        /// Also predict the average rating for this year
        #[arg(long)]
        predict: Option<i32>,
    },

    /// Predict the global average rating for a year
    Predict {
        /// Year to predict (past or future, extrapolation is allowed)
        #[arg(long)]
        year: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the dataset and train the trend model (this may take a moment)
    println!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let dataset = Arc::new(
        Dataset::load_from_dir(&cli.data_dir)
            .context("Failed to load CSV dataset")?,
    );
    let orchestrator = ChartOrchestrator::new(dataset)?;
    println!(
        "{} Loaded dataset and trained model in {:?}",
        "✓".green(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Genres => handle_genres(&orchestrator),
        Commands::Years { genre } => handle_years(&orchestrator, &genre),
        Commands::Chart {
            genre,
            start_year,
            end_year,
            predict,
        } => handle_chart(&orchestrator, &genre, start_year, end_year, predict).await?,
        Commands::Predict { year } => handle_predict(&orchestrator, year)?,
    }

    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(orchestrator: &ChartOrchestrator) {
    let genres = orchestrator.list_genres();

    println!("\n{} ({} total)", "Genres".bold(), genres.len());
    for genre in genres {
        println!("  {}", genre);
    }
}

/// Handle the 'years' command
fn handle_years(orchestrator: &ChartOrchestrator, genre: &str) {
    let years = orchestrator.years_for_genre(genre);

    if years.is_empty() {
        println!("No ratings found for genre '{}'", genre.yellow());
        return;
    }

    println!(
        "\n{} '{}' has ratings in {} years: {} - {}",
        "Genre".bold(),
        genre,
        years.len(),
        years[0],
        years[years.len() - 1]
    );
}

/// Handle the 'chart' command
async fn handle_chart(
    orchestrator: &ChartOrchestrator,
    genre: &str,
    start_year: Option<i32>,
    end_year: Option<i32>,
    predict: Option<i32>,
) -> Result<()> {
    // The range only applies when both bounds were supplied
    let range = match (start_year, end_year) {
        (Some(start), Some(end)) => Some(YearRange::new(start, end)),
        _ => None,
    };

    let series = orchestrator.chart_series(genre, range, predict).await?;

    println!("\n{}", series.title.bold());
    if series.points.is_empty() {
        println!("  (no ratings in this range)");
    }
    for point in &series.points {
        println!("  {}  {:.3}", point.year, point.avg_rating);
    }

    if let Some(prediction) = series.prediction {
        println!(
            "  {}  {} {}",
            prediction.year,
            format!("{:.3}", prediction.rating).red(),
            "(predicted)".red()
        );
    }

    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(orchestrator: &ChartOrchestrator, year: i32) -> Result<()> {
    let predicted = orchestrator.predict(year)?;

    println!(
        "\nPredicted average rating for {}: {}",
        year.to_string().bold(),
        format!("{:.3}", predicted).red()
    );
    Ok(())
}
