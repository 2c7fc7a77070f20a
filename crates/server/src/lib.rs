//! Server crate for the ReelTrends rating explorer.
//!
//! This crate contains the orchestrator that wires the loaded dataset,
//! the genre analytics, and the trained trend model into one query surface.

pub mod orchestrator;

pub use orchestrator::{ChartOrchestrator, ChartSeries, PredictedPoint};
