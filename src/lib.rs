//! Exploratory analysis of depression prevalence against psychiatrist capacity.
//!
//! Loads public-health CSV exports, normalizes prevalence units, and produces
//! a macro trend, an age/sex profile and a need-versus-capacity prioritization
//! rendered as charts.

pub mod algorithm;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{AnalysisConfig, OutputTargets};
pub use error::{AnalysisError, Result};
pub use models::{CapacityRecord, JoinedRecord, Observation, Sex};
pub use pipeline::{RunSummary, run, run_with_renderer};

// Arrow types
pub use arrow::record_batch::RecordBatch;
