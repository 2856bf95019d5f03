//! Error handling for the analysis pipeline.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Number of years shown per side when reporting a failed year reconciliation
pub const YEAR_PREVIEW_LEN: usize = 10;

/// Errors that can occur while loading, analysing or rendering
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The need and capacity datasets share no year
    #[error(
        "No overlapping year between need and capacity data (need years: {need_years:?}, capacity years: {capacity_years:?})"
    )]
    NoOverlap {
        /// First years of the need dataset, ascending
        need_years: Vec<i32>,
        /// First years of the capacity dataset, ascending
        capacity_years: Vec<i32>,
    },

    /// A micro comparison lacks a Male or Female breakdown
    #[error("Missing Male/Female split for {location} in {year} (found: {found:?})")]
    MissingSexSplit {
        location: String,
        year: i32,
        /// Sex labels that were present for the location and year
        found: Vec<String>,
    },

    /// A required column could not be mapped onto the canonical schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error opening, reading or writing a file
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error converting between record batches and models
    #[error("Serialization error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error reading configuration or writing chart documents
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Build an IO error tied to the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
