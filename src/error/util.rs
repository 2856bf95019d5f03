//! Utility functions for error handling
//!
//! Helpers that open, create and check paths while keeping the offending path
//! in the resulting error.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(AnalysisError::io(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found, needed for: {purpose}"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for {purpose}: {e}"),
        };
        AnalysisError::io(path, io::Error::new(e.kind(), message))
    })
}

/// Create (or truncate) a file, creating its parent directory first
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    fs::File::create(path).map_err(|e| AnalysisError::io(path, e))
}

/// Make sure a directory exists, creating it and its parents when missing
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(AnalysisError::io(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "Path is not a directory"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| AnalysisError::io(path, e))
}
