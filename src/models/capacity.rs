//! Psychiatrist capacity model

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Row layout of the canonical capacity schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityRow {
    pub location: Option<String>,
    pub year: Option<i32>,
    pub psy_per100k: Option<f64>,
}

/// Psychiatrists per 100k population for one location and year
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityRecord {
    pub location: String,
    pub year: Option<i32>,
    pub psy_per100k: Option<f64>,
}

impl CapacityRecord {
    #[must_use]
    pub fn new(location: impl Into<String>, year: Option<i32>, psy_per100k: Option<f64>) -> Self {
        Self {
            location: location.into(),
            year,
            psy_per100k,
        }
    }

    /// Capacity value usable as a ratio denominator (present and positive)
    #[must_use]
    pub fn usable_value(&self) -> Option<f64> {
        self.psy_per100k.filter(|v| *v > 0.0)
    }

    /// Convert a canonical capacity batch using `serde_arrow`
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let rows: Vec<CapacityRow> = serde_arrow::from_record_batch(batch)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let location = row.location?.trim().to_string();
                (!location.is_empty()).then(|| Self::new(location, row.year, row.psy_per100k))
            })
            .collect())
    }
}
