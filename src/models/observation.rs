//! Prevalence observation model
//!
//! One measured fact from a need (macro) or micro dataset: a value for a
//! location and year, optionally broken down by sex and age band.

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::types::Sex;

/// Row layout of the canonical observation schema, as deserialized by `serde_arrow`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationRow {
    pub location: Option<String>,
    pub year: Option<i32>,
    pub sex: Option<String>,
    pub age: Option<String>,
    pub cause: Option<String>,
    pub measure: Option<String>,
    pub metric: Option<String>,
    pub value: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// A single prevalence observation
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Country or region name
    pub location: String,
    pub year: Option<i32>,
    pub sex: Sex,
    /// Age-band label
    pub age: Option<String>,
    pub cause: Option<String>,
    pub measure: Option<String>,
    /// Unit classifier, e.g. `"Percent"` or `"Rate"`
    pub metric: Option<String>,
    /// Measured magnitude; percentage scale once normalized
    pub value: Option<f64>,
    /// Lower confidence bound
    pub lower: Option<f64>,
    /// Upper confidence bound
    pub upper: Option<f64>,
}

impl Observation {
    /// Create an observation with only the join keys and value set
    #[must_use]
    pub fn new(location: impl Into<String>, year: Option<i32>, value: Option<f64>) -> Self {
        Self {
            location: location.into(),
            year,
            sex: Sex::Unset,
            age: None,
            cause: None,
            measure: None,
            metric: None,
            value,
            lower: None,
            upper: None,
        }
    }

    #[must_use]
    pub const fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    #[must_use]
    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    #[must_use]
    pub const fn with_bounds(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Whether the metric label contains `wanted` (case-insensitive)
    ///
    /// Rows without a metric label always match: single-metric exports leave
    /// the column out.
    #[must_use]
    pub fn matches_metric(&self, wanted: Option<&str>) -> bool {
        match (wanted, self.metric.as_deref()) {
            (Some(wanted), Some(label)) => label.to_lowercase().contains(&wanted.to_lowercase()),
            _ => true,
        }
    }

    /// Whether the observation belongs to the headline slice
    ///
    /// Headline rows cover both sexes, match `metric` and, when `age` is
    /// given, exactly that age band.
    #[must_use]
    pub fn is_headline(&self, age: Option<&str>, metric: Option<&str>) -> bool {
        self.sex.is_headline()
            && self.matches_metric(metric)
            && age.is_none_or(|wanted| self.age.as_deref() == Some(wanted))
    }

    /// Convert a canonical row, dropping rows without a location
    #[must_use]
    pub fn from_row(row: ObservationRow) -> Option<Self> {
        let location = row.location.map(|l| l.trim().to_string())?;
        if location.is_empty() {
            return None;
        }

        Some(Self {
            location,
            year: row.year,
            sex: Sex::from(row.sex.as_deref()),
            age: row.age,
            cause: row.cause,
            measure: row.measure,
            metric: row.metric,
            value: row.value,
            lower: row.lower,
            upper: row.upper,
        })
    }

    /// Convert a canonical observation batch using `serde_arrow`
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let rows: Vec<ObservationRow> = serde_arrow::from_record_batch(batch)?;
        Ok(rows.into_iter().filter_map(Self::from_row).collect())
    }
}
