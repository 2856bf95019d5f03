//! Need/capacity join result

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An observation paired with the capacity of the same location and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub location: String,
    pub year: i32,
    /// Sex label of the need observation
    pub sex: String,
    pub age: Option<String>,
    /// Prevalence in percent
    pub need_value: f64,
    pub need_lower: Option<f64>,
    pub need_upper: Option<f64>,
    /// Psychiatrists per 100k population
    pub capacity_value: f64,
    /// `need / (capacity + epsilon)`
    pub priority_index: f64,
    /// High need (at or above the need p75) and low capacity (at or below the capacity p25)
    pub critical: bool,
}

impl JoinedRecord {
    /// Arrow schema used when exporting joined records
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new("location", DataType::Utf8, false),
            Field::new("year", DataType::Int32, false),
            Field::new("sex", DataType::Utf8, false),
            Field::new("age", DataType::Utf8, true),
            Field::new("need_value", DataType::Float64, false),
            Field::new("need_lower", DataType::Float64, true),
            Field::new("need_upper", DataType::Float64, true),
            Field::new("capacity_value", DataType::Float64, false),
            Field::new("priority_index", DataType::Float64, false),
            Field::new("critical", DataType::Boolean, false),
        ])
    }

    /// Convert joined records to a `RecordBatch` with the export schema
    pub fn to_record_batch(records: &[Self]) -> Result<RecordBatch> {
        let fields: Vec<FieldRef> = Self::schema().fields().iter().map(Arc::clone).collect();
        Ok(serde_arrow::to_record_batch(&fields, &records)?)
    }
}
