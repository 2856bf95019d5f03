//! Canonical dataset schemas and source column mapping
//!
//! Source CSV exports name their columns differently (`location_name`,
//! `Entity`, `val`, ...). Each canonical field lists the source names it
//! accepts; a mapped batch carries exactly the canonical fields, in canonical
//! order and with canonical types, so it can be deserialized with `serde_arrow`.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{ArrayRef, new_null_array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::{AnalysisError, Result};

/// One field of a canonical schema
#[derive(Debug, Clone)]
pub struct CanonicalField {
    /// Canonical column name
    pub name: &'static str,
    /// Canonical Arrow type the source column is cast to
    pub data_type: DataType,
    /// Accepted source names, compared lower-cased and trimmed
    pub aliases: &'static [&'static str],
    /// Fallback: first unclaimed source column whose name contains one of these
    pub contains: &'static [&'static str],
    /// Whether a batch without this column is rejected
    pub required: bool,
}

impl CanonicalField {
    const fn new(
        name: &'static str,
        data_type: DataType,
        aliases: &'static [&'static str],
        contains: &'static [&'static str],
        required: bool,
    ) -> Self {
        Self {
            name,
            data_type,
            aliases,
            contains,
            required,
        }
    }
}

const LOCATION_ALIASES: &[&str] = &["location", "location_name", "entity", "country"];
const YEAR_ALIASES: &[&str] = &["year", "year_id"];

/// Canonical layout of need and micro prevalence datasets
pub const OBSERVATION_FIELDS: &[CanonicalField] = &[
    CanonicalField::new("location", DataType::Utf8, LOCATION_ALIASES, &[], true),
    CanonicalField::new("year", DataType::Int32, YEAR_ALIASES, &[], true),
    CanonicalField::new("sex", DataType::Utf8, &["sex", "sex_name"], &[], false),
    CanonicalField::new("age", DataType::Utf8, &["age", "age_name", "age_group"], &[], false),
    CanonicalField::new("cause", DataType::Utf8, &["cause", "cause_name"], &[], false),
    CanonicalField::new("measure", DataType::Utf8, &["measure", "measure_name"], &[], false),
    CanonicalField::new("metric", DataType::Utf8, &["metric", "metric_name"], &[], false),
    CanonicalField::new(
        "value",
        DataType::Float64,
        &["value", "val"],
        &["prevalence", "share of population"],
        true,
    ),
    CanonicalField::new("lower", DataType::Float64, &["lower"], &[], false),
    CanonicalField::new("upper", DataType::Float64, &["upper"], &[], false),
];

/// Canonical layout of the psychiatrist capacity dataset
pub const CAPACITY_FIELDS: &[CanonicalField] = &[
    CanonicalField::new("location", DataType::Utf8, LOCATION_ALIASES, &[], true),
    CanonicalField::new("year", DataType::Int32, YEAR_ALIASES, &[], true),
    CanonicalField::new(
        "psy_per100k",
        DataType::Float64,
        &["psy_per100k"],
        &["psychiatrist"],
        true,
    ),
];

/// Arrow schema of a canonical layout
#[must_use]
pub fn canonical_schema(fields: &[CanonicalField]) -> Schema {
    Schema::new(
        fields
            .iter()
            .map(|f| Field::new(f.name, f.data_type.clone(), true))
            .collect::<Vec<_>>(),
    )
}

/// Find the source column index for every canonical field
///
/// Exact aliases are resolved for all fields before substring fallbacks, so a
/// fallback never steals a column another field names explicitly.
pub fn resolve_columns(source: &Schema, fields: &[CanonicalField]) -> Result<Vec<Option<usize>>> {
    let normalized: Vec<String> = source
        .fields()
        .iter()
        .map(|f| f.name().trim().to_lowercase())
        .collect();

    let mut claimed = HashSet::new();
    let mut resolved: Vec<Option<usize>> = fields
        .iter()
        .map(|field| {
            let idx = field
                .aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|name| name == alias));
            if let Some(idx) = idx {
                claimed.insert(idx);
            }
            idx
        })
        .collect();

    for (field, slot) in fields.iter().zip(resolved.iter_mut()) {
        if slot.is_some() || field.contains.is_empty() {
            continue;
        }
        *slot = normalized.iter().enumerate().find_map(|(idx, name)| {
            (!claimed.contains(&idx) && field.contains.iter().any(|needle| name.contains(needle)))
                .then_some(idx)
        });
        if let Some(idx) = *slot {
            log::debug!("Using column '{}' as {}", source.field(idx).name(), field.name);
            claimed.insert(idx);
        }
    }

    if let Some(missing) = fields
        .iter()
        .zip(&resolved)
        .find(|(field, idx)| field.required && idx.is_none())
        .map(|(field, _)| field.name)
    {
        return Err(AnalysisError::Schema(format!(
            "Required column '{missing}' not found (available columns: {})",
            source.fields().iter().map(|f| f.name()).join(", ")
        )));
    }

    Ok(resolved)
}

/// Rename and cast a source batch onto a canonical layout
///
/// Optional fields missing from the source are filled with nulls. Cells that
/// cannot be cast to the canonical type become null.
pub fn map_to_canonical(batch: &RecordBatch, fields: &[CanonicalField]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let resolved = resolve_columns(&schema, fields)?;

    let columns = fields
        .iter()
        .zip(resolved)
        .map(|(field, idx)| match idx {
            Some(idx) => cast(batch.column(idx), &field.data_type).map_err(AnalysisError::from),
            None => Ok(new_null_array(&field.data_type, batch.num_rows())),
        })
        .collect::<Result<Vec<ArrayRef>>>()?;

    Ok(RecordBatch::try_new(
        Arc::new(canonical_schema(fields)),
        columns,
    )?)
}
