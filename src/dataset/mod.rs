//! Dataset loading
//!
//! Reads the need, micro and capacity CSV exports and normalizes them onto the
//! canonical schemas before converting rows into domain models.

pub mod reader;
pub mod schema;

use std::path::Path;

use crate::error::Result;
use crate::models::{CapacityRecord, Observation};

pub use reader::read_csv;
pub use schema::{CAPACITY_FIELDS, CanonicalField, OBSERVATION_FIELDS, map_to_canonical};

/// Load a prevalence dataset (need or micro) as observations
pub fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let mut observations = Vec::new();
    for batch in read_csv(path)? {
        let mapped = map_to_canonical(&batch, OBSERVATION_FIELDS)?;
        observations.extend(Observation::from_batch(&mapped)?);
    }
    log::info!(
        "Loaded {} observations from {}",
        observations.len(),
        path.display()
    );
    Ok(observations)
}

/// Load the psychiatrist capacity dataset
pub fn load_capacity(path: &Path) -> Result<Vec<CapacityRecord>> {
    let mut records = Vec::new();
    for batch in read_csv(path)? {
        let mapped = map_to_canonical(&batch, CAPACITY_FIELDS)?;
        records.extend(CapacityRecord::from_batch(&mapped)?);
    }
    log::info!(
        "Loaded {} capacity records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}
