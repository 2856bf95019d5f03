//! Actionable year selection
//!
//! The need and capacity datasets cover different years. The comparison uses
//! the single year that maximizes capacity coverage among the years the need
//! dataset also has.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;

use crate::error::{AnalysisError, Result, YEAR_PREVIEW_LEN};
use crate::models::{CapacityRecord, Observation};

/// Distinct-location capacity coverage of one year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCoverage {
    pub year: i32,
    /// Number of distinct locations with a capacity value that year
    pub locations: usize,
}

/// Years present in the need dataset, missing years dropped
#[must_use]
pub fn need_years(need: &[Observation]) -> BTreeSet<i32> {
    need.iter().filter_map(|o| o.year).collect()
}

/// Capacity years ranked by coverage, most covered first, ties by ascending year
#[must_use]
pub fn ranked_capacity_years(capacity: &[CapacityRecord]) -> Vec<YearCoverage> {
    let mut by_year: BTreeMap<i32, FxHashSet<&str>> = BTreeMap::new();
    for record in capacity {
        if let (Some(year), Some(_)) = (record.year, record.psy_per100k) {
            by_year
                .entry(year)
                .or_default()
                .insert(record.location.as_str());
        }
    }

    let mut ranked: Vec<YearCoverage> = by_year
        .into_iter()
        .map(|(year, locations)| YearCoverage {
            year,
            locations: locations.len(),
        })
        .collect();
    ranked.sort_by(|a, b| b.locations.cmp(&a.locations).then(a.year.cmp(&b.year)));
    ranked
}

/// Select the year used to compare need against capacity
///
/// Fails with [`AnalysisError::NoOverlap`] when no capacity year is also a need year.
pub fn select_actionable_year(need: &[Observation], capacity: &[CapacityRecord]) -> Result<i32> {
    let need_years = need_years(need);
    let ranked = ranked_capacity_years(capacity);

    if let Some(coverage) = ranked.iter().find(|c| need_years.contains(&c.year)) {
        log::info!(
            "Actionable year {} ({} locations with capacity data)",
            coverage.year,
            coverage.locations
        );
        return Ok(coverage.year);
    }

    let capacity_years: BTreeSet<i32> = ranked.iter().map(|c| c.year).collect();
    Err(AnalysisError::NoOverlap {
        need_years: need_years.into_iter().take(YEAR_PREVIEW_LEN).collect(),
        capacity_years: capacity_years.into_iter().take(YEAR_PREVIEW_LEN).collect(),
    })
}
