//! Need versus capacity prioritization
//!
//! Joins prevalence with psychiatrist availability for one year and ranks
//! locations by `need / (capacity + epsilon)`.

use std::cmp::Ordering;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithm::statistics::percentile;
use crate::models::{CapacityRecord, JoinedRecord, Observation};
use crate::utils::log_dropped;

/// Additive smoothing of the capacity denominator
pub const PRIORITY_EPSILON: f64 = 0.05;

/// Default shortlist length
pub const DEFAULT_TOP_N: usize = 15;

/// Percentile of capacity below which a location counts as low capacity
pub const CAPACITY_PERCENTILE: f64 = 25.0;

/// Percentile of need above which a location counts as high need
pub const NEED_PERCENTILE: f64 = 75.0;

/// Priority of a location given its need and capacity
///
/// Near-zero capacity yields a large but finite index.
#[must_use]
pub fn priority_index(need: f64, capacity: f64) -> f64 {
    need / (capacity + PRIORITY_EPSILON)
}

/// Ranking order: priority descending, then location ascending
#[must_use]
pub fn priority_order(a: &JoinedRecord, b: &JoinedRecord) -> Ordering {
    b.priority_index
        .total_cmp(&a.priority_index)
        .then_with(|| a.location.cmp(&b.location))
}

/// Result of prioritizing one year
#[derive(Debug, Clone, PartialEq)]
pub struct Prioritization {
    pub year: i32,
    /// All joined records, ranked
    pub joined: Vec<JoinedRecord>,
    /// The first `top_n` of `joined`
    pub top: Vec<JoinedRecord>,
    /// 25th percentile of joined capacity values
    pub capacity_p25: Option<f64>,
    /// 75th percentile of joined need values
    pub need_p75: Option<f64>,
}

impl Prioritization {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty()
    }

    /// Records flagged as high need and low capacity
    pub fn critical(&self) -> impl Iterator<Item = &JoinedRecord> {
        self.joined.iter().filter(|r| r.critical)
    }
}

/// Join need and capacity for `year` and rank the result
///
/// Need rows without a value and capacity rows without a positive value are
/// dropped before an inner join on exact location names. Each side keeps its
/// first row per location, so a location is ranked at most once. An empty
/// join is returned as an empty result, not an error.
#[must_use]
pub fn prioritize(
    need: &[Observation],
    capacity: &[CapacityRecord],
    year: i32,
    top_n: usize,
) -> Prioritization {
    let mut seen_need: FxHashSet<&str> = FxHashSet::default();
    let need_rows: Vec<(&Observation, f64)> = need
        .iter()
        .filter(|o| o.year == Some(year))
        .filter_map(|o| {
            let value = o.value?;
            if seen_need.insert(o.location.as_str()) {
                Some((o, value))
            } else {
                log::warn!(
                    "Duplicate need row for {} in {year}, keeping the first",
                    o.location
                );
                None
            }
        })
        .collect();

    let year_capacity: Vec<&CapacityRecord> =
        capacity.iter().filter(|c| c.year == Some(year)).collect();
    let capacity_by_location: FxHashMap<&str, f64> = year_capacity
        .iter()
        .filter_map(|c| c.usable_value().map(|v| (c.location.as_str(), v)))
        .fold(FxHashMap::default(), |mut acc, (location, value)| {
            // First record per location wins
            acc.entry(location).or_insert(value);
            acc
        });
    log_dropped(
        "capacity filter",
        capacity_by_location.len(),
        year_capacity.len(),
    );

    let mut joined: Vec<JoinedRecord> = need_rows
        .iter()
        .filter_map(|(observation, need_value)| {
            let capacity_value = *capacity_by_location.get(observation.location.as_str())?;
            Some(JoinedRecord {
                location: observation.location.clone(),
                year,
                sex: observation.sex.label().to_string(),
                age: observation.age.clone(),
                need_value: *need_value,
                need_lower: observation.lower,
                need_upper: observation.upper,
                capacity_value,
                priority_index: priority_index(*need_value, capacity_value),
                critical: false,
            })
        })
        .collect();
    log_dropped("location join", joined.len(), need_rows.len());

    let capacity_values: Vec<f64> = joined.iter().map(|r| r.capacity_value).collect();
    let need_values: Vec<f64> = joined.iter().map(|r| r.need_value).collect();
    let capacity_p25 = percentile(&capacity_values, CAPACITY_PERCENTILE);
    let need_p75 = percentile(&need_values, NEED_PERCENTILE);

    if let (Some(cap_threshold), Some(need_threshold)) = (capacity_p25, need_p75) {
        for record in &mut joined {
            record.critical =
                record.need_value >= need_threshold && record.capacity_value <= cap_threshold;
        }
    }

    joined.sort_by(priority_order);
    let top = joined.iter().take(top_n).cloned().collect();

    log::info!(
        "Prioritized {} locations for {year} (capacity p25: {capacity_p25:?}, need p75: {need_p75:?})",
        joined.len()
    );

    Prioritization {
        year,
        joined,
        top,
        capacity_p25,
        need_p75,
    }
}
