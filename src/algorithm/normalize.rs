//! Unit normalization for prevalence values
//!
//! Sources disagree on whether a "Percent" metric is stored as a fraction
//! (0-1) or as a percentage (0-100). The decision is made once per metric
//! collection and applied to every row of it, so an ambiguous row (exactly
//! 1.0, say) is never rescaled differently from its siblings.

use itertools::Itertools;

use crate::algorithm::statistics::max_value;
use crate::models::Observation;

/// Metric label token marking a percentage-type metric
pub const PERCENT_TOKEN: &str = "percent";

/// Scale factor from fraction to percentage
pub const PERCENT_SCALE: f64 = 100.0;

/// Whether a metric collection is stored as fractions
///
/// True when the label contains [`PERCENT_TOKEN`] (case-insensitive) and the
/// largest present value is at most 1.0. A collection without values is
/// never fractional.
#[must_use]
pub fn is_fractional(metric: Option<&str>, values: impl IntoIterator<Item = f64>) -> bool {
    let is_percent_metric =
        metric.is_some_and(|label| label.to_lowercase().contains(PERCENT_TOKEN));
    is_percent_metric && max_value(values).is_some_and(|max| max <= 1.0)
}

fn rescale(observation: &Observation) -> Observation {
    Observation {
        value: observation.value.map(|v| v * PERCENT_SCALE),
        lower: observation.lower.map(|v| v * PERCENT_SCALE),
        upper: observation.upper.map(|v| v * PERCENT_SCALE),
        ..observation.clone()
    }
}

/// Normalize one collection whose rows share the `metric` classifier
#[must_use]
pub fn normalize_collection(metric: Option<&str>, observations: &[Observation]) -> Vec<Observation> {
    if is_fractional(metric, observations.iter().filter_map(|o| o.value)) {
        log::info!(
            "Rescaling {} '{}' observations from fraction to percent",
            observations.len(),
            metric.unwrap_or_default()
        );
        observations.iter().map(rescale).collect()
    } else {
        observations.to_vec()
    }
}

/// Normalize a mixed dataset, deciding separately for each metric label
///
/// Each metric group goes through [`normalize_collection`]. Output order
/// matches input order.
#[must_use]
pub fn normalize_units(observations: &[Observation]) -> Vec<Observation> {
    let groups = observations
        .iter()
        .enumerate()
        .into_group_map_by(|(_, o)| o.metric.clone());

    let mut normalized: Vec<Option<Observation>> = vec![None; observations.len()];
    for (metric, members) in groups {
        let (positions, rows): (Vec<usize>, Vec<Observation>) = members
            .into_iter()
            .map(|(idx, o)| (idx, o.clone()))
            .unzip();
        for (idx, observation) in positions
            .into_iter()
            .zip(normalize_collection(metric.as_deref(), &rows))
        {
            normalized[idx] = Some(observation);
        }
    }
    normalized.into_iter().flatten().collect()
}
