//! Macro trend and micro age/sex profile builders

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::error::{AnalysisError, Result};
use crate::models::{AgeBand, Observation, Sex};

/// One year of a location's headline prevalence
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Headline prevalence over time for one location
#[derive(Debug, Clone, PartialEq)]
pub struct MacroSeries {
    pub location: String,
    /// Points ordered by year
    pub points: Vec<TrendPoint>,
}

/// Build the yearly headline series for each requested location
///
/// Only headline rows whose metric matches `metric` are charted. Rows without
/// a year or value are skipped. When a year appears twice the first row is kept.
#[must_use]
pub fn macro_trends(
    observations: &[Observation],
    locations: &[String],
    headline_age: Option<&str>,
    metric: Option<&str>,
) -> Vec<MacroSeries> {
    locations
        .iter()
        .map(|location| {
            let mut by_year: BTreeMap<i32, TrendPoint> = BTreeMap::new();
            for observation in observations
                .iter()
                .filter(|o| &o.location == location && o.is_headline(headline_age, metric))
            {
                let (Some(year), Some(value)) = (observation.year, observation.value) else {
                    continue;
                };
                if by_year.contains_key(&year) {
                    log::warn!("Duplicate headline row for {location} in {year}, keeping the first");
                    continue;
                }
                by_year.insert(
                    year,
                    TrendPoint {
                        year,
                        value,
                        lower: observation.lower,
                        upper: observation.upper,
                    },
                );
            }

            if by_year.is_empty() {
                log::warn!("No headline observations for {location}");
            }

            MacroSeries {
                location: location.clone(),
                points: by_year.into_values().collect(),
            }
        })
        .collect()
}

/// Male and female prevalence for one age band
#[derive(Debug, Clone, PartialEq)]
pub struct AgeSexPoint {
    pub age: String,
    pub male: Option<f64>,
    pub female: Option<f64>,
}

/// Age/sex breakdown of one location in one year
#[derive(Debug, Clone, PartialEq)]
pub struct MicroProfile {
    pub location: String,
    pub year: i32,
    /// Age bands in ascending age order
    pub bands: Vec<AgeSexPoint>,
}

/// Build the age/sex profile of `location` in `year`
///
/// Fails with [`AnalysisError::MissingSexSplit`] unless both a Male and a
/// Female row with a value exist.
pub fn micro_profile(
    observations: &[Observation],
    location: &str,
    year: i32,
    metric: Option<&str>,
) -> Result<MicroProfile> {
    let rows: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.location == location && o.year == Some(year) && o.value.is_some())
        .filter(|o| o.matches_metric(metric))
        .collect();

    let sexes: Vec<Sex> = rows.iter().map(|o| o.sex).unique().sorted().collect();
    if !(sexes.contains(&Sex::Male) && sexes.contains(&Sex::Female)) {
        return Err(AnalysisError::MissingSexSplit {
            location: location.to_string(),
            year,
            found: sexes.iter().map(|s| s.label().to_string()).collect(),
        });
    }

    let mut bands: BTreeMap<AgeBand<'_>, AgeSexPoint> = BTreeMap::new();
    for row in rows.iter().filter(|o| matches!(o.sex, Sex::Male | Sex::Female)) {
        let Some(age) = row.age.as_deref() else {
            continue;
        };
        let point = bands.entry(AgeBand::new(age)).or_insert_with(|| AgeSexPoint {
            age: age.to_string(),
            male: None,
            female: None,
        });
        let slot = if row.sex == Sex::Male {
            &mut point.male
        } else {
            &mut point.female
        };
        if slot.is_some() {
            log::warn!(
                "Duplicate {} row for {location}, {age} in {year}, keeping the first",
                row.sex
            );
        } else {
            *slot = row.value;
        }
    }

    Ok(MicroProfile {
        location: location.to_string(),
        year,
        bands: bands.into_values().collect(),
    })
}

/// Build profiles for every requested location, failing on the first missing split
pub fn micro_profiles(
    observations: &[Observation],
    locations: &[String],
    year: i32,
    metric: Option<&str>,
) -> Result<Vec<MicroProfile>> {
    locations
        .iter()
        .map(|location| micro_profile(observations, location, year, metric))
        .collect()
}
