//! Tests for the need/capacity path on loaded fixture data

use crate::utils::{CAPACITY_CSV, NEED_CSV, close, write_fixture};
use mhgap::algorithm::prioritize::PRIORITY_EPSILON;
use mhgap::algorithm::{normalize_units, prioritize, priority_index, select_actionable_year};
use mhgap::dataset::{load_capacity, load_observations};
use mhgap::{AnalysisError, CapacityRecord, Observation};

fn load_fixtures() -> (Vec<Observation>, Vec<CapacityRecord>) {
    let dir = tempfile::tempdir().unwrap();
    let need_path = write_fixture(dir.path(), "need.csv", NEED_CSV);
    let capacity_path = write_fixture(dir.path(), "capacity.csv", CAPACITY_CSV);

    let need = normalize_units(&load_observations(&need_path).unwrap());
    let headline = need.into_iter().filter(|o| o.is_headline(None, Some("Percent"))).collect();
    (headline, load_capacity(&capacity_path).unwrap())
}

#[test]
fn test_need_is_rescaled_to_percent() {
    let (need, _) = load_fixtures();
    let chile_2017 = need
        .iter()
        .find(|o| o.location == "Chile" && o.year == Some(2017))
        .unwrap();
    assert!(close(chile_2017.value.unwrap(), 5.0));
    assert!(close(chile_2017.lower.unwrap(), 4.5));
    assert!(
        need.iter()
            .filter_map(|o| o.value)
            .all(|v| (0.0..=100.0).contains(&v))
    );
}

#[test]
fn test_actionable_year_skips_years_without_need() {
    let (need, capacity) = load_fixtures();
    // 2016 has the widest capacity coverage but no prevalence data
    assert_eq!(select_actionable_year(&need, &capacity).unwrap(), 2017);
    // Deterministic across calls
    assert_eq!(select_actionable_year(&need, &capacity).unwrap(), 2017);
}

#[test]
fn test_prioritization_on_fixtures() {
    let (need, capacity) = load_fixtures();
    let result = prioritize(&need, &capacity, 2017, 15);

    // Uruguay has zero capacity, Paraguay has no prevalence row
    let ranked: Vec<&str> = result.joined.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(ranked, vec!["Bolivia", "Peru", "Chile"]);

    let bolivia = &result.joined[0];
    assert!(close(bolivia.priority_index, 3.0 / (0.2 + PRIORITY_EPSILON)));
    assert!(close(
        result.joined[2].priority_index,
        priority_index(5.0, 4.5)
    ));
    assert_eq!(result.top.len(), 3);
}

#[test]
fn test_disjoint_years_fail() {
    let need = vec![
        Observation::new("Chile", Some(2010), Some(5.0)),
        Observation::new("Chile", Some(2015), Some(5.0)),
    ];
    let capacity = vec![
        CapacityRecord::new("Chile", Some(2018), Some(4.0)),
        CapacityRecord::new("Chile", Some(2019), Some(4.0)),
    ];

    let err = select_actionable_year(&need, &capacity).unwrap_err();
    assert!(matches!(err, AnalysisError::NoOverlap { .. }));
    let message = err.to_string();
    assert!(message.contains("2010") && message.contains("2019"), "{message}");
}

#[test]
fn test_priority_index_reference_values() {
    assert!(close(priority_index(20.0, 0.0), 400.0));
    assert!((priority_index(20.0, 10.0) - 1.990).abs() < 1e-3);
}
