use crate::utils::{MIXED_METRIC_NEED_CSV, close, fixture_config, write_fixture};
use mhgap::{AnalysisError, run};

#[test]
fn test_full_run_writes_all_artifacts() -> mhgap::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path());

    let summary = run(&config)?;
    assert_eq!(summary.actionable_year, 2017);
    assert_eq!(summary.prioritized_locations, 3);
    assert_eq!(summary.shortlist, vec!["Bolivia", "Peru", "Chile"]);
    // Highest need (Chile) is not also the lowest capacity
    assert!(summary.critical.is_empty());

    assert_eq!(summary.artifacts.len(), 5);
    for artifact in &summary.artifacts {
        assert!(artifact.is_file(), "missing {}", artifact.display());
        assert!(artifact.starts_with(dir.path().join("output")));
    }

    let bar: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary.artifacts[3]).unwrap())?;
    assert_eq!(bar["title"], "Top 3 priority locations: prevalence per psychiatrist capacity (2017)");
    assert_eq!(bar["data"]["values"][0]["location"], "Bolivia");

    let micro: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary.artifacts[1]).unwrap())?;
    let rows = micro["data"]["values"].as_array().unwrap();
    // Chile: two bands x two sexes, Peru: one band x two sexes; the Rate row is filtered out
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["age"], "10-14 years");

    Ok(())
}

#[test]
fn test_need_metrics_other_than_percent_are_ignored() -> mhgap::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path());
    write_fixture(dir.path(), "need.csv", MIXED_METRIC_NEED_CSV);

    let summary = run(&config)?;
    assert_eq!(summary.actionable_year, 2017);
    assert_eq!(summary.prioritized_locations, 2);
    assert_eq!(summary.shortlist, vec!["Peru", "Chile"]);

    let trend: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary.artifacts[0]).unwrap())?;
    let rows = trend["data"]["values"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(close(rows[0]["value"].as_f64().unwrap(), 5.0));

    let bar: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary.artifacts[3]).unwrap())?;
    assert!(close(bar["data"]["values"][0]["need_value"].as_f64().unwrap(), 4.0));
    Ok(())
}

#[test]
fn test_missing_sex_split_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fixture_config(dir.path());
    config.micro_locations = vec!["Chile".to_string(), "Bolivia".to_string()];

    match run(&config) {
        Err(AnalysisError::MissingSexSplit { location, year, found }) => {
            assert_eq!(location, "Bolivia");
            assert_eq!(year, 2019);
            assert_eq!(found, vec!["Both".to_string()]);
        }
        other => panic!("expected MissingSexSplit, got {other:?}"),
    }

    // Charts rendered before the failure stay, later ones are never written
    let targets = &config.output_targets;
    assert!(config.target_path(&targets.macro_trend).is_file());
    assert!(!config.target_path(&targets.actionable_scatter).exists());
}

#[test]
fn test_invalid_config_is_rejected_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fixture_config(dir.path());
    config.top_n = 0;
    assert!(matches!(run(&config), Err(AnalysisError::Config(_))));
}

#[test]
fn test_config_from_json_overrides_defaults() -> mhgap::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "micro_year": 2015, "top_n": 5, "micro_locations": ["Chile"] }"#)
        .unwrap();

    let config = mhgap::AnalysisConfig::from_json_file(&path)?;
    assert_eq!(config.micro_year, 2015);
    assert_eq!(config.top_n, 5);
    assert_eq!(config.micro_locations, vec!["Chile"]);
    assert_eq!(config.output_targets, mhgap::OutputTargets::default());
    assert_eq!(config.need_metric.as_deref(), Some("Percent"));
    Ok(())
}
