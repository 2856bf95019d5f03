use crate::utils::{CAPACITY_CSV, MICRO_CSV, NEED_CSV, close, write_fixture};
use mhgap::dataset::{load_capacity, load_observations};
use mhgap::{AnalysisError, Sex};

#[test]
fn test_load_need_dataset() -> mhgap::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "need.csv", NEED_CSV);

    let observations = load_observations(&path)?;
    assert_eq!(observations.len(), 13);

    let first = &observations[0];
    assert_eq!(first.location, "Chile");
    assert_eq!(first.year, Some(2017));
    assert_eq!(first.sex, Sex::Both);
    assert_eq!(first.age.as_deref(), Some("All ages"));
    assert_eq!(first.metric.as_deref(), Some("Percent"));
    assert!(close(first.value.unwrap(), 0.05));
    assert!(close(first.upper.unwrap(), 0.055));

    // Empty cells are missing values
    let uruguay_2019 = observations
        .iter()
        .find(|o| o.location == "Uruguay" && o.year == Some(2019))
        .unwrap();
    assert_eq!(uruguay_2019.value, None);
    assert_eq!(uruguay_2019.lower, None);

    Ok(())
}

#[test]
fn test_load_capacity_detects_psychiatrist_column() -> mhgap::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "capacity.csv", CAPACITY_CSV);

    let records = load_capacity(&path)?;
    assert_eq!(records.len(), 13);
    assert_eq!(records[0].location, "Chile");
    assert_eq!(records[0].year, Some(2016));
    assert!(close(records[0].psy_per100k.unwrap(), 4.4));

    let uruguay_2017 = records
        .iter()
        .find(|r| r.location == "Uruguay" && r.year == Some(2017))
        .unwrap();
    assert_eq!(uruguay_2017.psy_per100k, Some(0.0));
    assert_eq!(uruguay_2017.usable_value(), None);

    Ok(())
}

#[test]
fn test_micro_sex_labels() -> mhgap::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "micro.csv", MICRO_CSV);

    let observations = load_observations(&path)?;
    let sexes: Vec<Sex> = observations.iter().map(|o| o.sex).collect();
    assert_eq!(sexes[0], Sex::Male);
    assert_eq!(sexes[1], Sex::Female);
    assert_eq!(sexes[7], Sex::Both);
    // No lower/upper columns in this export
    assert!(observations.iter().all(|o| o.lower.is_none() && o.upper.is_none()));

    Ok(())
}

#[test]
fn test_unparsable_values_become_missing() -> mhgap::Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        dir.path(),
        "messy.csv",
        "Entity,Year,Depression prevalence (share of population)\nChile,2019,5.1\nPeru,2019,n/a\n",
    );

    let observations = load_observations(&path)?;
    assert_eq!(observations.len(), 2);
    assert!(close(observations[0].value.unwrap(), 5.1));
    assert_eq!(observations[1].value, None);
    assert_eq!(observations[1].sex, Sex::Unset);

    Ok(())
}

#[test]
fn test_missing_required_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "bad.csv", "Entity,Year,Code\nChile,2019,CHL\n");

    match load_capacity(&path) {
        Err(AnalysisError::Schema(message)) => {
            assert!(message.contains("psy_per100k"), "{message}");
            assert!(message.contains("Entity"), "{message}");
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_observations(&dir.path().join("absent.csv"));
    assert!(matches!(result, Err(AnalysisError::Io { .. })));
}
