use std::path::{Path, PathBuf};

use mhgap::AnalysisConfig;

/// Need dataset in long export format, prevalence stored as fractions
pub const NEED_CSV: &str = "\
measure_name,location_name,sex_name,age_name,cause_name,metric_name,year,val,upper,lower
Prevalence,Chile,Both,All ages,Depressive disorders,Percent,2017,0.050,0.055,0.045
Prevalence,Chile,Both,All ages,Depressive disorders,Percent,2018,0.051,0.056,0.046
Prevalence,Chile,Both,All ages,Depressive disorders,Percent,2019,0.052,0.057,0.047
Prevalence,Chile,Male,All ages,Depressive disorders,Percent,2017,0.200,0.210,0.190
Prevalence,Peru,Both,All ages,Depressive disorders,Percent,2017,0.040,0.044,0.036
Prevalence,Peru,Both,All ages,Depressive disorders,Percent,2018,0.041,0.045,0.037
Prevalence,Peru,Both,All ages,Depressive disorders,Percent,2019,0.042,0.046,0.038
Prevalence,Bolivia,Both,All ages,Depressive disorders,Percent,2017,0.030,0.033,0.027
Prevalence,Bolivia,Both,All ages,Depressive disorders,Percent,2018,0.031,0.034,0.028
Prevalence,Bolivia,Both,All ages,Depressive disorders,Percent,2019,0.032,0.035,0.029
Prevalence,Uruguay,Both,All ages,Depressive disorders,Percent,2017,0.060,0.066,0.054
Prevalence,Uruguay,Both,All ages,Depressive disorders,Percent,2018,0.061,0.067,0.055
Prevalence,Uruguay,Both,All ages,Depressive disorders,Percent,2019,,,
";

/// Need export carrying Number, Percent and Rate rows for each location-year
pub const MIXED_METRIC_NEED_CSV: &str = "\
measure_name,location_name,sex_name,age_name,cause_name,metric_name,year,val
Prevalence,Chile,Both,All ages,Depressive disorders,Number,2017,900000
Prevalence,Chile,Both,All ages,Depressive disorders,Percent,2017,0.050
Prevalence,Chile,Both,All ages,Depressive disorders,Rate,2017,5000
Prevalence,Peru,Both,All ages,Depressive disorders,Number,2017,1500000
Prevalence,Peru,Both,All ages,Depressive disorders,Percent,2017,0.040
Prevalence,Peru,Both,All ages,Depressive disorders,Rate,2017,4000
";

/// Capacity dataset in wide single-indicator export format
///
/// 2016 has the best coverage but no need data; 2017 is the actionable year.
pub const CAPACITY_CSV: &str = "\
Entity,Code,Year,Psychiatrists working in mental health sector (per 100 000 population)
Chile,CHL,2016,4.4
Peru,PER,2016,0.7
Bolivia,BOL,2016,0.2
Uruguay,URY,2016,11.0
Paraguay,PRY,2016,1.0
Ecuador,ECU,2016,1.4
Chile,CHL,2017,4.5
Peru,PER,2017,0.8
Bolivia,BOL,2017,0.2
Uruguay,URY,2017,0.0
Paraguay,PRY,2017,1.0
Chile,CHL,2019,4.7
Peru,PER,2019,0.9
";

/// Age/sex breakdown; Bolivia only has both-sexes rows
pub const MICRO_CSV: &str = "\
location_name,sex_name,age_name,metric_name,year,val
Chile,Male,20-24 years,Percent,2019,0.030
Chile,Female,20-24 years,Percent,2019,0.050
Chile,Male,10-14 years,Percent,2019,0.010
Chile,Female,10-14 years,Percent,2019,0.020
Chile,Female,10-14 years,Rate,2019,1500
Peru,Male,20-24 years,Percent,2019,0.025
Peru,Female,20-24 years,Percent,2019,0.045
Bolivia,Both,20-24 years,Percent,2019,0.035
";

/// Write a fixture file into `dir`
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

/// Configuration pointing at freshly written fixtures inside `dir`
pub fn fixture_config(dir: &Path) -> AnalysisConfig {
    write_fixture(dir, "need.csv", NEED_CSV);
    write_fixture(dir, "capacity.csv", CAPACITY_CSV);
    write_fixture(dir, "micro.csv", MICRO_CSV);

    AnalysisConfig {
        need_source: PathBuf::from("need.csv"),
        micro_source: PathBuf::from("micro.csv"),
        capacity_source: PathBuf::from("capacity.csv"),
        macro_locations: vec!["Chile".to_string(), "Peru".to_string()],
        micro_locations: vec!["Chile".to_string(), "Peru".to_string()],
        micro_year: 2019,
        ..Default::default()
    }
    .rooted_at(dir)
}

/// Approximate float comparison
#[must_use]
pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
