//! Configuration for the analysis run.
//!
//! Every component receives what it needs from [`AnalysisConfig`]; nothing
//! reads process state on its own. The binary resolves relative paths against
//! its working directory with [`AnalysisConfig::rooted_at`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::algorithm::prioritize::DEFAULT_TOP_N;
use crate::error::util::safe_open_file;
use crate::error::{AnalysisError, Result};

/// File names of the rendered artifacts, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputTargets {
    pub macro_trend: PathBuf,
    pub micro_profile: PathBuf,
    pub actionable_scatter: PathBuf,
    pub actionable_bar: PathBuf,
    /// Parquet export of the ranked join
    pub prioritization_table: PathBuf,
}

impl Default for OutputTargets {
    fn default() -> Self {
        Self {
            macro_trend: PathBuf::from("macro_trend.vl.json"),
            micro_profile: PathBuf::from("micro_age_sex_profile.vl.json"),
            actionable_scatter: PathBuf::from("actionable_scatter.vl.json"),
            actionable_bar: PathBuf::from("actionable_top_priority_bar.vl.json"),
            prioritization_table: PathBuf::from("prioritization.parquet"),
        }
    }
}

/// Configuration for an analysis run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Depression prevalence by location and year (need)
    pub need_source: PathBuf,
    /// Depression prevalence by age band and sex
    pub micro_source: PathBuf,
    /// Psychiatrists per 100k population
    pub capacity_source: PathBuf,
    /// Locations charted in the macro trend
    pub macro_locations: Vec<String>,
    /// Locations charted side by side in the micro profile
    pub micro_locations: Vec<String>,
    /// Year of the micro profile
    pub micro_year: i32,
    /// Only micro rows whose metric label contains this (case-insensitive)
    pub micro_metric: Option<String>,
    /// Only need rows whose metric label contains this (case-insensitive)
    pub need_metric: Option<String>,
    /// Restrict headline rows to this age-band label
    pub headline_age: Option<String>,
    /// Length of the priority shortlist
    pub top_n: usize,
    pub output_dir: PathBuf,
    pub output_targets: OutputTargets,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            need_source: PathBuf::from("data/depression_prevalence.csv"),
            micro_source: PathBuf::from("data/depression_by_age_sex.csv"),
            capacity_source: PathBuf::from("data/psychiatrists_per_100k.csv"),
            macro_locations: [
                "United States of America",
                "India",
                "China",
                "Brazil",
                "Nigeria",
            ]
            .map(String::from)
            .to_vec(),
            micro_locations: ["United States of America", "India"]
                .map(String::from)
                .to_vec(),
            micro_year: 2019,
            micro_metric: Some("Percent".to_string()),
            need_metric: Some("Percent".to_string()),
            headline_age: None,
            top_n: DEFAULT_TOP_N,
            output_dir: PathBuf::from("output"),
            output_targets: OutputTargets::default(),
        }
    }
}

fn rooted(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl AnalysisConfig {
    /// Read a JSON configuration file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "reading analysis configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Resolve relative source and output paths against `base`
    #[must_use]
    pub fn rooted_at(mut self, base: &Path) -> Self {
        self.need_source = rooted(base, &self.need_source);
        self.micro_source = rooted(base, &self.micro_source);
        self.capacity_source = rooted(base, &self.capacity_source);
        self.output_dir = rooted(base, &self.output_dir);
        self
    }

    /// Full path of an output target
    #[must_use]
    pub fn target_path(&self, target: &Path) -> PathBuf {
        rooted(&self.output_dir, target)
    }

    /// Check the settings that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.micro_locations.is_empty() {
            return Err(AnalysisError::Config(
                "micro_locations must name at least one location".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(AnalysisError::Config(
                "top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Configuration:")?;
        writeln!(f, "  Need Source: {}", self.need_source.display())?;
        writeln!(f, "  Micro Source: {}", self.micro_source.display())?;
        writeln!(f, "  Capacity Source: {}", self.capacity_source.display())?;
        writeln!(f, "  Macro Locations: {}", self.macro_locations.join(", "))?;
        writeln!(f, "  Micro Locations: {}", self.micro_locations.join(", "))?;
        writeln!(f, "  Micro Year: {}", self.micro_year)?;
        if let Some(metric) = &self.micro_metric {
            writeln!(f, "  Micro Metric: {metric}")?;
        }
        if let Some(metric) = &self.need_metric {
            writeln!(f, "  Need Metric: {metric}")?;
        }
        if let Some(age) = &self.headline_age {
            writeln!(f, "  Headline Age: {age}")?;
        }
        writeln!(f, "  Top N: {}", self.top_n)?;
        write!(f, "  Output Directory: {}", self.output_dir.display())
    }
}
