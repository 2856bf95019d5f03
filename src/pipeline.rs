//! The analysis run: load, normalize, build and render
//!
//! Charts are produced in a fixed order (macro trend, micro profile,
//! actionable scatter, actionable bar, Parquet export). The first error stops
//! the run; artifacts already written are left in place.

use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};

use crate::algorithm::{
    macro_trends, micro_profiles, normalize_units, prioritize, select_actionable_year,
};
use crate::config::AnalysisConfig;
use crate::dataset::{load_capacity, load_observations};
use crate::error::Result;
use crate::models::{CapacityRecord, Observation};
use crate::report::{
    ChartRenderer, VegaLiteRenderer, actionable_bar_chart, actionable_scatter_chart,
    macro_trend_chart, micro_profile_chart, write_prioritization_parquet,
};

/// Loaded and normalized inputs of a run
#[derive(Debug, Clone)]
pub struct Inputs {
    pub need: Vec<Observation>,
    pub micro: Vec<Observation>,
    pub capacity: Vec<CapacityRecord>,
}

impl Inputs {
    /// Load all three datasets named by the configuration, normalizing prevalence units
    pub fn load(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            need: normalize_units(&load_observations(&config.need_source)?),
            micro: normalize_units(&load_observations(&config.micro_source)?),
            capacity: load_capacity(&config.capacity_source)?,
        })
    }
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub actionable_year: i32,
    pub prioritized_locations: usize,
    /// Locations in the shortlist, highest priority first
    pub shortlist: Vec<String>,
    /// High-need, low-capacity locations, highest priority first
    pub critical: Vec<String>,
    /// Every file written, in order
    pub artifacts: Vec<PathBuf>,
}

/// Run the analysis with the Vega-Lite renderer
pub fn run(config: &AnalysisConfig) -> Result<RunSummary> {
    run_with_renderer(config, &VegaLiteRenderer::default())
}

/// Run the analysis, rendering charts with `renderer`
pub fn run_with_renderer<R: ChartRenderer>(
    config: &AnalysisConfig,
    renderer: &R,
) -> Result<RunSummary> {
    config.validate()?;
    info!("{config}");

    let start = Instant::now();
    let inputs = Inputs::load(config)?;
    let summary = analyse(config, &inputs, renderer)?;

    info!(
        "Analysis finished in {:?}: {} artifacts written",
        start.elapsed(),
        summary.artifacts.len()
    );
    Ok(summary)
}

/// Build and render every artifact from already loaded inputs
pub fn analyse<R: ChartRenderer>(
    config: &AnalysisConfig,
    inputs: &Inputs,
    renderer: &R,
) -> Result<RunSummary> {
    let targets = &config.output_targets;
    let headline_age = config.headline_age.as_deref();
    let need_metric = config.need_metric.as_deref();
    let mut artifacts = Vec::new();

    let series = macro_trends(
        &inputs.need,
        &config.macro_locations,
        headline_age,
        need_metric,
    );
    artifacts.push(renderer.render(
        &macro_trend_chart(&series),
        &config.target_path(&targets.macro_trend),
    )?);

    let profiles = micro_profiles(
        &inputs.micro,
        &config.micro_locations,
        config.micro_year,
        config.micro_metric.as_deref(),
    )?;
    artifacts.push(renderer.render(
        &micro_profile_chart(&profiles),
        &config.target_path(&targets.micro_profile),
    )?);

    let headline: Vec<Observation> = inputs
        .need
        .iter()
        .filter(|o| o.is_headline(headline_age, need_metric))
        .cloned()
        .collect();
    let year = select_actionable_year(&headline, &inputs.capacity)?;
    let prioritization = prioritize(&headline, &inputs.capacity, year, config.top_n);
    if prioritization.is_empty() {
        warn!("No location has both need and capacity data for {year}; actionable charts are empty");
    }

    artifacts.push(renderer.render(
        &actionable_scatter_chart(&prioritization),
        &config.target_path(&targets.actionable_scatter),
    )?);
    artifacts.push(renderer.render(
        &actionable_bar_chart(&prioritization),
        &config.target_path(&targets.actionable_bar),
    )?);

    let table = config.target_path(&targets.prioritization_table);
    write_prioritization_parquet(&prioritization, &table)?;
    artifacts.push(table);

    Ok(RunSummary {
        actionable_year: year,
        prioritized_locations: prioritization.joined.len(),
        shortlist: prioritization
            .top
            .iter()
            .map(|r| r.location.clone())
            .collect(),
        critical: prioritization
            .critical()
            .map(|r| r.location.clone())
            .collect(),
        artifacts,
    })
}
