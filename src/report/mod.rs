//! Report rendering
//!
//! Analysis results become [`ChartSpec`]s, which a [`ChartRenderer`] turns
//! into files. The ranked join is also exported as Parquet.

pub mod chart;
pub mod export;
pub mod vega;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use chart::{
    ChartSpec, actionable_bar_chart, actionable_scatter_chart, macro_trend_chart,
    micro_profile_chart,
};
pub use export::write_prioritization_parquet;
pub use vega::VegaLiteRenderer;

/// Turns a chart specification into an artifact at `target`
pub trait ChartRenderer {
    /// Render `chart` and return the path that was written
    fn render(&self, chart: &ChartSpec, target: &Path) -> Result<PathBuf>;
}
