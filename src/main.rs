use std::path::Path;

use anyhow::Context;
use log::info;
use mhgap::AnalysisConfig;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let base_dir = std::env::current_dir().context("Failed to resolve working directory")?;

    let config = match std::env::args().nth(1) {
        Some(path) => AnalysisConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => AnalysisConfig::default(),
    }
    .rooted_at(&base_dir);

    let summary = mhgap::run(&config).context("Analysis run failed")?;

    info!(
        "Actionable year {}: {} locations prioritized",
        summary.actionable_year, summary.prioritized_locations
    );
    for (rank, location) in summary.shortlist.iter().enumerate() {
        info!("  {:>2}. {location}", rank + 1);
    }
    if !summary.critical.is_empty() {
        info!("High need, low capacity: {}", summary.critical.join(", "));
    }
    for artifact in &summary.artifacts {
        info!("Wrote {}", artifact.display());
    }

    Ok(())
}
