//! Analysis algorithms
//!
//! Unit normalization, actionable year selection, need/capacity
//! prioritization and the trend/profile builders feeding the charts.

pub mod normalize;
pub mod prioritize;
pub mod reconcile;
pub mod statistics;
pub mod trends;

pub use normalize::{normalize_collection, normalize_units};
pub use prioritize::{Prioritization, prioritize, priority_index};
pub use reconcile::select_actionable_year;
pub use statistics::percentile;
pub use trends::{MacroSeries, MicroProfile, macro_trends, micro_profiles};
