//! Domain models for the need/capacity analysis
//!
//! Observations (prevalence), capacity records (psychiatrists per 100k) and
//! the records produced by joining the two.

pub mod capacity;
pub mod joined;
pub mod observation;
pub mod types;

// Re-export commonly used types
pub use capacity::CapacityRecord;
pub use joined::JoinedRecord;
pub use observation::Observation;
pub use types::{AgeBand, Sex};
