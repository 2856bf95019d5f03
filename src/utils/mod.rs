//! Shared utilities

pub mod logging;

pub use logging::{log_dropped, log_operation_complete, log_operation_start};
