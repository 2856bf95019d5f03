//! Logging utilities for pipeline progress

pub mod log;

pub use self::log::{log_dropped, log_operation_complete, log_operation_start};
