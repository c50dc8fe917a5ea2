//! Metric names for timing events.
//!
//! Emitted as `metric = <name>, value = <n>` so log queries can filter on
//! one stable field.

/// Fitness: ranking wall time in microseconds.
pub const RANK_TIME_US: &str = "rank_time_us";

/// Classification: full run wall time in milliseconds.
pub const CLASSIFY_TIME_MS: &str = "classify_time_ms";
