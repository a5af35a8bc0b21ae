//! Debugging feature flags.

/// Activate the `trace_time!` macro (scope-level timing of the hot loops).
pub const LOG_PERFORMANCE: bool = cfg!(debug_assertions);
