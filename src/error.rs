//! Typed failures of the analytical core.

use thiserror::Error;

/// Errors surfaced by the pattern and regime engines.
///
/// Recoverable conditions (zero pattern matches, a degenerate rolling std,
/// a series missing on one day) never appear here: they are carried as
/// empty results or `None` values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: {available} candles available (minimum: {required})")]
    InsufficientCandles { available: usize, required: usize },

    #[error(
        "No usable data: no macro series has {min_observations} observations within a {window}-observation window"
    )]
    NoUsableData {
        window: usize,
        min_observations: usize,
    },

    #[error("Invalid weight {weight} for series {name} (must be positive and finite)")]
    InvalidWeight { name: String, weight: f64 },

    #[error("Invalid rolling window {window} / min fraction {min_fraction}")]
    InvalidWindow { window: usize, min_fraction: f64 },

    #[error("Unknown candle label '{0}' (expected Bullish, Bearish or Doji)")]
    UnknownLabel(String),

    #[error("Unsupported decimal precision {0} (expected 2 or 5)")]
    InvalidPrecision(u32),
}

impl AnalysisError {
    /// True when the caller supplied too little or malformed input,
    /// as opposed to an internal fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InsufficientCandles { .. }
            | Self::NoUsableData { .. }
            | Self::UnknownLabel(_)
            | Self::InvalidPrecision(_) => true,
            Self::InvalidWeight { .. } | Self::InvalidWindow { .. } => false,
        }
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
