#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the two engine contracts and their inputs/outputs
pub use analysis::{analyze_pattern, analyze_regime, compute_pattern_probability, compute_regime_analysis};
pub use config::RegimeSettings;
pub use domain::{Candle, CandleLabel, DecimalPrecision, Regime};
pub use error::{AnalysisError, AnalysisResult};
pub use models::{PatternReport, ProbabilityResult, RawSeries, RegimeAnalysis};

// CLI argument parsing
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding `candles/` and `macro/`. Repeat to add fallbacks, tried in order.
    #[arg(long = "data-dir", global = true, default_value = "data")]
    pub data_dirs: Vec<PathBuf>,

    /// Per-provider fetch timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Print JSON instead of tables
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Next-candle probabilities after a candle pattern
    Pattern {
        #[arg(long)]
        symbol: String,

        /// Comma separated labels, e.g. `Bullish,Bearish,Doji`
        #[arg(long)]
        pattern: String,

        /// Decimal places (2 or 5). Picked from the symbol when omitted.
        #[arg(long)]
        precision: Option<u32>,

        /// List every match
        #[arg(long, default_value_t = false)]
        details: bool,
    },
    /// Macro stress regime from the configured series
    Regime {
        /// JSON file overriding weights, flag thresholds or the z-score window
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}
