//! Configuration module for the analysis engines.

mod analysis;
mod debug;
mod settings;
mod types;

pub mod constants;

pub use analysis::{
    PATTERN, PatternSettings, REGIME, REPORT, RegimeRules, ReportSettings, SeriesSpec, ZSCORE,
    ZScoreSettings,
};
pub use debug::LOG_PERFORMANCE;
pub use settings::RegimeSettings;
pub use types::{Percent, ZScore};

pub(crate) use settings::{flag_threshold_for, validate_weights};
