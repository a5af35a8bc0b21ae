//! Analysis configuration (immutable blueprints built from `constants`)

use serde::{Deserialize, Serialize};

use crate::config::constants;

/// One row of the base weight table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub name: &'static str,
    pub weight: f64,
    /// A series is flagged when its z-score is at or above this.
    pub flag_threshold: f64,
}

/// Rolling normalisation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZScoreSettings {
    pub window: usize,
    pub min_fraction: f64,
    pub clip: f64,
    pub min_std: f64,
}

impl ZScoreSettings {
    /// Minimum populated observations in the trailing window: `ceil(window * min_fraction)`,
    /// never fewer than two so that a sample std exists.
    pub fn min_observations(&self) -> usize {
        ((self.window as f64 * self.min_fraction).ceil() as usize).max(2)
    }
}

/// Thresholds for the ordered regime rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RegimeRules {
    pub alert_composite: f64,
    pub alert_broad_composite: f64,
    pub warning_composite: f64,
    pub warning_broad_composite: f64,
    pub watch_composite: f64,
    pub watch_partial_composite: f64,
    pub broad_flag_ratio: f64,
    pub partial_flag_ratio: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReportSettings {
    pub max_recent_alerts: usize,
    pub history_rows: usize,
    pub statistics_rows: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PatternSettings {
    pub min_candles_for_report: usize,
    pub fx_markers: &'static [&'static str],
}

pub const ZSCORE: ZScoreSettings = ZScoreSettings {
    window: constants::zscore::WINDOW,
    min_fraction: constants::zscore::MIN_FRACTION,
    clip: constants::zscore::CLIP,
    min_std: constants::zscore::MIN_STD,
};

pub const REGIME: RegimeRules = RegimeRules {
    alert_composite: constants::regime::ALERT_COMPOSITE,
    alert_broad_composite: constants::regime::ALERT_BROAD_COMPOSITE,
    warning_composite: constants::regime::WARNING_COMPOSITE,
    warning_broad_composite: constants::regime::WARNING_BROAD_COMPOSITE,
    watch_composite: constants::regime::WATCH_COMPOSITE,
    watch_partial_composite: constants::regime::WATCH_PARTIAL_COMPOSITE,
    broad_flag_ratio: constants::regime::BROAD_FLAG_RATIO,
    partial_flag_ratio: constants::regime::PARTIAL_FLAG_RATIO,
};

pub const REPORT: ReportSettings = ReportSettings {
    max_recent_alerts: constants::report::MAX_RECENT_ALERTS,
    history_rows: constants::report::HISTORY_ROWS,
    statistics_rows: constants::report::STATISTICS_ROWS,
};

pub const PATTERN: PatternSettings = PatternSettings {
    min_candles_for_report: constants::pattern::MIN_CANDLES_FOR_REPORT,
    fx_markers: constants::pattern::FX_MARKERS,
};
