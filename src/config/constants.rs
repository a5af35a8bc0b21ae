//! Domain-tuned constants. These values are preserved as given, not derived.

pub mod zscore {
    /// One trading year of observations.
    pub const WINDOW: usize = 252;
    /// Share of the window that must be populated before a z-score is defined.
    pub const MIN_FRACTION: f64 = 0.8;
    pub const CLIP: f64 = 3.0;
    /// Rolling std at or below this is treated as zero (undefined z-score).
    pub const MIN_STD: f64 = 1e-12;
}

pub mod regime {
    use crate::config::SeriesSpec;

    pub const ALERT_COMPOSITE: f64 = 2.5;
    pub const ALERT_BROAD_COMPOSITE: f64 = 2.0;
    pub const WARNING_COMPOSITE: f64 = 1.75;
    pub const WARNING_BROAD_COMPOSITE: f64 = 1.25;
    pub const WATCH_COMPOSITE: f64 = 1.0;
    pub const WATCH_PARTIAL_COMPOSITE: f64 = 0.5;

    pub const BROAD_FLAG_RATIO: f64 = 0.75;
    pub const PARTIAL_FLAG_RATIO: f64 = 0.6;

    pub const STRESS_INDEX_FLAG: f64 = 1.0;
    pub const DEFAULT_FLAG: f64 = 1.5;

    pub const STRESS_INDEX: &str = "STLFSI";

    pub const BASE_SERIES: &[SeriesSpec] = &[
        SeriesSpec {
            name: STRESS_INDEX,
            weight: 0.25,
            flag_threshold: STRESS_INDEX_FLAG,
        },
        SeriesSpec {
            name: "HY_OAS",
            weight: 0.25,
            flag_threshold: DEFAULT_FLAG,
        },
        SeriesSpec {
            name: "VIX",
            weight: 0.20,
            flag_threshold: DEFAULT_FLAG,
        },
        SeriesSpec {
            name: "DGS10",
            weight: 0.15,
            flag_threshold: DEFAULT_FLAG,
        },
        SeriesSpec {
            name: "DXY",
            weight: 0.15,
            flag_threshold: DEFAULT_FLAG,
        },
    ];
}

pub mod report {
    /// Transition alerts surfaced, most recent first.
    pub const MAX_RECENT_ALERTS: usize = 10;
    /// Rows of composite history returned to the caller.
    pub const HISTORY_ROWS: usize = 252;
    /// Rows used for the regime distribution and composite statistics (~12 months).
    pub const STATISTICS_ROWS: usize = 252;
}

pub mod pattern {
    /// Below this many candles a pattern report is refused outright.
    pub const MIN_CANDLES_FOR_REPORT: usize = 10;
    /// Symbol fragments that mark an FX-like instrument quoted to 5 places.
    pub const FX_MARKERS: &[&str] = &["=X", "USD", "EUR", "GBP", "JPY"];
}
