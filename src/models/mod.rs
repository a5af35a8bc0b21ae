mod labeled_series;
mod probability;
mod regime_report;
mod series_frame;

pub use {
    labeled_series::{LabelCounts, LabeledSeries},
    probability::{PatternMatch, PatternReport, ProbabilityResult, SeriesSummary},
    regime_report::{
        ComponentReading, CompositeStats, RegimeAnalysis, RegimePoint, RegimeStatistics,
        TransitionAlert,
    },
    series_frame::{RawSeries, SeriesFrame, ZScoreFrame},
};
