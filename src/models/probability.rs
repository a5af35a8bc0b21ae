use {
    crate::{
        config::Percent,
        domain::{CandleLabel, DecimalPrecision},
        models::LabelCounts,
        utils::epoch_ms_to_date_string,
    },
    serde::{Deserialize, Serialize},
};

/// One occurrence of the pattern that has a following bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// Index of the pattern's last bar.
    pub end_index: usize,
    /// The literal label of the following bar (Doji is kept as Doji here).
    pub next_label: CandleLabel,
    /// Timestamps of the matched window, oldest first.
    pub pattern_dates: Vec<i64>,
    pub next_date: i64,
}

impl PatternMatch {
    pub fn pattern_date_strings(&self) -> Vec<String> {
        self.pattern_dates
            .iter()
            .map(|&ts| epoch_ms_to_date_string(ts))
            .collect()
    }

    pub fn next_date_string(&self) -> String {
        epoch_ms_to_date_string(self.next_date)
    }
}

/// Next-bar outcome statistics for a pattern.
///
/// `next_bearish` counts every outcome that is not Bullish, Doji included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProbabilityResult {
    pub total_matches: usize,
    pub next_bullish: usize,
    pub next_bearish: usize,
    pub bullish_probability: Percent,
    pub bearish_probability: Percent,
    pub match_details: Vec<PatternMatch>,
}

impl ProbabilityResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// (bullish, bearish) rounded to two decimals for display.
    pub fn rounded_probabilities(&self) -> (f64, f64) {
        (
            self.bullish_probability.rounded(),
            self.bearish_probability.rounded(),
        )
    }
}

/// Shape of the input series a pattern was evaluated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub total_candles: usize,
    pub first_timestamp_ms: Option<i64>,
    pub last_timestamp_ms: Option<i64>,
    pub label_counts: LabelCounts,
}

/// Probability result together with what it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub symbol: String,
    pub pattern: Vec<CandleLabel>,
    pub precision: DecimalPrecision,
    pub result: ProbabilityResult,
    pub summary: SeriesSummary,
}
