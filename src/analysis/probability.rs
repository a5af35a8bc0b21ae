use crate::{
    analysis::pattern_matcher::find_matches,
    config::{PATTERN, Percent},
    domain::{Candle, CandleLabel, DecimalPrecision},
    error::{AnalysisError, AnalysisResult},
    models::{LabeledSeries, PatternMatch, PatternReport, ProbabilityResult, SeriesSummary},
    trace_time,
};

/// Next-bar statistics for every occurrence of `pattern` in `series`.
///
/// Only the literal Bullish outcome counts as bullish; Bearish and Doji both
/// land in `next_bearish`. `match_details` keeps the literal label.
pub fn calculate(series: &LabeledSeries, pattern: &[CandleLabel]) -> ProbabilityResult {
    let labels = series.labels();

    let ends = trace_time!("Pattern scan", 2_000, { find_matches(labels, pattern) });
    if ends.is_empty() {
        return ProbabilityResult::empty();
    }

    let match_details: Vec<PatternMatch> = ends
        .into_iter()
        .filter(|&end| end + 1 < labels.len())
        .map(|end| PatternMatch {
            end_index: end,
            next_label: labels[end + 1],
            pattern_dates: series.timestamps[end + 1 - pattern.len()..=end].to_vec(),
            next_date: series.timestamps[end + 1],
        })
        .collect();

    let total_matches = match_details.len();
    let next_bullish = match_details
        .iter()
        .filter(|m| m.next_label == CandleLabel::Bullish)
        .count();
    let next_bearish = total_matches - next_bullish;

    ProbabilityResult {
        total_matches,
        next_bullish,
        next_bearish,
        bullish_probability: Percent::of(next_bullish, total_matches),
        bearish_probability: Percent::of(next_bearish, total_matches),
        match_details,
    }
}

/// Rounds, labels and scans a materialised candle series.
/// Never fails: too little data is simply zero matches.
pub fn compute_pattern_probability(
    candles: &[Candle],
    pattern: &[CandleLabel],
    precision: DecimalPrecision,
) -> ProbabilityResult {
    let series = LabeledSeries::from_candles("", candles, precision);
    calculate(&series, pattern)
}

/// The pattern result plus a description of the series it came from.
/// Refuses series shorter than the report minimum.
pub fn analyze_pattern(
    symbol: &str,
    candles: &[Candle],
    pattern: &[CandleLabel],
    precision: DecimalPrecision,
) -> AnalysisResult<PatternReport> {
    let required = PATTERN.min_candles_for_report;
    if candles.len() < required {
        return Err(AnalysisError::InsufficientCandles {
            available: candles.len(),
            required,
        });
    }

    let series = LabeledSeries::from_candles(symbol, candles, precision);
    let result = calculate(&series, pattern);
    let range = series.time_range();

    log::info!(
        "{}: pattern {:?} matched {} times over {} candles ({})",
        symbol,
        pattern,
        result.total_matches,
        series.len(),
        precision
    );

    Ok(PatternReport {
        symbol: symbol.to_string(),
        pattern: pattern.to_vec(),
        precision,
        summary: SeriesSummary {
            total_candles: series.len(),
            first_timestamp_ms: range.map(|(first, _)| first),
            last_timestamp_ms: range.map(|(_, last)| last),
            label_counts: series.label_counts(),
        },
        result,
    })
}
