//! Property-based checks of the engine invariants.
//!
//! Invariants covered:
//! 1. Matcher: every reported end index covers an exact copy of the pattern
//!    with a following bar, and no such window is missed.
//! 2. Outcomes: next_bullish + next_bearish == total_matches.
//! 3. Z-scores: always inside [-3, +3], undefined wherever the input is.
//! 4. Composite: inside [min, max] of the available weighted z-scores.
//! 5. Regime: never less severe as the composite rises (flags fixed).

use std::collections::BTreeMap;

use atlas_terminal::{
    Candle, CandleLabel, DecimalPrecision,
    analysis::{classify_regime, composite, find_matches, rolling_zscore_values},
    compute_pattern_probability,
    config::{ZSCORE, ZScore, ZScoreSettings},
};
use proptest::prelude::*;

const DAY_MS: i64 = 86_400_000;

fn label(code: u8) -> CandleLabel {
    match code % 3 {
        0 => CandleLabel::Bullish,
        1 => CandleLabel::Bearish,
        _ => CandleLabel::Doji,
    }
}

fn labels_strategy(max_len: usize) -> impl Strategy<Value = Vec<CandleLabel>> {
    prop::collection::vec((0u8..3).prop_map(label), 0..max_len)
}

fn pattern_strategy() -> impl Strategy<Value = Vec<CandleLabel>> {
    prop::collection::vec((0u8..3).prop_map(label), 1..4)
}

fn candles_for(labels: &[CandleLabel]) -> Vec<Candle> {
    labels
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let (open, close) = match l {
                CandleLabel::Bullish => (100.0, 101.0),
                CandleLabel::Bearish => (101.0, 100.0),
                CandleLabel::Doji => (100.0, 100.0),
            };
            Candle::new(i as i64 * DAY_MS, open, 101.5, 99.5, close)
        })
        .collect()
}

fn short_window() -> ZScoreSettings {
    ZScoreSettings {
        window: 20,
        ..ZSCORE
    }
}

proptest! {
    #[test]
    fn matcher_reports_exactly_the_covered_windows(
        labels in labels_strategy(60),
        pattern in pattern_strategy(),
    ) {
        let plen = pattern.len();
        let ends = find_matches(&labels, &pattern);

        for &end in &ends {
            prop_assert!(end + 1 < labels.len(), "match at {} has no next bar", end);
            prop_assert_eq!(&labels[end + 1 - plen..=end], pattern.as_slice());
        }

        let expected: Vec<usize> = (0..labels.len().saturating_sub(plen))
            .filter(|&i| labels[i..i + plen] == *pattern)
            .map(|i| i + plen - 1)
            .collect();
        prop_assert_eq!(ends, expected);
    }

    #[test]
    fn outcome_buckets_partition_the_matches(
        labels in labels_strategy(80),
        pattern in pattern_strategy(),
    ) {
        let result = compute_pattern_probability(
            &candles_for(&labels),
            &pattern,
            DecimalPrecision::Two,
        );

        prop_assert_eq!(result.next_bullish + result.next_bearish, result.total_matches);
        prop_assert_eq!(result.match_details.len(), result.total_matches);
        prop_assert_eq!(result.total_matches, find_matches(&labels, &pattern).len());

        let sum = result.bullish_probability.value() + result.bearish_probability.value();
        if result.total_matches == 0 {
            prop_assert_eq!(sum, 0.0);
        } else {
            prop_assert!((sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zscores_stay_clipped(
        values in prop::collection::vec(prop::option::of(-1.0e6f64..1.0e6), 0..120),
    ) {
        let z = rolling_zscore_values(&values, &short_window());

        prop_assert_eq!(z.len(), values.len());
        for (input, score) in values.iter().zip(&z) {
            if input.is_none() {
                prop_assert!(score.is_none());
            }
            if let Some(s) = score {
                prop_assert!(s.value().is_finite());
                prop_assert!((-3.0..=3.0).contains(&s.value()), "z = {}", s.value());
            }
        }
    }

    #[test]
    fn composite_is_a_convex_blend(
        inputs in prop::collection::vec(
            (prop::option::of(-3.0f64..=3.0), 0.01f64..10.0),
            1..6,
        ),
    ) {
        let names: Vec<String> = (0..inputs.len()).map(|i| format!("S{i}")).collect();
        let zrow: BTreeMap<&str, Option<ZScore>> = names
            .iter()
            .zip(&inputs)
            .map(|(name, (z, _))| (name.as_str(), z.map(ZScore::new)))
            .collect();
        let weights: BTreeMap<String, f64> = names
            .iter()
            .zip(&inputs)
            .map(|(name, (_, w))| (name.clone(), *w))
            .collect();

        let available: Vec<f64> = inputs.iter().filter_map(|(z, _)| *z).collect();
        match composite(&zrow, &weights) {
            None => prop_assert!(available.is_empty()),
            Some(c) => {
                let lo = available.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = available.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(c >= lo - 1e-9 && c <= hi + 1e-9, "{} outside [{}, {}]", c, lo, hi);
            }
        }
    }

    #[test]
    fn regime_is_monotone_in_composite(
        a in -3.0f64..=3.0,
        b in -3.0f64..=3.0,
        available in 1usize..8,
        flagged_share in 0.0f64..=1.0,
    ) {
        let flagged = (available as f64 * flagged_share).floor() as usize;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            classify_regime(low, flagged, available) <= classify_regime(high, flagged, available)
        );
    }
}
