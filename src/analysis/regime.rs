use std::collections::BTreeMap;

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{
    analysis::{
        composite::{composite, effective_weights},
        zscore::zscore_frame,
    },
    config::{
        REGIME, REPORT, RegimeRules, RegimeSettings, ZSCORE, ZScore, ZScoreSettings,
        flag_threshold_for, validate_weights,
    },
    domain::Regime,
    error::{AnalysisError, AnalysisResult},
    models::{
        ComponentReading, CompositeStats, RawSeries, RegimeAnalysis, RegimePoint,
        RegimeStatistics, SeriesFrame, TransitionAlert, ZScoreFrame,
    },
    utils::{mean_and_sample_stddev, min_max},
};

/// Share of available inputs that are flagged. Zero available counts as one.
pub fn flag_ratio(flagged_count: usize, available_count: usize) -> f64 {
    flagged_count as f64 / available_count.max(1) as f64
}

pub fn is_flagged(z: ZScore, threshold: f64) -> bool {
    z.value() >= threshold
}

/// Regime for a composite score and flag counts under the standard rules.
pub fn classify_regime(composite: f64, flagged_count: usize, available_count: usize) -> Regime {
    classify_with_rules(
        &REGIME,
        composite,
        flag_ratio(flagged_count, available_count),
    )
}

/// Rules are evaluated top to bottom; the first that holds wins.
pub fn classify_with_rules(rules: &RegimeRules, composite: f64, ratio: f64) -> Regime {
    let broad = ratio >= rules.broad_flag_ratio;
    let partial = ratio >= rules.partial_flag_ratio;

    if composite >= rules.alert_composite {
        Regime::Alert
    } else if composite >= rules.alert_broad_composite && broad {
        Regime::Alert
    } else if composite >= rules.warning_composite {
        Regime::Warning
    } else if broad && composite >= rules.warning_broad_composite {
        Regime::Warning
    } else if composite >= rules.watch_composite {
        Regime::Watch
    } else if partial && composite >= rules.watch_partial_composite {
        Regime::Watch
    } else {
        Regime::Calm
    }
}

/// Every entry into a non-CALM regime, oldest first.
/// The first row has no predecessor and never alerts.
pub fn detect_transitions(points: &[RegimePoint]) -> Vec<TransitionAlert> {
    points
        .iter()
        .tuple_windows()
        .filter(|(prev, cur)| cur.regime != prev.regime && cur.regime.is_alerting())
        .map(|(prev, cur)| TransitionAlert {
            date: cur.date,
            regime: cur.regime,
            previous: prev.regime,
            composite: cur.composite,
        })
        .collect()
}

/// The last `cap` alerts, most recent first.
pub fn recent_alerts(transitions: &[TransitionAlert], cap: usize) -> Vec<TransitionAlert> {
    transitions.iter().rev().take(cap).cloned().collect()
}

/// Regime analysis with the standard normalisation window.
pub fn compute_regime_analysis(
    series_frame: &BTreeMap<String, RawSeries>,
    weights: &BTreeMap<String, f64>,
    flag_thresholds: &BTreeMap<String, f64>,
) -> AnalysisResult<RegimeAnalysis> {
    run_analysis(series_frame, weights, flag_thresholds, &ZSCORE)
}

/// Regime analysis driven by user settings.
pub fn analyze_regime(
    series_frame: &BTreeMap<String, RawSeries>,
    settings: &RegimeSettings,
) -> AnalysisResult<RegimeAnalysis> {
    settings.validate()?;
    run_analysis(
        series_frame,
        &settings.weights,
        &settings.flag_thresholds,
        &settings.zscore_settings(),
    )
}

struct ScoredRow {
    idx: usize,
    point: RegimePoint,
}

fn run_analysis(
    raw: &BTreeMap<String, RawSeries>,
    weights: &BTreeMap<String, f64>,
    flag_thresholds: &BTreeMap<String, f64>,
    zsettings: &ZScoreSettings,
) -> AnalysisResult<RegimeAnalysis> {
    validate_weights(weights)?;
    let no_usable_data = || AnalysisError::NoUsableData {
        window: zsettings.window,
        min_observations: zsettings.min_observations(),
    };

    let frame = SeriesFrame::align(raw);
    let zframe = zscore_frame(&frame, zsettings);

    let rows: Vec<ScoredRow> = (0..zframe.len())
        .filter_map(|idx| score_row(&zframe, idx, weights, flag_thresholds))
        .collect();

    let Some(last) = rows.last() else {
        log::warn!(
            "No usable macro data: {} series over {} days, none with enough history",
            frame.columns.len(),
            frame.len()
        );
        return Err(no_usable_data());
    };

    let last_idx = last.idx;
    let current = last.point.clone();
    let points: Vec<RegimePoint> = rows.into_iter().map(|r| r.point).collect();

    let per_series_components =
        component_readings(&frame, &zframe, last_idx, weights, flag_thresholds);
    let transitions = detect_transitions(&points);
    let transition_alerts = recent_alerts(&transitions, REPORT.max_recent_alerts);
    let statistics = regime_statistics(tail(&points, REPORT.statistics_rows));
    let historical_series = tail(&points, REPORT.history_rows).to_vec();

    log::info!(
        "Regime {} as of {} (composite {:.2}, {}/{} flagged, {} transitions)",
        current.regime,
        current.date,
        current.composite,
        current.flagged_count,
        current.available_count,
        transitions.len()
    );

    Ok(RegimeAnalysis {
        as_of: current.date,
        current_regime: current.regime,
        current_composite: current.composite,
        flagged_count: current.flagged_count,
        available_count: current.available_count,
        per_series_components,
        transition_alerts,
        historical_series,
        statistics,
    })
}

fn score_row(
    zframe: &ZScoreFrame,
    idx: usize,
    weights: &BTreeMap<String, f64>,
    flag_thresholds: &BTreeMap<String, f64>,
) -> Option<ScoredRow> {
    let zrow = zframe.row(idx);
    let composite = composite(&zrow, weights)?;

    let available: Vec<(&str, ZScore)> = weights
        .keys()
        .filter_map(|name| {
            let z = zrow.get(name.as_str()).copied().flatten()?;
            Some((name.as_str(), z))
        })
        .collect();
    let flagged_count = available
        .iter()
        .filter(|(name, z)| is_flagged(*z, flag_threshold_for(flag_thresholds, name)))
        .count();
    let available_count = available.len();

    Some(ScoredRow {
        idx,
        point: RegimePoint {
            date: zframe.dates[idx],
            composite,
            regime: classify_regime(composite, flagged_count, available_count),
            flagged_count,
            available_count,
        },
    })
}

fn component_readings(
    frame: &SeriesFrame,
    zframe: &ZScoreFrame,
    idx: usize,
    weights: &BTreeMap<String, f64>,
    flag_thresholds: &BTreeMap<String, f64>,
) -> Vec<ComponentReading> {
    let zrow = zframe.row(idx);
    let shares = effective_weights(&zrow, weights);

    weights
        .iter()
        .map(|(name, &base_weight)| {
            let zscore = zrow.get(name.as_str()).copied().flatten();
            let flag_threshold = flag_threshold_for(flag_thresholds, name);
            ComponentReading {
                name: name.clone(),
                value: frame
                    .column(name)
                    .and_then(|col| col.get(idx).copied().flatten()),
                zscore,
                base_weight,
                effective_weight: shares.get(name.as_str()).copied().unwrap_or(0.0),
                flag_threshold,
                flagged: zscore.is_some_and(|z| is_flagged(z, flag_threshold)),
                last_observed: frame.last_observed.get(name).copied(),
            }
        })
        .collect()
}

fn regime_statistics(points: &[RegimePoint]) -> RegimeStatistics {
    let mut distribution: BTreeMap<Regime, usize> = Regime::iter().map(|r| (r, 0)).collect();
    for p in points {
        *distribution.entry(p.regime).or_default() += 1;
    }

    let composites: Vec<f64> = points.iter().map(|p| p.composite).collect();
    let composite = min_max(&composites).map(|(min, max)| {
        let (mean, std) = match mean_and_sample_stddev(&composites) {
            Some((mean, std)) => (mean, Some(std)),
            None => (composites.iter().sum::<f64>() / composites.len() as f64, None),
        };
        CompositeStats {
            mean,
            std,
            max,
            min,
        }
    });

    RegimeStatistics {
        distribution,
        total_rows: points.len(),
        composite,
        thresholds: Regime::iter()
            .filter_map(|r| r.entry_threshold().map(|t| (r, t)))
            .collect(),
    }
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn point(day: u32, regime: Regime) -> RegimePoint {
        RegimePoint {
            date: d(day),
            composite: 0.0,
            regime,
            flagged_count: 0,
            available_count: 1,
        }
    }

    #[test]
    fn strong_composite_alerts_alone() {
        assert_eq!(classify_regime(2.6, 0, 1), Regime::Alert);
        assert_eq!(classify_regime(2.5, 0, 5), Regime::Alert);
    }

    #[test]
    fn broad_flags_promote() {
        assert_eq!(classify_regime(2.1, 3, 4), Regime::Alert);
        assert_eq!(classify_regime(2.1, 2, 4), Regime::Warning);
        assert_eq!(classify_regime(1.3, 3, 4), Regime::Warning);
        assert_eq!(classify_regime(0.6, 3, 5), Regime::Watch);
        assert_eq!(classify_regime(0.6, 2, 5), Regime::Calm);
    }

    #[test]
    fn warning_ignores_flags_above_threshold() {
        assert_eq!(classify_with_rules(&REGIME, 1.8, 0.5), Regime::Warning);
    }

    #[test]
    fn rule_order_is_respected() {
        // Misses the broad WARNING gate (1.2 < 1.25), falls through to plain WATCH.
        assert_eq!(classify_with_rules(&REGIME, 1.2, 0.8), Regime::Watch);
        assert_eq!(classify_with_rules(&REGIME, 0.9, 0.8), Regime::Watch);
        assert_eq!(classify_with_rules(&REGIME, 0.4, 1.0), Regime::Calm);
    }

    #[test]
    fn zero_available_does_not_divide_by_zero() {
        assert_eq!(flag_ratio(0, 0), 0.0);
        assert_eq!(classify_regime(0.2, 0, 0), Regime::Calm);
    }

    #[test]
    fn only_entries_into_stress_alert() {
        let points = vec![
            point(1, Regime::Watch),
            point(2, Regime::Watch),
            point(3, Regime::Warning),
            point(4, Regime::Calm),
            point(5, Regime::Watch),
        ];
        let alerts = detect_transitions(&points);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].regime, Regime::Warning);
        assert_eq!(alerts[0].previous, Regime::Watch);
        assert_eq!(alerts[1].date, d(5));

        let recent = recent_alerts(&alerts, 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].date, d(5));
    }

    #[test]
    fn statistics_cover_every_regime() {
        let mut points = vec![point(1, Regime::Calm), point(2, Regime::Alert)];
        points[0].composite = -1.0;
        points[1].composite = 3.0;
        let stats = regime_statistics(&points);

        assert_eq!(stats.distribution.len(), 4);
        assert_eq!(stats.distribution[&Regime::Watch], 0);
        assert_eq!(stats.distribution[&Regime::Alert], 1);
        assert_eq!(stats.total_rows, 2);
        let c = stats.composite.unwrap();
        assert_eq!((c.min, c.max, c.mean), (-1.0, 3.0, 1.0));
        assert!(c.std.is_some());
        assert_eq!(stats.thresholds[&Regime::Warning], 1.75);
        assert!(!stats.thresholds.contains_key(&Regime::Calm));
    }

    #[test]
    fn single_row_has_no_std() {
        let stats = regime_statistics(&[point(1, Regime::Calm)]);
        let c = stats.composite.unwrap();
        assert_eq!(c.std, None);
        assert_eq!(c.mean, 0.0);
    }

    #[test]
    fn bad_weights_are_rejected() {
        let raw = BTreeMap::new();
        let weights = BTreeMap::from([("A".to_string(), -1.0)]);
        let err = compute_regime_analysis(&raw, &weights, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidWeight { .. }));
    }

    #[test]
    fn empty_frame_has_no_usable_data() {
        let weights = BTreeMap::from([("A".to_string(), 1.0)]);
        let err = compute_regime_analysis(&BTreeMap::new(), &weights, &BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::NoUsableData {
                window: 252,
                min_observations: 202
            }
        );
    }
}
