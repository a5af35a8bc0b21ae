use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    config::{ZScore, ZScoreSettings},
    models::{SeriesFrame, ZScoreFrame},
    trace_time,
    utils::{clip, mean_and_sample_stddev},
};

/// Trailing-window z-score at every position of `series`.
///
/// A point is defined only when its own value is present, at least
/// `settings.min_observations()` of the trailing `window` positions are
/// populated, and the sample std of those values exceeds `settings.min_std`.
pub fn rolling_zscore<T: Copy>(
    series: &[(T, Option<f64>)],
    settings: &ZScoreSettings,
) -> Vec<(T, Option<ZScore>)> {
    let values: Vec<Option<f64>> = series.iter().map(|(_, v)| *v).collect();
    let scores = rolling_zscore_values(&values, settings);
    series.iter().map(|(t, _)| *t).zip(scores).collect()
}

/// Same as [`rolling_zscore`] over a bare column.
pub fn rolling_zscore_values(values: &[Option<f64>], settings: &ZScoreSettings) -> Vec<Option<ZScore>> {
    let window = settings.window.max(1);
    let min_obs = settings.min_observations();
    let mut buffer: Vec<f64> = Vec::with_capacity(window);

    (0..values.len())
        .map(|t| {
            let current = values[t]?;
            let start = (t + 1).saturating_sub(window);
            buffer.clear();
            buffer.extend(values[start..=t].iter().flatten().copied());
            if buffer.len() < min_obs {
                return None;
            }

            let (mean, std) = mean_and_sample_stddev(&buffer)?;
            if std <= settings.min_std {
                return None;
            }
            let z = clip((current - mean) / std, -settings.clip, settings.clip);
            Some(ZScore::new(z))
        })
        .collect()
}

/// Normalises every column of `frame` independently (in parallel).
pub fn zscore_frame(frame: &SeriesFrame, settings: &ZScoreSettings) -> ZScoreFrame {
    let columns: BTreeMap<String, Vec<Option<ZScore>>> = trace_time!("Rolling z-scores", 50_000, {
        frame
            .columns
            .par_iter()
            .map(|(name, values)| (name.clone(), rolling_zscore_values(values, settings)))
            .collect()
    });

    ZScoreFrame {
        dates: frame.dates.clone(),
        columns,
    }
}
