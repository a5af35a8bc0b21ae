use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// Rounds to `places` decimals with ties going to the even neighbour,
/// the same convention quote feeds use when normalising prices.
#[inline]
pub(crate) fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round_ties_even() / factor
}

#[inline]
pub(crate) fn clip(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Mean and sample (n - 1) standard deviation.
/// None for fewer than two points or a non-finite result.
pub(crate) fn mean_and_sample_stddev(data: &[f64]) -> Option<(f64, f64)> {
    if data.len() < 2 {
        return None;
    }
    let mean = data.iter().mean();
    let std = data.iter().std_dev();
    (mean.is_finite() && std.is_finite()).then_some((mean, std))
}

/// (min, max) of a non-empty slice.
pub(crate) fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }
    let (min_idx, max_idx) = data.argminmax();
    Some((data[min_idx], data[max_idx]))
}
