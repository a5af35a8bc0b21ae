use std::collections::BTreeMap;

use crate::config::ZScore;

/// Weights renormalised over the series that have a defined z-score in `zrow`.
/// Empty when none of the weighted series is available.
pub fn effective_weights<'a>(
    zrow: &BTreeMap<&str, Option<ZScore>>,
    weights: &'a BTreeMap<String, f64>,
) -> BTreeMap<&'a str, f64> {
    let available: Vec<(&str, f64)> = weights
        .iter()
        .filter(|(name, _)| matches!(zrow.get(name.as_str()), Some(Some(_))))
        .map(|(name, w)| (name.as_str(), *w))
        .collect();

    let total_w: f64 = available.iter().map(|(_, w)| w).sum();
    if total_w <= 0.0 {
        return BTreeMap::new();
    }
    available
        .into_iter()
        .map(|(name, w)| (name, w / total_w))
        .collect()
}

/// Weighted mean of the available z-scores. `None` if no weighted series
/// has a defined score (the row is dropped).
pub fn composite(
    zrow: &BTreeMap<&str, Option<ZScore>>,
    weights: &BTreeMap<String, f64>,
) -> Option<f64> {
    let shares = effective_weights(zrow, weights);
    if shares.is_empty() {
        return None;
    }
    let score: f64 = shares
        .iter()
        .filter_map(|(name, share)| {
            let z = zrow.get(name).copied().flatten()?;
            Some(z.value() * share)
        })
        .sum();
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(n, w)| (n.to_string(), *w)).collect()
    }

    #[test]
    fn single_series_passes_through() {
        let zrow = BTreeMap::from([("STRESS", Some(ZScore::new(2.6)))]);
        let c = composite(&zrow, &weights(&[("STRESS", 1.0)])).unwrap();
        assert!((c - 2.6).abs() < 1e-12);
    }

    #[test]
    fn missing_inputs_renormalise() {
        let zrow = BTreeMap::from([
            ("A", Some(ZScore::new(2.0))),
            ("B", None),
            ("C", Some(ZScore::new(-1.0))),
        ]);
        let w = weights(&[("A", 0.25), ("B", 0.5), ("C", 0.25), ("D", 1.0)]);
        // Only A and C count, each carrying half.
        let c = composite(&zrow, &w).unwrap();
        assert!((c - 0.5).abs() < 1e-12);

        let shares = effective_weights(&zrow, &w);
        assert_eq!(shares.len(), 2);
        assert!((shares.values().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nothing_available_is_undefined() {
        let zrow = BTreeMap::from([("A", None), ("UNWEIGHTED", Some(ZScore::new(1.0)))]);
        assert_eq!(composite(&zrow, &weights(&[("A", 1.0)])), None);
    }

    #[test]
    fn stays_within_input_bounds() {
        let zrow = BTreeMap::from([
            ("A", Some(ZScore::new(3.0))),
            ("B", Some(ZScore::new(-3.0))),
            ("C", Some(ZScore::new(1.2))),
        ]);
        let c = composite(&zrow, &weights(&[("A", 0.7), ("B", 0.1), ("C", 0.2)])).unwrap();
        assert!((-3.0..=3.0).contains(&c));
    }
}
