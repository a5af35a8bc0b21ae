use crate::domain::CandleLabel;

/// End indices of every occurrence of `pattern` in `labels`, ascending.
///
/// Overlapping occurrences are all reported. Starts are limited so the
/// pattern never covers the final bar, and a series shorter than
/// `pattern.len() + 1` yields nothing. An empty pattern never matches.
pub fn find_matches(labels: &[CandleLabel], pattern: &[CandleLabel]) -> Vec<usize> {
    let plen = pattern.len();
    if plen == 0 || labels.len() < plen + 1 {
        return Vec::new();
    }

    (0..labels.len() - plen)
        .filter(|&i| labels[i..i + plen] == *pattern)
        .map(|i| i + plen - 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use CandleLabel::{Bearish as Be, Bullish as Bu, Doji as Dj};

    #[test]
    fn final_window_is_never_scanned() {
        let labels = [Bu, Be, Bu, Bu, Be];
        assert_eq!(find_matches(&labels, &[Bu, Be]), vec![1]);
    }

    #[test]
    fn overlapping_matches_are_reported() {
        let labels = [Dj, Dj, Dj, Dj, Dj];
        assert_eq!(find_matches(&labels, &[Dj, Dj]), vec![1, 2, 3]);
    }

    #[test]
    fn pattern_one_shorter_than_series() {
        // Exactly one start index exists.
        assert_eq!(find_matches(&[Bu, Be, Bu], &[Bu, Be]), vec![1]);
        // The only window that would match ends on the final bar.
        assert!(find_matches(&[Be, Bu, Be], &[Bu, Be]).is_empty());
    }

    #[test]
    fn degenerate_inputs_match_nothing() {
        assert!(find_matches(&[], &[Bu]).is_empty());
        assert!(find_matches(&[Bu, Be], &[]).is_empty());
        assert!(find_matches(&[Bu, Be], &[Bu, Be]).is_empty());
    }

    #[test]
    fn every_match_equals_the_pattern() {
        let labels = [Bu, Be, Dj, Bu, Be, Dj, Bu, Be, Bu, Bu];
        let pattern = [Bu, Be];
        for end in find_matches(&labels, &pattern) {
            let start = end + 1 - pattern.len();
            assert_eq!(&labels[start..=end], &pattern);
        }
    }
}
