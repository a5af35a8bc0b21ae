//! Numeric newtypes shared by the analysis modules.

use serde::{Deserialize, Serialize};

use crate::config::constants;

/// A standardised score, clipped to `[-CLIP, +CLIP]` on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ZScore(f64);

impl ZScore {
    pub const CLIP: f64 = constants::zscore::CLIP;

    pub fn new(val: f64) -> Self {
        Self(val.clamp(-Self::CLIP, Self::CLIP))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for ZScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.2}σ", self.0)
    }
}

/// A percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    pub const ZERO: Self = Self(0.0);

    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 {
            0.0
        } else if val > 100.0 {
            100.0
        } else {
            val
        };
        Self(v)
    }

    /// `part / whole * 100`, or zero when `whole` is zero.
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            Self::ZERO
        } else {
            Self::new(part as f64 / whole as f64 * 100.0)
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Rounded to two decimals for display.
    pub fn rounded(self) -> f64 {
        crate::utils::round_to_places(self.0, 2)
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zscore_clips_both_tails() {
        assert_eq!(ZScore::new(7.5).value(), 3.0);
        assert_eq!(ZScore::new(-4.0).value(), -3.0);
        assert_eq!(ZScore::new(1.25).value(), 1.25);
    }

    #[test]
    fn percent_of_zero_whole_is_zero() {
        assert_eq!(Percent::of(0, 0), Percent::ZERO);
        assert!((Percent::of(1, 3).value() - 33.333_333_333).abs() < 1e-6);
        assert_eq!(Percent::of(1, 3).rounded(), 33.33);
    }
}
