use {
    crate::{config::PATTERN, error::AnalysisError},
    serde::{Deserialize, Serialize},
};

/// Decimal places prices are rounded to before labelling.
/// FX-like instruments quote to 5 places, everything else to 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DecimalPrecision {
    #[default]
    Two,
    Five,
}

impl DecimalPrecision {
    pub fn places(self) -> u32 {
        match self {
            Self::Two => 2,
            Self::Five => 5,
        }
    }

    /// Picks the precision from the instrument symbol (`EURUSD=X` -> 5, `AAPL` -> 2).
    /// Markers are matched case-sensitively against the symbol as quoted.
    pub fn for_symbol(symbol: &str) -> Self {
        if PATTERN
            .fx_markers
            .iter()
            .any(|marker| symbol.contains(marker))
        {
            Self::Five
        } else {
            Self::Two
        }
    }
}

impl TryFrom<u32> for DecimalPrecision {
    type Error = AnalysisError;

    fn try_from(places: u32) -> Result<Self, Self::Error> {
        match places {
            2 => Ok(Self::Two),
            5 => Ok(Self::Five),
            other => Err(AnalysisError::InvalidPrecision(other)),
        }
    }
}

impl std::fmt::Display for DecimalPrecision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} dp", self.places())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fx_symbols_get_five_places() {
        assert_eq!(DecimalPrecision::for_symbol("EURUSD=X"), DecimalPrecision::Five);
        assert_eq!(DecimalPrecision::for_symbol("GBPUSD"), DecimalPrecision::Five);
        assert_eq!(DecimalPrecision::for_symbol("usdjpy"), DecimalPrecision::Two);
        assert_eq!(DecimalPrecision::for_symbol("AAPL"), DecimalPrecision::Two);
        assert_eq!(DecimalPrecision::for_symbol("^GSPC"), DecimalPrecision::Two);
    }

    #[test]
    fn only_two_or_five_accepted() {
        assert_eq!(DecimalPrecision::try_from(5), Ok(DecimalPrecision::Five));
        assert_eq!(
            DecimalPrecision::try_from(3),
            Err(AnalysisError::InvalidPrecision(3))
        );
    }
}
