use {
    crate::{error::AnalysisError, utils::round_to_places},
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

/// Direction of a single bar, decided from open vs close.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum CandleLabel {
    Bullish,
    Bearish,
    Doji,
}

impl CandleLabel {
    /// Close above open is Bullish, below is Bearish, equal is Doji.
    /// Pass values that have already been rounded to the instrument precision.
    pub fn classify(open: f64, close: f64) -> Self {
        if close > open {
            CandleLabel::Bullish
        } else if close < open {
            CandleLabel::Bearish
        } else {
            CandleLabel::Doji
        }
    }

    pub fn parse(text: &str) -> Result<Self, AnalysisError> {
        text.trim()
            .parse()
            .map_err(|_| AnalysisError::UnknownLabel(text.trim().to_string()))
    }

    /// Parses a comma separated pattern such as `"Bullish,Bearish,Doji"`.
    /// Blank input yields an empty pattern.
    pub fn parse_pattern(text: &str) -> Result<Vec<Self>, AnalysisError> {
        text.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Self::parse)
            .collect()
    }
}

/// One OHLC bar. Timestamps are epoch milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Candle {
            timestamp_ms,
            open,
            high,
            low,
            close,
        }
    }

    /// Copy with every price rounded to `places` decimals.
    pub fn rounded(&self, places: u32) -> Self {
        Candle {
            timestamp_ms: self.timestamp_ms,
            open: round_to_places(self.open, places),
            high: round_to_places(self.high, places),
            low: round_to_places(self.low, places),
            close: round_to_places(self.close, places),
        }
    }

    pub fn label(&self) -> CandleLabel {
        CandleLabel::classify(self.open, self.close)
    }
}
