use {
    crate::domain::{Candle, CandleLabel, DecimalPrecision},
    serde::{Deserialize, Serialize},
};

/// How many bars of each label a series holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelCounts {
    pub bullish: usize,
    pub bearish: usize,
    pub doji: usize,
}

impl LabelCounts {
    pub fn total(&self) -> usize {
        self.bullish + self.bearish + self.doji
    }
}

/// Rounded OHLC bars with their derived labels, stored column-wise.
/// Immutable once built; each request builds its own.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LabeledSeries {
    pub symbol: String,
    pub precision: DecimalPrecision,

    pub timestamps: Vec<i64>,

    // Prices (already rounded to `precision`)
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    pub labels: Vec<CandleLabel>,
}

impl LabeledSeries {
    /// Rounds every bar to `precision` and labels it from the rounded open/close.
    /// Bars that do not advance strictly in time (out of order or repeated
    /// timestamps) are skipped, so the stored series is always increasing.
    pub fn from_candles(
        symbol: impl Into<String>,
        candles: &[Candle],
        precision: DecimalPrecision,
    ) -> Self {
        let symbol = symbol.into();
        let len = candles.len();
        let places = precision.places();

        let mut ts_vec = Vec::with_capacity(len);
        let mut open_vec = Vec::with_capacity(len);
        let mut high_vec = Vec::with_capacity(len);
        let mut low_vec = Vec::with_capacity(len);
        let mut close_vec = Vec::with_capacity(len);
        let mut label_vec = Vec::with_capacity(len);

        for c in candles.iter().map(|c| c.rounded(places)) {
            if ts_vec.last().is_some_and(|&prev| c.timestamp_ms <= prev) {
                continue;
            }
            ts_vec.push(c.timestamp_ms);
            open_vec.push(c.open);
            high_vec.push(c.high);
            low_vec.push(c.low);
            close_vec.push(c.close);
            label_vec.push(c.label());
        }

        let skipped = len - ts_vec.len();
        if skipped > 0 {
            log::warn!(
                "{}: skipped {} of {} candles not in strictly increasing time order",
                symbol,
                skipped,
                len
            );
        }

        Self {
            symbol,
            precision,
            timestamps: ts_vec,
            open_prices: open_vec,
            high_prices: high_vec,
            low_prices: low_vec,
            close_prices: close_vec,
            labels: label_vec,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[CandleLabel] {
        &self.labels
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.timestamps[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
        )
    }

    /// First and last timestamp, if any bars exist.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }

    pub fn label_counts(&self) -> LabelCounts {
        self.labels
            .iter()
            .fold(LabelCounts::default(), |mut counts, label| {
                match label {
                    CandleLabel::Bullish => counts.bullish += 1,
                    CandleLabel::Bearish => counts.bearish += 1,
                    CandleLabel::Doji => counts.doji += 1,
                }
                counts
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    fn candle(day: i64, open: f64, close: f64) -> Candle {
        let (lo, hi) = if open < close { (open, close) } else { (close, open) };
        Candle::new(day * TimeUtils::MS_IN_D, open, hi, lo, close)
    }

    #[test]
    fn labels_come_from_rounded_prices() {
        let candles = vec![
            candle(0, 1.100_001, 1.100_004), // Doji once rounded to 5dp
            candle(1, 1.1, 1.2),
            candle(2, 1.2, 1.1),
        ];
        let series = LabeledSeries::from_candles("EURUSD=X", &candles, DecimalPrecision::Five);

        assert_eq!(
            series.labels(),
            &[CandleLabel::Doji, CandleLabel::Bullish, CandleLabel::Bearish]
        );
        assert_eq!(series.open_prices[0], 1.1);
        assert_eq!(series.get_candle(1).close, 1.2);
    }

    #[test]
    fn counts_and_range() {
        let candles = vec![candle(3, 10.0, 11.0), candle(4, 11.0, 11.0), candle(5, 11.0, 12.0)];
        let series = LabeledSeries::from_candles("AAPL", &candles, DecimalPrecision::Two);

        let counts = series.label_counts();
        assert_eq!(counts.bullish, 2);
        assert_eq!(counts.doji, 1);
        assert_eq!(counts.total(), 3);
        assert_eq!(
            series.time_range(),
            Some((3 * TimeUtils::MS_IN_D, 5 * TimeUtils::MS_IN_D))
        );
    }

    #[test]
    fn out_of_order_bars_are_skipped() {
        let candles = vec![
            candle(1, 10.0, 11.0),
            candle(0, 11.0, 10.0),
            candle(2, 11.0, 12.0),
            candle(2, 12.0, 11.0),
            candle(3, 12.0, 12.0),
        ];
        let series = LabeledSeries::from_candles("AAPL", &candles, DecimalPrecision::Two);

        assert_eq!(
            series.timestamps,
            vec![1, 2, 3].into_iter().map(|d| d * TimeUtils::MS_IN_D).collect::<Vec<_>>()
        );
        assert_eq!(
            series.labels(),
            &[CandleLabel::Bullish, CandleLabel::Bullish, CandleLabel::Doji]
        );
    }

    #[test]
    fn empty_series() {
        let series = LabeledSeries::from_candles("X", &[], DecimalPrecision::Two);
        assert!(series.is_empty());
        assert_eq!(series.time_range(), None);
    }
}
