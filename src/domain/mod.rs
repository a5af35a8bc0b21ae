// Domain types and value objects
mod candle;
mod precision;
mod regime;

pub use candle::{Candle, CandleLabel};
pub use precision::DecimalPrecision;
pub use regime::Regime;
