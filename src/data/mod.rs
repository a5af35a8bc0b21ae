mod file_source;
mod provider;

pub use {
    file_source::{CANDLE_DIR, JsonFileProvider, MACRO_DIR, MacroObservation},
    provider::{CandleProvider, MacroSeriesProvider, NamedSource, ProviderChain},
};
