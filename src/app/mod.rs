mod render;

use std::{path::Path, time::Duration};

use anyhow::{Context, Result};

use crate::{
    Cli, Command,
    analysis::{analyze_pattern, analyze_regime},
    config::RegimeSettings,
    data::{CandleProvider, JsonFileProvider, MacroSeriesProvider, ProviderChain},
    domain::{CandleLabel, DecimalPrecision},
};

pub use render::{pattern_report, regime_analysis};

/// Executes one CLI command and prints its result to stdout.
pub async fn run(cli: Cli) -> Result<()> {
    let timeout = Duration::from_secs(cli.timeout_secs);
    let output = match &cli.command {
        Command::Pattern {
            symbol,
            pattern,
            precision,
            details,
        } => {
            let chain = candle_chain(&cli.data_dirs, timeout);
            run_pattern(&chain, symbol, pattern, *precision, *details, cli.json).await?
        }
        Command::Regime { settings } => {
            let chain = macro_chain(&cli.data_dirs, timeout);
            run_regime(&chain, settings.as_deref(), cli.json).await?
        }
    };
    println!("{output}");
    Ok(())
}

pub fn candle_chain(dirs: &[impl AsRef<Path>], timeout: Duration) -> ProviderChain<dyn CandleProvider> {
    let providers = dirs
        .iter()
        .map(|dir| Box::new(JsonFileProvider::new(dir.as_ref())) as Box<dyn CandleProvider>)
        .collect();
    ProviderChain::from_providers(providers, timeout)
}

pub fn macro_chain(
    dirs: &[impl AsRef<Path>],
    timeout: Duration,
) -> ProviderChain<dyn MacroSeriesProvider> {
    let providers = dirs
        .iter()
        .map(|dir| Box::new(JsonFileProvider::new(dir.as_ref())) as Box<dyn MacroSeriesProvider>)
        .collect();
    ProviderChain::from_providers(providers, timeout)
}

pub async fn run_pattern(
    provider: &dyn CandleProvider,
    symbol: &str,
    pattern: &str,
    precision: Option<u32>,
    details: bool,
    json: bool,
) -> Result<String> {
    let pattern = CandleLabel::parse_pattern(pattern)?;
    let precision = match precision {
        Some(places) => DecimalPrecision::try_from(places)?,
        None => DecimalPrecision::for_symbol(symbol),
    };

    let candles = provider.fetch_candles(symbol).await?;
    let report = analyze_pattern(symbol, &candles, &pattern, precision)
        .with_context(|| format!("Pattern analysis failed for {symbol}"))?;

    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(pattern_report(&report, details))
    }
}

pub async fn run_regime(
    provider: &dyn MacroSeriesProvider,
    settings_path: Option<&Path>,
    json: bool,
) -> Result<String> {
    let settings = match settings_path {
        Some(path) => RegimeSettings::load(path)?,
        None => RegimeSettings::default(),
    };

    let names: Vec<String> = settings.weights.keys().cloned().collect();
    let raw = provider.fetch_series(&names).await?;
    let analysis = analyze_regime(&raw, &settings).context("Regime analysis failed")?;

    if json {
        Ok(serde_json::to_string_pretty(&analysis)?)
    } else {
        Ok(regime_analysis(&analysis))
    }
}
