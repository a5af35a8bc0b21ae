use std::{collections::BTreeMap, future::Future, time::Duration};

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;

use crate::{domain::Candle, models::RawSeries};

/// Anything that can be listed in a fallback chain.
pub trait NamedSource {
    fn name(&self) -> &str;
}

/// Hands the pattern engine a materialised, time-sorted candle series.
#[async_trait]
pub trait CandleProvider: NamedSource + Send + Sync {
    async fn fetch_candles(&self, symbol: &str) -> Result<Vec<Candle>>;
}

/// Hands the regime engine raw macro observations keyed by series name.
/// Series the source does not carry are simply absent from the result.
#[async_trait]
pub trait MacroSeriesProvider: NamedSource + Send + Sync {
    async fn fetch_series(&self, names: &[String]) -> Result<BTreeMap<String, RawSeries>>;
}

/// Ordered list of providers tried in turn, each attempt bounded by `timeout`.
pub struct ProviderChain<P: ?Sized> {
    providers: Vec<Box<P>>,
    timeout: Duration,
}

impl<P: ?Sized + NamedSource> ProviderChain<P> {
    pub fn new(timeout: Duration) -> Self {
        Self {
            providers: Vec::new(),
            timeout,
        }
    }

    pub fn from_providers(providers: Vec<Box<P>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub fn with_provider(mut self, provider: Box<P>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    async fn attempt<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(anyhow!("timed out after {:?}", self.timeout)),
        }
    }
}

impl<P: ?Sized> NamedSource for ProviderChain<P> {
    fn name(&self) -> &str {
        "provider chain"
    }
}

#[async_trait]
impl CandleProvider for ProviderChain<dyn CandleProvider> {
    /// First provider returning a non-empty series wins.
    async fn fetch_candles(&self, symbol: &str) -> Result<Vec<Candle>> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            match self.attempt(provider.fetch_candles(symbol)).await {
                Ok(candles) if !candles.is_empty() => {
                    log::info!(
                        "{}: {} candles from {}",
                        symbol,
                        candles.len(),
                        provider.name()
                    );
                    return Ok(candles);
                }
                Ok(_) => {
                    log::warn!("{}: {} returned no candles", symbol, provider.name());
                    failures.push(format!("{}: no candles", provider.name()));
                }
                Err(e) => {
                    log::warn!("{}: {} failed: {:#}", symbol, provider.name(), e);
                    failures.push(format!("{}: {:#}", provider.name(), e));
                }
            }
        }

        bail!(
            "No provider could supply candles for {} ({})",
            symbol,
            if failures.is_empty() {
                "no providers configured".to_string()
            } else {
                failures.join("; ")
            }
        )
    }
}

#[async_trait]
impl MacroSeriesProvider for ProviderChain<dyn MacroSeriesProvider> {
    /// Each series comes from the first provider that carries it.
    /// Fails only when no provider supplied any of the requested series.
    async fn fetch_series(&self, names: &[String]) -> Result<BTreeMap<String, RawSeries>> {
        let mut collected: BTreeMap<String, RawSeries> = BTreeMap::new();
        let mut failures = Vec::new();

        for provider in &self.providers {
            let missing: Vec<String> = names
                .iter()
                .filter(|n| !collected.contains_key(*n))
                .cloned()
                .collect();
            if missing.is_empty() {
                break;
            }

            match self.attempt(provider.fetch_series(&missing)).await {
                Ok(found) => {
                    for (name, points) in found {
                        if missing.contains(&name) && !points.is_empty() {
                            log::debug!("{}: {} points from {}", name, points.len(), provider.name());
                            collected.insert(name, points);
                        }
                    }
                }
                Err(e) => {
                    log::warn!("Macro provider {} failed: {:#}", provider.name(), e);
                    failures.push(format!("{}: {:#}", provider.name(), e));
                }
            }
        }

        if collected.is_empty() {
            bail!(
                "No provider could supply any of [{}]{}",
                names.join(", "),
                if failures.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", failures.join("; "))
                }
            );
        }

        let absent: Vec<&str> = names
            .iter()
            .filter(|n| !collected.contains_key(*n))
            .map(String::as_str)
            .collect();
        if !absent.is_empty() {
            log::warn!("Macro series unavailable: {}", absent.join(", "));
        }
        Ok(collected)
    }
}
