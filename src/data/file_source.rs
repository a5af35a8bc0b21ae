use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::PathBuf,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    data::{CandleProvider, MacroSeriesProvider, NamedSource},
    domain::Candle,
    models::RawSeries,
};

pub const CANDLE_DIR: &str = "candles";
pub const MACRO_DIR: &str = "macro";

/// One dated macro reading as stored on disk. `null` marks a missing print.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroObservation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Reads pre-fetched data from a directory:
/// `candles/<SYMBOL>.json` holds a JSON array of candles and
/// `macro/<SERIES>.json` a JSON array of [`MacroObservation`].
pub struct JsonFileProvider {
    root: PathBuf,
    label: String,
}

impl JsonFileProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let label = format!("json:{}", root.display());
        Self { root, label }
    }

    pub fn candle_path(&self, symbol: &str) -> PathBuf {
        self.root.join(CANDLE_DIR).join(format!("{symbol}.json"))
    }

    pub fn series_path(&self, name: &str) -> PathBuf {
        self.root.join(MACRO_DIR).join(format!("{name}.json"))
    }

    /// `Ok(None)` when the file does not exist.
    async fn read_series(&self, name: &str) -> Result<Option<RawSeries>> {
        let path = self.series_path(name);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found; skipping {}", path.display(), name);
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let observations: Vec<MacroObservation> = serde_json::from_str(&text)
            .with_context(|| format!("Malformed macro series {}", path.display()))?;
        let points = observations
            .into_iter()
            .filter_map(|o| Some((o.date, o.value?)))
            .collect();
        Ok(Some(points))
    }
}

impl NamedSource for JsonFileProvider {
    fn name(&self) -> &str {
        &self.label
    }
}

#[async_trait]
impl CandleProvider for JsonFileProvider {
    async fn fetch_candles(&self, symbol: &str) -> Result<Vec<Candle>> {
        let path = self.candle_path(symbol);
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut candles: Vec<Candle> = serde_json::from_str(&text)
            .with_context(|| format!("Malformed candle file {}", path.display()))?;

        // Files are hand-curated; enforce strictly increasing timestamps.
        candles.sort_by_key(|c| c.timestamp_ms);
        candles.dedup_by_key(|c| c.timestamp_ms);
        Ok(candles)
    }
}

#[async_trait]
impl MacroSeriesProvider for JsonFileProvider {
    async fn fetch_series(&self, names: &[String]) -> Result<BTreeMap<String, RawSeries>> {
        let reads = names.iter().map(|name| async move {
            let series = self.read_series(name).await;
            (name.clone(), series)
        });

        let mut found = BTreeMap::new();
        for (name, series) in futures::future::join_all(reads).await {
            if let Some(points) = series? {
                found.insert(name, points);
            }
        }
        Ok(found)
    }
}
