//! Runtime-overridable regime settings

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    config::{ZSCORE, ZScoreSettings, constants},
    error::{AnalysisError, AnalysisResult},
};

/// Weights, per-series flag thresholds and normalisation window used by
/// `compute_regime_analysis`. `Default` reproduces the base weight table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeSettings {
    pub weights: BTreeMap<String, f64>,
    pub flag_thresholds: BTreeMap<String, f64>,
    pub zscore_window: usize,
    pub min_fraction: f64,
}

impl Default for RegimeSettings {
    fn default() -> Self {
        let series = constants::regime::BASE_SERIES;
        Self {
            weights: series
                .iter()
                .map(|s| (s.name.to_string(), s.weight))
                .collect(),
            flag_thresholds: series
                .iter()
                .map(|s| (s.name.to_string(), s.flag_threshold))
                .collect(),
            zscore_window: ZSCORE.window,
            min_fraction: ZSCORE.min_fraction,
        }
    }
}

impl RegimeSettings {
    /// Reads a JSON settings file; omitted fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read regime settings {}", path.display()))?;
        let settings: Self = serde_json::from_str(&text)
            .with_context(|| format!("Malformed regime settings {}", path.display()))?;
        settings.validate()?;
        log::info!(
            "Loaded regime settings from {} ({} weighted series)",
            path.display(),
            settings.weights.len()
        );
        Ok(settings)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        validate_weights(&self.weights)?;
        if self.zscore_window < 2 || !(self.min_fraction > 0.0 && self.min_fraction <= 1.0) {
            return Err(AnalysisError::InvalidWindow {
                window: self.zscore_window,
                min_fraction: self.min_fraction,
            });
        }
        Ok(())
    }

    /// Threshold for `name`, falling back to the generic flag level.
    pub fn flag_threshold_for(&self, name: &str) -> f64 {
        flag_threshold_for(&self.flag_thresholds, name)
    }

    pub fn zscore_settings(&self) -> ZScoreSettings {
        ZScoreSettings {
            window: self.zscore_window,
            min_fraction: self.min_fraction,
            ..ZSCORE
        }
    }
}

pub(crate) fn flag_threshold_for(thresholds: &BTreeMap<String, f64>, name: &str) -> f64 {
    thresholds
        .get(name)
        .copied()
        .unwrap_or(constants::regime::DEFAULT_FLAG)
}

pub(crate) fn validate_weights(weights: &BTreeMap<String, f64>) -> AnalysisResult<()> {
    match weights
        .iter()
        .find(|(_, w)| !(w.is_finite() && **w > 0.0))
    {
        Some((name, &weight)) => Err(AnalysisError::InvalidWeight {
            name: name.clone(),
            weight,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_base_table() {
        let settings = RegimeSettings::default();
        assert_eq!(settings.weights.len(), constants::regime::BASE_SERIES.len());
        assert_eq!(settings.flag_threshold_for("STLFSI"), 1.0);
        assert_eq!(settings.flag_threshold_for("VIX"), 1.5);
        assert_eq!(settings.flag_threshold_for("NOT_IN_TABLE"), 1.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: RegimeSettings =
            serde_json::from_str(r#"{ "weights": { "STRESS": 1.0 } }"#).unwrap();
        assert_eq!(settings.weights.len(), 1);
        assert_eq!(settings.zscore_window, 252);
        assert_eq!(settings.min_fraction, 0.8);
    }

    #[test]
    fn rejects_non_positive_weight() {
        let mut settings = RegimeSettings::default();
        settings.weights.insert("VIX".into(), 0.0);
        assert!(matches!(
            settings.validate(),
            Err(AnalysisError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn rejects_bad_window() {
        let settings = RegimeSettings {
            zscore_window: 1,
            ..RegimeSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(AnalysisError::InvalidWindow { .. })
        ));
    }
}
