use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{config::ZScore, domain::Regime};

/// One weighted series as seen on the as-of date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentReading {
    pub name: String,
    /// Forward-filled value on the as-of date; `None` if the series never reported.
    pub value: Option<f64>,
    /// `None` while the series lacks history or its window is flat.
    pub zscore: Option<ZScore>,
    pub base_weight: f64,
    /// Share of the composite actually carried on the as-of date (0 when unavailable).
    pub effective_weight: f64,
    pub flag_threshold: f64,
    pub flagged: bool,
    pub last_observed: Option<NaiveDate>,
}

/// Entry into a non-CALM regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionAlert {
    pub date: NaiveDate,
    pub regime: Regime,
    pub previous: Regime,
    pub composite: f64,
}

/// A row that survived composite scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimePoint {
    pub date: NaiveDate,
    pub composite: f64,
    pub regime: Regime,
    pub flagged_count: usize,
    pub available_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeStats {
    pub mean: f64,
    /// Sample std; `None` with fewer than two rows.
    pub std: Option<f64>,
    pub max: f64,
    pub min: f64,
}

/// Distribution and spread of the composite over the recent window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeStatistics {
    pub distribution: BTreeMap<Regime, usize>,
    pub total_rows: usize,
    pub composite: Option<CompositeStats>,
    /// Composite level that enters each non-CALM regime on its own.
    pub thresholds: BTreeMap<Regime, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeAnalysis {
    pub as_of: NaiveDate,
    pub current_regime: Regime,
    pub current_composite: f64,
    pub flagged_count: usize,
    pub available_count: usize,
    pub per_series_components: Vec<ComponentReading>,
    /// Most recent first.
    pub transition_alerts: Vec<TransitionAlert>,
    /// Oldest first.
    pub historical_series: Vec<RegimePoint>,
    pub statistics: RegimeStatistics,
}
