use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    config::ZScore,
    utils::{business_days, fill_forward_mut},
};

/// Raw observations for one named series, in any order.
pub type RawSeries = Vec<(NaiveDate, f64)>;

/// Named macro series aligned onto one business-day calendar.
///
/// Every column has exactly `dates.len()` entries. Gaps inherit the last
/// known value; positions before a series' first observation stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeriesFrame {
    pub dates: Vec<NaiveDate>,
    pub columns: BTreeMap<String, Vec<Option<f64>>>,
    /// Date of each series' latest real (not forward-filled) observation.
    pub last_observed: BTreeMap<String, NaiveDate>,
}

impl SeriesFrame {
    /// Builds the calendar from the earliest to the latest observation across
    /// all series. Non-finite values are ignored. Weekend observations are
    /// carried onto the next business day.
    pub fn align(raw: &BTreeMap<String, RawSeries>) -> Self {
        let mut cleaned: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for (name, points) in raw {
            let mut pts: Vec<(NaiveDate, f64)> =
                points.iter().copied().filter(|(_, v)| v.is_finite()).collect();
            if pts.is_empty() {
                log::debug!("Series {} has no finite observations; skipped", name);
                continue;
            }
            // Stable sort keeps the later duplicate last, which wins below.
            pts.sort_by_key(|(d, _)| *d);
            cleaned.insert(name.as_str(), pts);
        }

        let first = cleaned.values().filter_map(|p| p.first()).map(|(d, _)| *d).min();
        let last = cleaned.values().filter_map(|p| p.last()).map(|(d, _)| *d).max();
        let (Some(first), Some(last)) = (first, last) else {
            return Self::default();
        };

        let dates = business_days(first, last);
        let mut columns = BTreeMap::new();
        let mut last_observed = BTreeMap::new();

        for (name, pts) in cleaned {
            let mut column: Vec<Option<f64>> = vec![None; dates.len()];
            let mut cursor = 0usize;
            // As-of join: each calendar day takes the latest observation on or before it.
            for (slot, day) in column.iter_mut().zip(&dates) {
                let mut latest = None;
                while cursor < pts.len() && pts[cursor].0 <= *day {
                    latest = Some(pts[cursor].1);
                    cursor += 1;
                }
                *slot = latest;
            }
            fill_forward_mut(&mut column);

            if let Some((d, _)) = pts.last() {
                last_observed.insert(name.to_string(), *d);
            }
            columns.insert(name.to_string(), column);
        }

        Self {
            dates,
            columns,
            last_observed,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }
}

/// Rolling z-scores per series, on the same calendar as the source frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ZScoreFrame {
    pub dates: Vec<NaiveDate>,
    pub columns: BTreeMap<String, Vec<Option<ZScore>>>,
}

impl ZScoreFrame {
    /// The z-score row at `idx` (`None` entries for undefined scores).
    pub fn row(&self, idx: usize) -> BTreeMap<&str, Option<ZScore>> {
        self.columns
            .iter()
            .map(|(name, col)| (name.as_str(), col.get(idx).copied().flatten()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
