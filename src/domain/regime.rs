use {
    crate::config::REGIME,
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// Discrete stress level, ordered by severity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    Default,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Regime {
    #[default]
    Calm,
    Watch,
    Warning,
    Alert,
}

impl Regime {
    /// Entering any regime other than CALM raises an alert.
    pub fn is_alerting(self) -> bool {
        self != Regime::Calm
    }

    /// Composite score that enters this regime on its own, regardless of flags.
    pub fn entry_threshold(self) -> Option<f64> {
        match self {
            Regime::Calm => None,
            Regime::Watch => Some(REGIME.watch_composite),
            Regime::Warning => Some(REGIME.warning_composite),
            Regime::Alert => Some(REGIME.alert_composite),
        }
    }
}
