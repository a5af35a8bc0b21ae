// Pattern statistics and macro regime algorithms
pub mod composite;
pub mod pattern_matcher;
pub mod probability;
pub mod regime;
pub mod zscore;

pub use {
    composite::{composite, effective_weights},
    pattern_matcher::find_matches,
    probability::{analyze_pattern, calculate, compute_pattern_probability},
    regime::{
        analyze_regime, classify_regime, classify_with_rules, compute_regime_analysis,
        detect_transitions, flag_ratio, is_flagged, recent_alerts,
    },
    zscore::{rolling_zscore, rolling_zscore_values, zscore_frame},
};
