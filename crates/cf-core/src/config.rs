use serde::Deserialize;
use std::path::Path;

use crate::error::EngineError;

/// Per-call trading configuration. Immutable once constructed; every field
/// has a default so callers (and YAML files) may override any subset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
    /// Minimum confluences for a directional signal, applied only when
    /// `enforce_min_confluences` is set.
    pub min_confluences: usize,
    /// Gate directional signals behind `min_confluences`; off by default,
    /// where ties are the only demotion to `None`.
    pub enforce_min_confluences: bool,
    /// ATR multiplier for the volatility stop.
    pub atr_multiplier: f64,
    /// Risk/reward target outside strong trends (strong trends use 3.2).
    pub risk_reward_ratio: f64,
    /// Volume spike threshold as a multiple of the 20-bar average volume.
    pub volume_threshold: f64,
    /// Max relative deviation for a price to count as testing a key level.
    pub price_deviation: f64,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            min_confluences: 2,
            enforce_min_confluences: false,
            atr_multiplier: 1.5,
            risk_reward_ratio: 2.5,
            volume_threshold: 1.8,
            price_deviation: 0.003,
        }
    }
}

impl TradingConfig {
    /// Load overrides from a YAML file; unspecified fields keep defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}
