use serde::Serialize;

/// Directional recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    Buy,
    Sell,
    None,
}

/// The engine's sole output: a recommendation plus the evidence behind it.
/// All numeric fields are zero when `signal` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingSignal {
    pub signal: Signal,
    /// Confidence 0–100 derived from the confluence count.
    pub strength: u8,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub entry_price: f64,
    pub confluences: Vec<String>,
    pub risk_reward_ratio: f64,
}

impl TradingSignal {
    /// A no-trade result carrying only its diagnostic confluence strings.
    pub fn none(confluences: Vec<String>) -> Self {
        Self {
            signal: Signal::None,
            strength: 0,
            stop_loss: 0.0,
            take_profit: 0.0,
            entry_price: 0.0,
            confluences,
            risk_reward_ratio: 0.0,
        }
    }
}

/// `round(min(100, 100·count/5))` — five confluences saturate the scale.
pub fn strength_from(count: usize) -> u8 {
    ((count as f64 / 5.0) * 100.0).round().min(100.0) as u8
}
