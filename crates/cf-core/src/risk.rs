use crate::candle::EnrichedCandle;
use crate::config::TradingConfig;
use crate::signal::Signal;
use crate::trend::Trend;

/// Bars of recent structure consulted for the structural stop.
const STRUCTURAL_LOOKBACK: usize = 5;
/// Risk/reward target applied inside a strong trend.
const STRONG_TREND_RR: f64 = 3.2;

/// Stop, target and the ratio that produced the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
    pub risk_reward_ratio: f64,
}

/// Derive stop and target for a directional signal from the last bar.
///
/// Two stop candidates are computed: a structural stop (recent swing extreme
/// padded by half an ATR) and a volatility stop (last extreme padded by the
/// configured ATR multiple). The less aggressive of the two wins, keeping the
/// stop on the protective side of price without overextending. The target
/// projects the stop distance by the risk/reward ratio, which is raised to
/// 3.2 only when the strong trend points the same way as the trade. Returns
/// `None` when `signal` is `None` or the last bar has no ATR yet.
pub fn compute_risk(
    signal: Signal,
    series: &[EnrichedCandle],
    trend: Trend,
    config: &TradingConfig,
) -> Option<RiskLevels> {
    let last = series.last()?;
    let atr = last.atr14?;
    let close = last.candle.close;

    let rr = match (signal, trend) {
        (Signal::Buy, Trend::StrongUptrend) | (Signal::Sell, Trend::StrongDowntrend) => {
            STRONG_TREND_RR
        }
        _ => config.risk_reward_ratio,
    };

    let start = series.len().saturating_sub(STRUCTURAL_LOOKBACK);
    let recent = &series[start..];

    match signal {
        Signal::Buy => {
            let swing_low = recent
                .iter()
                .map(|e| e.candle.low)
                .fold(f64::INFINITY, f64::min);
            let structural = swing_low - 0.5 * atr;
            let volatility = last.candle.low - config.atr_multiplier * atr;
            // Less aggressive candidate wins: for a long, the higher of the two.
            let stop_loss = structural.max(volatility);
            let take_profit = close + (close - stop_loss) * rr;
            Some(RiskLevels {
                stop_loss,
                take_profit,
                risk_reward_ratio: rr,
            })
        }
        Signal::Sell => {
            let swing_high = recent
                .iter()
                .map(|e| e.candle.high)
                .fold(f64::NEG_INFINITY, f64::max);
            let structural = swing_high + 0.5 * atr;
            let volatility = last.candle.high + config.atr_multiplier * atr;
            let stop_loss = structural.min(volatility);
            let take_profit = close - (stop_loss - close) * rr;
            Some(RiskLevels {
                stop_loss,
                take_profit,
                risk_reward_ratio: rr,
            })
        }
        Signal::None => None,
    }
}
