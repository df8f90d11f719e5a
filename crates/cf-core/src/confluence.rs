use crate::candle::EnrichedCandle;
use crate::config::TradingConfig;
use crate::levels::{self, KeyLevels};
use crate::signal::Signal;
use crate::trend::Trend;

/// Which thesis a rule supports. Every rule contributes to exactly one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bull,
    Bear,
}

/// Everything a rule predicate may inspect.
pub struct RuleCtx<'a> {
    pub last: &'a EnrichedCandle,
    pub series: &'a [EnrichedCandle],
    /// Trend of the entry-timeframe series.
    pub trend: Trend,
    /// Trend of the higher-timeframe context series.
    pub htf_trend: Trend,
    pub levels: &'a KeyLevels,
    pub config: &'a TradingConfig,
}

/// One named confluence condition.
#[derive(Clone, Copy)]
pub struct ConfluenceRule {
    pub name: &'static str,
    pub side: Side,
    pub check: fn(&RuleCtx<'_>) -> bool,
}

/// Matched rule names, split by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scorecard {
    pub bull: Vec<String>,
    pub bear: Vec<String>,
}

/// A battery of confluence rules. Swapping rule sets is a parameter, not a
/// code change.
pub struct RuleSet(&'static [ConfluenceRule]);

impl RuleSet {
    /// The core 8-condition battery: price vs VWAP, RSI band membership,
    /// MACD histogram sign, candle body direction.
    pub fn standard() -> Self {
        RuleSet(STANDARD_RULES)
    }

    /// Standard plus higher-timeframe trend alignment, key-level tests,
    /// volume spikes and RSI divergence.
    pub fn extended() -> Self {
        RuleSet(EXTENDED_RULES)
    }

    pub fn evaluate(&self, ctx: &RuleCtx<'_>) -> Scorecard {
        let mut card = Scorecard::default();
        for rule in self.0 {
            if (rule.check)(ctx) {
                match rule.side {
                    Side::Bull => card.bull.push(rule.name.to_string()),
                    Side::Bear => card.bear.push(rule.name.to_string()),
                }
            }
        }
        card
    }
}

const STANDARD_RULES: &[ConfluenceRule] = &[
    ConfluenceRule {
        name: "Price above VWAP",
        side: Side::Bull,
        check: |ctx| ctx.last.vwap.is_some_and(|v| ctx.last.candle.close > v),
    },
    ConfluenceRule {
        name: "RSI in optimal buy zone",
        side: Side::Bull,
        check: |ctx| ctx.last.rsi14.is_some_and(|r| r > 40.0 && r < 65.0),
    },
    ConfluenceRule {
        name: "Positive MACD momentum",
        side: Side::Bull,
        check: |ctx| ctx.last.macd.is_some_and(|m| m.histogram > 0.0),
    },
    ConfluenceRule {
        name: "Bullish candle",
        side: Side::Bull,
        check: |ctx| ctx.last.candle.is_bullish(),
    },
    ConfluenceRule {
        name: "Price below VWAP",
        side: Side::Bear,
        check: |ctx| ctx.last.vwap.is_some_and(|v| ctx.last.candle.close < v),
    },
    ConfluenceRule {
        name: "RSI in optimal sell zone",
        side: Side::Bear,
        check: |ctx| ctx.last.rsi14.is_some_and(|r| r > 35.0 && r < 60.0),
    },
    ConfluenceRule {
        name: "Negative MACD momentum",
        side: Side::Bear,
        check: |ctx| ctx.last.macd.is_some_and(|m| m.histogram < 0.0),
    },
    ConfluenceRule {
        name: "Bearish candle",
        side: Side::Bear,
        check: |ctx| ctx.last.candle.is_bearish(),
    },
];

const EXTENDED_RULES: &[ConfluenceRule] = &[
    // Core battery, shared with the standard set.
    STANDARD_RULES[0],
    STANDARD_RULES[1],
    STANDARD_RULES[2],
    STANDARD_RULES[3],
    STANDARD_RULES[4],
    STANDARD_RULES[5],
    STANDARD_RULES[6],
    STANDARD_RULES[7],
    ConfluenceRule {
        name: "Higher timeframe uptrend",
        side: Side::Bull,
        check: |ctx| ctx.htf_trend.is_uptrend(),
    },
    ConfluenceRule {
        name: "Higher timeframe downtrend",
        side: Side::Bear,
        check: |ctx| ctx.htf_trend.is_downtrend(),
    },
    ConfluenceRule {
        name: "Support level tested",
        side: Side::Bull,
        check: |ctx| {
            ctx.levels.supports.iter().any(|level| {
                levels::is_level_tested(ctx.last.candle.low, *level, ctx.config.price_deviation)
            })
        },
    },
    ConfluenceRule {
        name: "Resistance level tested",
        side: Side::Bear,
        check: |ctx| {
            ctx.levels.resistances.iter().any(|level| {
                levels::is_level_tested(ctx.last.candle.high, *level, ctx.config.price_deviation)
            })
        },
    },
    ConfluenceRule {
        name: "Volume spike on bullish candle",
        side: Side::Bull,
        check: |ctx| ctx.last.candle.is_bullish() && volume_spike(ctx),
    },
    ConfluenceRule {
        name: "Volume spike on bearish candle",
        side: Side::Bear,
        check: |ctx| ctx.last.candle.is_bearish() && volume_spike(ctx),
    },
    ConfluenceRule {
        name: "Pullback in uptrend",
        side: Side::Bull,
        check: bullish_pullback,
    },
    ConfluenceRule {
        name: "Pullback in downtrend",
        side: Side::Bear,
        check: bearish_pullback,
    },
    ConfluenceRule {
        name: "Bullish RSI divergence",
        side: Side::Bull,
        check: |ctx| {
            ctx.trend.is_uptrend() && levels::detect_rsi_divergence(ctx.series, ctx.trend)
        },
    },
    ConfluenceRule {
        name: "Bearish RSI divergence",
        side: Side::Bear,
        check: |ctx| {
            ctx.trend.is_downtrend() && levels::detect_rsi_divergence(ctx.series, ctx.trend)
        },
    },
];

const AVG_VOLUME_WINDOW: usize = 20;
const FIB_RETRACEMENT: f64 = 0.618;

/// Price dipped into the 50-EMA or the intra-bar 61.8% level and closed back
/// above it, with the trend still up.
fn bullish_pullback(ctx: &RuleCtx<'_>) -> bool {
    if !ctx.trend.is_uptrend() {
        return false;
    }
    let c = &ctx.last.candle;
    let fib = c.high - FIB_RETRACEMENT * (c.high - c.low);
    let at_ema = ctx.last.ema50.is_some_and(|e| c.low <= e && c.close > e);
    let at_fib = c.low <= fib && c.close > fib;
    at_ema || at_fib
}

fn bearish_pullback(ctx: &RuleCtx<'_>) -> bool {
    if !ctx.trend.is_downtrend() {
        return false;
    }
    let c = &ctx.last.candle;
    let fib = c.low + FIB_RETRACEMENT * (c.high - c.low);
    let at_ema = ctx.last.ema50.is_some_and(|e| c.high >= e && c.close < e);
    let at_fib = c.high >= fib && c.close < fib;
    at_ema || at_fib
}

fn volume_spike(ctx: &RuleCtx<'_>) -> bool {
    let Some(volume) = ctx.last.candle.volume else {
        return false;
    };
    let start = ctx.series.len().saturating_sub(AVG_VOLUME_WINDOW);
    let window = &ctx.series[start..];
    let (sum, n) = window
        .iter()
        .filter_map(|e| e.candle.volume)
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return false;
    }
    volume > ctx.config.volume_threshold * (sum / n as f64)
}

/// Resolve a scorecard into a signal: the longer side wins; equal counts
/// (including zero) always yield `None` with an explicit tie report so
/// callers can audit why no trade was taken.
pub fn decide(card: &Scorecard, config: &TradingConfig) -> (Signal, Vec<String>) {
    use std::cmp::Ordering;
    match card.bull.len().cmp(&card.bear.len()) {
        Ordering::Greater => gate(Signal::Buy, card.bull.clone(), config),
        Ordering::Less => gate(Signal::Sell, card.bear.clone(), config),
        Ordering::Equal => (Signal::None, tie_report(card)),
    }
}

fn gate(signal: Signal, confluences: Vec<String>, config: &TradingConfig) -> (Signal, Vec<String>) {
    if config.enforce_min_confluences && confluences.len() < config.min_confluences {
        let note = format!(
            "Only {} of {} required confluences met",
            confluences.len(),
            config.min_confluences
        );
        return (Signal::None, vec![note]);
    }
    (signal, confluences)
}

fn tie_report(card: &Scorecard) -> Vec<String> {
    vec![
        format!(
            "Equal buy/sell pressure ({} confluences each)",
            card.bull.len()
        ),
        format!("Buy signals: {}", card.bull.join(", ")),
        format!("Sell signals: {}", card.bear.join(", ")),
    ]
}
