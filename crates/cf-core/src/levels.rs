use rustc_hash::FxHashMap;

use crate::candle::EnrichedCandle;
use crate::trend::Trend;

/// Ranked support/resistance prices relative to the latest close.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyLevels {
    pub supports: Vec<f64>,
    pub resistances: Vec<f64>,
}

/// Price bucketing: cluster highs/lows rounded to 4 decimals.
const PRICE_SCALE: f64 = 10_000.0;
/// A level must be touched at least this many times to qualify.
const MIN_TOUCHES: usize = 3;
/// How many levels to keep on each side.
const TOP_LEVELS: usize = 3;

pub const KEY_LEVEL_LOOKBACK: usize = 100;

const DIVERGENCE_LOOKBACK: usize = 30;
const DIVERGENCE_SWING_WINDOW: usize = 5;

/// Swing highs/lows over a symmetric window: a candle is a swing high iff its
/// high is the maximum of the `2·lookback + 1` candles centred on it (lows
/// analogous). Returns `(highs, lows)` in series order.
pub fn find_swing_points(
    data: &[EnrichedCandle],
    lookback: usize,
) -> (Vec<EnrichedCandle>, Vec<EnrichedCandle>) {
    let mut highs = Vec::new();
    let mut lows = Vec::new();
    if data.len() < 2 * lookback + 1 {
        return (highs, lows);
    }

    for i in lookback..data.len() - lookback {
        let window = &data[i - lookback..=i + lookback];
        let current = &data[i];

        if window.iter().all(|c| current.candle.high >= c.candle.high) {
            highs.push(*current);
        }
        if window.iter().all(|c| current.candle.low <= c.candle.low) {
            lows.push(*current);
        }
    }
    (highs, lows)
}

/// Cluster the last `lookback` candles' highs and lows into price buckets,
/// keep buckets touched ≥ 3 times with non-zero volume, rank by touch count
/// (price ascending as the deterministic tie-break), and split the top 3 each
/// side of the latest close.
pub fn find_key_levels(data: &[EnrichedCandle], lookback: usize) -> KeyLevels {
    let Some(last) = data.last() else {
        return KeyLevels::default();
    };

    let start = data.len().saturating_sub(lookback);
    let mut buckets: FxHashMap<i64, (usize, f64)> = FxHashMap::default();
    for e in &data[start..] {
        let volume = e.candle.volume_or_zero();
        for price in [e.candle.high, e.candle.low] {
            let key = (price * PRICE_SCALE).round() as i64;
            let entry = buckets.entry(key).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += volume;
        }
    }

    let mut significant: Vec<(f64, usize)> = buckets
        .into_iter()
        .filter(|(_, (count, volume))| *count >= MIN_TOUCHES && *volume > 0.0)
        .map(|(key, (count, _))| (key as f64 / PRICE_SCALE, count))
        .collect();
    significant.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.total_cmp(&b.0)));

    let last_price = last.candle.close;
    let supports = significant
        .iter()
        .filter(|(price, _)| *price < last_price)
        .take(TOP_LEVELS)
        .map(|(price, _)| *price)
        .collect();
    let resistances = significant
        .iter()
        .filter(|(price, _)| *price > last_price)
        .take(TOP_LEVELS)
        .map(|(price, _)| *price)
        .collect();

    KeyLevels {
        supports,
        resistances,
    }
}

/// A level counts as tested when price sits within `deviation` (a fraction,
/// e.g. 0.003) of it.
pub fn is_level_tested(price: f64, level: f64, deviation: f64) -> bool {
    level != 0.0 && ((price - level) / level).abs() < deviation
}

/// RSI divergence over the last 30 bars: in an uptrend, a lower swing low in
/// price with a higher RSI low is bullish divergence; mirrored for bearish.
/// Only fires in the direction matching `trend`.
pub fn detect_rsi_divergence(data: &[EnrichedCandle], trend: Trend) -> bool {
    if data.len() < DIVERGENCE_LOOKBACK {
        return false;
    }
    let recent = &data[data.len() - DIVERGENCE_LOOKBACK..];
    let (highs, lows) = find_swing_points(recent, DIVERGENCE_SWING_WINDOW);

    if trend.is_uptrend() && lows.len() >= 2 {
        let last = &lows[lows.len() - 1];
        let prev = &lows[lows.len() - 2];
        if let (Some(last_rsi), Some(prev_rsi)) = (last.rsi14, prev.rsi14) {
            if last.candle.low < prev.candle.low && last_rsi > prev_rsi {
                return true;
            }
        }
    }

    if trend.is_downtrend() && highs.len() >= 2 {
        let last = &highs[highs.len() - 1];
        let prev = &highs[highs.len() - 2];
        if let (Some(last_rsi), Some(prev_rsi)) = (last.rsi14, prev.rsi14) {
            if last.candle.high > prev.candle.high && last_rsi < prev_rsi {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candle::Candle;

    fn plain(time: i64, high: f64, low: f64, close: f64, volume: f64) -> EnrichedCandle {
        EnrichedCandle {
            candle: Candle {
                time,
                open: close,
                high,
                low,
                close,
                volume: Some(volume),
            },
            ema21: None,
            ema50: None,
            ema200: None,
            rsi14: None,
            atr14: None,
            vwap: None,
            obv: None,
            macd: None,
        }
    }

    #[test]
    fn single_peak_is_the_only_swing_high() {
        // Highs rise to a peak at index 5 then fall away.
        let data: Vec<EnrichedCandle> = (0..11)
            .map(|i| {
                let h = 100.0 - (i as f64 - 5.0).abs();
                plain(i, h, h - 1.0, h - 0.5, 10.0)
            })
            .collect();
        let (highs, lows) = find_swing_points(&data, 3);
        assert_eq!(highs.len(), 1);
        assert_eq!(highs[0].candle.time, 5);
        // Lows mirror the highs here, so the peak bar is the only non-edge
        // candidate and it is not a swing low.
        assert!(lows.is_empty());
    }

    #[test]
    fn too_short_for_window_finds_nothing() {
        let data: Vec<EnrichedCandle> = (0..4).map(|i| plain(i, 10.0, 9.0, 9.5, 1.0)).collect();
        let (highs, lows) = find_swing_points(&data, 3);
        assert!(highs.is_empty());
        assert!(lows.is_empty());
    }

    #[test]
    fn repeated_level_splits_into_support_and_resistance() {
        // 40 touches of high=110 / low=90, then a close at 100.
        let mut data: Vec<EnrichedCandle> =
            (0..40).map(|i| plain(i, 110.0, 90.0, 100.0, 5.0)).collect();
        data.push(plain(40, 101.0, 99.0, 100.0, 5.0));
        let levels = find_key_levels(&data, 100);
        assert!(levels.supports.contains(&90.0));
        assert!(levels.resistances.contains(&110.0));
        assert!(levels.supports.len() <= 3 && levels.resistances.len() <= 3);
    }

    #[test]
    fn zero_volume_buckets_are_dropped() {
        let data: Vec<EnrichedCandle> = (0..40)
            .map(|i| {
                let mut e = plain(i, 110.0, 90.0, 100.0, 0.0);
                e.candle.volume = None;
                e
            })
            .collect();
        let levels = find_key_levels(&data, 100);
        assert!(levels.supports.is_empty());
        assert!(levels.resistances.is_empty());
    }

    #[test]
    fn level_testing_uses_relative_deviation() {
        assert!(is_level_tested(100.2, 100.0, 0.003));
        assert!(!is_level_tested(100.4, 100.0, 0.003));
        assert!(!is_level_tested(100.0, 0.0, 0.003));
    }

    #[test]
    fn bullish_divergence_needs_lower_low_and_higher_rsi() {
        // Two price valleys inside the 30-bar window: the second is lower in
        // price but higher in RSI.
        let mut data = Vec::new();
        for i in 0..30i64 {
            let low = match i {
                8 => 90.0,   // first swing low
                22 => 88.0,  // second, lower
                11 => 94.5,  // keeps the mid-window bars from ranking as swings
                _ => 95.0 + (i % 3) as f64,
            };
            let mut e = plain(i, low + 4.0, low, low + 2.0, 10.0);
            e.rsi14 = Some(match i {
                8 => 30.0,  // RSI low at the first price valley
                22 => 42.0, // higher RSI at the lower price valley
                _ => 50.0,
            });
            data.push(e);
        }
        assert!(detect_rsi_divergence(&data, Trend::WeakUptrend));
        // Direction filter: the same shape is not a bearish divergence.
        assert!(!detect_rsi_divergence(&data, Trend::WeakDowntrend));
    }
}
