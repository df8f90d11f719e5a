use serde::Serialize;

use crate::candle::EnrichedCandle;

/// Trend label from EMA ordering and slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    StrongUptrend,
    WeakUptrend,
    StrongDowntrend,
    WeakDowntrend,
    Ranging,
}

impl Trend {
    pub fn is_uptrend(self) -> bool {
        matches!(self, Trend::StrongUptrend | Trend::WeakUptrend)
    }

    pub fn is_downtrend(self) -> bool {
        matches!(self, Trend::StrongDowntrend | Trend::WeakDowntrend)
    }
}

/// Slope reference: compare the latest candle against this many candles back.
const SLOPE_LOOKBACK: usize = 10;

/// Classify the trend of an enriched series from EMA stacking and slope.
///
/// Priority: strong up, weak up, strong down, weak down, ranging. Whenever a
/// required EMA is still warming up (or the series is too short for a slope
/// reference) the safe default is `Ranging`.
pub fn detect_trend(data: &[EnrichedCandle]) -> Trend {
    if data.len() < SLOPE_LOOKBACK {
        return Trend::Ranging;
    }
    let last = &data[data.len() - 1];
    let prev = &data[data.len() - SLOPE_LOOKBACK];

    let (Some(e21), Some(e50), Some(e200)) = (last.ema21, last.ema50, last.ema200) else {
        return Trend::Ranging;
    };
    let (Some(p21), Some(p50), Some(p200)) = (prev.ema21, prev.ema50, prev.ema200) else {
        return Trend::Ranging;
    };

    let slope21 = e21 - p21;
    let slope50 = e50 - p50;
    let slope200 = e200 - p200;
    let close = last.candle.close;

    if e21 > e50 && e50 > e200 && slope21 > 0.0 && slope50 > 0.0 && slope200 > 0.0 {
        return Trend::StrongUptrend;
    }
    if close > e200 && slope50 > 0.0 {
        return Trend::WeakUptrend;
    }
    if e21 < e50 && e50 < e200 && slope21 < 0.0 && slope50 < 0.0 && slope200 < 0.0 {
        return Trend::StrongDowntrend;
    }
    if close < e200 && slope50 < 0.0 {
        return Trend::WeakDowntrend;
    }
    Trend::Ranging
}
