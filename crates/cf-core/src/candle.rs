use serde::{Deserialize, Serialize};

/// One OHLCV bar. `time` is the bucket open time in unix seconds; a series is
/// ordered by `time`, strictly ascending, no duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Candle {
    /// (high + low + close) / 3 — the VWAP price component.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    pub fn volume_or_zero(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// MACD values for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// A candle zipped with the indicator values computed at its index.
///
/// `None` means the owning indicator's warm-up window was not yet satisfied at
/// this bar — "not computable", never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCandle {
    pub candle: Candle,
    pub ema21: Option<f64>,
    pub ema50: Option<f64>,
    pub ema200: Option<f64>,
    pub rsi14: Option<f64>,
    pub atr14: Option<f64>,
    pub vwap: Option<f64>,
    pub obv: Option<f64>,
    pub macd: Option<MacdPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typical_price_is_hlc_mean() {
        let c = Candle {
            time: 0,
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 10.5,
            volume: Some(100.0),
        };
        assert!((c.typical_price() - (12.0 + 9.0 + 10.5) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn missing_volume_reads_as_zero() {
        let c = Candle {
            time: 0,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: None,
        };
        assert_eq!(c.volume_or_zero(), 0.0);
    }

    #[test]
    fn body_direction() {
        let mut c = Candle {
            time: 0,
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: None,
        };
        assert!(c.is_bullish());
        assert!(!c.is_bearish());
        c.close = 0.8;
        assert!(c.is_bearish());
    }
}
