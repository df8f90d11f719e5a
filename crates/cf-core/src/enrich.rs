use crate::candle::{Candle, EnrichedCandle, MacdPoint};
use crate::indicators;

pub const EMA_FAST: usize = 21;
pub const EMA_MID: usize = 50;
pub const EMA_SLOW: usize = 200;
pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

/// Zip a candle series with the full indicator battery, one enriched record
/// per input candle. Each indicator is computed independently; the only
/// cross-indicator dependency is MACD's internal fast/slow EMA composition.
pub fn enrich(series: &[Candle]) -> Vec<EnrichedCandle> {
    let ema21 = indicators::ema(series, EMA_FAST);
    let ema50 = indicators::ema(series, EMA_MID);
    let ema200 = indicators::ema(series, EMA_SLOW);
    let rsi14 = indicators::rsi(series, RSI_PERIOD);
    let atr14 = indicators::atr(series, ATR_PERIOD);
    let vwap = indicators::vwap(series);
    let obv = indicators::obv(series);
    let macd = indicators::macd(series, MACD_FAST, MACD_SLOW, MACD_SIGNAL);

    series
        .iter()
        .enumerate()
        .map(|(i, candle)| EnrichedCandle {
            candle: *candle,
            ema21: ema21[i],
            ema50: ema50[i],
            ema200: ema200[i],
            rsi14: rsi14[i],
            atr14: atr14[i],
            vwap: vwap[i],
            obv: obv[i],
            macd: match (macd.line[i], macd.signal[i], macd.histogram[i]) {
                (Some(line), Some(signal), Some(histogram)) => Some(MacdPoint {
                    line,
                    signal,
                    histogram,
                }),
                _ => None,
            },
        })
        .collect()
}

/// Higher-timeframe context only needs the EMA stack for trend
/// classification; the momentum/volume indicators stay unset.
pub fn enrich_emas(series: &[Candle]) -> Vec<EnrichedCandle> {
    let ema21 = indicators::ema(series, EMA_FAST);
    let ema50 = indicators::ema(series, EMA_MID);
    let ema200 = indicators::ema(series, EMA_SLOW);

    series
        .iter()
        .enumerate()
        .map(|(i, candle)| EnrichedCandle {
            candle: *candle,
            ema21: ema21[i],
            ema50: ema50[i],
            ema200: ema200[i],
            rsi14: None,
            atr14: None,
            vwap: None,
            obv: None,
            macd: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64 * 0.5;
                Candle {
                    time: i as i64 * 60,
                    open: base - 0.2,
                    high: base + 0.5,
                    low: base - 0.5,
                    close: base,
                    volume: Some(1_000.0),
                }
            })
            .collect()
    }

    #[test]
    fn output_is_index_aligned_with_input() {
        let series = rising(250);
        let enriched = enrich(&series);
        assert_eq!(enriched.len(), series.len());
        for (e, c) in enriched.iter().zip(&series) {
            assert_eq!(e.candle.time, c.time);
        }
    }

    #[test]
    fn warm_up_fields_are_none_then_some() {
        let series = rising(250);
        let enriched = enrich(&series);
        assert!(enriched[19].ema21.is_none());
        assert!(enriched[20].ema21.is_some());
        assert!(enriched[198].ema200.is_none());
        assert!(enriched[199].ema200.is_some());
        assert!(enriched[13].rsi14.is_none());
        assert!(enriched[14].rsi14.is_some());
        // MACD needs slow seed + 8 more defined values: 25 + 8 = 33.
        assert!(enriched[32].macd.is_none());
        assert!(enriched[33].macd.is_some());
        // VWAP and OBV are defined from the first bar.
        assert!(enriched[0].vwap.is_some());
        assert!(enriched[0].obv.is_some());
    }

    #[test]
    fn ema_only_enrichment_leaves_momentum_fields_unset() {
        let series = rising(250);
        let enriched = enrich_emas(&series);
        let last = enriched.last().unwrap();
        assert!(last.ema200.is_some());
        assert!(last.rsi14.is_none());
        assert!(last.vwap.is_none());
        assert!(last.macd.is_none());
    }
}
