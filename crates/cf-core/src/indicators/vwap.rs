use crate::candle::Candle;

/// Volume-Weighted Average Price — running cumulative
/// `Σ(typical·volume) / Σvolume`, defined from the very first candle.
///
/// While cumulative volume is zero (volume missing or zero so far) the value
/// falls back to the bar's typical price.
pub fn vwap(series: &[Candle]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(series.len());
    let mut cum_tpv = 0.0;
    let mut cum_vol = 0.0;

    for bar in series {
        let tp = bar.typical_price();
        let vol = bar.volume_or_zero();
        cum_tpv += tp * vol;
        cum_vol += vol;
        out.push(Some(if cum_vol > 0.0 { cum_tpv / cum_vol } else { tp }));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64, volume: Option<f64>) -> Candle {
        Candle {
            time: 0,
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    #[test]
    fn zero_volume_falls_back_to_typical_price() {
        let series = [bar(100.0, None), bar(102.0, None)];
        let out = vwap(&series);
        assert_eq!(out[0], Some(100.0));
        assert_eq!(out[1], Some(102.0));
    }

    #[test]
    fn weights_by_volume() {
        let series = [bar(100.0, Some(1.0)), bar(110.0, Some(3.0))];
        let out = vwap(&series);
        // (100*1 + 110*3) / 4 = 107.5
        assert!((out[1].unwrap() - 107.5).abs() < 1e-12);
    }

    #[test]
    fn defined_at_every_index() {
        let series: Vec<Candle> = (0..10).map(|i| bar(100.0 + i as f64, Some(5.0))).collect();
        assert!(vwap(&series).iter().all(Option::is_some));
    }
}
