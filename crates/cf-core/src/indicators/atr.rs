use crate::candle::Candle;

/// Average True Range — Wilder smoothing.
///
/// True range needs a previous close, so the first TR exists at index 1; the
/// seed is the mean of the first `period` true ranges (indices `1..=period`)
/// and lands at index `period`. Later bars use
/// `atr[i] = (atr[i−1]·(period−1) + tr[i]) / period`.
pub fn atr(series: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; series.len()];
    if period == 0 || series.len() <= period {
        return out;
    }

    let mut sum = 0.0;
    for i in 1..=period {
        sum += true_range(&series[i], series[i - 1].close);
    }
    let mut value = sum / period as f64;
    out[period] = Some(value);

    for i in (period + 1)..series.len() {
        let tr = true_range(&series[i], series[i - 1].close);
        value = (value * (period as f64 - 1.0) + tr) / period as f64;
        out[i] = Some(value);
    }
    out
}

fn true_range(bar: &Candle, prev_close: f64) -> f64 {
    (bar.high - bar.low)
        .max((bar.high - prev_close).abs())
        .max((bar.low - prev_close).abs())
}
