use crate::candle::Candle;

/// On-Balance Volume — running sum starting at 0: add the bar's volume when
/// it closes above the previous close, subtract when below, hold when equal.
pub fn obv(series: &[Candle]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(series.len());
    let mut running = 0.0;

    for (i, bar) in series.iter().enumerate() {
        if i > 0 {
            let prev_close = series[i - 1].close;
            if bar.close > prev_close {
                running += bar.volume_or_zero();
            } else if bar.close < prev_close {
                running -= bar.volume_or_zero();
            }
        }
        out.push(Some(running));
    }
    out
}
