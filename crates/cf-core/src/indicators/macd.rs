use super::ema::ema;
use super::ClosePrice;

/// MACD line, signal line and histogram, index-aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// MACD: `line = EMA(fast) − EMA(slow)`, `signal = EMA(line, signal_period)`,
/// `histogram = line − signal`.
///
/// The line is defined from the slow EMA's seed onward. The signal line is
/// the EMA of the *defined* line values only, shifted back to the source
/// index. Input timestamps are strictly increasing and index-aligned, so
/// aligning by index offset and aligning by time coincide. Undefined entries
/// are excluded, never zero-filled.
pub fn macd<T: ClosePrice>(
    series: &[T],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdOutput {
    let n = series.len();
    let fast_ema = ema(series, fast);
    let slow_ema = ema(series, slow);

    let mut line = vec![None; n];
    for i in 0..n {
        if let (Some(f), Some(s)) = (fast_ema[i], slow_ema[i]) {
            line[i] = Some(f - s);
        }
    }

    // Both EMAs are contiguous once seeded, so the defined part of the line
    // is a single suffix.
    let mut signal = vec![None; n];
    if let Some(offset) = line.iter().position(Option::is_some) {
        let defined: Vec<f64> = line[offset..].iter().filter_map(|v| *v).collect();
        for (j, v) in ema(&defined, signal_period).into_iter().enumerate() {
            signal[offset + j] = v;
        }
    }

    let mut histogram = vec![None; n];
    for i in 0..n {
        if let (Some(m), Some(s)) = (line[i], signal[i]) {
            histogram[i] = Some(m - s);
        }
    }

    MacdOutput {
        line,
        signal,
        histogram,
    }
}
