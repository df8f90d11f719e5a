use super::ClosePrice;

/// Exponential Moving Average.
///
/// The seed at index `period - 1` is the simple average of the first `period`
/// closes; afterwards `ema[i] = close[i]·k + ema[i−1]·(1−k)` with
/// `k = 2/(period+1)`. Entries before the seed are `None`, and a series
/// shorter than `period` is entirely `None`.
pub fn ema<T: ClosePrice>(series: &[T], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; series.len()];
    if period == 0 || series.len() < period {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = series[..period]
        .iter()
        .map(ClosePrice::close_price)
        .sum::<f64>()
        / period as f64;
    out[period - 1] = Some(seed);

    let mut prev = seed;
    for i in period..series.len() {
        let value = series[i].close_price() * k + prev * (1.0 - k);
        out[i] = Some(value);
        prev = value;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_than_period_is_all_none() {
        let prices = [10.0, 11.0];
        assert!(ema(&prices, 3).iter().all(Option::is_none));
    }

    #[test]
    fn first_computable_index_is_period_minus_one() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let out = ema(&prices, 5);
        assert_eq!(out.len(), prices.len());
        assert!(out[..4].iter().all(Option::is_none));
        assert!(out[4..].iter().all(Option::is_some));
    }

    #[test]
    fn seed_and_recurrence_hand_computed() {
        // period 3, k = 0.5; seed = (10+11+12)/3 = 11
        let prices = [10.0, 11.0, 12.0, 14.0];
        let out = ema(&prices, 3);
        assert!((out[2].unwrap() - 11.0).abs() < 1e-12);
        // 14*0.5 + 11*0.5 = 12.5
        assert!((out[3].unwrap() - 12.5).abs() < 1e-12);
    }
}
