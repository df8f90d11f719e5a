use super::ClosePrice;

/// Relative Strength Index — Wilder smoothing of average gain/loss.
///
/// The seed averages come from the first `period` deltas, so the first
/// computable index is `period`; a series of `period + 1` bars or fewer is
/// entirely `None`. When the average loss is zero RSI saturates at 100.
/// Output is bounded to [0, 100] by construction.
pub fn rsi<T: ClosePrice>(series: &[T], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; series.len()];
    if period == 0 || series.len() <= period {
        return out;
    }

    let closes: Vec<f64> = series.iter().map(ClosePrice::close_price).collect();

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss += -change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    for i in period..closes.len() {
        if i > period {
            let change = closes[i] - closes[i - 1];
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);
            let w = period as f64;
            avg_gain = (avg_gain * (w - 1.0) + gain) / w;
            avg_loss = (avg_loss * (w - 1.0) + loss) / w;
        }

        out[i] = Some(if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_is_all_none() {
        let prices: Vec<f64> = (0..14).map(|i| i as f64).collect();
        assert!(rsi(&prices, 14).iter().all(Option::is_none));
    }

    #[test]
    fn values_stay_in_bounds() {
        let prices: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        for v in rsi(&prices, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "rsi {v} out of bounds");
        }
    }

    #[test]
    fn all_increasing_saturates_at_100() {
        let prices: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&prices, 14);
        assert_eq!(out.last().copied().flatten(), Some(100.0));
    }

    #[test]
    fn all_decreasing_converges_to_0() {
        let prices: Vec<f64> = (0..50).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&prices, 14);
        let last = out.last().copied().flatten().unwrap();
        assert!(last < 1e-9, "expected RSI near 0, got {last}");
    }

    #[test]
    fn first_computable_index_is_period() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&prices, 14);
        assert!(out[..14].iter().all(Option::is_none));
        assert!(out[14..].iter().all(Option::is_some));
    }
}
