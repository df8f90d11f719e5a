use super::ClosePrice;

/// One bar's Bollinger Bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BbPoint {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands over a rolling window of closes: middle = SMA, bands at
/// `±num_std` population standard deviations (ddof = 0).
pub fn bollinger_bands<T: ClosePrice>(
    series: &[T],
    period: usize,
    num_std: f64,
) -> Vec<Option<BbPoint>> {
    let mut out = vec![None; series.len()];
    if period == 0 || series.len() < period {
        return out;
    }

    let closes: Vec<f64> = series.iter().map(ClosePrice::close_price).collect();
    for i in (period - 1)..closes.len() {
        let window = &closes[i + 1 - period..=i];
        let middle = window.iter().sum::<f64>() / period as f64;
        let var = window.iter().map(|c| (c - middle).powi(2)).sum::<f64>() / period as f64;
        let sd = var.sqrt();
        out[i] = Some(BbPoint {
            upper: middle + num_std * sd,
            middle,
            lower: middle - num_std * sd,
        });
    }
    out
}
