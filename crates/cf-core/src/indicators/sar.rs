use crate::candle::Candle;

/// Parabolic SAR.
///
/// Iterative: each bar extends the SAR toward the extreme point by the
/// acceleration factor `af`; a price cross flips direction, resetting `af`
/// and seeding the new extreme from the breaching price; a fresh extreme in
/// the current direction bumps `af` by `increment_af` up to `max_af`. The SAR
/// is clamped so it never penetrates the prior two bars' low (long) or high
/// (short). All iteration state lives in this function's locals.
///
/// Needs at least 2 bars; shorter input is entirely `None`.
pub fn parabolic_sar(
    series: &[Candle],
    initial_af: f64,
    increment_af: f64,
    max_af: f64,
) -> Vec<Option<f64>> {
    let mut out = vec![None; series.len()];
    if series.len() < 2 {
        return out;
    }

    // Initial direction from the first two closes.
    let mut is_long = series[1].close > series[0].close;
    let mut af = initial_af;
    let mut ep = if is_long {
        series[0].high.max(series[1].high)
    } else {
        series[0].low.min(series[1].low)
    };
    let mut sar = if is_long {
        series[0].low
    } else {
        series[0].high
    };
    out[0] = Some(sar);

    for i in 1..series.len() {
        let prev_sar = sar;
        let prev_af = af;
        let prev_ep = ep;
        let bar = &series[i];

        if is_long {
            sar = prev_sar + prev_af * (prev_ep - prev_sar);
            if bar.low < sar {
                // Flip short: SAR becomes the prior uptrend's extreme.
                is_long = false;
                sar = prev_ep;
                ep = bar.low;
                af = initial_af;
            } else if bar.high > prev_ep {
                ep = bar.high;
                af = (prev_af + increment_af).min(max_af);
            }
        } else {
            sar = prev_sar - prev_af * (prev_sar - prev_ep);
            if bar.high > sar {
                is_long = true;
                sar = prev_ep;
                ep = bar.high;
                af = initial_af;
            } else if bar.low < prev_ep {
                ep = bar.low;
                af = (prev_af + increment_af).min(max_af);
            }
        }

        // Clamp: never inside the prior two bars' range.
        if is_long {
            let floor = if i > 1 {
                series[i - 1].low.min(series[i - 2].low)
            } else {
                series[i - 1].low
            };
            sar = sar.min(floor);
            if bar.low < sar {
                sar = bar.low;
            }
        } else {
            let cap = if i > 1 {
                series[i - 1].high.max(series[i - 2].high)
            } else {
                series[i - 1].high
            };
            sar = sar.max(cap);
            if bar.high > sar {
                sar = bar.high;
            }
        }

        out[i] = Some(sar);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            time: 0,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    fn uptrend(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                bar(base, base + 1.0, base - 1.0, base + 0.8)
            })
            .collect()
    }

    #[test]
    fn too_short_is_all_none() {
        let series = uptrend(1);
        assert!(parabolic_sar(&series, 0.02, 0.02, 0.2)
            .iter()
            .all(Option::is_none));
    }

    #[test]
    fn uptrend_sar_stays_below_two_bar_trailing_low() {
        let series = uptrend(50);
        let out = parabolic_sar(&series, 0.02, 0.02, 0.2);
        for i in 2..series.len() {
            let trailing_low = series[i - 1].low.min(series[i - 2].low);
            let sar = out[i].unwrap();
            assert!(
                sar <= trailing_low + 1e-9,
                "sar {sar} above trailing low {trailing_low} at bar {i}"
            );
        }
    }

    #[test]
    fn reversal_flips_sar_to_prior_extreme_side() {
        // Strong rise then a hard break below the rising SAR.
        let mut series = uptrend(20);
        let last = series.last().copied().unwrap();
        series.push(bar(last.close, last.close + 0.2, 80.0, 80.5));
        let out = parabolic_sar(&series, 0.02, 0.02, 0.2);
        let flipped = out.last().copied().flatten().unwrap();
        // After the flip the SAR sits at/above the prior uptrend highs.
        assert!(flipped >= series[series.len() - 2].high);
    }

    #[test]
    fn acceleration_is_capped() {
        // A very long one-way trend must not blow past the extreme point:
        // SAR approaches but never exceeds the extreme it chases.
        let series = uptrend(300);
        let out = parabolic_sar(&series, 0.02, 0.02, 0.2);
        for (i, sar) in out.iter().enumerate().skip(1) {
            assert!(sar.unwrap() < series[i].high);
        }
    }
}
