use crate::model::candle::Candle;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Zero-average substitute so `RS` never divides by zero.
const ZERO_AVG_EPSILON: f64 = 1e-3;

/// Wilder-style relative strength over the trailing `period + 1` closes.
///
/// Average gain/loss divide by `period` regardless of how many deltas were
/// available; with fewer than `period + 1` candles the computation degrades
/// to the best-available shorter window instead of failing.
pub fn rsi(candles: &[Candle], period: usize) -> Option<f64> {
    assert!(period > 0, "RSI period must be > 0");
    if candles.len() < 2 {
        return None;
    }

    let take = (period + 1).min(candles.len());
    let closes: Vec<f64> = candles[candles.len() - take..]
        .iter()
        .map(|c| c.close)
        .collect();

    let mut gains = 0.0;
    let mut losses = 0.0;
    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gains += delta;
        } else {
            losses += -delta;
        }
    }

    let mut avg_gain = gains / period as f64;
    let mut avg_loss = losses / period as f64;
    if avg_gain == 0.0 {
        avg_gain = ZERO_AVG_EPSILON;
    }
    if avg_loss == 0.0 {
        avg_loss = ZERO_AVG_EPSILON;
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

pub fn is_overbought(rsi: f64) -> bool {
    rsi > 70.0
}

pub fn is_oversold(rsi: f64) -> bool {
    rsi < 30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(60 * (i as i64 + 1), c, c, c, c, 1.0).unwrap())
            .collect()
    }

    #[test]
    fn all_gains_saturates_high() {
        let cs = candles(&(1..=20).map(|i| i as f64).collect::<Vec<_>>());
        let v = rsi(&cs, 14).unwrap();
        assert!(v > 99.0, "expected near-100 RSI, got {v}");
        assert!(is_overbought(v));
    }

    #[test]
    fn all_losses_saturates_low() {
        let cs = candles(&(1..=20).rev().map(|i| i as f64).collect::<Vec<_>>());
        let v = rsi(&cs, 14).unwrap();
        assert!(v < 1.0, "expected near-0 RSI, got {v}");
        assert!(is_oversold(v));
    }

    #[test]
    fn flat_series_is_balanced() {
        // Both averages hit the epsilon substitute, so RS = 1 and RSI = 50.
        let cs = candles(&[5.0; 20]);
        let v = rsi(&cs, 14).unwrap();
        assert!((v - 50.0).abs() < 1e-9);
    }

    #[test]
    fn degrades_on_short_window() {
        let cs = candles(&[1.0, 2.0, 3.0]);
        assert!(rsi(&cs, 14).is_some());
    }

    #[test]
    fn single_candle_is_absent() {
        let cs = candles(&[1.0]);
        assert_eq!(rsi(&cs, 14), None);
    }

    #[test]
    fn bounded_to_unit_range() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + 10.0 * ((i as f64) * 0.7).sin())
            .collect();
        let cs = candles(&closes);
        let v = rsi(&cs, 14).unwrap();
        assert!((0.0..=100.0).contains(&v));
    }
}
