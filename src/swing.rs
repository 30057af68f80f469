use crate::model::candle::Candle;
use crate::model::swing::{SwingKind, SwingPoint};

/// Candles required on each side of a confirmed extremum.
pub const SWING_WING: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct SwingSet {
    pub highs: Vec<SwingPoint>,
    pub lows: Vec<SwingPoint>,
}

impl SwingSet {
    pub fn last_highs(&self, n: usize) -> &[SwingPoint] {
        let start = self.highs.len().saturating_sub(n);
        &self.highs[start..]
    }

    pub fn last_lows(&self, n: usize) -> &[SwingPoint] {
        let start = self.lows.len().saturating_sub(n);
        &self.lows[start..]
    }
}

/// Scan for local extrema with a symmetric two-candle wing on each side.
///
/// Comparisons are strict, so a plateau never double-counts; indices
/// without both wings available are ineligible. Output is ordered by
/// index, which is time order.
pub fn detect_swings(candles: &[Candle]) -> SwingSet {
    let mut set = SwingSet::default();
    if candles.len() < 2 * SWING_WING + 1 {
        return set;
    }

    for i in SWING_WING..candles.len() - SWING_WING {
        let high = candles[i].high;
        if high > candles[i - 1].high
            && high > candles[i - 2].high
            && high > candles[i + 1].high
            && high > candles[i + 2].high
        {
            set.highs.push(SwingPoint {
                index: i,
                price: high,
                kind: SwingKind::High,
            });
        }

        let low = candles[i].low;
        if low < candles[i - 1].low
            && low < candles[i - 2].low
            && low < candles[i + 1].low
            && low < candles[i + 2].low
        {
            set.lows.push(SwingPoint {
                index: i,
                price: low,
                kind: SwingKind::Low,
            });
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_highs_lows(highs: &[f64], lows: &[f64]) -> Vec<Candle> {
        highs
            .iter()
            .zip(lows.iter())
            .enumerate()
            .map(|(i, (&h, &l))| {
                let mid = (h + l) / 2.0;
                Candle::new(60 * (i as i64 + 1), mid, h, l, mid, 1.0).unwrap()
            })
            .collect()
    }

    #[test]
    fn detects_reference_swing_highs() {
        let highs = [10.0, 12.0, 15.0, 11.0, 9.0, 14.0, 18.0, 13.0, 10.0, 8.0];
        let lows: Vec<f64> = highs.iter().map(|h| h - 1.0).collect();
        let set = detect_swings(&from_highs_lows(&highs, &lows));

        let indices: Vec<usize> = set.highs.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![2, 6]);
        assert!((set.highs[0].price - 15.0).abs() < f64::EPSILON);
        assert!((set.highs[1].price - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn plateau_equality_does_not_qualify() {
        // Strict comparison: the repeated 15 is not a swing.
        let highs = [10.0, 15.0, 15.0, 11.0, 9.0, 8.0, 7.0];
        let lows: Vec<f64> = highs.iter().map(|h| h - 1.0).collect();
        let set = detect_swings(&from_highs_lows(&highs, &lows));
        assert!(set.highs.is_empty());
    }

    #[test]
    fn detects_swing_lows_in_order() {
        let lows = [10.0, 8.0, 5.0, 9.0, 11.0, 7.0, 3.0, 6.0, 9.0, 12.0];
        let highs: Vec<f64> = lows.iter().map(|l| l + 1.0).collect();
        let set = detect_swings(&from_highs_lows(&highs, &lows));

        let indices: Vec<usize> = set.lows.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![2, 6]);
        assert_eq!(set.lows[0].kind, SwingKind::Low);
    }

    #[test]
    fn too_few_candles_yield_nothing() {
        let highs = [1.0, 5.0, 2.0, 1.5];
        let lows: Vec<f64> = highs.iter().map(|h| h - 1.0).collect();
        let set = detect_swings(&from_highs_lows(&highs, &lows));
        assert!(set.highs.is_empty());
        assert!(set.lows.is_empty());
    }

    #[test]
    fn last_n_accessors_clamp() {
        let highs = [10.0, 12.0, 15.0, 11.0, 9.0, 14.0, 18.0, 13.0, 10.0, 8.0];
        let lows: Vec<f64> = highs.iter().map(|h| h - 1.0).collect();
        let set = detect_swings(&from_highs_lows(&highs, &lows));
        assert_eq!(set.last_highs(1).len(), 1);
        assert_eq!(set.last_highs(5).len(), 2);
        assert_eq!(set.last_highs(1)[0].index, 6);
    }
}
