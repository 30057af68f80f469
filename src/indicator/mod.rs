pub mod ema;
pub mod rsi;
pub mod sma;

use crate::model::candle::Candle;

/// Same-length-as-window series; indices before the minimum lookback are
/// absent rather than zero.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Fast/slow SMA and EMA series computed together over one candle set, so
/// every pass sees mutually consistent values even after eviction or an
/// in-place tail replacement.
#[derive(Debug, Clone)]
pub struct MaSet {
    pub sma_fast: IndicatorSeries,
    pub sma_slow: IndicatorSeries,
    pub ema_fast: IndicatorSeries,
    pub ema_slow: IndicatorSeries,
}

impl MaSet {
    fn pick<'a>(&'a self, use_ema: bool) -> (&'a IndicatorSeries, &'a IndicatorSeries) {
        if use_ema {
            (&self.ema_fast, &self.ema_slow)
        } else {
            (&self.sma_fast, &self.sma_slow)
        }
    }

    /// Fast series for trend math; SMA is the canonical choice, EMA opt-in.
    pub fn trend_fast(&self, use_ema: bool) -> &IndicatorSeries {
        self.pick(use_ema).0
    }

    pub fn trend_slow(&self, use_ema: bool) -> &IndicatorSeries {
        self.pick(use_ema).1
    }
}

#[derive(Debug, Clone)]
pub struct MovingAverageEngine {
    fast_period: usize,
    slow_period: usize,
}

impl MovingAverageEngine {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        assert!(
            fast_period < slow_period,
            "fast period must be less than slow period"
        );
        Self {
            fast_period,
            slow_period,
        }
    }

    /// Recompute all four series over the whole window. Recomputation is
    /// never incremental across passes.
    pub fn compute(&self, candles: &[Candle]) -> MaSet {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        MaSet {
            sma_fast: sma::sma_series(&closes, self.fast_period),
            sma_slow: sma::sma_series(&closes, self.slow_period),
            ema_fast: ema::ema_series(&closes, self.fast_period),
            ema_slow: ema::ema_series(&closes, self.slow_period),
        }
    }
}

/// Last two present values of a series, newest last.
pub fn last_two(series: &IndicatorSeries) -> Option<(f64, f64)> {
    let mut present = series.iter().rev().filter_map(|v| *v);
    let newest = present.next()?;
    let prev = present.next()?;
    Some((prev, newest))
}
