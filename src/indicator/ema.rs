use super::sma::Sma;

/// Exponential Moving Average, seeded by the SMA of the first `period`
/// values, then `ema = (value - prev) * k + prev` with `k = 2/(period+1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
    ema: Option<f64>,
    seed: Sma,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "EMA period must be > 0");
        Self {
            period,
            multiplier: 2.0 / (period as f64 + 1.0),
            ema: None,
            seed: Sma::new(period),
        }
    }

    pub fn push(&mut self, value: f64) -> Option<f64> {
        match self.ema {
            Some(prev) => {
                self.ema = Some((value - prev) * self.multiplier + prev);
            }
            None => {
                // Seed with the SMA once it becomes available.
                self.ema = self.seed.push(value);
            }
        }
        self.ema
    }

    pub fn value(&self) -> Option<f64> {
        self.ema
    }

    pub fn is_ready(&self) -> bool {
        self.ema.is_some()
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// Whole-series EMA aligned to the input: `None` before index `period - 1`,
/// the SMA seed at `period - 1`, the recurrence afterwards. All `None` when
/// the series is shorter than the period.
pub fn ema_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if closes.len() < period {
        return vec![None; closes.len()];
    }
    let mut ema = Ema::new(period);
    closes.iter().map(|&c| ema.push(c)).collect()
}
