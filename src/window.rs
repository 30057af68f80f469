use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::model::candle::Candle;

pub const DEFAULT_WINDOW_CAP: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// New bar appended at the tail.
    Appended,
    /// The in-progress tail bar was replaced in place.
    Replaced,
}

/// Ordered, time-deduplicated candle sequence with FIFO eviction.
///
/// Sole mutable state of the pipeline; every derived artifact is a pure
/// function of a snapshot of this window.
#[derive(Debug, Clone)]
pub struct CandleWindow {
    candles: Vec<Candle>,
    cap: usize,
}

impl CandleWindow {
    pub fn new(cap: usize) -> Self {
        assert!(cap > 0, "window cap must be > 0");
        Self {
            candles: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Append a candle. Same time as the tail replaces the tail (the
    /// in-progress bar updating tick by tick); a strictly newer time is
    /// appended; anything older is rejected with the window unchanged.
    pub fn append(&mut self, candle: Candle) -> Result<AppendOutcome, AnalysisError> {
        match self.candles.last() {
            None => {
                self.candles.push(candle);
                Ok(AppendOutcome::Appended)
            }
            Some(last) if candle.time == last.time => {
                let idx = self.candles.len() - 1;
                self.candles[idx] = candle;
                Ok(AppendOutcome::Replaced)
            }
            Some(last) if candle.time > last.time => {
                self.candles.push(candle);
                if self.candles.len() > self.cap {
                    let excess = self.candles.len() - self.cap;
                    self.candles.drain(..excess);
                    debug!(evicted = excess, len = self.candles.len(), "window at cap");
                }
                Ok(AppendOutcome::Appended)
            }
            Some(last) => {
                warn!(
                    time = candle.time,
                    last = last.time,
                    "rejected out-of-order candle"
                );
                Err(AnalysisError::OutOfOrderCandle {
                    time: candle.time,
                    last: last.time,
                })
            }
        }
    }

    /// Last `n` candles, or all if fewer exist.
    pub fn snapshot(&self, n: usize) -> &[Candle] {
        let start = self.candles.len().saturating_sub(n);
        &self.candles[start..]
    }

    pub fn all(&self) -> &[Candle] {
        &self.candles
    }

    /// All candles except a still-forming tail bar. Pattern scans run on
    /// this view so an unfinished bar cannot trigger a false match.
    pub fn closed(&self) -> &[Candle] {
        match self.candles.last() {
            Some(last) if !last.is_closed => &self.candles[..self.candles.len() - 1],
            _ => &self.candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for CandleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAP)
    }
}
