use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

fn default_closed() -> bool {
    true
}

/// One OHLCV bar. `time` is epoch seconds; the feed normalizes
/// millisecond timestamps before candles reach the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// False while the bar is still forming and may be replaced in place.
    #[serde(default = "default_closed")]
    pub is_closed: bool,
}

impl Candle {
    pub fn new(
        time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, AnalysisError> {
        let candle = Self {
            time,
            open,
            high,
            low,
            close,
            volume,
            is_closed: true,
        };
        candle.validate()?;
        Ok(candle)
    }

    pub fn open_at(mut self, closed: bool) -> Self {
        self.is_closed = closed;
        self
    }

    fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
        {
            return Err(AnalysisError::InvalidCandle(format!(
                "non-finite price at time {}",
                self.time
            )));
        }
        if self.high < self.open.max(self.close) {
            return Err(AnalysisError::InvalidCandle(format!(
                "high {} below body at time {}",
                self.high, self.time
            )));
        }
        if self.low > self.open.min(self.close) {
            return Err(AnalysisError::InvalidCandle(format!(
                "low {} above body at time {}",
                self.low, self.time
            )));
        }
        if self.high < self.low {
            return Err(AnalysisError::InvalidCandle(format!(
                "high {} below low {} at time {}",
                self.high, self.low, self.time
            )));
        }
        if self.volume < 0.0 || !self.volume.is_finite() {
            return Err(AnalysisError::InvalidCandle(format!(
                "bad volume {} at time {}",
                self.volume, self.time
            )));
        }
        Ok(())
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Volume filters skip bars the feed delivered without volume.
    pub fn has_volume(&self) -> bool {
        self.volume > 0.0
    }
}
