use crate::indicator::{last_two, MaSet};
use crate::model::candle::Candle;
use crate::model::prediction::{Trend, TrendAnalysis, TrendBias};
use crate::model::signal::SignalKind;
use crate::swing::SwingSet;

/// Minimum window for the long-horizon MA verdict; anything shorter is
/// reported as sideways with zero strength rather than failing.
pub const TREND_MIN_CANDLES: usize = 100;

/// Higher-high / lower-low structure flags.
///
/// Derived from the last two swing points of each kind when at least two
/// exist; with fewer swings the flags fall back to a consecutive-bar scan,
/// so a monotonic run that never confirms a swing still reads as trending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketStructure {
    pub higher_highs: bool,
    pub higher_lows: bool,
    pub lower_highs: bool,
    pub lower_lows: bool,
}

impl MarketStructure {
    pub fn derive(candles: &[Candle], swings: &SwingSet) -> Self {
        let mut s = Self::default();

        match swings.last_highs(2) {
            [a, b] => {
                s.higher_highs = b.price > a.price;
                s.lower_highs = b.price < a.price;
            }
            _ => {
                let (hh, lh) = consecutive_run(candles, |c| c.high);
                s.higher_highs = hh;
                s.lower_highs = lh;
            }
        }

        match swings.last_lows(2) {
            [a, b] => {
                s.lower_lows = b.price < a.price;
                s.higher_lows = b.price > a.price;
            }
            _ => {
                let (hl, ll) = consecutive_run(candles, |c| c.low);
                s.higher_lows = hl;
                s.lower_lows = ll;
            }
        }
        s
    }

    pub fn verdict(&self) -> Trend {
        if self.higher_highs && self.higher_lows {
            Trend::Uptrend
        } else if self.lower_highs && self.lower_lows {
            Trend::Downtrend
        } else {
            Trend::Range
        }
    }
}

/// (strictly rising, strictly falling) over consecutive bars of `field`.
fn consecutive_run(candles: &[Candle], field: impl Fn(&Candle) -> f64) -> (bool, bool) {
    if candles.len() < 3 {
        return (false, false);
    }
    let mut rising = true;
    let mut falling = true;
    for i in 2..candles.len() {
        if field(&candles[i]) <= field(&candles[i - 1]) {
            rising = false;
        }
        if field(&candles[i]) >= field(&candles[i - 1]) {
            falling = false;
        }
    }
    (rising, falling)
}

#[derive(Debug, Clone)]
pub struct TrendClassifier {
    use_ema: bool,
}

impl TrendClassifier {
    pub fn new(use_ema: bool) -> Self {
        Self { use_ema }
    }

    /// Long-horizon verdict from the fast/slow MA pair. Bullish or bearish
    /// requires a margin of more than two signals; otherwise sideways with
    /// strength proportional to the imbalance.
    pub fn analyze(&self, candles: &[Candle], mas: &MaSet) -> TrendAnalysis {
        let fast = mas.trend_fast(self.use_ema);
        let slow = mas.trend_slow(self.use_ema);

        let (Some((prev_fast, cur_fast)), Some((prev_slow, cur_slow))) =
            (last_two(fast), last_two(slow))
        else {
            return TrendAnalysis::sideways();
        };
        if candles.len() < TREND_MIN_CANDLES {
            return TrendAnalysis::sideways();
        }
        let current_price = candles[candles.len() - 1].close;

        let mut signals = Vec::new();
        let mut bullish = 0u32;
        let mut bearish = 0u32;

        if cur_fast > cur_slow {
            signals.push(SignalKind::FastMaAboveSlow);
            bullish += 1;
        } else {
            signals.push(SignalKind::FastMaBelowSlow);
            bearish += 1;
        }

        if current_price > cur_fast {
            signals.push(SignalKind::PriceAboveFastMa);
            bullish += 1;
        } else {
            signals.push(SignalKind::PriceBelowFastMa);
            bearish += 1;
        }

        if current_price > cur_slow {
            signals.push(SignalKind::PriceAboveSlowMa);
            bullish += 1;
        } else {
            signals.push(SignalKind::PriceBelowSlowMa);
            bearish += 1;
        }

        // Both averages moving together carries double weight.
        if cur_fast > prev_fast && cur_slow > prev_slow {
            signals.push(SignalKind::MaTrendUp);
            bullish += 2;
        } else if cur_fast < prev_fast && cur_slow < prev_slow {
            signals.push(SignalKind::MaTrendDown);
            bearish += 2;
        }

        let total = (bullish + bearish) as f64;
        let (trend, strength) = if bullish > bearish + 2 {
            (
                TrendBias::Bullish,
                (bullish as f64 / total * 100.0).round().min(100.0) as u8,
            )
        } else if bearish > bullish + 2 {
            (
                TrendBias::Bearish,
                (bearish as f64 / total * 100.0).round().min(100.0) as u8,
            )
        } else {
            (
                TrendBias::Sideways,
                (bullish.abs_diff(bearish) * 10).min(100) as u8,
            )
        };

        TrendAnalysis {
            trend,
            strength,
            signals,
        }
    }
}
