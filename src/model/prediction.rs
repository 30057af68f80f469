use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::signal::SignalKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
}

/// Swing-structure verdict over the prediction window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Uptrend,
    Downtrend,
    Range,
}

/// Long-horizon verdict from the fast/slow moving-average pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendBias {
    Bullish,
    Bearish,
    Sideways,
}

/// Named prediction pattern. Assignment is a strict priority cascade,
/// first match wins; `RangeBound` is the fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternLabel {
    StrongUptrend,
    StrongDowntrend,
    ResistanceBreakout,
    SupportBreakdown,
    SupportReversal,
    ResistanceReversal,
    BullishBias,
    BearishBias,
    RangeBound,
}

impl PatternLabel {
    pub fn tag(&self) -> &'static str {
        match self {
            PatternLabel::StrongUptrend => "STRONG_UPTREND",
            PatternLabel::StrongDowntrend => "STRONG_DOWNTREND",
            PatternLabel::ResistanceBreakout => "RESISTANCE_BREAKOUT",
            PatternLabel::SupportBreakdown => "SUPPORT_BREAKDOWN",
            PatternLabel::SupportReversal => "SUPPORT_REVERSAL",
            PatternLabel::ResistanceReversal => "RESISTANCE_REVERSAL",
            PatternLabel::BullishBias => "BULLISH_BIAS",
            PatternLabel::BearishBias => "BEARISH_BIAS",
            PatternLabel::RangeBound => "RANGE_BOUND",
        }
    }

    pub fn is_breakout(&self) -> bool {
        matches!(
            self,
            PatternLabel::ResistanceBreakout | PatternLabel::SupportBreakdown
        )
    }

    pub fn is_reversal(&self) -> bool {
        matches!(
            self,
            PatternLabel::SupportReversal | PatternLabel::ResistanceReversal
        )
    }
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The single current prediction, fully rebuilt every analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub direction: Direction,
    /// Heuristic agreement score clamped to [40, 95]; not a probability.
    pub confidence: f64,
    pub pattern: PatternLabel,
    pub target_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub signals: Vec<SignalKind>,
    pub current_price: f64,
    pub sma_short: f64,
    pub sma_long: f64,
    pub support: f64,
    pub resistance: f64,
    pub trend: Trend,
}

/// Long-horizon trend report from the fast/slow MA pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAnalysis {
    pub trend: TrendBias,
    /// Integer percentage of dominant-side signal share.
    pub strength: u8,
    pub signals: Vec<SignalKind>,
}

impl TrendAnalysis {
    pub fn sideways() -> Self {
        Self {
            trend: TrendBias::Sideways,
            strength: 0,
            signals: Vec::new(),
        }
    }
}
