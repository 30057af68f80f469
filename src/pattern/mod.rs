//! Chart and candlestick pattern rules.
//!
//! Rules live in an explicit ordered list evaluated top to bottom; the
//! first rule to claim a time slot wins and later rules skip that slot.
//! Each rule is independently toggleable through the filter config.

pub mod engulfing;
pub mod single_bar;
pub mod structure;
pub mod volume;

use std::collections::HashSet;

use crate::config::AnalysisConfig;
use crate::model::candle::Candle;
use crate::model::marker::{PatternKind, PatternMarker};
use crate::swing::SwingSet;

/// Read-only inputs for one pattern pass: the closed candles, their swing
/// points, and the derived support/resistance levels.
pub struct ScanContext<'a> {
    pub candles: &'a [Candle],
    pub swings: &'a SwingSet,
    pub support: f64,
    pub resistance: f64,
}

pub trait PatternRule: Send + Sync {
    fn kind(&self) -> PatternKind;

    /// Markers this rule finds over the whole context, in time order.
    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker>;
}

pub struct PatternClassifier {
    rules: Vec<Box<dyn PatternRule>>,
}

impl PatternClassifier {
    /// Build the rule list in priority order: engulfing, then single-bar,
    /// then structural, then volume-based.
    pub fn new(config: &AnalysisConfig) -> Self {
        let all: Vec<Box<dyn PatternRule>> = vec![
            Box::new(engulfing::BullishEngulfing),
            Box::new(engulfing::BearishEngulfing),
            Box::new(single_bar::Doji),
            Box::new(single_bar::Hammer),
            Box::new(single_bar::ShootingStar),
            Box::new(structure::DoubleTop),
            Box::new(structure::DoubleBottom),
            Box::new(structure::HeadAndShoulders),
            Box::new(volume::SmcSpike {
                require_volume: config.require_volume,
            }),
        ];
        let rules = all
            .into_iter()
            .filter(|r| config.pattern_enabled(r.kind()))
            .collect();
        Self { rules }
    }

    /// Run every enabled rule and merge, deduplicating by time: the first
    /// rule to mark a candle owns it for this pass.
    pub fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let mut taken: HashSet<i64> = HashSet::new();
        let mut markers = Vec::new();
        for rule in &self.rules {
            for marker in rule.scan(ctx) {
                if taken.insert(marker.time) {
                    markers.push(marker);
                }
            }
        }
        markers.sort_by_key(|m| m.time);
        markers
    }
}
