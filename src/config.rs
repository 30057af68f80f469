use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::model::marker::PatternKind;

fn default_window_cap() -> usize {
    500
}
fn default_marker_cap() -> usize {
    50
}
fn default_sma_short() -> usize {
    9
}
fn default_sma_long() -> usize {
    20
}
fn default_trend_fast() -> usize {
    25
}
fn default_trend_slow() -> usize {
    99
}
fn default_rsi_period() -> usize {
    14
}
fn default_min_prediction_candles() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_window_cap")]
    pub window_cap: usize,
    #[serde(default = "default_marker_cap")]
    pub marker_cap: usize,
    #[serde(default = "default_sma_short")]
    pub sma_short: usize,
    #[serde(default = "default_sma_long")]
    pub sma_long: usize,
    #[serde(default = "default_trend_fast")]
    pub trend_fast: usize,
    #[serde(default = "default_trend_slow")]
    pub trend_slow: usize,
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    #[serde(default = "default_min_prediction_candles")]
    pub min_prediction_candles: usize,
    /// Canonical trend math uses SMA; flip to run the same rules on EMA.
    #[serde(default)]
    pub use_ema_for_trend: bool,
    /// When set, volume-gated rules drop out entirely if any scanned candle
    /// lacks volume, instead of skipping just the affected bars.
    #[serde(default)]
    pub require_volume: bool,
    /// Pattern-name -> enabled. Missing names default to enabled; unknown
    /// names are ignored.
    #[serde(default)]
    pub filters: HashMap<String, bool>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_cap: default_window_cap(),
            marker_cap: default_marker_cap(),
            sma_short: default_sma_short(),
            sma_long: default_sma_long(),
            trend_fast: default_trend_fast(),
            trend_slow: default_trend_slow(),
            rsi_period: default_rsi_period(),
            min_prediction_candles: default_min_prediction_candles(),
            use_ema_for_trend: false,
            require_volume: false,
            filters: HashMap::new(),
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: AnalysisConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.window_cap > 0, "window_cap must be > 0");
        anyhow::ensure!(self.marker_cap > 0, "marker_cap must be > 0");
        anyhow::ensure!(
            self.sma_short < self.sma_long,
            "sma_short must be less than sma_long"
        );
        anyhow::ensure!(
            self.trend_fast < self.trend_slow,
            "trend_fast must be less than trend_slow"
        );
        anyhow::ensure!(self.rsi_period > 0, "rsi_period must be > 0");
        // The scorer reads the last two candles of the trailing slice.
        anyhow::ensure!(
            self.min_prediction_candles >= 2,
            "min_prediction_candles must be >= 2"
        );
        Ok(())
    }

    pub fn filter_enabled(&self, name: &str) -> bool {
        self.filters.get(name).copied().unwrap_or(true)
    }

    pub fn pattern_enabled(&self, kind: PatternKind) -> bool {
        self.filter_enabled(filter_name(kind))
    }
}

/// Canonical filter names, matching the feed collaborator's keys.
pub fn filter_name(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::BullishEngulfing => "Bullish Engulfing",
        PatternKind::BearishEngulfing => "Bearish Engulfing",
        PatternKind::Doji => "Doji",
        PatternKind::Hammer => "Hammer",
        PatternKind::ShootingStar => "Shooting Star",
        PatternKind::DoubleTop => "Double Top",
        PatternKind::DoubleBottom => "Double Bottom",
        PatternKind::HeadAndShoulders => "Head & Shoulders",
        PatternKind::Smc => "SMC",
        PatternKind::SupportLevel | PatternKind::ResistanceLevel => "Bull Prediction",
        PatternKind::BullPrediction | PatternKind::UptrendStructure => "Bull Prediction",
        PatternKind::BearPrediction | PatternKind::DowntrendStructure => "Bear Prediction",
        PatternKind::RangePrediction => "Range Prediction",
        PatternKind::BreakoutPrediction => "Breakout Prediction",
        PatternKind::ReversalPrediction => "Reversal Prediction",
    }
}
