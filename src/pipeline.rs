//! One analysis pass over the candle window.
//!
//! The window is the only mutable state; every `analyze` call recomputes
//! indicators, swings, patterns, trend, and the prediction from the
//! current window contents, so repeated calls without an intervening
//! append return identical reports.

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::emitter::MarkerEmitter;
use crate::error::AnalysisError;
use crate::indicator::MovingAverageEngine;
use crate::model::candle::Candle;
use crate::model::marker::PatternMarker;
use crate::model::prediction::{Prediction, TrendAnalysis};
use crate::pattern::{PatternClassifier, ScanContext};
use crate::predictor::PredictionScorer;
use crate::swing::detect_swings;
use crate::trend::TrendClassifier;
use crate::window::{AppendOutcome, CandleWindow};

/// Output of one pass: chart markers, the directional prediction when the
/// window is deep enough, and the long-horizon trend verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub markers: Vec<PatternMarker>,
    pub prediction: Option<Prediction>,
    pub trend: TrendAnalysis,
}

impl AnalysisReport {
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
            prediction: None,
            trend: TrendAnalysis::sideways(),
        }
    }
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self::empty()
    }
}

pub struct AnalysisPipeline {
    window: CandleWindow,
    config: AnalysisConfig,
    ma_engine: MovingAverageEngine,
    trend: TrendClassifier,
    patterns: PatternClassifier,
    scorer: PredictionScorer,
    emitter: MarkerEmitter,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            window: CandleWindow::new(config.window_cap),
            ma_engine: MovingAverageEngine::new(config.trend_fast, config.trend_slow),
            trend: TrendClassifier::new(config.use_ema_for_trend),
            patterns: PatternClassifier::new(&config),
            scorer: PredictionScorer::new(&config),
            emitter: MarkerEmitter::new(config.marker_cap),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn window(&self) -> &CandleWindow {
        &self.window
    }

    /// Feed one candle into the window. The report is not recomputed here;
    /// callers decide when to run `analyze`.
    pub fn append(&mut self, candle: Candle) -> Result<AppendOutcome, AnalysisError> {
        self.window.append(candle)
    }

    /// Run a full pass over the current window. Below the minimum depth the
    /// report is empty rather than partial.
    pub fn analyze(&self) -> AnalysisReport {
        let all = self.window.all();
        if all.len() < self.config.min_prediction_candles {
            debug!(
                len = all.len(),
                min = self.config.min_prediction_candles,
                "window below analysis depth"
            );
            return AnalysisReport::empty();
        }

        let ma_set = self.ma_engine.compute(all);
        let trend = self.trend.analyze(all, &ma_set);

        // Pattern rules only ever see fully closed bars.
        let closed = self.window.closed();
        let pattern_markers = self.scan_patterns(closed);

        let mut prediction = None;
        let mut prediction_markers = Vec::new();
        if let Some(ctx) = self.scorer.gather(all) {
            let scored = self.scorer.score(&ctx);
            let last_time = all[all.len() - 1].time;
            prediction_markers = self.scorer.markers(&ctx, &scored, last_time, &self.config);
            prediction = Some(scored);
        }

        let markers = self.emitter.emit(vec![pattern_markers, prediction_markers]);
        AnalysisReport {
            markers,
            prediction,
            trend,
        }
    }

    fn scan_patterns(&self, candles: &[Candle]) -> Vec<PatternMarker> {
        if candles.is_empty() {
            return Vec::new();
        }
        let depth = self.config.min_prediction_candles;
        let recent = &candles[candles.len().saturating_sub(depth)..];
        let swings = detect_swings(recent);
        let (support, resistance) = levels(recent, &swings);

        let scan_swings = detect_swings(candles);
        let ctx = ScanContext {
            candles,
            swings: &scan_swings,
            support,
            resistance,
        };
        self.patterns.scan(&ctx)
    }
}

/// Support and resistance from recent swing points, falling back to the
/// raw low/high extremes when no swing of that kind has confirmed.
fn levels(recent: &[Candle], swings: &crate::swing::SwingSet) -> (f64, f64) {
    let support = swings
        .lows
        .iter()
        .map(|s| s.price)
        .fold(f64::NAN, f64::min);
    let support = if support.is_nan() {
        recent.iter().map(|c| c.low).fold(f64::MAX, f64::min)
    } else {
        support
    };
    let resistance = swings
        .highs
        .iter()
        .map(|s| s.price)
        .fold(f64::NAN, f64::max);
    let resistance = if resistance.is_nan() {
        recent.iter().map(|c| c.high).fold(f64::MIN, f64::max)
    } else {
        resistance
    };
    (support, resistance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::marker::PatternKind;
    use crate::model::prediction::{Direction, TrendBias};

    fn flat_candle(time: i64, price: f64) -> Candle {
        Candle::new(time, price, price, price, price, 1.0).unwrap()
    }

    fn rising_pipeline(n: usize) -> AnalysisPipeline {
        let mut pipeline = AnalysisPipeline::new(AnalysisConfig::default());
        for i in 0..n {
            let c = flat_candle(60 * (i as i64 + 1), 100.0 + i as f64);
            pipeline.append(c).unwrap();
        }
        pipeline
    }

    #[test]
    fn shallow_window_yields_empty_report() {
        let pipeline = rising_pipeline(19);
        let report = pipeline.analyze();
        assert!(report.markers.is_empty());
        assert!(report.prediction.is_none());
        assert_eq!(report.trend.trend, TrendBias::Sideways);
        assert_eq!(report.trend.strength, 0);
    }

    #[test]
    fn twenty_candles_unlock_the_prediction() {
        let pipeline = rising_pipeline(25);
        let report = pipeline.analyze();
        let prediction = report.prediction.unwrap();
        assert_eq!(prediction.direction, Direction::Bullish);
        assert!(report
            .markers
            .iter()
            .any(|m| m.kind == PatternKind::BullPrediction));
    }

    #[test]
    fn degenerate_prediction_depth_cannot_panic_the_pass() {
        // Unvalidated config with a depth below the two-candle minimum the
        // scorer needs; the pass must degrade to no prediction, not panic.
        let mut config = AnalysisConfig::default();
        config.min_prediction_candles = 1;
        let mut pipeline = AnalysisPipeline::new(config);
        pipeline.append(flat_candle(60, 100.0)).unwrap();

        let report = pipeline.analyze();
        assert!(report.prediction.is_none());

        pipeline.append(flat_candle(120, 101.0)).unwrap();
        assert!(pipeline.analyze().prediction.is_some());
    }

    #[test]
    fn analyze_is_idempotent() {
        let pipeline = rising_pipeline(40);
        let first = pipeline.analyze();
        let second = pipeline.analyze();
        assert_eq!(first, second);
    }

    #[test]
    fn tail_replacement_updates_the_report_in_place() {
        let mut pipeline = rising_pipeline(30);
        let len_before = pipeline.window().len();

        // Re-deliver the tail bar at a much lower close.
        let t = 60 * 30;
        let updated = Candle::new(t, 129.0, 129.0, 90.0, 90.0, 1.0).unwrap();
        assert_eq!(pipeline.append(updated).unwrap(), AppendOutcome::Replaced);
        assert_eq!(pipeline.window().len(), len_before);

        let report = pipeline.analyze();
        let prediction = report.prediction.unwrap();
        assert!((prediction.current_price - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn marker_count_never_exceeds_cap() {
        let mut config = AnalysisConfig::default();
        config.marker_cap = 5;
        let mut pipeline = AnalysisPipeline::new(config);
        // Oscillate so swing and single-bar rules fire often.
        for i in 0..120 {
            let base = 100.0 + ((i as f64) * 0.7).sin() * 8.0;
            let c = Candle::new(60 * (i + 1), base, base + 2.0, base - 2.0, base + 1.0, 1.0).unwrap();
            pipeline.append(c).unwrap();
        }
        let report = pipeline.analyze();
        assert!(report.markers.len() <= 5);
    }

    #[test]
    fn forming_tail_is_invisible_to_pattern_rules() {
        let mut pipeline = rising_pipeline(30);
        let t = 60 * 31;
        // A forming bar shaped like a textbook bullish engulfing tail.
        let forming = Candle::new(t, 95.0, 140.0, 94.0, 139.0, 1.0)
            .unwrap()
            .open_at(false);
        pipeline.append(forming).unwrap();
        let report = pipeline.analyze();
        assert!(!report.markers.iter().any(|m| {
            m.time == t
                && matches!(
                    m.kind,
                    PatternKind::BullishEngulfing | PatternKind::BearishEngulfing
                )
        }));
    }
}
