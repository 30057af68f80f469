//! Directional prediction scoring.
//!
//! Signal checks accumulate fixed weights onto a base confidence of 50,
//! then a strict priority cascade assigns the pattern label; the first
//! matching rule decides direction, confidence, target, and stop. The
//! cascade is a data structure, not control flow, so each rule can be
//! exercised in isolation.

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::indicator::rsi;
use crate::model::candle::Candle;
use crate::model::marker::{MarkerPosition, MarkerShape, PatternKind, PatternMarker};
use crate::model::prediction::{Direction, PatternLabel, Prediction};
use crate::model::signal::SignalKind;
use crate::swing::detect_swings;
use crate::trend::MarketStructure;

pub const CONFIDENCE_FLOOR: f64 = 40.0;
pub const CONFIDENCE_CEIL: f64 = 95.0;

const WEIGHT_MA_CROSS: f64 = 15.0;
const WEIGHT_STRUCTURE: f64 = 20.0;
const WEIGHT_RSI: f64 = 10.0;
const WEIGHT_LEVEL_BREAK: f64 = 15.0;
const WEIGHT_VOLUME: f64 = 5.0;
const WEIGHT_LEVEL_REACT: f64 = 10.0;

/// Everything one pass of the scorer needs, derived once from the window.
#[derive(Debug, Clone)]
pub struct ScoreContext {
    pub current_price: f64,
    pub prev_close: f64,
    pub last_low: f64,
    pub last_high: f64,
    pub sma_short: f64,
    pub sma_long: f64,
    pub support: f64,
    pub resistance: f64,
    pub rsi: f64,
    pub volume_spike: bool,
    pub structure: MarketStructure,
    pub bullish: Vec<SignalKind>,
    pub bearish: Vec<SignalKind>,
    base_confidence: f64,
}

impl ScoreContext {
    pub fn has_bullish(&self, kind: SignalKind) -> bool {
        self.bullish.contains(&kind)
    }

    pub fn has_bearish(&self, kind: SignalKind) -> bool {
        self.bearish.contains(&kind)
    }
}

struct LabelOutcome {
    label: PatternLabel,
    direction: Direction,
    confidence: f64,
    target: Option<f64>,
    stop: Option<f64>,
}

/// Priority cascade, first match wins. Order mirrors observed behavior:
/// strong trend, breakout with volume, reversal at a level, signal-count
/// bias, then range-bound.
const LABEL_RULES: &[fn(&ScoreContext) -> Option<LabelOutcome>] = &[
    strong_uptrend,
    strong_downtrend,
    resistance_breakout,
    support_breakdown,
    support_reversal,
    resistance_rejection,
    bullish_bias,
    bearish_bias,
];

fn strong_uptrend(ctx: &ScoreContext) -> Option<LabelOutcome> {
    if !(ctx.has_bullish(SignalKind::UptrendHhHl) && ctx.has_bullish(SignalKind::SmaBullishCross)) {
        return None;
    }
    Some(LabelOutcome {
        label: PatternLabel::StrongUptrend,
        direction: Direction::Bullish,
        confidence: (70.0 + ctx.bullish.len() as f64 * 3.0).min(90.0),
        target: Some(ctx.current_price * 1.03),
        stop: Some((ctx.last_low * 0.99).min(ctx.sma_long * 0.98)),
    })
}

fn strong_downtrend(ctx: &ScoreContext) -> Option<LabelOutcome> {
    if !(ctx.has_bearish(SignalKind::DowntrendLhLl) && ctx.has_bearish(SignalKind::SmaBearishCross))
    {
        return None;
    }
    Some(LabelOutcome {
        label: PatternLabel::StrongDowntrend,
        direction: Direction::Bearish,
        confidence: (70.0 + ctx.bearish.len() as f64 * 3.0).min(90.0),
        target: Some(ctx.current_price * 0.97),
        stop: Some((ctx.last_high * 1.01).max(ctx.sma_long * 1.02)),
    })
}

fn resistance_breakout(ctx: &ScoreContext) -> Option<LabelOutcome> {
    if !(ctx.has_bullish(SignalKind::BreakingResistance) && ctx.volume_spike) {
        return None;
    }
    Some(LabelOutcome {
        label: PatternLabel::ResistanceBreakout,
        direction: Direction::Bullish,
        confidence: 80.0,
        target: Some(ctx.resistance * 1.02),
        stop: Some(ctx.resistance * 0.99),
    })
}

fn support_breakdown(ctx: &ScoreContext) -> Option<LabelOutcome> {
    if !(ctx.has_bearish(SignalKind::BreakingSupport) && ctx.volume_spike) {
        return None;
    }
    Some(LabelOutcome {
        label: PatternLabel::SupportBreakdown,
        direction: Direction::Bearish,
        confidence: 80.0,
        target: Some(ctx.support * 0.98),
        stop: Some(ctx.support * 1.01),
    })
}

fn support_reversal(ctx: &ScoreContext) -> Option<LabelOutcome> {
    if !ctx.has_bullish(SignalKind::SupportBounce) {
        return None;
    }
    Some(LabelOutcome {
        label: PatternLabel::SupportReversal,
        direction: Direction::Bullish,
        confidence: 75.0,
        target: Some(ctx.current_price * 1.02),
        stop: Some(ctx.support * 0.995),
    })
}

fn resistance_rejection(ctx: &ScoreContext) -> Option<LabelOutcome> {
    if !ctx.has_bearish(SignalKind::ResistanceRejection) {
        return None;
    }
    Some(LabelOutcome {
        label: PatternLabel::ResistanceReversal,
        direction: Direction::Bearish,
        confidence: 75.0,
        target: Some(ctx.current_price * 0.98),
        stop: Some(ctx.resistance * 1.005),
    })
}

fn bullish_bias(ctx: &ScoreContext) -> Option<LabelOutcome> {
    if ctx.bullish.len() <= ctx.bearish.len() + 2 {
        return None;
    }
    Some(LabelOutcome {
        label: PatternLabel::BullishBias,
        direction: Direction::Bullish,
        confidence: 65.0 + ctx.bullish.len() as f64 * 2.0,
        target: Some(ctx.current_price * 1.015),
        stop: Some((ctx.sma_long * 0.99).min(ctx.support * 0.995)),
    })
}

fn bearish_bias(ctx: &ScoreContext) -> Option<LabelOutcome> {
    if ctx.bearish.len() <= ctx.bullish.len() + 2 {
        return None;
    }
    Some(LabelOutcome {
        label: PatternLabel::BearishBias,
        direction: Direction::Bearish,
        confidence: 65.0 + ctx.bearish.len() as f64 * 2.0,
        target: Some(ctx.current_price * 0.985),
        stop: Some((ctx.sma_long * 1.01).max(ctx.resistance * 1.005)),
    })
}

#[derive(Debug, Clone)]
pub struct PredictionScorer {
    sma_short: usize,
    sma_long: usize,
    rsi_period: usize,
    min_candles: usize,
}

impl PredictionScorer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            sma_short: config.sma_short,
            sma_long: config.sma_long,
            rsi_period: config.rsi_period,
            min_candles: config.min_prediction_candles,
        }
    }

    /// Derive the scoring context from the window, tallying signals on
    /// both sides. Returns `None` when the window is too short for a
    /// prediction at all.
    pub fn gather(&self, candles: &[Candle]) -> Option<ScoreContext> {
        // Needs at least the last two candles whatever the configured depth.
        let depth = self.min_candles.max(2);
        if candles.len() < depth {
            return None;
        }
        let recent = &candles[candles.len() - depth..];
        let current = &recent[recent.len() - 1];
        let prev = &recent[recent.len() - 2];
        let current_price = current.close;

        let closes: Vec<f64> = recent.iter().map(|c| c.close).collect();
        let short_tail = &closes[closes.len() - self.sma_short.min(closes.len())..];
        let sma_short = short_tail.iter().sum::<f64>() / short_tail.len() as f64;
        let sma_long = closes.iter().sum::<f64>() / closes.len() as f64;

        let swings = detect_swings(recent);
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
        let support = swings.lows.iter().map(|s| s.price).fold(f64::NAN, f64::min);
        let support = if support.is_nan() {
            recent.iter().map(|c| c.low).fold(f64::MAX, f64::min)
        } else {
            support
        };

        let avg_volume = recent.iter().map(|c| c.volume).sum::<f64>() / recent.len() as f64;
        let volume_spike = current.volume > avg_volume * 1.5;

        let rsi = rsi::rsi(candles, self.rsi_period).unwrap_or(50.0);
        let structure = MarketStructure::derive(recent, &swings);

        let mut ctx = ScoreContext {
            current_price,
            prev_close: prev.close,
            last_low: current.low,
            last_high: current.high,
            sma_short,
            sma_long,
            support,
            resistance,
            rsi,
            volume_spike,
            structure,
            bullish: Vec::new(),
            bearish: Vec::new(),
            base_confidence: 50.0,
        };
        self.tally(&mut ctx);
        Some(ctx)
    }

    fn tally(&self, ctx: &mut ScoreContext) {
        let price = ctx.current_price;

        // Bullish side.
        if price > ctx.sma_short && ctx.sma_short > ctx.sma_long {
            ctx.bullish.push(SignalKind::SmaBullishCross);
            ctx.base_confidence += WEIGHT_MA_CROSS;
        }
        if ctx.structure.higher_highs && ctx.structure.higher_lows {
            ctx.bullish.push(SignalKind::UptrendHhHl);
            ctx.base_confidence += WEIGHT_STRUCTURE;
        }
        if price > ctx.sma_long {
            ctx.bullish.push(SignalKind::AboveSmaLong);
        }
        if ctx.rsi > 50.0 && ctx.rsi < 70.0 {
            ctx.bullish.push(SignalKind::RsiBullish);
            ctx.base_confidence += WEIGHT_RSI;
        }
        if price > ctx.resistance * 0.995 {
            ctx.bullish.push(SignalKind::BreakingResistance);
            ctx.base_confidence += WEIGHT_LEVEL_BREAK;
        }
        if ctx.volume_spike && price > ctx.prev_close {
            ctx.bullish.push(SignalKind::VolumeConfirmation);
            ctx.base_confidence += WEIGHT_VOLUME;
        }
        if price > ctx.support * 1.005 && price > ctx.prev_close {
            ctx.bullish.push(SignalKind::SupportBounce);
            ctx.base_confidence += WEIGHT_LEVEL_REACT;
        }

        // Bearish mirror.
        if price < ctx.sma_short && ctx.sma_short < ctx.sma_long {
            ctx.bearish.push(SignalKind::SmaBearishCross);
            ctx.base_confidence += WEIGHT_MA_CROSS;
        }
        if ctx.structure.lower_highs && ctx.structure.lower_lows {
            ctx.bearish.push(SignalKind::DowntrendLhLl);
            ctx.base_confidence += WEIGHT_STRUCTURE;
        }
        if price < ctx.sma_long {
            ctx.bearish.push(SignalKind::BelowSmaLong);
        }
        if ctx.rsi < 50.0 && ctx.rsi > 30.0 {
            ctx.bearish.push(SignalKind::RsiBearish);
            ctx.base_confidence += WEIGHT_RSI;
        }
        if price < ctx.support * 1.005 {
            ctx.bearish.push(SignalKind::BreakingSupport);
            ctx.base_confidence += WEIGHT_LEVEL_BREAK;
        }
        if ctx.volume_spike && price < ctx.prev_close {
            ctx.bearish.push(SignalKind::VolumeConfirmation);
            ctx.base_confidence += WEIGHT_VOLUME;
        }
        if price < ctx.resistance * 0.995 && price < ctx.prev_close {
            ctx.bearish.push(SignalKind::ResistanceRejection);
            ctx.base_confidence += WEIGHT_LEVEL_REACT;
        }
    }

    /// Run the cascade over a gathered context and build the prediction.
    pub fn score(&self, ctx: &ScoreContext) -> Prediction {
        let outcome = LABEL_RULES.iter().find_map(|rule| rule(ctx));
        let (label, direction, confidence, target, stop) = match outcome {
            Some(o) => (o.label, o.direction, o.confidence, o.target, o.stop),
            None => (
                PatternLabel::RangeBound,
                Direction::Neutral,
                ctx.base_confidence,
                None,
                None,
            ),
        };

        let confidence = confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEIL);
        let signals = if direction == Direction::Bullish {
            ctx.bullish.clone()
        } else {
            ctx.bearish.clone()
        };
        debug!(?label, ?direction, confidence, "prediction scored");

        Prediction {
            direction,
            confidence,
            pattern: label,
            target_price: target,
            stop_loss: stop,
            signals,
            current_price: ctx.current_price,
            sma_short: ctx.sma_short,
            sma_long: ctx.sma_long,
            support: ctx.support,
            resistance: ctx.resistance,
            trend: ctx.structure.verdict(),
        }
    }

    /// Prediction-layer markers at the last candle's time, gated by the
    /// direction filters.
    pub fn markers(
        &self,
        ctx: &ScoreContext,
        prediction: &Prediction,
        last_time: i64,
        config: &AnalysisConfig,
    ) -> Vec<PatternMarker> {
        let mut out = Vec::new();
        let bull_on = config.filter_enabled("Bull Prediction");
        let bear_on = config.filter_enabled("Bear Prediction");
        let confidence = prediction.confidence.round() as i64;

        if bull_on || bear_on {
            if (ctx.current_price - ctx.support).abs() / ctx.support < 0.02 {
                out.push(PatternMarker::new(
                    last_time,
                    PatternKind::SupportLevel,
                    MarkerPosition::BelowBar,
                    MarkerShape::Circle,
                    "#4caf50",
                    format!("SUP {:.2}", ctx.support),
                ));
            }
            if (ctx.current_price - ctx.resistance).abs() / ctx.resistance < 0.02 {
                out.push(PatternMarker::new(
                    last_time,
                    PatternKind::ResistanceLevel,
                    MarkerPosition::AboveBar,
                    MarkerShape::Circle,
                    "#f44336",
                    format!("RES {:.2}", ctx.resistance),
                ));
            }
        }

        if bull_on && prediction.direction == Direction::Bullish {
            out.push(PatternMarker::new(
                last_time,
                PatternKind::BullPrediction,
                MarkerPosition::BelowBar,
                MarkerShape::ArrowUp,
                "#00c853",
                format!("BULL {confidence}%"),
            ));
        }
        if bear_on && prediction.direction == Direction::Bearish {
            out.push(PatternMarker::new(
                last_time,
                PatternKind::BearPrediction,
                MarkerPosition::AboveBar,
                MarkerShape::ArrowDown,
                "#ff1744",
                format!("BEAR {confidence}%"),
            ));
        }
        if config.filter_enabled("Range Prediction") && prediction.direction == Direction::Neutral {
            out.push(PatternMarker::new(
                last_time,
                PatternKind::RangePrediction,
                MarkerPosition::AboveBar,
                MarkerShape::Circle,
                "#2979ff",
                "RANGE",
            ));
        }
        if config.filter_enabled("Breakout Prediction") && prediction.pattern.is_breakout() {
            let text = if prediction.pattern == PatternLabel::ResistanceBreakout {
                "BREAKOUT"
            } else {
                "BREAKDOWN"
            };
            out.push(PatternMarker::new(
                last_time,
                PatternKind::BreakoutPrediction,
                MarkerPosition::AboveBar,
                MarkerShape::Square,
                "#ff9100",
                text,
            ));
        }
        if config.filter_enabled("Reversal Prediction") && prediction.pattern.is_reversal() {
            out.push(PatternMarker::new(
                last_time,
                PatternKind::ReversalPrediction,
                MarkerPosition::AboveBar,
                MarkerShape::Circle,
                "#d500f9",
                "REVERSAL",
            ));
        }

        let breakout_on = config.filter_enabled("Breakout Prediction");
        if ctx.structure.higher_highs && ctx.structure.higher_lows && (bull_on || breakout_on) {
            out.push(PatternMarker::new(
                last_time,
                PatternKind::UptrendStructure,
                MarkerPosition::AboveBar,
                MarkerShape::ArrowUp,
                "#00c853",
                "UPTREND",
            ));
        }
        if ctx.structure.lower_highs && ctx.structure.lower_lows && (bear_on || breakout_on) {
            out.push(PatternMarker::new(
                last_time,
                PatternKind::DowntrendStructure,
                MarkerPosition::AboveBar,
                MarkerShape::ArrowDown,
                "#ff1744",
                "DOWNTREND",
            ));
        }
        out
    }
}
