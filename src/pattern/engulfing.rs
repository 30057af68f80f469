use crate::model::marker::{MarkerPosition, MarkerShape, PatternKind, PatternMarker};
use crate::pattern::{PatternRule, ScanContext};

const BULL_COLOR: &str = "#00a67d";
const BEAR_COLOR: &str = "#eb4d5c";

/// Bullish candle whose body engulfs the previous bearish body.
pub struct BullishEngulfing;

impl PatternRule for BullishEngulfing {
    fn kind(&self) -> PatternKind {
        PatternKind::BullishEngulfing
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let mut out = Vec::new();
        for i in 2..ctx.candles.len() {
            let prev = &ctx.candles[i - 1];
            let cur = &ctx.candles[i];
            if cur.close > cur.open
                && prev.close < prev.open
                && cur.close > prev.open
                && cur.open < prev.close
            {
                out.push(PatternMarker::new(
                    cur.time,
                    PatternKind::BullishEngulfing,
                    MarkerPosition::BelowBar,
                    MarkerShape::ArrowUp,
                    BULL_COLOR,
                    "Bull Engulf",
                ));
            }
        }
        out
    }
}

/// Mirror: bearish candle engulfing the previous bullish body.
pub struct BearishEngulfing;

impl PatternRule for BearishEngulfing {
    fn kind(&self) -> PatternKind {
        PatternKind::BearishEngulfing
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let mut out = Vec::new();
        for i in 2..ctx.candles.len() {
            let prev = &ctx.candles[i - 1];
            let cur = &ctx.candles[i];
            if cur.close < cur.open
                && prev.close > prev.open
                && cur.open > prev.close
                && cur.close < prev.open
            {
                out.push(PatternMarker::new(
                    cur.time,
                    PatternKind::BearishEngulfing,
                    MarkerPosition::AboveBar,
                    MarkerShape::ArrowDown,
                    BEAR_COLOR,
                    "Bear Engulf",
                ));
            }
        }
        out
    }
}
