use crate::model::candle::Candle;
use crate::model::marker::{MarkerPosition, MarkerShape, PatternKind, PatternMarker};
use crate::pattern::{PatternRule, ScanContext};

/// Body must stay under this share of the full range to count as a doji.
const DOJI_BODY_RATIO: f64 = 0.1;

const DOJI_BULL_COLOR: &str = "#26a69a";
const DOJI_BEAR_COLOR: &str = "#ef5350";
const DOJI_NEUTRAL_COLOR: &str = "#2196f3";
const HAMMER_COLOR: &str = "#26a69a";
const STAR_COLOR: &str = "#ef5350";

/// Near-zero body relative to the bar range. Tagged with the close
/// direction relative to the previous bar: a reversal upward reads
/// bullish, downward bearish, unchanged neutral.
pub struct Doji;

impl PatternRule for Doji {
    fn kind(&self) -> PatternKind {
        PatternKind::Doji
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let mut out = Vec::new();
        for i in 2..ctx.candles.len() {
            let cur = &ctx.candles[i];
            let range = cur.range();
            if range <= 0.0 || cur.body() / range >= DOJI_BODY_RATIO {
                continue;
            }
            let prev = &ctx.candles[i - 1];
            let color = if cur.close > prev.close {
                DOJI_BULL_COLOR
            } else if cur.close < prev.close {
                DOJI_BEAR_COLOR
            } else {
                DOJI_NEUTRAL_COLOR
            };
            out.push(PatternMarker::new(
                cur.time,
                PatternKind::Doji,
                MarkerPosition::AboveBar,
                MarkerShape::Circle,
                color,
                "Doji",
            ));
        }
        out
    }
}

fn is_hammer_shape(c: &Candle) -> bool {
    c.range() > 0.0 && c.lower_shadow() >= 2.0 * c.body() && c.upper_shadow() <= 0.5 * c.body()
}

fn is_star_shape(c: &Candle) -> bool {
    c.range() > 0.0 && c.upper_shadow() >= 2.0 * c.body() && c.lower_shadow() <= 0.5 * c.body()
}

/// Long lower shadow closing bullish with its low at the support level.
pub struct Hammer;

impl PatternRule for Hammer {
    fn kind(&self) -> PatternKind {
        PatternKind::Hammer
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let mut out = Vec::new();
        for cur in ctx.candles.iter().skip(2) {
            if is_hammer_shape(cur) && cur.is_bullish() && cur.low <= ctx.support * 1.01 {
                out.push(PatternMarker::new(
                    cur.time,
                    PatternKind::Hammer,
                    MarkerPosition::BelowBar,
                    MarkerShape::ArrowUp,
                    HAMMER_COLOR,
                    "Hammer",
                ));
            }
        }
        out
    }
}

/// Mirror of the hammer: long upper shadow closing bearish at resistance.
pub struct ShootingStar;

impl PatternRule for ShootingStar {
    fn kind(&self) -> PatternKind {
        PatternKind::ShootingStar
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let mut out = Vec::new();
        for cur in ctx.candles.iter().skip(2) {
            if is_star_shape(cur) && cur.is_bearish() && cur.high >= ctx.resistance * 0.99 {
                out.push(PatternMarker::new(
                    cur.time,
                    PatternKind::ShootingStar,
                    MarkerPosition::AboveBar,
                    MarkerShape::ArrowDown,
                    STAR_COLOR,
                    "Shooting Star",
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swing::SwingSet;

    fn ctx<'a>(
        candles: &'a [Candle],
        swings: &'a SwingSet,
        support: f64,
        resistance: f64,
    ) -> ScanContext<'a> {
        ScanContext {
            candles,
            swings,
            support,
            resistance,
        }
    }

    fn filler(time: i64) -> Candle {
        Candle::new(time, 100.0, 100.6, 99.4, 100.4, 1.0).unwrap()
    }

    #[test]
    fn doji_with_tiny_body_mid_range() {
        let candles = vec![
            filler(60),
            filler(120),
            Candle::new(180, 100.0, 100.1, 99.9, 100.01, 1.0).unwrap(),
        ];
        let swings = SwingSet::default();
        let markers = Doji.scan(&ctx(&candles, &swings, 0.0, f64::MAX));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].time, 180);
        // Closed below the previous close: tagged bearish.
        assert_eq!(markers[0].color, DOJI_BEAR_COLOR);
    }

    #[test]
    fn moderate_body_is_not_a_doji() {
        let candles = vec![
            filler(60),
            filler(120),
            Candle::new(180, 100.0, 100.5, 99.5, 100.4, 1.0).unwrap(),
        ];
        let swings = SwingSet::default();
        assert!(Doji.scan(&ctx(&candles, &swings, 0.0, f64::MAX)).is_empty());
    }

    #[test]
    fn flat_bar_guard_avoids_division_by_zero() {
        let candles = vec![
            filler(60),
            filler(120),
            Candle::new(180, 100.0, 100.0, 100.0, 100.0, 1.0).unwrap(),
        ];
        let swings = SwingSet::default();
        assert!(Doji.scan(&ctx(&candles, &swings, 0.0, f64::MAX)).is_empty());
    }

    #[test]
    fn hammer_requires_support_proximity() {
        let hammer = Candle::new(180, 99.8, 100.05, 95.0, 100.0, 1.0).unwrap();
        assert!(is_hammer_shape(&hammer));
        let candles = vec![filler(60), filler(120), hammer];
        let swings = SwingSet::default();

        // Low (95.0) within 1% of support.
        let markers = Hammer.scan(&ctx(&candles, &swings, 95.0, f64::MAX));
        assert_eq!(markers.len(), 1);

        // Support far below: same shape, no marker.
        let markers = Hammer.scan(&ctx(&candles, &swings, 80.0, f64::MAX));
        assert!(markers.is_empty());
    }

    #[test]
    fn shooting_star_at_resistance() {
        let star = Candle::new(180, 100.2, 105.0, 99.95, 100.0, 1.0).unwrap();
        assert!(is_star_shape(&star));
        let candles = vec![filler(60), filler(120), star];
        let swings = SwingSet::default();

        let markers = ShootingStar.scan(&ctx(&candles, &swings, 0.0, 105.0));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position, MarkerPosition::AboveBar);

        let markers = ShootingStar.scan(&ctx(&candles, &swings, 0.0, 120.0));
        assert!(markers.is_empty());
    }
}
