use crate::model::marker::{MarkerPosition, MarkerShape, PatternKind, PatternMarker};
use crate::pattern::{PatternRule, ScanContext};

/// Two swing levels within this relative distance form a double top/bottom.
const LEVEL_TOLERANCE: f64 = 0.02;

const DOUBLE_TOP_COLOR: &str = "#ff6b6b";
const DOUBLE_BOTTOM_COLOR: &str = "#51cf66";
const HNS_COLOR: &str = "#ffa8a8";

/// The last two swing highs within 2% of each other.
pub struct DoubleTop;

impl PatternRule for DoubleTop {
    fn kind(&self) -> PatternKind {
        PatternKind::DoubleTop
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let [first, second] = ctx.swings.last_highs(2) else {
            return Vec::new();
        };
        let diff = (first.price - second.price).abs() / first.price;
        if diff >= LEVEL_TOLERANCE {
            return Vec::new();
        }
        vec![PatternMarker::new(
            ctx.candles[second.index].time,
            PatternKind::DoubleTop,
            MarkerPosition::AboveBar,
            MarkerShape::ArrowDown,
            DOUBLE_TOP_COLOR,
            "Double Top",
        )]
    }
}

/// Mirror on swing lows.
pub struct DoubleBottom;

impl PatternRule for DoubleBottom {
    fn kind(&self) -> PatternKind {
        PatternKind::DoubleBottom
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let [first, second] = ctx.swings.last_lows(2) else {
            return Vec::new();
        };
        let diff = (first.price - second.price).abs() / first.price;
        if diff >= LEVEL_TOLERANCE {
            return Vec::new();
        }
        vec![PatternMarker::new(
            ctx.candles[second.index].time,
            PatternKind::DoubleBottom,
            MarkerPosition::BelowBar,
            MarkerShape::ArrowUp,
            DOUBLE_BOTTOM_COLOR,
            "Double Bottom",
        )]
    }
}

/// Three swing highs with the middle one above both neighbors.
pub struct HeadAndShoulders;

impl PatternRule for HeadAndShoulders {
    fn kind(&self) -> PatternKind {
        PatternKind::HeadAndShoulders
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        let [left, head, right] = ctx.swings.last_highs(3) else {
            return Vec::new();
        };
        if head.price <= left.price || head.price <= right.price {
            return Vec::new();
        }
        vec![PatternMarker::new(
            ctx.candles[right.index].time,
            PatternKind::HeadAndShoulders,
            MarkerPosition::AboveBar,
            MarkerShape::ArrowDown,
            HNS_COLOR,
            "H&S",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::candle::Candle;
    use crate::swing::detect_swings;

    /// Build candles whose highs trace the given sequence; lows trail by 1.
    fn from_highs(highs: &[f64]) -> Vec<Candle> {
        highs
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                Candle::new(60 * (i as i64 + 1), h - 0.5, h, h - 1.0, h - 0.5, 1.0).unwrap()
            })
            .collect()
    }

    fn scan_rule(rule: &dyn PatternRule, candles: &[Candle]) -> Vec<PatternMarker> {
        let swings = detect_swings(candles);
        rule.scan(&ScanContext {
            candles,
            swings: &swings,
            support: 0.0,
            resistance: f64::MAX,
        })
    }

    #[test]
    fn double_top_on_matching_swing_highs() {
        // Swing highs at 20.0 and 19.9 (0.5% apart).
        let highs = [
            10.0, 12.0, 20.0, 11.0, 9.0, 14.0, 19.9, 13.0, 10.0, 8.0,
        ];
        let candles = from_highs(&highs);
        let markers = scan_rule(&DoubleTop, &candles);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].time, 60 * 7);
    }

    #[test]
    fn distant_swing_highs_are_not_a_double_top() {
        let highs = [
            10.0, 12.0, 20.0, 11.0, 9.0, 14.0, 16.0, 13.0, 10.0, 8.0,
        ];
        let candles = from_highs(&highs);
        assert!(scan_rule(&DoubleTop, &candles).is_empty());
    }

    #[test]
    fn double_bottom_on_matching_swing_lows() {
        // Lows trail highs by 1; swing lows at 4.0 and 3.97.
        let highs = [
            10.0, 8.0, 5.0, 9.0, 11.0, 7.0, 4.97, 6.0, 9.0, 12.0,
        ];
        let candles = from_highs(&highs);
        let markers = scan_rule(&DoubleBottom, &candles);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].kind, PatternKind::DoubleBottom);
    }

    #[test]
    fn head_and_shoulders_needs_dominant_middle() {
        let highs = [
            10.0, 10.5, 14.0, 9.0, 8.0, 18.0, 9.0, 8.5, 13.0, 9.0, 8.0,
        ];
        let candles = from_highs(&highs);
        let swings = detect_swings(&candles);
        assert_eq!(swings.highs.len(), 3);

        let markers = scan_rule(&HeadAndShoulders, &candles);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].label, "H&S");
    }

    #[test]
    fn ascending_highs_are_not_head_and_shoulders() {
        let highs = [
            10.0, 10.5, 12.0, 9.0, 8.0, 14.0, 9.0, 8.5, 16.0, 9.0, 8.0,
        ];
        let candles = from_highs(&highs);
        assert!(scan_rule(&HeadAndShoulders, &candles).is_empty());
    }
}
