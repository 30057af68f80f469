use crate::model::marker::{MarkerPosition, MarkerShape, PatternKind, PatternMarker};
use crate::pattern::{PatternRule, ScanContext};

const SMC_COLOR: &str = "#a46bff";

/// Volume spike with a small body and expanding range; informational,
/// neutral direction.
pub struct SmcSpike {
    /// When set, a single volume-less bar disables the rule for the whole
    /// pass instead of being skipped individually.
    pub require_volume: bool,
}

impl PatternRule for SmcSpike {
    fn kind(&self) -> PatternKind {
        PatternKind::Smc
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<PatternMarker> {
        if self.require_volume && ctx.candles.iter().any(|c| !c.has_volume()) {
            return Vec::new();
        }

        let mut out = Vec::new();
        for i in 2..ctx.candles.len() {
            let prev = &ctx.candles[i - 1];
            let cur = &ctx.candles[i];
            if !cur.has_volume() || !prev.has_volume() {
                continue;
            }
            let range = cur.range();
            if range <= 0.0 {
                continue;
            }
            let spike = cur.volume > prev.volume * 1.5;
            let small_body = cur.body() / range < 0.3;
            let expanding = range > prev.range();
            if spike && small_body && expanding {
                out.push(PatternMarker::new(
                    cur.time,
                    PatternKind::Smc,
                    MarkerPosition::AboveBar,
                    MarkerShape::Circle,
                    SMC_COLOR,
                    "SMC",
                ));
            }
        }
        out
    }
}
