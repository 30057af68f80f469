use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of scoring signals. The scorer matches on variants rather
/// than string tags so every branch is checkable at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    // Short-horizon prediction signals.
    SmaBullishCross,
    SmaBearishCross,
    UptrendHhHl,
    DowntrendLhLl,
    AboveSmaLong,
    BelowSmaLong,
    RsiBullish,
    RsiBearish,
    BreakingResistance,
    BreakingSupport,
    VolumeConfirmation,
    SupportBounce,
    ResistanceRejection,
    // Long-horizon trend signals.
    FastMaAboveSlow,
    FastMaBelowSlow,
    PriceAboveFastMa,
    PriceBelowFastMa,
    PriceAboveSlowMa,
    PriceBelowSlowMa,
    MaTrendUp,
    MaTrendDown,
}

impl SignalKind {
    /// Tag used in serialized reports and marker labels.
    pub fn tag(&self) -> &'static str {
        match self {
            SignalKind::SmaBullishCross => "SMA_BULLISH_CROSS",
            SignalKind::SmaBearishCross => "SMA_BEARISH_CROSS",
            SignalKind::UptrendHhHl => "UPTREND_HH_HL",
            SignalKind::DowntrendLhLl => "DOWNTREND_LH_LL",
            SignalKind::AboveSmaLong => "ABOVE_SMA20",
            SignalKind::BelowSmaLong => "BELOW_SMA20",
            SignalKind::RsiBullish => "RSI_BULLISH",
            SignalKind::RsiBearish => "RSI_BEARISH",
            SignalKind::BreakingResistance => "BREAKING_RESISTANCE",
            SignalKind::BreakingSupport => "BREAKING_SUPPORT",
            SignalKind::VolumeConfirmation => "VOLUME_CONFIRMATION",
            SignalKind::SupportBounce => "SUPPORT_BOUNCE",
            SignalKind::ResistanceRejection => "RESISTANCE_REJECTION",
            SignalKind::FastMaAboveSlow => "MA25_ABOVE_MA99",
            SignalKind::FastMaBelowSlow => "MA25_BELOW_MA99",
            SignalKind::PriceAboveFastMa => "PRICE_ABOVE_MA25",
            SignalKind::PriceBelowFastMa => "PRICE_BELOW_MA25",
            SignalKind::PriceAboveSlowMa => "PRICE_ABOVE_MA99",
            SignalKind::PriceBelowSlowMa => "PRICE_BELOW_MA99",
            SignalKind::MaTrendUp => "MA_TREND_UP",
            SignalKind::MaTrendDown => "MA_TREND_DOWN",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
