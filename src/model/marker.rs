use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    AboveBar,
    BelowBar,
    InBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    ArrowUp,
    ArrowDown,
    Circle,
    Square,
}

/// Pattern identity, also the dedup key together with the marker time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    BullishEngulfing,
    BearishEngulfing,
    Doji,
    Hammer,
    ShootingStar,
    DoubleTop,
    DoubleBottom,
    HeadAndShoulders,
    Smc,
    SupportLevel,
    ResistanceLevel,
    BullPrediction,
    BearPrediction,
    RangePrediction,
    BreakoutPrediction,
    ReversalPrediction,
    UptrendStructure,
    DowntrendStructure,
}

/// A timestamped annotation for the presentation collaborator to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMarker {
    pub time: i64,
    pub kind: PatternKind,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub color: &'static str,
    pub label: String,
}

impl PatternMarker {
    pub fn new(
        time: i64,
        kind: PatternKind,
        position: MarkerPosition,
        shape: MarkerShape,
        color: &'static str,
        label: impl Into<String>,
    ) -> Self {
        Self {
            time,
            kind,
            position,
            shape,
            color,
            label: label.into(),
        }
    }
}
