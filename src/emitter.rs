use std::collections::HashSet;

use tracing::debug;

use crate::model::marker::{PatternKind, PatternMarker};

pub const DEFAULT_MARKER_CAP: usize = 50;

/// Final marker stage. Merges the pattern and prediction layers, drops
/// duplicate `(time, kind)` entries keeping the first occurrence, and
/// caps the set at the newest `cap` markers. Output is ascending by time.
#[derive(Debug, Clone)]
pub struct MarkerEmitter {
    cap: usize,
}

impl MarkerEmitter {
    pub fn new(cap: usize) -> Self {
        assert!(cap > 0, "marker cap must be positive");
        Self { cap }
    }

    pub fn emit(&self, layers: Vec<Vec<PatternMarker>>) -> Vec<PatternMarker> {
        let mut seen: HashSet<(i64, PatternKind)> = HashSet::new();
        let mut merged: Vec<PatternMarker> = Vec::new();
        for layer in layers {
            for marker in layer {
                if seen.insert((marker.time, marker.kind)) {
                    merged.push(marker);
                }
            }
        }
        merged.sort_by_key(|m| m.time);

        if merged.len() > self.cap {
            let dropped = merged.len() - self.cap;
            merged.drain(..dropped);
            debug!(dropped, cap = self.cap, "marker cap reached");
        }
        merged
    }
}

impl Default for MarkerEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_CAP)
    }
}
