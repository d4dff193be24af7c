use serde::Serialize;

use crate::frame::Frame;

/// Work issued by a single animation tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FrameStats {
    pub nodes_drawn: u32,
    pub edges_drawn: u32,
    pub overlays_updated: u32,
    pub overlays_skipped: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Histogram {
    pub count: u64,
    pub sum: u64,
    pub min: u64,
    pub max: u64,
}

impl Histogram {
    pub fn record(&mut self, value: u64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }
}

/// Cumulative per-session frame metrics.
///
/// Everything here is derived from frame counts, never wall-clock time, so a
/// headless replay of N ticks produces the same snapshot as the browser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Metrics {
    pub frames: u64,
    /// Index of the most recent tick; `None` until the first one.
    pub last_frame: Option<u64>,
    pub resizes: u64,
    pub edges_per_frame: Histogram,
    pub overlays_updated: u64,
    pub overlays_skipped: u64,
    pub last: FrameStats,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn record_frame(&mut self, stats: FrameStats) {
        self.frames += 1;
        self.edges_per_frame.record(u64::from(stats.edges_drawn));
        self.overlays_updated += u64::from(stats.overlays_updated);
        self.overlays_skipped += u64::from(stats.overlays_skipped);
        self.last = stats;
    }

    pub fn record_tick(&mut self, frame: Frame) {
        self.last_frame = Some(frame.index);
    }

    pub fn record_resize(&mut self) {
        self.resizes += 1;
    }
}
