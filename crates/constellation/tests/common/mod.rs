#![allow(dead_code)]

use constellation::{OverlayStyle, Rgba, StyleSink, Surface, Viewport};
use foundation::math::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Viewport),
    Line { from: Vec2, to: Vec2, alpha: f64 },
    Circle { center: Vec2, radius: f64, alpha: f64 },
}

/// Records every draw call of the frames it sees.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn circles(&self) -> Vec<Vec2> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.ops.push(DrawOp::Clear(viewport));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, _width: f64) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            alpha: color.a,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            alpha: color.a,
        });
    }
}

/// Stands in for the DOM: remembers the last style per element id.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub applied: Vec<(usize, OverlayStyle)>,
}

impl RecordingSink {
    pub fn last_for(&self, id: usize) -> Option<OverlayStyle> {
        self.applied
            .iter()
            .rev()
            .find(|(h, _)| *h == id)
            .map(|(_, s)| *s)
    }
}

impl StyleSink<usize> for RecordingSink {
    fn apply(&mut self, handle: &usize, style: &OverlayStyle) {
        self.applied.push((*handle, *style));
    }
}

pub fn assert_close(a: f64, b: f64, eps: f64) {
    let diff = (a - b).abs();
    assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
}
