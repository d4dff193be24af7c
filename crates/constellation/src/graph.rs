use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::layout::Viewport;
use crate::projection::ProjectedPoint;

/// Straight RGBA colour; alpha in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn from_rgb(rgb: [u8; 3], alpha: f64) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) },
        }
    }

    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Immediate-mode 2D target the graph is drawn onto.
pub trait Surface {
    /// Wipe the whole surface; every frame is a full redraw.
    fn clear(&mut self, viewport: Viewport);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f64);
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, viewport: Viewport) {
        (**self).clear(viewport)
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f64) {
        (**self).stroke_line(from, to, color, width)
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        (**self).fill_circle(center, radius, color)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStyle {
    /// Pairs closer than this on screen get an edge.
    pub connection_threshold_px: f64,
    /// First-indexed point of a pair must be at least this visible.
    pub min_visibility: f64,
    pub node_radius_px: f64,
    pub node_color: [u8; 3],
    pub edge_color: [u8; 3],
    pub edge_alpha: f64,
    pub edge_width_px: f64,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            connection_threshold_px: 100.0,
            min_visibility: 0.1,
            node_radius_px: 2.0,
            node_color: [96, 165, 250],
            edge_color: [96, 165, 250],
            edge_alpha: 0.15,
            edge_width_px: 0.5,
        }
    }
}

/// Visits every pair `(i, j)`, `i < j`, that should be joined by an edge.
///
/// This is a deliberate all-pairs scan: node counts are small and the visual
/// result must not depend on any spatial bucketing. Only the first-indexed
/// point's visibility gates the pair.
pub fn for_each_edge<F>(points: &[ProjectedPoint], style: &GraphStyle, mut f: F)
where
    F: FnMut(usize, usize),
{
    let threshold = style.connection_threshold_px;
    if threshold.is_nan() || threshold <= 0.0 {
        return;
    }
    let threshold_sq = threshold * threshold;

    for (i, a) in points.iter().enumerate() {
        if a.visibility < style.min_visibility {
            continue;
        }
        let from = a.screen();
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            if (b.screen() - from).length_squared() < threshold_sq {
                f(i, j);
            }
        }
    }
}

/// Result of one graph pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct GraphDrawCounts {
    pub nodes: u32,
    pub edges: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphRenderer {
    pub style: GraphStyle,
}

impl GraphRenderer {
    pub fn new(style: GraphStyle) -> Self {
        Self { style }
    }

    /// Clears `surface` and draws edges, then nodes on top.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: Viewport,
        points: &[ProjectedPoint],
    ) -> GraphDrawCounts {
        surface.clear(viewport);

        let edge_color = Rgba::from_rgb(self.style.edge_color, self.style.edge_alpha);
        let mut edges = 0u32;
        for_each_edge(points, &self.style, |i, j| {
            surface.stroke_line(
                points[i].screen(),
                points[j].screen(),
                edge_color,
                self.style.edge_width_px,
            );
            edges += 1;
        });

        for p in points {
            surface.fill_circle(
                p.screen(),
                self.style.node_radius_px,
                Rgba::from_rgb(self.style.node_color, p.visibility),
            );
        }

        GraphDrawCounts {
            nodes: points.len() as u32,
            edges,
        }
    }
}
