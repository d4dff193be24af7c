//! Headless hosts for the constellation: an SVG surface, an in-memory overlay
//! sink and the small parsers the `constellation` binary needs.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use constellation::{
    ConstellationConfig, OverlayAnchor, OverlayStyle, Rgba, SpherePointSet, StyleSink, Surface,
    Viewport,
};
use foundation::math::Vec2;
use serde::Serialize;

pub fn load_config(path: Option<&Path>) -> Result<ConstellationConfig, String> {
    let Some(path) = path else {
        return Ok(ConstellationConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    ConstellationConfig::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// `WIDTHxHEIGHT`, e.g. `1280x720`.
pub fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid viewport: {s} (expected WIDTHxHEIGHT)"))?;
    let width: f64 = w
        .trim()
        .parse()
        .map_err(|_| format!("invalid viewport width: {w}"))?;
    let height: f64 = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid viewport height: {h}"))?;
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(format!("viewport must be positive: {s}"));
    }
    Ok(Viewport::new(width, height))
}

/// `ID:LAT:LON` in degrees, e.g. `badge:12.5:-40`.
pub fn parse_anchor(s: &str) -> Result<OverlayAnchor<String>, String> {
    let mut parts = s.rsplitn(3, ':');
    let lon = parts.next();
    let lat = parts.next();
    let id = parts.next();
    let (Some(id), Some(lat), Some(lon)) = (id, lat, lon) else {
        return Err(format!("invalid anchor: {s} (expected ID:LAT:LON)"));
    };
    if id.is_empty() {
        return Err(format!("anchor id is empty: {s}"));
    }
    let lat: f64 = lat
        .parse()
        .map_err(|_| format!("invalid anchor latitude: {lat}"))?;
    let lon: f64 = lon
        .parse()
        .map_err(|_| format!("invalid anchor longitude: {lon}"))?;
    Ok(OverlayAnchor::from_degrees(id.to_string(), lat, lon))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointRecord {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub fn point_records(points: &SpherePointSet) -> Vec<PointRecord> {
    points
        .iter()
        .enumerate()
        .map(|(index, p)| PointRecord {
            index,
            x: p.x,
            y: p.y,
            z: p.z,
        })
        .collect()
}

/// Writes draw calls into an SVG document.
#[derive(Debug, Default)]
pub struct SvgSurface {
    viewport: Viewport,
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.viewport.width,
            h = self.viewport.height,
            body = self.body
        )
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.body.clear();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f64) {
        let _ = writeln!(
            self.body,
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_css(),
            width
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        let _ = writeln!(
            self.body,
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"/>",
            center.x,
            center.y,
            radius,
            color.to_css()
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub transform: String,
    pub opacity: String,
    pub z_index: String,
}

/// Keeps the last style written to each overlay, as the DOM would.
#[derive(Debug, Default, Serialize)]
pub struct PlacementLog {
    pub placements: BTreeMap<String, Placement>,
    pub writes: u64,
}

impl StyleSink<String> for PlacementLog {
    fn apply(&mut self, handle: &String, style: &OverlayStyle) {
        self.writes += 1;
        self.placements.insert(
            handle.clone(),
            Placement {
                transform: style.transform_css(),
                opacity: style.opacity_css(),
                z_index: style.z_index_css(),
            },
        );
    }
}
