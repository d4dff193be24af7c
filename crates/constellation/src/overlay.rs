use foundation::math::{Spherical, Vec2, Vec3, spherical_to_cartesian};
use serde::{Deserialize, Serialize};

use crate::projection::perspective_scale;
use crate::rotation::RotationState;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Overlays ride on a sphere this much larger than the node sphere.
    pub radius_offset: f64,
    /// Multiplier on rotated y; keeps overlays clear of the page header/footer.
    pub vertical_flatten: f64,
    /// Overlays never fade below this opacity.
    pub min_opacity: f64,
    /// Opacity is `(z + depth_bias * R) / 2R` before clamping.
    pub depth_bias: f64,
    /// Added to `floor(z)` so overlays stack above the canvas.
    pub z_index_base: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            radius_offset: 40.0,
            vertical_flatten: 0.6,
            min_opacity: 0.2,
            depth_bias: 1.5,
            z_index_base: 1000,
        }
    }
}

/// Style written to one overlay element for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OverlayStyle {
    pub translate: Vec2,
    pub scale: f64,
    pub opacity: f64,
    pub z_index: i32,
}

impl OverlayStyle {
    /// CSS transform centring the element on its projected anchor.
    pub fn transform_css(&self) -> String {
        format!(
            "translate(-50%, -50%) translate3d({:.2}px, {:.2}px, 0px) scale({:.4})",
            self.translate.x, self.translate.y, self.scale
        )
    }

    pub fn opacity_css(&self) -> String {
        format!("{:.3}", self.opacity)
    }

    pub fn z_index_css(&self) -> String {
        self.z_index.to_string()
    }
}

/// Narrow styling capability over elements owned elsewhere.
///
/// Implementations may only touch transform, opacity and stacking order.
pub trait StyleSink<H> {
    fn apply(&mut self, handle: &H, style: &OverlayStyle);
}

/// An externally owned element pinned to a lat/lon on the overlay sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayAnchor<H> {
    pub handle: H,
    pub coord: Spherical,
}

impl<H> OverlayAnchor<H> {
    pub fn new(handle: H, coord: Spherical) -> Self {
        Self { handle, coord }
    }

    pub fn from_degrees(handle: H, lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(handle, Spherical::from_degrees(lat_deg, lon_deg))
    }
}

/// Maps overlay base points through rotation and projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OverlayPlacer {
    pub distance: f64,
    pub sphere_radius: f64,
    pub config: OverlayConfig,
}

impl OverlayPlacer {
    pub fn new(distance: f64, sphere_radius: f64, config: OverlayConfig) -> Self {
        Self {
            distance,
            sphere_radius,
            config,
        }
    }

    pub fn anchor_radius(&self) -> f64 {
        self.sphere_radius + self.config.radius_offset
    }

    pub fn base_point(&self, coord: Spherical) -> Vec3 {
        spherical_to_cartesian(coord, self.anchor_radius())
    }

    pub fn opacity(&self, z: f64) -> f64 {
        let r = self.sphere_radius;
        let raw = (z + self.config.depth_bias * r) / (2.0 * r);
        raw.max(self.config.min_opacity).min(1.0)
    }

    pub fn z_index(&self, z: f64) -> i32 {
        (z.floor() as i32).saturating_add(self.config.z_index_base)
    }

    pub fn place(&self, base: Vec3, rotation: RotationState, center: Vec2) -> OverlayStyle {
        let r = rotation.rotate(base);
        let y = r.y * self.config.vertical_flatten;
        let scale = perspective_scale(r.z, self.distance);

        OverlayStyle {
            translate: Vec2::new(center.x + r.x * scale, center.y + y * scale),
            scale,
            opacity: self.opacity(r.z),
            z_index: self.z_index(r.z),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Placed<H> {
    anchor: OverlayAnchor<H>,
    base: Vec3,
}

/// Counts from one overlay pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct OverlayUpdate {
    pub updated: u32,
    pub skipped: u32,
}

/// The fixed set of overlays registered at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer<H> {
    entries: Vec<Placed<H>>,
    active: bool,
}

impl<H> OverlayLayer<H> {
    pub fn new(anchors: Vec<OverlayAnchor<H>>, placer: &OverlayPlacer) -> Self {
        let entries = anchors
            .into_iter()
            .map(|anchor| Placed {
                base: placer.base_point(anchor.coord),
                anchor,
            })
            .collect();
        Self {
            entries,
            active: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Overlays only get styled while the view that owns them is showing.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn update<K: StyleSink<H> + ?Sized>(
        &self,
        placer: &OverlayPlacer,
        rotation: RotationState,
        center: Vec2,
        sink: &mut K,
    ) -> OverlayUpdate {
        if !self.active {
            return OverlayUpdate {
                updated: 0,
                skipped: self.entries.len() as u32,
            };
        }

        for e in &self.entries {
            let style = placer.place(e.base, rotation, center);
            sink.apply(&e.anchor.handle, &style);
        }
        OverlayUpdate {
            updated: self.entries.len() as u32,
            skipped: 0,
        }
    }
}
