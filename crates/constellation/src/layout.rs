use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Current drawing-surface size in CSS pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Where the sphere's projection centre sits for a given viewport.
///
/// Centres are fractions of the viewport size. Wide layouts push the sphere
/// right and up so it clears the text column; narrow layouts centre it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    /// Viewports narrower than this use `narrow_center`.
    pub narrow_breakpoint_px: f64,
    pub wide_center: [f64; 2],
    pub narrow_center: [f64; 2],
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            narrow_breakpoint_px: 768.0,
            wide_center: [0.7, 0.42],
            narrow_center: [0.5, 0.5],
        }
    }
}

impl LayoutPolicy {
    pub fn is_narrow(&self, viewport: Viewport) -> bool {
        viewport.width < self.narrow_breakpoint_px
    }

    pub fn projection_center(&self, viewport: Viewport) -> Vec2 {
        let [fx, fy] = if self.is_narrow(viewport) {
            self.narrow_center
        } else {
            self.wide_center
        };
        Vec2::new(viewport.width * fx, viewport.height * fy)
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutPolicy, Viewport};
    use foundation::math::Vec2;

    #[test]
    fn wide_viewport_shifts_right_and_up() {
        let policy = LayoutPolicy::default();
        let vp = Viewport::new(1600.0, 900.0);
        let c = policy.projection_center(vp);
        assert!(c.x > vp.width / 2.0);
        assert!(c.y < vp.height / 2.0);
    }

    #[test]
    fn narrow_viewport_centres_horizontally() {
        let policy = LayoutPolicy::default();
        let c = policy.projection_center(Viewport::new(400.0, 800.0));
        assert_eq!(c, Vec2::new(200.0, 400.0));
    }

    #[test]
    fn breakpoint_is_configurable() {
        let policy = LayoutPolicy {
            narrow_breakpoint_px: 2000.0,
            ..LayoutPolicy::default()
        };
        assert!(policy.is_narrow(Viewport::new(1600.0, 900.0)));
    }

    #[test]
    fn negative_sizes_clamp_to_zero() {
        let vp = Viewport::new(-5.0, 10.0);
        assert_eq!(vp.width, 0.0);
    }
}
