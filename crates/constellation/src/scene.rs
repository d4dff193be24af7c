use foundation::math::Vec2;

use crate::config::ConstellationConfig;
use crate::layout::{LayoutPolicy, Viewport};
use crate::projection::{ProjectedPoint, Projector};
use crate::rotation::{RotationConfig, RotationState};
use crate::sphere::SpherePointSet;

/// All mutable per-session state of the animation, in one place.
///
/// Transforms read from it and write derived values back; nothing else holds
/// rotation angles or viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub points: SpherePointSet,
    pub rotation: RotationState,
    pub viewport: Viewport,
    pub center: Vec2,
    /// Reused every frame so steady-state ticks do not allocate.
    projected: Vec<ProjectedPoint>,
}

impl SceneState {
    pub fn new(config: &ConstellationConfig, viewport: Viewport) -> Self {
        let points = SpherePointSet::generate(config.node_count, config.sphere_radius);
        let projected = Vec::with_capacity(points.len());
        Self {
            center: config.layout.projection_center(viewport),
            points,
            rotation: RotationState::default(),
            viewport,
            projected,
        }
    }

    pub fn advance(&mut self, rates: &RotationConfig) {
        self.rotation = self.rotation.advanced(rates);
    }

    /// Rotates and projects every node into the frame buffer.
    pub fn project_all(&mut self, projector: &Projector) -> &[ProjectedPoint] {
        let rotation = self.rotation;
        let center = self.center;
        self.projected.clear();
        self.projected.extend(
            self.points
                .iter()
                .map(|p| projector.project(rotation.rotate(*p), center)),
        );
        &self.projected
    }

    /// Projection from the most recent `project_all`.
    pub fn projected(&self) -> &[ProjectedPoint] {
        &self.projected
    }

    /// Only the centre depends on the viewport; the node layout is kept.
    pub fn resize(&mut self, viewport: Viewport, layout: &LayoutPolicy) {
        self.viewport = viewport;
        self.center = layout.projection_center(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::SceneState;
    use crate::config::ConstellationConfig;
    use crate::layout::Viewport;
    use crate::projection::Projector;

    #[test]
    fn projection_buffer_is_reused() {
        let cfg = ConstellationConfig::default();
        let mut scene = SceneState::new(&cfg, Viewport::new(800.0, 600.0));
        let proj = Projector::new(cfg.projection_distance, cfg.sphere_radius);

        assert_eq!(scene.project_all(&proj).len(), 100);
        let cap = scene.projected.capacity();
        for _ in 0..10 {
            scene.advance(&cfg.rotation);
            scene.project_all(&proj);
        }
        assert_eq!(scene.projected().len(), 100);
        assert_eq!(scene.projected.capacity(), cap);
    }

    #[test]
    fn resize_moves_center_only() {
        let cfg = ConstellationConfig::default();
        let mut scene = SceneState::new(&cfg, Viewport::new(1600.0, 900.0));
        let before = scene.points.clone();
        let old_center = scene.center;

        scene.resize(Viewport::new(500.0, 900.0), &cfg.layout);

        assert_ne!(scene.center, old_center);
        assert_eq!(scene.points, before);
        assert_eq!(scene.viewport, Viewport::new(500.0, 900.0));
    }
}
