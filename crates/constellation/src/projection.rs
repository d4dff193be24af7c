use foundation::math::{Vec2, Vec3};

/// A sphere node as seen on the drawing surface this frame.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Rotated z, positive towards the viewer.
    pub depth: f64,
    /// `(z + R) / (2R)`: ~1 facing the viewer, ~0 on the far side.
    pub visibility: f64,
}

impl ProjectedPoint {
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Perspective foreshortening for a point at depth `z`.
///
/// `z` must stay below `distance`; configuration validation guarantees that
/// for every point the pipeline can produce.
pub fn perspective_scale(z: f64, distance: f64) -> f64 {
    debug_assert!(z < distance, "z {z} reached projection distance {distance}");
    distance / (distance - z)
}

/// Depth-derived node opacity.
pub fn depth_visibility(z: f64, radius: f64) -> f64 {
    (z + radius) / (2.0 * radius)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projector {
    pub distance: f64,
    pub radius: f64,
}

impl Projector {
    pub fn new(distance: f64, radius: f64) -> Self {
        Self { distance, radius }
    }

    pub fn project(&self, p: Vec3, center: Vec2) -> ProjectedPoint {
        let scale = perspective_scale(p.z, self.distance);
        ProjectedPoint {
            x: center.x + p.x * scale,
            y: center.y + p.y * scale,
            depth: p.z,
            visibility: depth_visibility(p.z, self.radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Projector, depth_visibility, perspective_scale};
    use foundation::math::{Vec2, Vec3};

    #[test]
    fn scale_is_one_on_the_rotation_plane() {
        assert_eq!(perspective_scale(0.0, 2000.0), 1.0);
    }

    #[test]
    fn scale_matches_formula_and_grows_towards_camera() {
        let d = 2000.0;
        let mut prev = 0.0;
        for z in [-500.0, -10.0, 0.0, 100.0, 280.0, 1500.0, 1999.0] {
            let s = perspective_scale(z, d);
            assert_eq!(s, d / (d - z));
            assert!(s > prev, "scale must increase with z");
            prev = s;
        }
    }

    #[test]
    fn visibility_spans_zero_to_one_across_the_sphere() {
        assert_eq!(depth_visibility(-280.0, 280.0), 0.0);
        assert_eq!(depth_visibility(0.0, 280.0), 0.5);
        assert_eq!(depth_visibility(280.0, 280.0), 1.0);
    }

    #[test]
    fn projects_around_center() {
        let proj = Projector::new(2000.0, 280.0);
        let c = Vec2::new(400.0, 300.0);

        let flat = proj.project(Vec3::new(10.0, -20.0, 0.0), c);
        assert_eq!(flat.x, 410.0);
        assert_eq!(flat.y, 280.0);
        assert_eq!(flat.depth, 0.0);

        let near = proj.project(Vec3::new(10.0, 0.0, 1000.0), c);
        assert_eq!(near.x, 420.0);
        assert_eq!(near.depth, 1000.0);
    }
}
