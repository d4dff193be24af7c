use foundation::math::{Vec3, wrap_angle};
use serde::{Deserialize, Serialize};

/// Per-frame rotation increments, in radians per frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub rate_x: f64,
    pub rate_y: f64,
    /// Keep angles in `[0, 2π)` so long sessions don't lose float precision.
    pub wrap: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            rate_x: 0.001,
            rate_y: 0.002,
            wrap: true,
        }
    }
}

/// Current orientation of the constellation.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RotationState {
    pub angle_x: f64,
    pub angle_y: f64,
}

impl RotationState {
    pub fn new(angle_x: f64, angle_y: f64) -> Self {
        Self { angle_x, angle_y }
    }

    /// Rotates `p` about Y by `angle_y`, then about X by `angle_x`.
    ///
    /// The order is fixed: the two rotations do not commute.
    pub fn rotate(self, p: Vec3) -> Vec3 {
        let (sin_y, cos_y) = self.angle_y.sin_cos();
        let (sin_x, cos_x) = self.angle_x.sin_cos();

        let x = p.x * cos_y - p.z * sin_y;
        let z1 = p.x * sin_y + p.z * cos_y;

        let y = p.y * cos_x - z1 * sin_x;
        let z = p.y * sin_x + z1 * cos_x;

        Vec3::new(x, y, z)
    }

    /// State after one frame at `rates`.
    pub fn advanced(self, rates: &RotationConfig) -> Self {
        let mut angle_x = self.angle_x + rates.rate_x;
        let mut angle_y = self.angle_y + rates.rate_y;
        if rates.wrap {
            angle_x = wrap_angle(angle_x);
            angle_y = wrap_angle(angle_y);
        }
        Self { angle_x, angle_y }
    }
}

#[cfg(test)]
mod tests {
    use super::{RotationConfig, RotationState};
    use foundation::math::Vec3;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        assert_close(a.x, b.x, eps);
        assert_close(a.y, b.y, eps);
        assert_close(a.z, b.z, eps);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let p = Vec3::new(12.0, -7.5, 280.0);
        assert_eq!(RotationState::default().rotate(p), p);
    }

    #[test]
    fn rotation_preserves_norm() {
        let samples = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-280.0, 0.0, 0.0),
            Vec3::new(0.0, 199.0, -197.0),
        ];
        let states = [
            RotationState::new(0.3, 1.7),
            RotationState::new(-2.0, 0.01),
            RotationState::new(100.0, -45.0),
        ];
        for p in samples {
            for s in states {
                assert_close(s.rotate(p).length(), p.length(), 1e-9);
            }
        }
    }

    #[test]
    fn y_rotation_is_applied_before_x() {
        // +x rotated 90° about Y lands on +z, then 90° about X carries it to -y.
        let s = RotationState::new(FRAC_PI_2, FRAC_PI_2);
        let r = s.rotate(Vec3::new(1.0, 0.0, 0.0));
        assert_vec_close(r, Vec3::new(0.0, -1.0, 0.0), 1e-12);

        // Reversed order would leave it on +z.
        let y_only = RotationState::new(0.0, FRAC_PI_2).rotate(Vec3::new(1.0, 0.0, 0.0));
        assert_vec_close(y_only, Vec3::new(0.0, 0.0, 1.0), 1e-12);
    }

    #[test]
    fn advance_uses_distinct_rates() {
        let rates = RotationConfig::default();
        let s = RotationState::default().advanced(&rates);
        assert_close(s.angle_x, 0.001, 1e-15);
        assert_close(s.angle_y, 0.002, 1e-15);
        assert_ne!(rates.rate_x, rates.rate_y);
    }

    #[test]
    fn wrapped_advance_matches_unwrapped_modulo_full_turn() {
        let wrapped_rates = RotationConfig {
            rate_x: 0.7,
            rate_y: 1.3,
            wrap: true,
        };
        let raw_rates = RotationConfig {
            wrap: false,
            ..wrapped_rates
        };

        let mut wrapped = RotationState::default();
        let mut raw = RotationState::default();
        for _ in 0..50 {
            wrapped = wrapped.advanced(&wrapped_rates);
            raw = raw.advanced(&raw_rates);
        }

        assert!(wrapped.angle_x < TAU && wrapped.angle_y < TAU);
        let p = Vec3::new(3.0, -4.0, 5.0);
        assert_vec_close(wrapped.rotate(p), raw.rotate(p), 1e-9);
    }
}
