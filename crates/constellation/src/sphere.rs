use foundation::math::Vec3;
use std::f64::consts::PI;

/// Point `i` of an `n`-point spiral over the sphere of `radius`.
///
/// Polar angles are evenly spaced in cosine (equal-area bands from pole to
/// pole); the azimuth sweeps at `sqrt(n * PI)` per radian of polar angle so
/// neighbouring indices land on adjacent turns of the spiral.
pub fn sphere_point(i: usize, n: usize, radius: f64) -> Vec3 {
    let n_f = n as f64;
    let phi = (-1.0 + 2.0 * i as f64 / n_f).acos();
    let theta = (n_f * PI).sqrt() * phi;

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vec3::new(
        radius * cos_theta * sin_phi,
        radius * sin_theta * sin_phi,
        radius * cos_phi,
    )
}

/// The fixed node set of the constellation.
///
/// Depends only on the count and radius, never on the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct SpherePointSet {
    radius: f64,
    points: Vec<Vec3>,
}

impl SpherePointSet {
    pub fn generate(count: usize, radius: f64) -> Self {
        let points = (0..count).map(|i| sphere_point(i, count, radius)).collect();
        Self { radius, points }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter()
    }
}
