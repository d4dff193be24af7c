use super::Vec3;

/// Angular position on a sphere, in radians.
///
/// Latitude is measured from the equatorial (x/z) plane towards +y, longitude
/// sweeps from +x towards +z.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Spherical {
    pub lat_rad: f64,
    pub lon_rad: f64,
}

impl Spherical {
    pub fn new(lat_rad: f64, lon_rad: f64) -> Self {
        Self { lat_rad, lon_rad }
    }

    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians())
    }
}

/// Converts an angular position to a point on the sphere of `radius`.
pub fn spherical_to_cartesian(coord: Spherical, radius: f64) -> Vec3 {
    let (sin_lat, cos_lat) = coord.lat_rad.sin_cos();
    let (sin_lon, cos_lon) = coord.lon_rad.sin_cos();

    Vec3::new(
        radius * cos_lat * cos_lon,
        radius * sin_lat,
        radius * cos_lat * sin_lon,
    )
}
