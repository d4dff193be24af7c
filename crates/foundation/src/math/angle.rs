use std::f64::consts::TAU;

/// Wraps an angle into `[0, 2π)`.
///
/// Non-finite input is returned unchanged.
pub fn wrap_angle(rad: f64) -> f64 {
    if !rad.is_finite() {
        return rad;
    }
    let wrapped = rad.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}
