//! Angle utilities shared by the calculators and projector.

/// Mathematical constants
pub const PI: f64 = core::f64::consts::PI;
/// Full turn in radians.
pub const TAU: f64 = core::f64::consts::TAU;

/// Normalizes an angle in radians to the range [0, 2π).
pub fn normalize_radians_0_to_tau(radians: f64) -> f64 {
    let normalized = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if normalized >= TAU { 0.0 } else { normalized }
}

/// Normalizes an angle in radians to the range (-π, π].
pub fn normalize_radians_signed(radians: f64) -> f64 {
    let normalized = normalize_radians_0_to_tau(radians);
    if normalized > PI {
        normalized - TAU
    } else {
        normalized
    }
}

/// Clamps a sine/cosine value into [-1, 1] before an inverse trig call.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}
