//! Solar position from declination and hour angle.
//!
//! The horizontal conversion is the standard spherical-triangle solution:
//!
//! - altitude: `asin(sin φ · sin δ + cos φ · cos δ · cos H)`
//! - azimuth: `acos((sin δ − sin h · sin φ) / (cos h · cos φ))`, mirrored for `H > 0`
//!
//! where φ is the observer latitude, δ the declination, H the hour angle and h the altitude.
//! Where and when the sun is (δ and H) is supplied by a [`SolarModel`]; the crate ships the
//! self-contained [`DeclinationModel`] and the [`Grena3`](crate::grena3::Grena3) ephemeris.

use chrono::NaiveDateTime;

use crate::SkyPoint;
use crate::math::{PI, TAU, clamp_unit, normalize_radians_0_to_tau, normalize_radians_signed};
use crate::time::{fractional_day_of_year, utc_hours};

/// Maximum solar declination (obliquity of the ecliptic) in degrees.
pub const MAX_DECLINATION_DEGREES: f64 = 23.4393;

/// Day of year at which the single-harmonic declination crosses zero (March equinox).
const EQUINOX_DAY: f64 = 81.0;

/// Below this `cos h · cos φ` the cosine rule is numerically meaningless.
const AZIMUTH_DENOMINATOR_EPSILON: f64 = 1e-12;

/// Equatorial coordinates of the sun relative to an observer's meridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    /// Declination in radians.
    pub declination: f64,
    /// Local hour angle in radians, in (-π, π]; negative before solar noon.
    pub hour_angle: f64,
}

/// Source of the sun's declination and hour angle for an instant.
///
/// Implementations must be pure; the generator queries them tens of thousands of
/// times per diagram.
pub trait SolarModel {
    /// Declination and local hour angle at a UTC instant for an observer at `longitude` degrees.
    fn equatorial(&self, utc: NaiveDateTime, longitude: f64) -> EquatorialPosition;

    /// Sun position on the sky dome at a UTC instant.
    fn sky_position(&self, utc: NaiveDateTime, latitude: f64, longitude: f64) -> SkyPoint {
        let eq = self.equatorial(utc, longitude);
        horizontal_position(latitude.to_radians(), eq.declination, eq.hour_angle)
    }
}

impl<M: SolarModel + ?Sized> SolarModel for &M {
    fn equatorial(&self, utc: NaiveDateTime, longitude: f64) -> EquatorialPosition {
        (**self).equatorial(utc, longitude)
    }
}

/// Self-contained approximation: single-harmonic declination and mean solar time.
///
/// Declination error is up to about a degree around the equinoxes and the equation of
/// time is ignored, so hour lines collapse into declination-driven arcs. Good enough for
/// a visual sun path diagram, not for ephemeris work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclinationModel;

impl SolarModel for DeclinationModel {
    fn equatorial(&self, utc: NaiveDateTime, longitude: f64) -> EquatorialPosition {
        let declination = declination_for_day(fractional_day_of_year(&utc));
        let solar_hours = utc_hours(&utc) + longitude / 15.0;
        EquatorialPosition {
            declination,
            hour_angle: hour_angle_from_solar_time(solar_hours),
        }
    }
}

/// Solar declination in radians for a (possibly fractional) 1-based day of year.
///
/// `δ = 23.4393° · sin(2π(d − 81)/365)`
///
/// # Example
/// ```
/// # use sun_path::position::declination_for_day;
/// assert!(declination_for_day(81.0).abs() < 1e-12);
/// assert!((declination_for_day(172.25).to_degrees() - 23.4393).abs() < 1e-3);
/// ```
#[must_use]
pub fn declination_for_day(day_of_year: f64) -> f64 {
    MAX_DECLINATION_DEGREES.to_radians() * (TAU * (day_of_year - EQUINOX_DAY) / 365.0).sin()
}

/// Hour angle in radians for apparent solar time in hours (12.0 = solar noon).
#[must_use]
pub fn hour_angle_from_solar_time(solar_hours: f64) -> f64 {
    normalize_radians_signed(((solar_hours - 12.0) * 15.0).to_radians())
}

/// Converts declination and hour angle into a sky point for an observer at `latitude`.
///
/// All angles in radians. Altitude is computed from a clamped sine so floating-point
/// overshoot never produces NaN; the azimuth falls back to the `atan2` form where
/// `cos h · cos φ` vanishes (zenith, poles).
///
/// # Example
/// ```
/// # use sun_path::position::horizontal_position;
/// // Equinox sunrise on the equator: due east, on the horizon
/// let p = horizontal_position(0.0, 0.0, -core::f64::consts::FRAC_PI_2);
/// assert!(p.altitude().abs() < 1e-12);
/// assert!((p.azimuth_degrees() - 90.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn horizontal_position(latitude: f64, declination: f64, hour_angle: f64) -> SkyPoint {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_dec, cos_dec) = declination.sin_cos();
    let hour_angle = normalize_radians_signed(hour_angle);

    let sin_alt = clamp_unit(sin_lat * sin_dec + cos_lat * cos_dec * hour_angle.cos());
    let altitude = sin_alt.asin();

    let denominator = altitude.cos() * cos_lat;
    let azimuth = if denominator.abs() < AZIMUTH_DENOMINATOR_EPSILON {
        // 0 = South in the atan2 form, hence the half turn
        let (sin_h, cos_h) = hour_angle.sin_cos();
        sin_h.atan2(cos_h * sin_lat - sin_dec * cos_lat / cos_dec.max(f64::MIN_POSITIVE)) + PI
    } else {
        let cos_az = clamp_unit((sin_dec - sin_alt * sin_lat) / denominator);
        let azimuth = cos_az.acos();
        if hour_angle > 0.0 { TAU - azimuth } else { azimuth }
    };

    SkyPoint::new(altitude, azimuth)
}

/// Converts an azimuth measured from South (positive towards West) into this crate's
/// North-based, clockwise convention.
#[must_use]
pub fn from_south_based_azimuth(azimuth: f64) -> f64 {
    normalize_radians_0_to_tau(azimuth + PI)
}
