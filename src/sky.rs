//! Placement of sky points on a dome around the observer.
//!
//! Coordinates are local East-North-Up: +x east, +y north, +z up, origin at the observer.

use chrono::{DateTime, TimeZone};

use crate::SkyPoint;
use crate::position::{DeclinationModel, SolarModel};

/// A position in the observer's local East-North-Up frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enu {
    /// Distance towards East.
    pub east: f64,
    /// Distance towards North.
    pub north: f64,
    /// Distance towards the zenith.
    pub up: f64,
}

impl Enu {
    /// Euclidean distance from the observer.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.east * self.east + self.north * self.north + self.up * self.up).sqrt()
    }
}

/// Projects a sky point onto a dome of the given radius.
///
/// # Example
/// ```
/// # use sun_path::{SkyPoint, sky::to_tangent_plane};
/// let east_horizon = to_tangent_plane(SkyPoint::from_degrees(0.0, 90.0), 100.0);
/// assert!((east_horizon.east - 100.0).abs() < 1e-9);
/// assert!(east_horizon.north.abs() < 1e-9);
/// assert!(east_horizon.up.abs() < 1e-9);
/// ```
#[must_use]
pub fn to_tangent_plane(point: SkyPoint, radius: f64) -> Enu {
    let (sin_alt, cos_alt) = point.altitude().sin_cos();
    let (sin_az, cos_az) = point.azimuth().sin_cos();
    Enu {
        east: radius * sin_az * cos_alt,
        north: radius * cos_az * cos_alt,
        up: radius * sin_alt,
    }
}

/// Recovers the sky direction of an ENU position; the inverse of [`to_tangent_plane`].
///
/// Returns `None` for the origin, which has no direction.
#[must_use]
pub fn from_tangent_plane(position: Enu) -> Option<SkyPoint> {
    let horizontal = position.east.hypot(position.north);
    if horizontal == 0.0 && position.up == 0.0 {
        return None;
    }
    let altitude = position.up.atan2(horizontal);
    let azimuth = position.east.atan2(position.north);
    Some(SkyPoint::new(altitude, azimuth))
}

/// Sun position at an instant for an observer, using the default model.
///
/// Meant to be polled on a coarse timer by a renderer, independently of diagram generation.
#[must_use]
pub fn current_position<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    instant: &DateTime<Tz>,
) -> SkyPoint {
    current_position_with(&DeclinationModel, latitude, longitude, instant)
}

/// Sun position at an instant using the given solar model.
#[must_use]
pub fn current_position_with<M: SolarModel + ?Sized, Tz: TimeZone>(
    model: &M,
    latitude: f64,
    longitude: f64,
    instant: &DateTime<Tz>,
) -> SkyPoint {
    model.sky_position(instant.naive_utc(), latitude, longitude)
}
