//! Grena3 solar ephemeris as a [`SolarModel`].
//!
//! This follows the no. 3 algorithm described in Grena, 'Five new algorithms for the computation
//! of sun position from 2010 to 2110', Solar Energy 86 (2012) pp. 1323-1337.
//!
//! The algorithm is designed for the years 2010 to 2110, with a maximum error of 0.01 degrees.
//! Unlike [`DeclinationModel`](crate::position::DeclinationModel) it accounts for orbital
//! eccentricity, so hour lines drawn with it trace real figure-eight analemmas.

#![allow(clippy::unreadable_literal)]

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::math::{TAU, normalize_radians_signed};
use crate::position::{EquatorialPosition, SolarModel};

/// Default ΔT in seconds, representative for the 2020s.
pub const DEFAULT_DELTA_T: f64 = 69.0;

/// Grena3 ephemeris with a fixed ΔT (difference between TT and UT1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grena3 {
    delta_t: f64,
}

impl Default for Grena3 {
    fn default() -> Self {
        Self::new(DEFAULT_DELTA_T)
    }
}

impl Grena3 {
    /// Creates the model with the given ΔT in seconds.
    #[must_use]
    pub const fn new(delta_t: f64) -> Self {
        Self { delta_t }
    }

    /// Gets ΔT in seconds.
    #[must_use]
    pub const fn delta_t(&self) -> f64 {
        self.delta_t
    }
}

impl SolarModel for Grena3 {
    fn equatorial(&self, utc: NaiveDateTime, longitude: f64) -> EquatorialPosition {
        let t = calc_t(&utc);
        let t_e = t + 1.1574e-5 * self.delta_t;
        let omega_at_e = 0.0172019715 * t_e;

        // Apparent sun longitude
        let lambda = -1.388803
            + 1.720279216e-2 * t_e
            + 3.3366e-2 * (omega_at_e - 0.06172).sin()
            + 3.53e-4 * (2.0 * omega_at_e - 0.1163).sin();

        // Obliquity of the ecliptic
        let epsilon = 4.089567e-1 - 6.19e-9 * t_e;

        let (s_lambda, c_lambda) = lambda.sin_cos();
        let s_epsilon = epsilon.sin();
        let c_epsilon = (1.0 - s_epsilon * s_epsilon).sqrt();

        let mut alpha = (s_lambda * c_epsilon).atan2(c_lambda);
        if alpha < 0.0 {
            alpha += TAU;
        }

        let declination = (s_lambda * s_epsilon).asin();
        let hour_angle = 1.7528311 + 6.300388099 * t + longitude.to_radians() - alpha;

        EquatorialPosition {
            declination,
            hour_angle: normalize_radians_signed(hour_angle),
        }
    }
}

/// Days since 2000-01-01 12:00 UT, Grena's `t` parameter.
#[allow(clippy::cast_possible_wrap)]
fn calc_t(utc: &NaiveDateTime) -> f64 {
    let mut m = utc.month() as i32;
    let mut y = utc.year();
    let d = utc.day() as i32;
    let h = f64::from(utc.hour())
        + f64::from(utc.minute()) / 60.0
        + f64::from(utc.second()) / 3600.0;

    if m <= 2 {
        m += 12;
        y -= 1;
    }

    f64::from((365.25 * f64::from(y - 2000)) as i32)
        + f64::from((30.6001 * f64::from(m + 1)) as i32)
        - f64::from((0.01 * f64::from(y)) as i32)
        + f64::from(d)
        + 0.0416667 * h
        - 21958.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PI;
    use crate::position::{DeclinationModel, horizontal_position};
    use chrono::NaiveDate;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_calc_t_is_deterministic_and_daily() {
        let t = calc_t(&utc(2023, 6, 21, 19, 0));
        assert!(t.is_finite());
        assert_eq!(t, calc_t(&utc(2023, 6, 21, 19, 0)));

        let next = calc_t(&utc(2023, 6, 22, 19, 0));
        assert!((next - t - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_solstice_declination() {
        let june = Grena3::default().equatorial(utc(2024, 6, 20, 21, 0), 0.0);
        assert!((june.declination.to_degrees() - 23.44).abs() < 0.02);

        let december = Grena3::default().equatorial(utc(2024, 12, 21, 9, 0), 0.0);
        assert!((december.declination.to_degrees() + 23.44).abs() < 0.02);
    }

    #[test]
    fn test_equation_of_time_shifts_noon() {
        // Early November the sun transits ~16 minutes before mean noon
        let eq = Grena3::default().equatorial(utc(2024, 11, 3, 12, 0), 0.0);
        let minutes = eq.hour_angle.to_degrees() * 4.0;
        assert!((minutes - 16.4).abs() < 1.0, "minutes={minutes}");

        // The self-contained model has no equation of time
        let approx = DeclinationModel.equatorial(utc(2024, 11, 3, 12, 0), 0.0);
        assert!(approx.hour_angle.abs() < 1e-9);
    }

    #[test]
    fn test_sky_position_in_range() {
        let model = Grena3::default();
        for hour in 0..24 {
            let p = model.sky_position(utc(2024, 3, 10, hour, 30), 43.47, -80.54);
            assert!((0.0..TAU).contains(&p.azimuth()));
            assert!(p.altitude().abs() <= PI / 2.0);

            let eq = model.equatorial(utc(2024, 3, 10, hour, 30), -80.54);
            let direct = horizontal_position(43.47_f64.to_radians(), eq.declination, eq.hour_angle);
            assert_eq!(p, direct);
        }
    }
}
