//! Core data types: sky points, DST transitions and the generated diagram lines.

use core::fmt;

use crate::math::{PI, normalize_radians_0_to_tau};

/// A direction on the sky dome as seen from the observer.
///
/// Uses the horizontal coordinate system:
/// - Altitude: radians above the horizon, in (-π/2, π/2]
/// - Azimuth: radians clockwise from North, in [0, 2π)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkyPoint {
    altitude: f64,
    azimuth: f64,
}

impl SkyPoint {
    /// Creates a sky point from altitude and azimuth in radians.
    ///
    /// Azimuth is normalized into [0, 2π) and altitude is clamped to [-π/2, π/2].
    ///
    /// # Example
    /// ```
    /// # use sun_path::SkyPoint;
    /// let point = SkyPoint::new(0.5, -core::f64::consts::FRAC_PI_2);
    /// assert!((point.azimuth() - 1.5 * core::f64::consts::PI).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Self {
            altitude: altitude.clamp(-PI / 2.0, PI / 2.0),
            azimuth: normalize_radians_0_to_tau(azimuth),
        }
    }

    /// Creates a sky point from altitude and azimuth in degrees.
    #[must_use]
    pub fn from_degrees(altitude: f64, azimuth: f64) -> Self {
        Self::new(altitude.to_radians(), azimuth.to_radians())
    }

    /// Altitude above the horizon in radians.
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Azimuth in radians, clockwise from North.
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Altitude above the horizon in degrees.
    #[must_use]
    pub fn altitude_degrees(&self) -> f64 {
        self.altitude.to_degrees()
    }

    /// Azimuth in degrees (0° = North, 90° = East).
    #[must_use]
    pub fn azimuth_degrees(&self) -> f64 {
        self.azimuth.to_degrees()
    }

    /// Checks if the point is strictly above the horizon.
    #[must_use]
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// A day on which the local clock shifts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DstTransition {
    /// 1-based day of year (Jan 1 = 1) of the first local noon on the new offset.
    pub day_of_year: u32,
    /// Month (1-12).
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// True when clocks move forward (offset increased).
    pub spring_forward: bool,
    /// Signed change of the UTC offset in hours (e.g. `1.0` or `-1.0`).
    pub offset_change_hours: f64,
}

/// An hour-line sample tagged with whether its day falls inside daylight saving.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaggedPoint {
    /// Sun position at the line's clock hour on this day.
    pub point: SkyPoint,
    /// Whether the day is inside daylight saving time.
    pub is_dst: bool,
}

/// Label anchored on a line with optional text on either side of it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelPoint {
    /// Anchor position.
    pub point: SkyPoint,
    /// Text drawn above the line.
    pub above: Option<String>,
    /// Text drawn below the line.
    pub below: Option<String>,
}

/// Clock-time text anchored at a point of a transition arc.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockLabel {
    /// Anchor position.
    pub point: SkyPoint,
    /// Clock time after the transition, e.g. `"10:00"`.
    pub text: String,
}

/// Daily sun arc for one date (solstice) or a pair of dates sharing a declination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateArc {
    /// Above-horizon samples in clock order.
    pub points: Vec<SkyPoint>,
    /// Main label, the (first) date of the arc.
    pub primary_label: String,
    /// Date text placed above the arc.
    pub label_above: Option<String>,
    /// Date text placed below the arc.
    pub label_below: Option<String>,
    /// Additional date labels at fixed clock times.
    pub extra_labels: Vec<LabelPoint>,
    /// Solar-noon anchor for `label_above`.
    pub mid_label_point: Option<SkyPoint>,
    /// Solar-noon anchor for `label_below`.
    pub mid_label_point_below: Option<SkyPoint>,
}

/// End labels of an hour line, anchored where it meets the solstice arcs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourLabels {
    /// Text at the upper end.
    pub label_above: String,
    /// Text at the lower end.
    pub label_below: String,
    /// Upper end (the higher solstice), if above the horizon.
    pub top_label_point: Option<SkyPoint>,
    /// Lower end (the lower solstice), if above the horizon.
    pub bottom_label_point: Option<SkyPoint>,
}

/// One contiguous run of an hourly analemma with uniform DST status.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourSegment {
    /// Standard-time clock hour (0-24).
    pub hour: u32,
    /// Samples in day-of-year order.
    pub points: Vec<SkyPoint>,
    /// Standard-time label, e.g. `"9:00"`.
    pub primary_label: String,
    /// End labels; only on the first standard-time run of an hour.
    pub labels: Option<HourLabels>,
    /// Every sample of the hour across all runs; only on the first run emitted.
    pub tagged_points: Option<Vec<TaggedPoint>>,
}

/// Daily sun arc on a clock-change day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionArc {
    /// Above-horizon samples in clock order.
    pub points: Vec<SkyPoint>,
    /// The transition this arc is drawn for.
    pub transition: DstTransition,
    /// Date label, e.g. `"Mar 10"`.
    pub primary_label: String,
    /// Date text above the arc (fall-back days).
    pub label_above: Option<String>,
    /// Date text below the arc (spring-forward days).
    pub label_below: Option<String>,
    /// Clock times after the transition at each whole standard hour.
    pub hour_labels: Vec<ClockLabel>,
}

/// Discriminant of a [`PathLine`], used by renderers to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    /// June or December solstice arc.
    Solstice,
    /// Intermediate declination arc.
    Month,
    /// Hour line, standard-time run.
    Hour,
    /// Hour line, daylight-saving run.
    HourDst,
    /// Arc of a clock-change day.
    Dst,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Solstice => "solstice",
            Self::Month => "month",
            Self::Hour => "hour",
            Self::HourDst => "hour-dst",
            Self::Dst => "dst",
        };
        f.write_str(name)
    }
}

/// A labeled polyline of the sun path diagram.
///
/// Every line carries at least two points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum PathLine {
    /// Solstice arc
    Solstice(DateArc),
    /// Intermediate declination arc
    Month(DateArc),
    /// Standard-time hour line run
    Hour(HourSegment),
    /// Daylight-saving hour line run
    HourDst(HourSegment),
    /// Clock-change day arc
    Dst(TransitionArc),
}

impl PathLine {
    /// Gets the kind of this line.
    #[must_use]
    pub const fn kind(&self) -> LineKind {
        match self {
            Self::Solstice(_) => LineKind::Solstice,
            Self::Month(_) => LineKind::Month,
            Self::Hour(_) => LineKind::Hour,
            Self::HourDst(_) => LineKind::HourDst,
            Self::Dst(_) => LineKind::Dst,
        }
    }

    /// Gets the polyline samples.
    #[must_use]
    pub fn points(&self) -> &[SkyPoint] {
        match self {
            Self::Solstice(arc) | Self::Month(arc) => &arc.points,
            Self::Hour(segment) | Self::HourDst(segment) => &segment.points,
            Self::Dst(arc) => &arc.points,
        }
    }

    /// Gets the main label.
    #[must_use]
    pub fn primary_label(&self) -> &str {
        match self {
            Self::Solstice(arc) | Self::Month(arc) => &arc.primary_label,
            Self::Hour(segment) | Self::HourDst(segment) => &segment.primary_label,
            Self::Dst(arc) => &arc.primary_label,
        }
    }

    /// Gets the hour segment for hour lines.
    #[must_use]
    pub const fn as_hour_segment(&self) -> Option<&HourSegment> {
        match self {
            Self::Hour(segment) | Self::HourDst(segment) => Some(segment),
            _ => None,
        }
    }

    /// Gets the date arc for solstice and month lines.
    #[must_use]
    pub const fn as_date_arc(&self) -> Option<&DateArc> {
        match self {
            Self::Solstice(arc) | Self::Month(arc) => Some(arc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TAU;

    #[test]
    fn test_sky_point_normalization() {
        let point = SkyPoint::new(0.3, TAU + 0.5);
        assert!((point.azimuth() - 0.5).abs() < 1e-12);
        assert_eq!(point.altitude(), 0.3);

        let point = SkyPoint::new(2.0, -0.5);
        assert_eq!(point.altitude(), PI / 2.0);
        assert!((point.azimuth() - (TAU - 0.5)).abs() < 1e-12);

        let point = SkyPoint::from_degrees(30.0, 270.0);
        assert!((point.altitude_degrees() - 30.0).abs() < 1e-9);
        assert!((point.azimuth_degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_sky_point_horizon() {
        assert!(SkyPoint::new(0.01, 0.0).is_above_horizon());
        assert!(!SkyPoint::new(0.0, 0.0).is_above_horizon());
        assert!(!SkyPoint::new(-0.2, 0.0).is_above_horizon());
    }

    #[test]
    fn test_path_line_accessors() {
        let points = vec![SkyPoint::new(0.1, 1.0), SkyPoint::new(0.2, 1.1)];
        let line = PathLine::HourDst(HourSegment {
            hour: 9,
            points: points.clone(),
            primary_label: "9:00".to_string(),
            labels: None,
            tagged_points: None,
        });

        assert_eq!(line.kind(), LineKind::HourDst);
        assert_eq!(line.points(), points.as_slice());
        assert_eq!(line.primary_label(), "9:00");
        assert_eq!(line.as_hour_segment().map(|s| s.hour), Some(9));
        assert!(line.as_date_arc().is_none());
    }

    #[test]
    fn test_line_kind_display() {
        assert_eq!(LineKind::Solstice.to_string(), "solstice");
        assert_eq!(LineKind::HourDst.to_string(), "hour-dst");
        assert_eq!(LineKind::Dst.to_string(), "dst");
    }
}
