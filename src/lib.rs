//! # Sun Path Diagrams
//!
//! Geometry for sun path diagrams: the curves the sun traces across the sky dome of an
//! observer over a year, ready to be projected into a 3D scene.
//!
//! A diagram consists of:
//! - **Solstice arcs**: the sun's daily path on June 21 and December 21
//! - **Declination arcs**: five intermediate daily paths, each shared by a date before and
//!   after the June solstice
//! - **Hour lines**: the sun's position at the same clock hour on every day of the year,
//!   split into standard-time and daylight-saving runs
//! - **DST arcs**: the daily paths of the days on which clocks change
//!
//! ## Features
//!
//! - Pure generation: the same inputs always produce the same lines
//! - Pluggable solar model: a self-contained declination approximation by default,
//!   the Grena3 ephemeris for real analemmas
//! - Empirical DST detection that works for either hemisphere and zones without DST
//!
//! ## Feature Flags
//!
//! - `tz` (default): resolve IANA time zone identifiers with `chrono-tz`
//! - `serde`: `Serialize`/`Deserialize` for the output model and configuration
//!
//! ## Quick Start
//!
//! ### Full diagram for a time zone
//! ```rust
//! # #[cfg(feature = "tz")] {
//! use sun_path::{LineKind, generate_for_zone};
//!
//! // Waterloo, Ontario
//! let lines = generate_for_zone(43.47, -80.54, 2024, "America/Toronto");
//!
//! let dst_arcs = lines.iter().filter(|line| line.kind() == LineKind::Dst).count();
//! assert_eq!(dst_arcs, 2);
//! # }
//! ```
//!
//! ### Explicit transitions and placement
//! ```rust
//! use sun_path::{DstTransition, generate, sky::to_tangent_plane};
//!
//! let transition = |day_of_year, month, day, spring_forward, offset_change_hours| {
//!     DstTransition { day_of_year, month, day, spring_forward, offset_change_hours }
//! };
//! let transitions = [transition(70, 3, 10, true, 1.0), transition(308, 11, 3, false, -1.0)];
//! let lines = generate(43.47, -80.54, 2024, Some(&transitions[..]), None);
//!
//! for line in &lines {
//!     let polyline: Vec<_> = line.points().iter().map(|&p| to_tangent_plane(p, 10.0)).collect();
//!     assert!(polyline.len() >= 2);
//!     assert!(polyline.iter().all(|v| v.up > 0.0));
//! }
//! ```
//!
//! ### Current sun position
//! ```rust
//! use chrono::{DateTime, FixedOffset};
//! use sun_path::current_position;
//!
//! let now = "2024-06-21T13:00:00-04:00".parse::<DateTime<FixedOffset>>().unwrap();
//! let sun = current_position(43.47, -80.54, &now);
//! assert!(sun.altitude_degrees() > 60.0);
//! ```
//!
//! ## Coordinate System
//!
//! - **Azimuth**: radians clockwise from North (0 = North, π/2 = East), in [0, 2π)
//! - **Altitude**: radians above the horizon, in [-π/2, π/2]
//! - **Dome**: East-North-Up, +x East, +y North, +z up, observer at the origin
//!
//! Clock times are local standard time throughout; daylight saving only changes labels
//! and the split of hour lines.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of computed angles in tests
)]

// Public API exports
pub use crate::cache::SunPathCache;
pub use crate::config::SunPathConfig;
pub use crate::dst::{DstCalendar, find_transitions};
pub use crate::error::{Error, Result};
pub use crate::generator::{GenerationContext, SunPathGenerator, generate, generate_for_zone};
pub use crate::position::{DeclinationModel, SolarModel};
pub use crate::sky::{current_position, to_tangent_plane};
pub use crate::types::{
    ClockLabel, DateArc, DstTransition, HourLabels, HourSegment, LabelPoint, LineKind, PathLine,
    SkyPoint, TaggedPoint, TransitionArc,
};

// Calculators
pub mod grena3;
pub mod position;

// Diagram modules
pub mod cache;
pub mod dst;
pub mod generator;
pub mod sky;

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Internal modules
mod math;

// Public modules
pub mod time;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    #[test]
    fn test_current_position_matches_generated_arc() {
        // Same instant expressed two ways lands on the same point
        let local = "2023-06-21T12:00:00-05:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap();
        let utc = Utc.with_ymd_and_hms(2023, 6, 21, 17, 0, 0).unwrap();
        assert_eq!(
            current_position(43.47, -80.54, &local),
            current_position(43.47, -80.54, &utc)
        );

        // Noon EST on the June solstice is a sample of the June arc
        let lines = generate(43.47, -80.54, 2023, None, None);
        let june = lines[0].as_date_arc().unwrap();
        assert_eq!(june.primary_label, "Jun 21");
        let sun = current_position(43.47, -80.54, &local);
        assert!(june.points.iter().any(|p| *p == sun));
    }

    #[test]
    fn test_basic_diagram_shape() {
        let lines = generate(43.47, -80.54, 2024, None, None);
        let count = |kind: LineKind| lines.iter().filter(|l| l.kind() == kind).count();

        assert_eq!(count(LineKind::Solstice), 2);
        assert_eq!(count(LineKind::Month), 5);
        assert!(count(LineKind::Hour) <= 25);
        assert_eq!(count(LineKind::HourDst), 0);
        assert_eq!(count(LineKind::Dst), 0);
        assert!(lines.iter().all(|line| line.points().len() >= 2));
    }
}
