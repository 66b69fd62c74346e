//! Sun path diagram generation.
//!
//! A diagram for one location and year is the concatenation of, in order:
//!
//! 1. the June and December solstice arcs,
//! 2. intermediate declination arcs, each shared by a rising and a falling date,
//! 3. hourly analemma lines split into standard-time and DST runs,
//! 4. the arcs of clock-change days.
//!
//! Generation is a pure function of its inputs. It is cheap enough to run once per
//! location/year change, but not per frame; see [`SunPathCache`](crate::SunPathCache).

mod daily_arcs;
mod dst_arcs;
mod hour_lines;

use chrono::NaiveDate;
use log::warn;

use crate::dst::{DstCalendar, dst_adjustment_hours, find_transitions, resolve_zone};
use crate::error::{check_coordinates, check_year};
use crate::position::{DeclinationModel, SolarModel, horizontal_position};
use crate::time::clock_to_utc;
use crate::{DstTransition, PathLine, Result, SkyPoint, SunPathConfig};

/// Per-request facts derived once from the inputs and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationContext {
    /// Observer latitude in degrees.
    pub latitude: f64,
    /// Observer longitude in degrees.
    pub longitude: f64,
    /// Calendar year of the diagram.
    pub year: i32,
    /// Zone offset from UTC without daylight saving, in hours.
    pub standard_utc_offset_hours: f64,
    /// Clock shift applied during daylight saving, in hours (0 without DST).
    pub dst_adjustment_hours: f64,
    /// Whether the observer is on or north of the equator.
    pub is_northern_hemisphere: bool,
}

impl GenerationContext {
    /// Derives the context, taking the standard offset from the time zone when it resolves.
    ///
    /// Without a usable zone the standard offset is the nautical one, `round(longitude / 15)`.
    #[must_use]
    pub fn new(
        latitude: f64,
        longitude: f64,
        year: i32,
        transitions: &[DstTransition],
        timezone_id: Option<&str>,
    ) -> Self {
        let standard_offset = timezone_id
            .and_then(|id| match resolve_zone(id) {
                Ok(zone) => zone.standard_offset_hours(year),
                Err(err) => {
                    warn!("{err}; using the nautical offset for longitude {longitude}");
                    None
                }
            })
            .unwrap_or_else(|| (longitude / 15.0).round());

        Self::with_standard_offset(latitude, longitude, year, standard_offset, transitions)
    }

    /// Derives the context with an explicitly known standard offset.
    #[must_use]
    pub fn with_standard_offset(
        latitude: f64,
        longitude: f64,
        year: i32,
        standard_utc_offset_hours: f64,
        transitions: &[DstTransition],
    ) -> Self {
        Self {
            latitude,
            longitude,
            year,
            standard_utc_offset_hours,
            dst_adjustment_hours: dst_adjustment_hours(transitions),
            is_northern_hemisphere: latitude >= 0.0,
        }
    }

    /// Like [`GenerationContext::new`] but rejects out-of-range coordinates and years.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates and
    /// `YearOutOfRange` outside [`supported_years`](crate::error::supported_years).
    pub fn checked(
        latitude: f64,
        longitude: f64,
        year: i32,
        transitions: &[DstTransition],
        timezone_id: Option<&str>,
    ) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        check_year(year)?;
        Ok(Self::new(latitude, longitude, year, transitions, timezone_id))
    }

    /// Whole-hour clock shift used for DST labels.
    #[must_use]
    pub(crate) fn dst_shift_hours(&self) -> i64 {
        self.dst_adjustment_hours.round() as i64
    }
}

/// Evaluates the solar model at local standard clock times for one context.
pub(crate) struct Sampler<'a, M: ?Sized> {
    model: &'a M,
    context: &'a GenerationContext,
    latitude_radians: f64,
}

impl<'a, M: SolarModel + ?Sized> Sampler<'a, M> {
    pub(crate) fn new(model: &'a M, context: &'a GenerationContext) -> Self {
        Self {
            model,
            context,
            latitude_radians: context.latitude.to_radians(),
        }
    }

    pub(crate) const fn context(&self) -> &GenerationContext {
        self.context
    }

    /// Sun position at a standard-time clock reading on a local date.
    pub(crate) fn at(&self, date: NaiveDate, clock_hours: f64) -> SkyPoint {
        let utc = clock_to_utc(date, clock_hours, self.context.standard_utc_offset_hours);
        let eq = self.model.equatorial(utc, self.context.longitude);
        horizontal_position(self.latitude_radians, eq.declination, eq.hour_angle)
    }

    /// Sun position at solar noon (hour angle zero) of a local date.
    pub(crate) fn solar_noon(&self, date: NaiveDate) -> SkyPoint {
        let utc = clock_to_utc(date, 12.0, self.context.standard_utc_offset_hours);
        let eq = self.model.equatorial(utc, self.context.longitude);
        horizontal_position(self.latitude_radians, eq.declination, 0.0)
    }
}

/// Builds sun path diagrams with a fixed configuration and solar model.
///
/// # Example
/// ```
/// use sun_path::{LineKind, SunPathGenerator};
///
/// let generator: SunPathGenerator = SunPathGenerator::default();
/// let lines = generator.generate(43.47, -80.54, 2024, None, None);
/// let solstices = lines.iter().filter(|l| l.kind() == LineKind::Solstice).count();
/// assert_eq!(solstices, 2);
/// ```
#[derive(Debug, Clone)]
pub struct SunPathGenerator<M = DeclinationModel> {
    config: SunPathConfig,
    model: M,
}

impl Default for SunPathGenerator<DeclinationModel> {
    fn default() -> Self {
        Self::new(SunPathConfig::default())
    }
}

impl SunPathGenerator<DeclinationModel> {
    /// Creates a generator using the self-contained declination model.
    #[must_use]
    pub const fn new(config: SunPathConfig) -> Self {
        Self {
            config,
            model: DeclinationModel,
        }
    }
}

impl<M: SolarModel> SunPathGenerator<M> {
    /// Creates a generator with a custom solar model.
    #[must_use]
    pub const fn with_model(config: SunPathConfig, model: M) -> Self {
        Self { config, model }
    }

    /// Gets the configuration.
    #[must_use]
    pub const fn config(&self) -> &SunPathConfig {
        &self.config
    }

    /// Gets the solar model.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Generates every line of the diagram.
    ///
    /// `transitions` come from [`find_transitions`] or any other source; `timezone_id`
    /// only determines the standard UTC offset.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for an unusable configuration and `YearOutOfRange` when the
    /// year is outside [`supported_years`](crate::error::supported_years).
    pub fn try_generate(
        &self,
        latitude: f64,
        longitude: f64,
        year: i32,
        transitions: Option<&[DstTransition]>,
        timezone_id: Option<&str>,
    ) -> Result<Vec<PathLine>> {
        self.config.validate()?;
        let transitions = transitions.unwrap_or_default();
        let context = GenerationContext::new(latitude, longitude, year, transitions, timezone_id);
        self.try_generate_in(&context, transitions)
    }

    /// Generates every line of the diagram for an already derived context.
    ///
    /// # Errors
    /// Same as [`SunPathGenerator::try_generate`].
    pub fn try_generate_in(
        &self,
        context: &GenerationContext,
        transitions: &[DstTransition],
    ) -> Result<Vec<PathLine>> {
        self.config.validate()?;
        check_year(context.year)?;
        let sampler = Sampler::new(&self.model, context);
        let calendar = DstCalendar::new(transitions);

        let mut lines = daily_arcs::solstice_arcs(&sampler, &self.config)?;
        lines.extend(daily_arcs::intermediate_arcs(&sampler, &self.config)?);
        lines.extend(hour_lines::hour_lines(&sampler, &calendar)?);
        lines.extend(dst_arcs::transition_arcs(&sampler, &self.config, transitions));
        Ok(lines)
    }

    /// Generates every line of the diagram; never fails.
    ///
    /// Errors are logged and yield an empty diagram. Out-of-range coordinates are the
    /// caller's responsibility.
    #[must_use]
    pub fn generate(
        &self,
        latitude: f64,
        longitude: f64,
        year: i32,
        transitions: Option<&[DstTransition]>,
        timezone_id: Option<&str>,
    ) -> Vec<PathLine> {
        self.try_generate(latitude, longitude, year, transitions, timezone_id)
            .unwrap_or_else(|err| {
                warn!("sun path generation failed: {err}");
                Vec::new()
            })
    }

    /// Detects the zone's DST transitions for `year` and generates the full diagram.
    #[must_use]
    pub fn generate_for_zone(
        &self,
        latitude: f64,
        longitude: f64,
        year: i32,
        timezone_id: &str,
    ) -> Vec<PathLine> {
        let transitions = find_transitions(timezone_id, year);
        self.generate(
            latitude,
            longitude,
            year,
            Some(transitions.as_slice()),
            Some(timezone_id),
        )
    }
}

/// Generates a diagram with the default configuration and model.
#[must_use]
pub fn generate(
    latitude: f64,
    longitude: f64,
    year: i32,
    transitions: Option<&[DstTransition]>,
    timezone_id: Option<&str>,
) -> Vec<PathLine> {
    SunPathGenerator::new(SunPathConfig::default()).generate(
        latitude,
        longitude,
        year,
        transitions,
        timezone_id,
    )
}

/// Detects DST for an IANA zone and generates a diagram with the default configuration.
#[must_use]
pub fn generate_for_zone(
    latitude: f64,
    longitude: f64,
    year: i32,
    timezone_id: &str,
) -> Vec<PathLine> {
    SunPathGenerator::new(SunPathConfig::default()).generate_for_zone(
        latitude,
        longitude,
        year,
        timezone_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::supported_years;
    use crate::{Error, LineKind};

    fn pair() -> [DstTransition; 2] {
        [
            DstTransition {
                day_of_year: 74,
                month: 3,
                day: 14,
                spring_forward: true,
                offset_change_hours: 1.0,
            },
            DstTransition {
                day_of_year: 309,
                month: 11,
                day: 4,
                spring_forward: false,
                offset_change_hours: -1.0,
            },
        ]
    }

    #[test]
    fn test_context_defaults_to_nautical_offset() {
        let context = GenerationContext::new(43.47, -80.54, 2024, &[], None);
        assert_eq!(context.standard_utc_offset_hours, -5.0);
        assert_eq!(context.dst_adjustment_hours, 0.0);
        assert!(context.is_northern_hemisphere);

        let context =
            GenerationContext::new(-33.87, 151.21, 2024, &pair(), Some("Not/A_Zone"));
        assert_eq!(context.standard_utc_offset_hours, 10.0);
        assert_eq!(context.dst_adjustment_hours, 1.0);
        assert!(!context.is_northern_hemisphere);
        assert_eq!(context.dst_shift_hours(), 1);
    }

    #[test]
    fn test_checked_context() {
        assert!(GenerationContext::checked(43.47, -80.54, 2024, &[], None).is_ok());
        assert_eq!(
            GenerationContext::checked(95.0, 0.0, 2024, &[], None),
            Err(Error::invalid_latitude(95.0))
        );
        assert_eq!(
            GenerationContext::checked(43.47, -80.54, i32::MAX, &[], None),
            Err(Error::year_out_of_range(i32::MAX))
        );
    }

    #[test]
    fn test_year_range_edges() {
        let generator: SunPathGenerator = SunPathGenerator::default();
        let (min, max) = supported_years();

        for year in [min, max] {
            let lines = generator.try_generate(43.47, 170.0, year, None, None).unwrap();
            let count = |kind: LineKind| lines.iter().filter(|l| l.kind() == kind).count();
            assert_eq!(count(LineKind::Solstice), 2, "year {year}");
            assert_eq!(count(LineKind::Month), 5, "year {year}");
            assert!(count(LineKind::Hour) > 0, "year {year}");
        }

        assert_eq!(
            generator.try_generate(43.47, 170.0, min - 1, None, None),
            Err(Error::year_out_of_range(min - 1))
        );
        assert!(generator.generate(43.47, -170.0, max + 1, None, None).is_empty());
    }

    #[test]
    fn test_sampler_noon_matches_clock_noon_on_meridian() {
        // Longitude on the zone meridian: clock noon is solar noon for the approximate model
        let context = GenerationContext::with_standard_offset(40.0, -75.0, 2023, -5.0, &[]);
        let sampler = Sampler::new(&DeclinationModel, &context);
        let date = NaiveDate::from_ymd_opt(2023, 3, 22).unwrap();

        let clock_noon = sampler.at(date, 12.0);
        let solar_noon = sampler.solar_noon(date);
        assert!((clock_noon.altitude() - solar_noon.altitude()).abs() < 1e-9);
        assert!((solar_noon.azimuth_degrees() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_config_yields_empty_diagram() {
        let generator = SunPathGenerator::new(SunPathConfig {
            sample_step_minutes: 0,
            ..SunPathConfig::default()
        });
        assert!(generator.try_generate(43.47, -80.54, 2024, None, None).is_err());
        assert!(generator.generate(43.47, -80.54, 2024, None, None).is_empty());
    }

    #[test]
    fn test_line_order_follows_sub_algorithms() {
        let lines = generate(43.47, -80.54, 2024, Some(&pair()[..]), None);
        let kinds: Vec<LineKind> = lines.iter().map(PathLine::kind).collect();

        let rank = |kind: LineKind| match kind {
            LineKind::Solstice => 0,
            LineKind::Month => 1,
            LineKind::Hour | LineKind::HourDst => 2,
            LineKind::Dst => 3,
        };
        assert!(kinds.windows(2).all(|w| rank(w[0]) <= rank(w[1])));
        assert_eq!(kinds.iter().filter(|&&k| k == LineKind::Dst).count(), 2);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(51.48, 0.0, 2023, Some(&pair()[..]), None);
        let b = generate(51.48, 0.0, 2023, Some(&pair()[..]), None);
        assert_eq!(a, b);
    }
}
