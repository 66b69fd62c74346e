//! Daylight-saving transition detection.
//!
//! Transitions are found empirically: the UTC offset in effect at local noon is
//! sampled for every day of the year and compared with the previous day. This
//! makes no assumption about a zone's rules, so it copes with southern-hemisphere
//! ordering, zones without DST and zones that changed rules mid-year.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use log::{debug, trace, warn};

use crate::{DstTransition, Error, Result};

/// Offset changes smaller than this (hours) are ignored.
const OFFSET_EPSILON_HOURS: f64 = 0.01;

const SECONDS_PER_HOUR: f64 = 3_600.0;

/// External authority that knows a location's UTC offset over time.
pub trait UtcOffsetSource {
    /// Total UTC offset in hours in effect at a local wall-clock time, if it exists.
    fn utc_offset_hours(&self, local: NaiveDateTime) -> Option<f64>;

    /// Offset in hours without any daylight-saving component, as in effect at the start of `year`.
    fn standard_offset_hours(&self, year: i32) -> Option<f64>;
}

impl UtcOffsetSource for FixedOffset {
    fn utc_offset_hours(&self, _local: NaiveDateTime) -> Option<f64> {
        Some(f64::from(self.local_minus_utc()) / SECONDS_PER_HOUR)
    }

    fn standard_offset_hours(&self, _year: i32) -> Option<f64> {
        Some(f64::from(self.local_minus_utc()) / SECONDS_PER_HOUR)
    }
}

#[cfg(feature = "tz")]
impl UtcOffsetSource for chrono_tz::Tz {
    fn utc_offset_hours(&self, local: NaiveDateTime) -> Option<f64> {
        use chrono::{Offset, TimeZone};

        let datetime = self.from_local_datetime(&local).earliest()?;
        Some(f64::from(datetime.offset().fix().local_minus_utc()) / SECONDS_PER_HOUR)
    }

    fn standard_offset_hours(&self, year: i32) -> Option<f64> {
        use chrono::TimeZone;
        use chrono_tz::OffsetComponents;

        let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(12, 0, 0)?;
        let offset = self.offset_from_utc_datetime(&start);
        Some(offset.base_utc_offset().num_seconds() as f64 / SECONDS_PER_HOUR)
    }
}

/// Resolves a time zone identifier into an offset source.
///
/// # Errors
/// Returns `UnknownTimeZone` if the identifier is not a known IANA zone, or always
/// when the `tz` feature is disabled.
pub fn resolve_zone(timezone_id: &str) -> Result<Box<dyn UtcOffsetSource>> {
    #[cfg(feature = "tz")]
    {
        timezone_id
            .parse::<chrono_tz::Tz>()
            .map(|zone| Box::new(zone) as Box<dyn UtcOffsetSource>)
            .map_err(|_| Error::unknown_time_zone(timezone_id))
    }

    #[cfg(not(feature = "tz"))]
    {
        Err(Error::unknown_time_zone(timezone_id))
    }
}

/// Scans `year` day by day and reports every change of the noon UTC offset.
///
/// Jan 1 is compared against Dec 31 of the previous year. Days on which the source
/// cannot produce an offset are skipped without breaking the comparison chain.
///
/// # Example
/// ```
/// # use sun_path::dst::detect_transitions;
/// use chrono::FixedOffset;
///
/// let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
/// assert!(detect_transitions(&tokyo, 2024).is_empty());
/// ```
pub fn detect_transitions<S: UtcOffsetSource + ?Sized>(
    source: &S,
    year: i32,
) -> Vec<DstTransition> {
    let Some(first_day) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    let noon_offset = |date: NaiveDate| {
        date.and_hms_opt(12, 0, 0)
            .and_then(|noon| source.utc_offset_hours(noon))
    };

    trace!("scanning {year} for UTC offset changes");

    let mut previous = first_day.pred_opt().and_then(noon_offset);
    let mut transitions = Vec::new();

    for date in first_day.iter_days().take_while(|date| date.year() == year) {
        let Some(offset) = noon_offset(date) else {
            continue;
        };

        if let Some(prev) = previous {
            let change = offset - prev;
            if change.abs() > OFFSET_EPSILON_HOURS {
                transitions.push(DstTransition {
                    day_of_year: date.ordinal(),
                    month: date.month(),
                    day: date.day(),
                    spring_forward: change > 0.0,
                    offset_change_hours: change,
                });
            }
        }
        previous = Some(offset);
    }

    debug!("found {} UTC offset transitions in {year}", transitions.len());
    transitions
}

/// Finds the DST transitions of an IANA zone in `year`.
///
/// # Errors
/// Returns `UnknownTimeZone` if the zone cannot be resolved.
pub fn try_find_transitions(timezone_id: &str, year: i32) -> Result<Vec<DstTransition>> {
    let zone = resolve_zone(timezone_id)?;
    Ok(detect_transitions(zone.as_ref(), year))
}

/// Finds the DST transitions of an IANA zone in `year`, treating lookup failure as "no DST".
///
/// This is an O(365) scan; call it when the location or year changes, not per frame.
#[must_use]
pub fn find_transitions(timezone_id: &str, year: i32) -> Vec<DstTransition> {
    try_find_transitions(timezone_id, year).unwrap_or_else(|err| {
        warn!("{err}; assuming no daylight saving");
        Vec::new()
    })
}

/// Largest spring-forward shift among `transitions`, in hours (0 when there is none).
#[must_use]
pub fn dst_adjustment_hours(transitions: &[DstTransition]) -> f64 {
    transitions
        .iter()
        .filter(|transition| transition.spring_forward)
        .map(|transition| transition.offset_change_hours.abs())
        .fold(0.0, f64::max)
}

/// Answers whether a day of the year lies inside daylight saving time.
///
/// The state on any day is set by the most recent transition on or before it. Before the
/// first transition of the year the state is the opposite of that transition's direction,
/// so a fall-back-first (southern hemisphere) year starts inside DST.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DstCalendar {
    initial: bool,
    changes: Vec<(u32, bool)>,
}

impl DstCalendar {
    /// Builds the calendar from transitions in any order.
    #[must_use]
    pub fn new(transitions: &[DstTransition]) -> Self {
        let mut changes: Vec<(u32, bool)> = transitions
            .iter()
            .map(|transition| (transition.day_of_year, transition.spring_forward))
            .collect();
        changes.sort_by_key(|&(day, _)| day);

        let initial = changes.first().is_some_and(|&(_, spring)| !spring);
        Self { initial, changes }
    }

    /// Checks whether the 1-based day of year is inside DST.
    #[must_use]
    pub fn is_dst(&self, day_of_year: u32) -> bool {
        self.changes
            .iter()
            .take_while(|&&(day, _)| day <= day_of_year)
            .last()
            .map_or(self.initial, |&(_, spring)| spring)
    }

    /// Checks whether no transitions were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
