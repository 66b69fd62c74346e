//! Hourly analemma lines, split at daylight-saving changes.

use chrono::{Datelike, NaiveDate};
use log::debug;

use super::Sampler;
use crate::dst::DstCalendar;
use crate::position::SolarModel;
use crate::time::{calendar_date, days_in_year, format_clock_label, ordinal_date};
use crate::{HourLabels, HourSegment, PathLine, Result, SkyPoint, TaggedPoint};

/// Clock hours drawn, both midnights included.
const LAST_HOUR: u32 = 24;

/// A run of consecutive samples with one DST status.
#[derive(Debug)]
struct Run {
    is_dst: bool,
    points: Vec<SkyPoint>,
}

/// Index at which a sweep wrapping across the year boundary starts.
///
/// A sweep that holds both the first and the last day of the year but has a gap
/// elsewhere is continuous through Dec 31 -> Jan 1, so it starts after its last gap.
fn wrap_start(sweep: &[(u32, TaggedPoint)], year_length: u32) -> usize {
    let (Some(&(first_day, _)), Some(&(last_day, _))) = (sweep.first(), sweep.last()) else {
        return 0;
    };
    if first_day != 1 || last_day != year_length {
        return 0;
    }
    sweep
        .windows(2)
        .rposition(|pair| pair[1].0 != pair[0].0 + 1)
        .map_or(0, |gap| gap + 1)
}

/// Splits a day-ordered sweep into runs of uniform DST status.
///
/// Days are adjacent across the year boundary, so a sweep wrapping through Jan 1 is
/// drawn as one line. A run also ends where the sun is below the horizon between two
/// samples. When the status changes between adjacent days, the first point of the new
/// run is appended to the ending one so the drawn line stays connected. A lone sample
/// between two horizon gaps is joined to the next run (or the last one at the end of
/// the sweep); every sample ends up in some run once the sweep holds two of them.
fn split_runs(sweep: &[(u32, TaggedPoint)], year_length: u32) -> Vec<Run> {
    let adjacent =
        |previous: u32, day: u32| day == previous + 1 || (previous == year_length && day == 1);

    let start = wrap_start(sweep, year_length);
    let mut ordered = sweep[start..].iter().chain(&sweep[..start]).copied();
    let Some((mut previous_day, first)) = ordered.next() else {
        return Vec::new();
    };

    let mut runs: Vec<Run> = Vec::new();
    let mut current = Run {
        is_dst: first.is_dst,
        points: vec![first.point],
    };
    // Whether `current` starts with the boundary point of the previous run
    let mut shared_start = false;

    for (day, sample) in ordered {
        let contiguous = adjacent(previous_day, day);
        previous_day = day;

        if !contiguous && shared_start && current.points.len() < 2 {
            // Only the boundary point, already drawn by the previous run
            current = Run {
                is_dst: sample.is_dst,
                points: vec![sample.point],
            };
            shared_start = false;
            continue;
        }

        let joined = contiguous || current.points.len() < 2;

        if joined && sample.is_dst == current.is_dst {
            current.points.push(sample.point);
            continue;
        }
        if joined {
            current.points.push(sample.point);
        }
        runs.push(current);
        shared_start = joined;
        current = Run {
            is_dst: sample.is_dst,
            points: vec![sample.point],
        };
    }

    if current.points.len() >= 2 {
        runs.push(current);
    } else if let Some(last) = runs.last_mut().filter(|_| !shared_start) {
        last.points.extend(current.points);
    }
    runs
}

/// End labels of one hour line.
///
/// The top end is the solstice with the higher sun at this hour. The DST-shifted clock
/// time goes at the end whose solstice lies inside daylight saving; with no calendar to
/// decide, it goes on top.
fn hour_labels<M: SolarModel + ?Sized>(
    sampler: &Sampler<'_, M>,
    calendar: &DstCalendar,
    solstices: (NaiveDate, NaiveDate),
    hour: u32,
) -> HourLabels {
    let (june, december) = solstices;
    let june_point = sampler.at(june, f64::from(hour));
    let december_point = sampler.at(december, f64::from(hour));

    let (top, bottom, top_date, bottom_date) =
        if june_point.altitude() >= december_point.altitude() {
            (june_point, december_point, june, december)
        } else {
            (december_point, june_point, december, june)
        };

    let standard = format_clock_label(i64::from(hour));
    let shift = sampler.context().dst_shift_hours();
    let shifted = if shift == 0 {
        standard.clone()
    } else {
        format_clock_label(i64::from(hour) + shift)
    };

    let top_in_dst = calendar.is_dst(top_date.ordinal());
    let bottom_in_dst = calendar.is_dst(bottom_date.ordinal());
    let (label_above, label_below) = if top_in_dst || !bottom_in_dst {
        (shifted, standard)
    } else {
        (standard, shifted)
    };

    HourLabels {
        label_above,
        label_below,
        top_label_point: Some(top).filter(SkyPoint::is_above_horizon),
        bottom_label_point: Some(bottom).filter(SkyPoint::is_above_horizon),
    }
}

/// Builds the hour lines for clock hours 0 through 24.
///
/// Each hour is sampled once per day of the year at the same standard clock time and
/// emitted as one line per DST run, `Hour` for standard time and `HourDst` for daylight
/// saving. End labels go on the first standard-time run (or the first run when all are
/// DST); the complete tagged sweep goes on the first run.
pub(crate) fn hour_lines<M: SolarModel + ?Sized>(
    sampler: &Sampler<'_, M>,
    calendar: &DstCalendar,
) -> Result<Vec<PathLine>> {
    let year = sampler.context().year;
    let year_length = days_in_year(year);
    let dates = (1..=year_length)
        .map(|day| ordinal_date(year, day))
        .collect::<Result<Vec<_>>>()?;
    let solstices = (calendar_date(year, 6, 21)?, calendar_date(year, 12, 21)?);

    let mut lines = Vec::new();
    for hour in 0..=LAST_HOUR {
        let sweep: Vec<(u32, TaggedPoint)> = dates
            .iter()
            .filter_map(|&date| {
                let point = sampler.at(date, f64::from(hour));
                point.is_above_horizon().then(|| {
                    let day = date.ordinal();
                    let is_dst = calendar.is_dst(day);
                    (day, TaggedPoint { point, is_dst })
                })
            })
            .collect();

        let runs = split_runs(&sweep, year_length);
        if runs.is_empty() {
            debug!("omitting hour line {hour}: fewer than two samples above the horizon");
            continue;
        }

        let label_run = runs.iter().position(|run| !run.is_dst).unwrap_or(0);
        let mut labels = Some(hour_labels(sampler, calendar, solstices, hour));
        let mut tagged_points = Some(sweep.into_iter().map(|(_, tagged)| tagged).collect());

        for (index, run) in runs.into_iter().enumerate() {
            let segment = HourSegment {
                hour,
                points: run.points,
                primary_label: format_clock_label(i64::from(hour)),
                labels: if index == label_run { labels.take() } else { None },
                tagged_points: tagged_points.take(),
            };
            lines.push(if run.is_dst {
                PathLine::HourDst(segment)
            } else {
                PathLine::Hour(segment)
            });
        }
    }
    Ok(lines)
}
