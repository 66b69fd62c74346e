//! Solstice and intermediate declination arcs.

use chrono::{Duration, NaiveDate};
use log::debug;

use super::Sampler;
use crate::position::SolarModel;
use crate::time::{calendar_date, format_date_label};
use crate::{DateArc, LabelPoint, PathLine, Result, SkyPoint, SunPathConfig};

/// Which side of an arc a date's text goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Above,
    Below,
}

impl Side {
    const fn flipped(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }

    fn split(self, text: String) -> (Option<String>, Option<String>) {
        match self {
            Self::Above => (Some(text), None),
            Self::Below => (None, Some(text)),
        }
    }
}

/// Samples one date from clock midnight to the following midnight.
///
/// Keeps samples higher than `-horizon_tolerance`. When daylight spans clock midnight
/// the kept samples are rotated so the arc starts after its gap and runs continuously.
pub(crate) fn sample_day_arc<M: SolarModel + ?Sized>(
    sampler: &Sampler<'_, M>,
    config: &SunPathConfig,
    date: NaiveDate,
) -> Vec<SkyPoint> {
    let samples = config.samples_per_day();
    let step_hours = f64::from(config.sample_step_minutes) / 60.0;
    let floor = -config.horizon_tolerance;

    let kept: Vec<(u32, SkyPoint)> = (0..samples)
        .map(|i| (i, sampler.at(date, f64::from(i) * step_hours)))
        .filter(|(_, point)| point.altitude() > floor)
        .collect();

    let last_gap = kept.windows(2).rposition(|pair| pair[1].0 != pair[0].0 + 1);
    let wraps = kept.first().is_some_and(|&(i, _)| i == 0)
        && kept.last().is_some_and(|&(i, _)| i + 1 == samples);

    match last_gap {
        Some(gap) if wraps => {
            // The final sample sits at 24:00 when the step divides the day; it duplicates 0:00
            let ends_at_midnight = (samples - 1) * config.sample_step_minutes == 24 * 60;
            let (head, tail) = kept.split_at(gap + 1);
            let head = if ends_at_midnight { &head[1..] } else { head };
            tail.iter().chain(head).map(|&(_, point)| point).collect()
        }
        _ => kept.into_iter().map(|(_, point)| point).collect(),
    }
}

/// Date labels at the configured clock hours, dropped when the sun is down.
fn extra_labels<M: SolarModel + ?Sized>(
    sampler: &Sampler<'_, M>,
    config: &SunPathConfig,
    date: NaiveDate,
    side: Side,
) -> Vec<LabelPoint> {
    let text = format_date_label(date);
    config
        .label_hours
        .iter()
        .map(|&hour| sampler.at(date, f64::from(hour)))
        .filter(SkyPoint::is_above_horizon)
        .map(|point| {
            let (above, below) = side.split(text.clone());
            LabelPoint {
                point,
                above,
                below,
            }
        })
        .collect()
}

/// Builds the June and December solstice arcs of the context year.
///
/// The high-summer arc (June in the north, December in the south) carries its label
/// below, the other one above.
pub(crate) fn solstice_arcs<M: SolarModel + ?Sized>(
    sampler: &Sampler<'_, M>,
    config: &SunPathConfig,
) -> Result<Vec<PathLine>> {
    let context = sampler.context();
    let june = calendar_date(context.year, 6, 21)?;
    let december = calendar_date(context.year, 12, 21)?;
    let june_side = if context.is_northern_hemisphere {
        Side::Below
    } else {
        Side::Above
    };

    let mut lines = Vec::with_capacity(2);
    for (date, side) in [(june, june_side), (december, june_side.flipped())] {
        let points = sample_day_arc(sampler, config, date);
        if points.len() < 2 {
            debug!("omitting solstice arc for {date}: sun stays below the horizon");
            continue;
        }

        let label = format_date_label(date);
        let noon = Some(sampler.solar_noon(date)).filter(SkyPoint::is_above_horizon);
        let (label_above, label_below) = side.split(label.clone());

        lines.push(PathLine::Solstice(DateArc {
            points,
            primary_label: label,
            mid_label_point: noon.filter(|_| label_above.is_some()),
            mid_label_point_below: noon.filter(|_| label_below.is_some()),
            label_above,
            label_below,
            extra_labels: extra_labels(sampler, config, date, side),
        }));
    }
    Ok(lines)
}

/// Rising and falling date pairs sharing a declination, from winter towards summer.
///
/// The span from the previous December solstice to the June solstice is divided into
/// `arc_divisions` parts, as is the span from June to the next December solstice; the
/// `k`-th rising date is paired with the falling date `k` parts before December.
pub(crate) fn declination_pairs(year: i32, divisions: u32) -> Result<Vec<(NaiveDate, NaiveDate)>> {
    let winter = calendar_date(year - 1, 12, 21)?;
    let summer = calendar_date(year, 6, 21)?;
    let next_winter = calendar_date(year, 12, 21)?;

    let rising_span = (summer - winter).num_days() as f64;
    let falling_span = (next_winter - summer).num_days() as f64;
    let parts = f64::from(divisions);

    Ok((1..divisions)
        .map(|k| {
            let k = f64::from(k);
            let rising = winter + Duration::days((k * rising_span / parts).round() as i64);
            let falling =
                summer + Duration::days(((parts - k) * falling_span / parts).round() as i64);
            (rising, falling)
        })
        .collect())
}

/// Builds the intermediate declination arcs between the solstices.
///
/// Each arc is sampled on its rising date and labeled with both dates; the rising date
/// goes above the arc in the northern hemisphere and below it in the southern.
pub(crate) fn intermediate_arcs<M: SolarModel + ?Sized>(
    sampler: &Sampler<'_, M>,
    config: &SunPathConfig,
) -> Result<Vec<PathLine>> {
    let context = sampler.context();
    let rising_side = if context.is_northern_hemisphere {
        Side::Above
    } else {
        Side::Below
    };

    let pairs = declination_pairs(context.year, config.arc_divisions)?;
    let mut lines = Vec::with_capacity(pairs.len());

    for (rising, falling) in pairs {
        let points = sample_day_arc(sampler, config, rising);
        if points.len() < 2 {
            debug!("omitting declination arc {rising}/{falling}: sun stays below the horizon");
            continue;
        }

        let rising_label = format_date_label(rising);
        let falling_label = format_date_label(falling);

        let mut extra = extra_labels(sampler, config, rising, rising_side);
        extra.extend(extra_labels(sampler, config, falling, rising_side.flipped()));

        let (rising_noon, falling_noon) = (
            Some(sampler.solar_noon(rising)).filter(SkyPoint::is_above_horizon),
            Some(sampler.solar_noon(falling)).filter(SkyPoint::is_above_horizon),
        );
        let (label_above, label_below, mid_label_point, mid_label_point_below) = match rising_side
        {
            Side::Above => (rising_label.clone(), falling_label, rising_noon, falling_noon),
            Side::Below => (falling_label, rising_label.clone(), falling_noon, rising_noon),
        };

        lines.push(PathLine::Month(DateArc {
            points,
            primary_label: rising_label,
            label_above: Some(label_above),
            label_below: Some(label_below),
            extra_labels: extra,
            mid_label_point,
            mid_label_point_below,
        }));
    }
    Ok(lines)
}
