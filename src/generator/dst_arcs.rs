//! Arcs of the days on which clocks change.

use log::{debug, warn};

use super::Sampler;
use super::daily_arcs::sample_day_arc;
use crate::position::SolarModel;
use crate::time::{format_clock_label, format_date_label, ordinal_date};
use crate::{ClockLabel, DstTransition, PathLine, SunPathConfig, TransitionArc};

/// Builds one arc per transition, labeled with the clock times in effect after it.
///
/// Spring-forward days read `hour + adjustment`, fall-back days the unshifted hour;
/// labels whose value leaves 0..=24 are dropped. Transitions whose day does not exist in
/// the context year are skipped.
pub(crate) fn transition_arcs<M: SolarModel + ?Sized>(
    sampler: &Sampler<'_, M>,
    config: &SunPathConfig,
    transitions: &[DstTransition],
) -> Vec<PathLine> {
    let year = sampler.context().year;
    let shift = sampler.context().dst_shift_hours();

    transitions
        .iter()
        .filter_map(|&transition| {
            let date = match ordinal_date(year, transition.day_of_year) {
                Ok(date) => date,
                Err(err) => {
                    warn!("skipping DST transition: {err}");
                    return None;
                }
            };

            let points = sample_day_arc(sampler, config, date);
            if points.len() < 2 {
                debug!("omitting DST arc for {date}: sun stays below the horizon");
                return None;
            }

            let hour_shift = if transition.spring_forward { shift } else { 0 };
            let hour_labels = (0..=24_i64)
                .filter(|hour| (0..=24).contains(&(hour + hour_shift)))
                .filter_map(|hour| {
                    let point = sampler.at(date, hour as f64);
                    point.is_above_horizon().then(|| ClockLabel {
                        point,
                        text: format_clock_label(hour + hour_shift),
                    })
                })
                .collect();

            let label = format_date_label(date);
            let (label_above, label_below) = if transition.spring_forward {
                (None, Some(label.clone()))
            } else {
                (Some(label.clone()), None)
            };

            Some(PathLine::Dst(TransitionArc {
                points,
                transition,
                primary_label: label,
                label_above,
                label_below,
                hour_labels,
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerationContext;
    use crate::position::DeclinationModel;

    fn transition(day_of_year: u32, spring_forward: bool, change: f64) -> DstTransition {
        DstTransition {
            day_of_year,
            month: 0,
            day: 0,
            spring_forward,
            offset_change_hours: change,
        }
    }

    #[test]
    fn test_spring_and_fall_labels() {
        let pair = [transition(70, true, 1.0), transition(308, false, -1.0)];
        let ctx = GenerationContext::new(43.47, -80.54, 2024, &pair, None);
        let sampler = Sampler::new(&DeclinationModel, &ctx);
        let lines = transition_arcs(&sampler, &SunPathConfig::default(), &pair);
        assert_eq!(lines.len(), 2);

        let PathLine::Dst(spring) = &lines[0] else {
            panic!("expected a DST arc");
        };
        assert_eq!(spring.primary_label, "Mar 10");
        assert_eq!(spring.label_below.as_deref(), Some("Mar 10"));
        assert!(spring.label_above.is_none());
        // 12:00 standard time reads 13:00 after springing forward
        let date = chrono::NaiveDate::from_yo_opt(2024, 70).unwrap();
        let noon = spring
            .hour_labels
            .iter()
            .find(|label| label.point == sampler.at(date, 12.0))
            .unwrap();
        assert_eq!(noon.text, "13:00");
        assert!(spring.hour_labels.iter().all(|label| label.text != "12:00"));

        let PathLine::Dst(fall) = &lines[1] else {
            panic!("expected a DST arc");
        };
        assert_eq!(fall.primary_label, "Nov 3");
        assert_eq!(fall.label_above.as_deref(), Some("Nov 3"));
        assert!(fall.hour_labels.iter().any(|label| label.text == "12:00"));
        assert!(fall.hour_labels.iter().all(|label| label.point.is_above_horizon()));
    }

    #[test]
    fn test_invalid_and_dark_days_are_skipped() {
        let config = SunPathConfig::default();

        let ctx = GenerationContext::new(43.47, -80.54, 2023, &[], None);
        let sampler = Sampler::new(&DeclinationModel, &ctx);
        assert!(transition_arcs(&sampler, &config, &[transition(366, true, 1.0)]).is_empty());

        let polar = GenerationContext::new(-78.0, 166.0, 2023, &[], None);
        let sampler = Sampler::new(&DeclinationModel, &polar);
        assert!(transition_arcs(&sampler, &config, &[transition(172, false, -1.0)]).is_empty());
    }
}
