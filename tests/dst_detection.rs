#![cfg(feature = "tz")]

//! DST transition detection against the IANA database.

use chrono::{Datelike, NaiveDate};
use chrono_tz::TZ_VARIANTS;
use sun_path::dst::{DstCalendar, UtcOffsetSource, detect_transitions, try_find_transitions};
use sun_path::{Error, GenerationContext, LineKind, PathLine, find_transitions, generate_for_zone};

#[test]
fn test_toronto_2024() {
    let transitions = find_transitions("America/Toronto", 2024);
    assert_eq!(transitions.len(), 2);

    let spring = transitions[0];
    assert!(spring.spring_forward);
    assert_eq!(spring.day_of_year, 70);
    assert_eq!((spring.month, spring.day), (3, 10));
    assert!((spring.offset_change_hours - 1.0).abs() < 1e-9);

    let fall = transitions[1];
    assert!(!fall.spring_forward);
    assert_eq!(fall.day_of_year, 308);
    assert_eq!((fall.month, fall.day), (11, 3));
    assert!((fall.offset_change_hours + 1.0).abs() < 1e-9);
}

#[test]
fn test_sydney_2024_falls_back_first() {
    let transitions = find_transitions("Australia/Sydney", 2024);
    assert_eq!(transitions.len(), 2);

    assert!(!transitions[0].spring_forward);
    assert_eq!((transitions[0].month, transitions[0].day), (4, 7));
    assert_eq!(transitions[0].day_of_year, 98);

    assert!(transitions[1].spring_forward);
    assert_eq!((transitions[1].month, transitions[1].day), (10, 6));
    assert_eq!(transitions[1].day_of_year, 280);

    let calendar = DstCalendar::new(&transitions);
    assert!(calendar.is_dst(1));
    assert!(!calendar.is_dst(172));
    assert!(calendar.is_dst(356));
}

#[test]
fn test_zones_without_dst() {
    assert!(find_transitions("Asia/Tokyo", 2024).is_empty());
    assert!(find_transitions("UTC", 2023).is_empty());
    assert!(find_transitions("Invalid/Zone", 2024).is_empty());
    assert_eq!(
        try_find_transitions("Invalid/Zone", 2024),
        Err(Error::unknown_time_zone("Invalid/Zone"))
    );
}

#[test]
fn test_standard_offsets() {
    let toronto: chrono_tz::Tz = "America/Toronto".parse().unwrap();
    assert_eq!(toronto.standard_offset_hours(2024), Some(-5.0));

    // January is summer time in Sydney; the standard offset excludes it
    let sydney: chrono_tz::Tz = "Australia/Sydney".parse().unwrap();
    assert_eq!(sydney.standard_offset_hours(2024), Some(10.0));

    let context = GenerationContext::new(28.61, 77.21, 2024, &[], Some("Asia/Kolkata"));
    assert_eq!(context.standard_utc_offset_hours, 5.5);
    assert_eq!(context.dst_adjustment_hours, 0.0);
}

#[test]
fn test_every_zone_reports_consistent_transitions() {
    for zone in TZ_VARIANTS {
        for transition in detect_transitions(&zone, 2024) {
            let date = NaiveDate::from_yo_opt(2024, transition.day_of_year)
                .unwrap_or_else(|| panic!("{zone}: bad day {}", transition.day_of_year));
            assert_eq!((date.month(), date.day()), (transition.month, transition.day), "{zone}");
            assert!(transition.offset_change_hours.abs() > 0.01, "{zone}");
            assert_eq!(transition.spring_forward, transition.offset_change_hours > 0.0, "{zone}");
        }
    }
}

#[test]
fn test_generate_for_toronto() {
    let lines = generate_for_zone(43.47, -80.54, 2024, "America/Toronto");

    let dst_arcs: Vec<&PathLine> = lines.iter().filter(|l| l.kind() == LineKind::Dst).collect();
    let labels: Vec<&str> = dst_arcs.iter().map(|l| l.primary_label()).collect();
    assert_eq!(labels, ["Mar 10", "Nov 3"]);

    assert!(lines.iter().any(|l| l.kind() == LineKind::HourDst));

    let noon = lines
        .iter()
        .filter_map(PathLine::as_hour_segment)
        .find(|segment| segment.hour == 12 && segment.labels.is_some())
        .unwrap();
    let labels = noon.labels.as_ref().unwrap();
    assert_eq!(labels.label_above, "13:00");
    assert_eq!(labels.label_below, "12:00");
}

#[test]
fn test_unknown_zone_degrades_to_plain_diagram() {
    let lines = generate_for_zone(43.47, -80.54, 2024, "Nowhere/Special");
    assert!(!lines.is_empty());
    assert!(lines.iter().all(|l| !matches!(l.kind(), LineKind::Dst | LineKind::HourDst)));
}
