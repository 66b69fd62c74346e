//! Validation of the approximate solar model against an independently computed table.

use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use sun_path::{DeclinationModel, SolarModel, current_position};

const EPSILON: f64 = 1e-6; // degrees; the table carries 7 decimals

struct Reference {
    datetime: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    azimuth: f64,
}

fn load_reference_data() -> Result<Vec<Reference>, Box<dyn Error>> {
    let file = File::open("tests/data/horizontal_reference.csv")?;
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(false)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() >= 5 {
            records.push(Reference {
                datetime: record[0].parse::<DateTime<Utc>>()?,
                latitude: record[1].parse()?,
                longitude: record[2].parse()?,
                altitude: record[3].parse()?,
                azimuth: record[4].parse()?,
            });
        }
    }

    Ok(records)
}

#[test]
fn test_declination_model_against_reference() -> Result<(), Box<dyn Error>> {
    let records = load_reference_data()?;
    assert_eq!(records.len(), 48, "reference table incomplete");

    let mut max_altitude_error = 0.0_f64;
    let mut max_azimuth_error = 0.0_f64;

    for reference in &records {
        let position = DeclinationModel.sky_position(
            reference.datetime.naive_utc(),
            reference.latitude,
            reference.longitude,
        );

        let altitude_error = (position.altitude_degrees() - reference.altitude).abs();
        let azimuth_error = (position.azimuth_degrees() - reference.azimuth).abs();
        max_altitude_error = max_altitude_error.max(altitude_error);
        max_azimuth_error = max_azimuth_error.max(azimuth_error);

        assert!(
            altitude_error < EPSILON,
            "Altitude error {altitude_error:.9}° for {} at ({}, {})",
            reference.datetime,
            reference.latitude,
            reference.longitude
        );
        assert!(
            azimuth_error < EPSILON,
            "Azimuth error {azimuth_error:.9}° for {} at ({}, {})",
            reference.datetime,
            reference.latitude,
            reference.longitude
        );
    }

    println!(
        "{} records: max altitude error {max_altitude_error:.2e}°, \
         max azimuth error {max_azimuth_error:.2e}°",
        records.len()
    );
    Ok(())
}

#[test]
fn test_current_position_against_reference() -> Result<(), Box<dyn Error>> {
    for reference in load_reference_data()? {
        let position =
            current_position(reference.latitude, reference.longitude, &reference.datetime);
        assert!((position.altitude_degrees() - reference.altitude).abs() < EPSILON);
        assert!((position.azimuth_degrees() - reference.azimuth).abs() < EPSILON);
    }
    Ok(())
}
