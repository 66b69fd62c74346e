//! Error types for the sun path library.
//!
//! Nothing in diagram generation is fatal: the infallible entry points degrade to
//! smaller output and log instead. These errors surface through the `try_*` variants.

use chrono::{Datelike, NaiveDate};
use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while building a sun path diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// A calendar date that cannot be represented (e.g. year out of range).
    InvalidDate {
        /// Requested year.
        year: i32,
        /// Requested month (1-12).
        month: u32,
        /// Requested day of month.
        day: u32,
    },
    /// A day of year beyond the year's length.
    InvalidDayOfYear {
        /// Requested year.
        year: i32,
        /// Requested 1-based day of year.
        day_of_year: u32,
    },
    /// Year outside the range diagrams can be generated for.
    YearOutOfRange {
        /// The year provided.
        year: i32,
    },
    /// Time zone identifier could not be resolved by the offset authority.
    UnknownTimeZone {
        /// The identifier as given by the caller.
        name: String,
    },
    /// Generator configuration is unusable.
    InvalidConfig {
        /// Description of the constraint violation.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid date {year:04}-{month:02}-{day:02}")
            }
            Self::InvalidDayOfYear { year, day_of_year } => {
                write!(f, "invalid day of year {day_of_year} in {year}")
            }
            Self::YearOutOfRange { year } => {
                let (min, max) = supported_years();
                write!(f, "year {year} out of range (must be between {min} and {max})")
            }
            Self::UnknownTimeZone { name } => {
                write!(f, "unknown time zone '{name}'")
            }
            Self::InvalidConfig { message } => {
                write!(f, "invalid configuration: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub const fn invalid_date(year: i32, month: u32, day: u32) -> Self {
        Self::InvalidDate { year, month, day }
    }

    /// Creates an invalid day of year error.
    #[must_use]
    pub const fn invalid_day_of_year(year: i32, day_of_year: u32) -> Self {
        Self::InvalidDayOfYear { year, day_of_year }
    }

    /// Creates a year out of range error.
    #[must_use]
    pub const fn year_out_of_range(year: i32) -> Self {
        Self::YearOutOfRange { year }
    }

    /// Creates an unknown time zone error.
    #[must_use]
    pub fn unknown_time_zone(name: impl Into<String>) -> Self {
        Self::UnknownTimeZone { name: name.into() }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub const fn invalid_config(message: &'static str) -> Self {
        Self::InvalidConfig { message }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Inclusive range of years a diagram can be generated for.
///
/// Generation reaches into the neighbouring years (the previous December solstice,
/// clock times that fall on another UTC day), so the first and last year chrono can
/// represent are excluded.
#[must_use]
pub fn supported_years() -> (i32, i32) {
    (NaiveDate::MIN.year() + 1, NaiveDate::MAX.year() - 1)
}

/// Validates that a diagram can be generated for `year`.
///
/// # Errors
/// Returns `YearOutOfRange` outside [`supported_years`].
pub fn check_year(year: i32) -> Result<()> {
    let (min, max) = supported_years();
    if !(min..=max).contains(&year) {
        return Err(Error::year_out_of_range(year));
    }
    Ok(())
}
