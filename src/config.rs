//! Generator configuration.

use crate::{Error, Result};

/// Tunables for sun path generation.
///
/// The defaults reproduce the classic diagram: 5-minute arc sampling, date labels at
/// 9:00 and 15:00, and five intermediate declination arcs between the solstices.
///
/// # Example
/// ```
/// # use sun_path::SunPathConfig;
/// let config = SunPathConfig {
///     sample_step_minutes: 10,
///     ..SunPathConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.intermediate_arc_count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SunPathConfig {
    /// Sampling interval along daily arcs, in minutes.
    pub sample_step_minutes: u32,
    /// Radians below the horizon still kept at the ends of daily arcs.
    pub horizon_tolerance: f64,
    /// Standard-time clock hours at which extra date labels are placed on daily arcs.
    pub label_hours: Vec<u32>,
    /// Number of equal parts the solstice-to-solstice span is divided into.
    pub arc_divisions: u32,
}

impl Default for SunPathConfig {
    fn default() -> Self {
        Self {
            sample_step_minutes: 5,
            horizon_tolerance: 0.0,
            label_hours: vec![9, 15],
            arc_divisions: 6,
        }
    }
}

impl SunPathConfig {
    /// Checks the configuration for values the generator cannot work with.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a zero or over-long sample step, a negative or
    /// non-finite horizon tolerance, label hours past 24, or fewer than 2 divisions.
    pub fn validate(&self) -> Result<()> {
        if self.sample_step_minutes == 0 {
            return Err(Error::invalid_config("sample step must be positive"));
        }
        if self.sample_step_minutes > MINUTES_PER_DAY {
            return Err(Error::invalid_config("sample step must not exceed one day"));
        }
        if !self.horizon_tolerance.is_finite() || self.horizon_tolerance < 0.0 {
            return Err(Error::invalid_config(
                "horizon tolerance must be a non-negative angle",
            ));
        }
        if self.label_hours.iter().any(|&hour| hour > 24) {
            return Err(Error::invalid_config("label hours must be within 0..=24"));
        }
        if self.arc_divisions < 2 {
            return Err(Error::invalid_config("arc divisions must be at least 2"));
        }
        Ok(())
    }

    /// Number of intermediate declination arcs between the two solstices.
    #[must_use]
    pub const fn intermediate_arc_count(&self) -> u32 {
        self.arc_divisions.saturating_sub(1)
    }

    /// Number of samples in one midnight-to-midnight sweep, both midnights included.
    #[must_use]
    pub const fn samples_per_day(&self) -> u32 {
        MINUTES_PER_DAY / self.sample_step_minutes + 1
    }
}

const MINUTES_PER_DAY: u32 = 24 * 60;
