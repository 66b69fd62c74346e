//! Memoization of generated diagrams per location and year.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::PathLine;
use crate::generator::SunPathGenerator;
use crate::position::{DeclinationModel, SolarModel};

/// Default number of decimals coordinates are rounded to (about 11 m).
pub const DEFAULT_PRECISION: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    latitude: i64,
    longitude: i64,
    year: i32,
    timezone_id: Option<String>,
}

/// Caches diagrams keyed by rounded coordinates, year and time zone.
///
/// Generation plus DST detection is far too slow to repeat per frame; a renderer keeps
/// one cache and asks it whenever the location or year may have changed. Entries are
/// never evicted.
///
/// # Example
/// ```
/// # use sun_path::SunPathCache;
/// let mut cache: SunPathCache = SunPathCache::default();
/// let first = cache.get_or_generate(43.47, -80.54, 2024, None);
/// let again = cache.get_or_generate(43.470_01, -80.540_02, 2024, None);
/// assert!(std::sync::Arc::ptr_eq(&first, &again));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SunPathCache<M = DeclinationModel> {
    generator: SunPathGenerator<M>,
    scale: f64,
    entries: HashMap<CacheKey, Arc<[PathLine]>>,
}

impl Default for SunPathCache<DeclinationModel> {
    fn default() -> Self {
        Self::new(SunPathGenerator::default())
    }
}

impl<M: SolarModel> SunPathCache<M> {
    /// Creates an empty cache rounding coordinates to [`DEFAULT_PRECISION`] decimals.
    #[must_use]
    pub fn new(generator: SunPathGenerator<M>) -> Self {
        Self::with_precision(generator, DEFAULT_PRECISION)
    }

    /// Creates an empty cache rounding coordinates to `decimals` decimal places.
    #[must_use]
    pub fn with_precision(generator: SunPathGenerator<M>, decimals: u32) -> Self {
        Self {
            generator,
            scale: 10_f64.powi(decimals.min(9) as i32),
            entries: HashMap::new(),
        }
    }

    /// Gets the generator used on cache misses.
    #[must_use]
    pub const fn generator(&self) -> &SunPathGenerator<M> {
        &self.generator
    }

    fn key(&self, latitude: f64, longitude: f64, year: i32, timezone_id: Option<&str>) -> CacheKey {
        CacheKey {
            latitude: (latitude * self.scale).round() as i64,
            longitude: (longitude * self.scale).round() as i64,
            year,
            timezone_id: timezone_id.map(str::to_owned),
        }
    }

    /// Returns the cached diagram, generating it on a miss.
    ///
    /// With a time zone, DST transitions are detected for the year before generating.
    pub fn get_or_generate(
        &mut self,
        latitude: f64,
        longitude: f64,
        year: i32,
        timezone_id: Option<&str>,
    ) -> Arc<[PathLine]> {
        let key = self.key(latitude, longitude, year, timezone_id);
        if let Some(lines) = self.entries.get(&key) {
            return Arc::clone(lines);
        }

        debug!("generating sun path for ({latitude}, {longitude}) in {year}");
        let lines: Arc<[PathLine]> = match timezone_id {
            Some(zone) => self.generator.generate_for_zone(latitude, longitude, year, zone),
            None => self.generator.generate(latitude, longitude, year, None, None),
        }
        .into();
        self.entries.insert(key, Arc::clone(&lines));
        lines
    }

    /// Returns the cached diagram without generating.
    #[must_use]
    pub fn get(
        &self,
        latitude: f64,
        longitude: f64,
        year: i32,
        timezone_id: Option<&str>,
    ) -> Option<Arc<[PathLine]>> {
        self.entries
            .get(&self.key(latitude, longitude, year, timezone_id))
            .map(Arc::clone)
    }

    /// Number of cached diagrams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached diagram.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
