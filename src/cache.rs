//! Proximity-tolerant memoization of reverse-geocoding results.
//!
//! Photos taken a few steps apart should not each cost a network round-trip.
//! [`GeocodeCache`] answers a lookup from any stored entry with the same
//! feature class and code that lies closer than `max_distance` meters, and
//! only asks the [`GeocodingService`] when nothing qualifies.
//!
//! Entries are scanned in insertion order and the first qualifying one wins,
//! even if a later entry is closer. The cache only grows: nothing is evicted
//! or expired for the lifetime of the object, so memory grows with the number
//! of distinct neighbourhoods looked up.
//!
//! # Examples
//!
//! ```rust
//! use geocluster::cache::{CacheKey, GeocodeCache};
//! use geocluster::PlaceRecord;
//!
//! let cache = GeocodeCache::new();
//! let place = PlaceRecord { place_name: "Trastevere".into(), ..Default::default() };
//! cache.insert(CacheKey::new(41.8897, 12.4700, Some("P"), None), place.clone());
//!
//! // ~1.4 m away: answered from the cache
//! let hit = cache.get_nearby(&CacheKey::new(41.88971, 12.47001, Some("P"), None));
//! assert_eq!(hit, Some(place));
//! ```

use crate::config::Config;
use crate::decode::decode_nearby_place;
use crate::distance::distance_between_coordinates;
use crate::error::{GeoError, Result};
use crate::progress::ProgressLog;
use crate::service::GeocodingService;
use geocluster_types::place::PlaceRecord;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};

/// Default radius within which a cached answer is reused.
pub const DEFAULT_MAX_DISTANCE_METERS: f64 = 50.0;

/// Exact query coordinates plus the feature filter they were looked up with.
///
/// Coordinates are compared by bit pattern, not rounded; `0.0` and `-0.0`
/// are treated as the same value.
#[derive(Debug, Clone)]
pub struct CacheKey {
    pub latitude: f64,
    pub longitude: f64,
    pub feature_class: Option<String>,
    pub feature_code: Option<String>,
}

impl CacheKey {
    pub fn new(
        latitude: f64,
        longitude: f64,
        feature_class: Option<&str>,
        feature_code: Option<&str>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            feature_class: feature_class.map(str::to_string),
            feature_code: feature_code.map(str::to_string),
        }
    }

    fn same_feature(&self, other: &CacheKey) -> bool {
        self.feature_class == other.feature_class && self.feature_code == other.feature_code
    }

    fn distance_to(&self, other: &CacheKey) -> f64 {
        distance_between_coordinates(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    fn coordinate_bits(&self) -> (u64, u64) {
        fn bits(v: f64) -> u64 {
            if v == 0.0 { 0u64 } else { v.to_bits() }
        }
        (bits(self.latitude), bits(self.longitude))
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate_bits() == other.coordinate_bits() && self.same_feature(other)
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate_bits().hash(state);
        self.feature_class.hash(state);
        self.feature_code.hash(state);
    }
}

/// Counters describing how the cache has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a stored entry
    pub hits: u64,
    /// Lookups that had to ask the service
    pub misses: u64,
    /// Hits that also stored the answer under the new coordinates
    pub widened: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: Vec<(CacheKey, PlaceRecord)>,
    index: FxHashMap<CacheKey, usize>,
    stats: CacheStats,
}

impl CacheInner {
    /// First entry in insertion order that answers `key`, with its distance.
    fn first_match(&self, key: &CacheKey, max_distance: f64) -> Option<(f64, PlaceRecord)> {
        self.entries.iter().find_map(|(cached, record)| {
            if !cached.same_feature(key) {
                return None;
            }
            let distance = cached.distance_to(key);
            (distance < max_distance).then(|| (distance, record.clone()))
        })
    }

    /// Count a hit and widen coverage when the match is farther than a tenth
    /// of `max_distance`.
    fn take_hit(&mut self, key: &CacheKey, max_distance: f64) -> Option<PlaceRecord> {
        let (distance, record) = self.first_match(key, max_distance)?;
        self.stats.hits += 1;
        if distance > max_distance / 10.0 {
            self.stats.widened += 1;
            self.insert(key.clone(), record.clone());
        }
        Some(record)
    }

    fn insert(&mut self, key: CacheKey, record: PlaceRecord) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = record,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
            }
        }
    }
}

/// Reverse-geocoding cache shared by every client of one scanner run.
///
/// The cache is owned by the caller and handed to clients by reference or
/// `Arc`. Matching and the optional widening insert happen under a single
/// lock, so concurrent lookups never interleave between the two. A miss
/// releases the lock while the service is queried and scans again before
/// storing the answer.
#[derive(Debug)]
pub struct GeocodeCache {
    max_distance: f64,
    inner: Mutex<CacheInner>,
    progress: ProgressLog,
}

impl Default for GeocodeCache {
    fn default() -> Self {
        Self::with_max_distance(DEFAULT_MAX_DISTANCE_METERS)
    }
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if `meters` is not a finite positive number.
    pub fn with_max_distance(meters: f64) -> Self {
        assert!(
            meters.is_finite() && meters > 0.0,
            "Cache distance must be a positive number of meters"
        );
        Self {
            max_distance: meters,
            inner: Mutex::new(CacheInner::default()),
            progress: ProgressLog::new(),
        }
    }

    /// Cache using `cache_max_distance_meters` as its radius.
    ///
    /// # Panics
    ///
    /// Panics if the configured distance is not a finite positive number.
    /// [`Config::validate`] reports the same problem as an error.
    pub fn from_config(config: &Config) -> Self {
        Self::with_max_distance(config.cache_max_distance_meters)
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    /// Snapshot of all entries in insertion order.
    pub fn entries(&self) -> Vec<(CacheKey, PlaceRecord)> {
        self.inner.lock().entries.clone()
    }

    /// Store a record under an exact key.
    ///
    /// An existing entry with the same key keeps its position and gets the
    /// new record.
    pub fn insert(&self, key: CacheKey, record: PlaceRecord) {
        self.inner.lock().insert(key, record);
    }

    /// Look for a stored answer near `key` without touching the service.
    ///
    /// When the matched entry is farther than a tenth of the cache distance,
    /// the answer is also stored under `key`, so later lookups around the new
    /// point match too. Points almost on top of an existing entry are not
    /// stored again.
    pub fn get_nearby(&self, key: &CacheKey) -> Option<PlaceRecord> {
        let record = self.inner.lock().take_hit(key, self.max_distance)?;

        let _scope = self.progress.scope();
        self.progress.emit("geoname got from cache", "", 5);
        Some(record)
    }

    /// Return a nearby cached answer, or compute one with `fetch` and store
    /// it under the exact key.
    ///
    /// The lock is not held while `fetch` runs. Once it returns, the scan is
    /// repeated under the lock: if another caller stored a qualifying entry
    /// in the meantime, that entry wins and the fetched record is discarded,
    /// so nearby concurrent misses never leave two entries for one place.
    /// A failed fetch still counts as a miss and stores nothing.
    pub fn get_or_fetch<F>(&self, key: CacheKey, fetch: F) -> Result<PlaceRecord>
    where
        F: FnOnce() -> Result<PlaceRecord>,
    {
        if let Some(record) = self.get_nearby(&key) {
            return Ok(record);
        }

        self.inner.lock().stats.misses += 1;
        let fetched = fetch()?;

        let record = {
            let mut inner = self.inner.lock();
            match inner.take_hit(&key, self.max_distance) {
                Some(existing) => {
                    log::debug!(
                        "geoname for ({}, {}) was stored while fetching, keeping it",
                        key.latitude,
                        key.longitude
                    );
                    existing
                }
                None => {
                    inner.insert(key, fetched.clone());
                    fetched
                }
            }
        };

        let _scope = self.progress.scope();
        self.progress.emit("geoname got from geonames.org", "", 5);
        Ok(record)
    }

    /// Reverse-geocode a coordinate through the cache.
    ///
    /// On a miss the service is queried and its response decoded, with
    /// `unspecified_code` filling any missing code field.
    pub fn lookup_nearby_place<S>(
        &self,
        service: &S,
        latitude: f64,
        longitude: f64,
        feature_class: Option<&str>,
        feature_code: Option<&str>,
        unspecified_code: &str,
    ) -> Result<PlaceRecord>
    where
        S: GeocodingService + ?Sized,
    {
        if !(latitude.is_finite() && longitude.is_finite()) {
            return Err(GeoError::InvalidInput(format!(
                "cannot geocode non-finite coordinates ({}, {})",
                latitude, longitude
            )));
        }

        let key = CacheKey::new(latitude, longitude, feature_class, feature_code);
        self.get_or_fetch(key, || {
            let raw = service.nearby_place(latitude, longitude, feature_class, feature_code)?;
            decode_nearby_place(raw, unspecified_code)
        })
    }
}
