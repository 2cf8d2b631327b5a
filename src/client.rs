//! Reverse-geocoding client combining a service with a shared cache.

use crate::cache::GeocodeCache;
use crate::config::Config;
use crate::decode::decode_feature;
use crate::error::Result;
use crate::service::GeocodingService;
use geocluster_types::cluster::Cluster;
use geocluster_types::place::{Feature, PlaceRecord};
use std::sync::Arc;

/// Feature class of populated places (cities, towns, villages).
pub const POPULATED_PLACE: &str = "P";

/// Looks up places through a [`GeocodingService`], answering nearby-place
/// queries from a [`GeocodeCache`] whenever possible.
///
/// Several clients may share one cache:
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use geocluster::{Config, GeocodeCache, GeocodingClient, GeonamesHttpService};
///
/// # fn main() -> geocluster::Result<()> {
/// let config = Config::default().with_geonames_user("demo");
/// let cache = Arc::new(GeocodeCache::from_config(&config));
///
/// let client = GeocodingClient::new(GeonamesHttpService::new(&config)?, cache.clone(), &config);
/// let other = GeocodingClient::new(GeonamesHttpService::new(&config)?, cache, &config);
///
/// let place = client.lookup_nearby_populated_place(41.9028, 12.4964)?;
/// // answered from the shared cache
/// let same = other.lookup_nearby_populated_place(41.90281, 12.49641)?;
/// assert_eq!(place, same);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GeocodingClient<S> {
    service: S,
    cache: Arc<GeocodeCache>,
    unspecified_code: String,
}

impl<S: GeocodingService> GeocodingClient<S> {
    pub fn new(service: S, cache: Arc<GeocodeCache>, config: &Config) -> Self {
        Self {
            service,
            cache,
            unspecified_code: config.unspecified_geonames_code.clone(),
        }
    }

    pub fn cache(&self) -> &Arc<GeocodeCache> {
        &self.cache
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Place nearest to a coordinate, optionally narrowed by feature class
    /// and code. Goes through the cache.
    pub fn lookup_nearby_place(
        &self,
        latitude: f64,
        longitude: f64,
        feature_class: Option<&str>,
        feature_code: Option<&str>,
    ) -> Result<PlaceRecord> {
        self.cache.lookup_nearby_place(
            &self.service,
            latitude,
            longitude,
            feature_class,
            feature_code,
            &self.unspecified_code,
        )
    }

    /// Nearest populated place, the usual lookup for a photo location.
    pub fn lookup_nearby_populated_place(&self, latitude: f64, longitude: f64) -> Result<PlaceRecord> {
        self.lookup_nearby_place(latitude, longitude, Some(POPULATED_PLACE), None)
    }

    /// Nearest populated place to the center of a cluster.
    pub fn lookup_cluster_place<M>(&self, cluster: &Cluster<M>) -> Result<PlaceRecord> {
        let center = cluster.center();
        self.lookup_nearby_populated_place(center.latitude, center.longitude)
    }

    /// A feature by id. Bypasses the cache; a status in the response is an
    /// error.
    pub fn lookup_feature(&self, geoname_id: u64) -> Result<Feature> {
        let raw = self.service.feature(geoname_id)?;
        decode_feature(raw)
    }
}

#[cfg(feature = "http")]
impl GeocodingClient<crate::service::GeonamesHttpService> {
    /// Client talking to GeoNames over HTTP with a fresh cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let service = crate::service::GeonamesHttpService::new(config)?;
        let cache = Arc::new(GeocodeCache::from_config(config));
        Ok(Self::new(service, cache, config))
    }
}
