//! The reverse-geocoding service the cache and client delegate to.
//!
//! [`GeocodingService`] returns raw JSON so that decoding stays in one place
//! (`crate::decode`) regardless of how the response was obtained. The
//! `http` feature provides [`GeonamesHttpService`], a blocking client for
//! the GeoNames web services.

use crate::error::Result;
use serde_json::Value;

/// Source of raw reverse-geocoding responses.
pub trait GeocodingService {
    /// Places near a coordinate, optionally narrowed by feature class and code.
    fn nearby_place(
        &self,
        latitude: f64,
        longitude: f64,
        feature_class: Option<&str>,
        feature_code: Option<&str>,
    ) -> Result<Value>;

    /// A single feature by its numeric id.
    fn feature(&self, geoname_id: u64) -> Result<Value>;
}

impl<S: GeocodingService + ?Sized> GeocodingService for &S {
    fn nearby_place(
        &self,
        latitude: f64,
        longitude: f64,
        feature_class: Option<&str>,
        feature_code: Option<&str>,
    ) -> Result<Value> {
        (**self).nearby_place(latitude, longitude, feature_class, feature_code)
    }

    fn feature(&self, geoname_id: u64) -> Result<Value> {
        (**self).feature(geoname_id)
    }
}

impl<S: GeocodingService + ?Sized> GeocodingService for Box<S> {
    fn nearby_place(
        &self,
        latitude: f64,
        longitude: f64,
        feature_class: Option<&str>,
        feature_code: Option<&str>,
    ) -> Result<Value> {
        (**self).nearby_place(latitude, longitude, feature_class, feature_code)
    }

    fn feature(&self, geoname_id: u64) -> Result<Value> {
        (**self).feature(geoname_id)
    }
}

#[cfg(feature = "http")]
pub use http::GeonamesHttpService;

#[cfg(feature = "http")]
mod http {
    use super::GeocodingService;
    use crate::config::Config;
    use crate::error::{GeoError, Result};
    use serde_json::Value;

    /// Blocking GeoNames client.
    ///
    /// Requests are sent one at a time with no retry and no timeout beyond
    /// the `reqwest` defaults; transport errors are returned unchanged.
    #[derive(Debug, Clone)]
    pub struct GeonamesHttpService {
        client: reqwest::blocking::Client,
        api_url: String,
        user: String,
        language: String,
    }

    impl GeonamesHttpService {
        pub fn new(config: &Config) -> Result<Self> {
            if config.geonames_user.is_empty() {
                return Err(GeoError::InvalidConfig(
                    "geonames_user must be set to query GeoNames".to_string(),
                ));
            }

            let client = reqwest::blocking::Client::builder()
                .user_agent(concat!("geocluster/", env!("CARGO_PKG_VERSION")))
                .build()?;

            let mut api_url = config.geonames_api_url.clone();
            if !api_url.ends_with('/') {
                api_url.push('/');
            }

            Ok(Self {
                client,
                api_url,
                user: config.geonames_user.clone(),
                language: config.geonames_language.clone(),
            })
        }

        fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
            let url = format!("{}{}", self.api_url, endpoint);
            log::trace!("GET {} {:?}", url, query);
            let response = self.client.get(&url).query(query).send()?;
            Ok(response.json()?)
        }
    }

    impl GeocodingService for GeonamesHttpService {
        fn nearby_place(
            &self,
            latitude: f64,
            longitude: f64,
            feature_class: Option<&str>,
            feature_code: Option<&str>,
        ) -> Result<Value> {
            let mut query = vec![("lat", latitude.to_string()), ("lng", longitude.to_string())];
            if let Some(class) = feature_class.filter(|c| !c.is_empty()) {
                query.push(("featureClass", class.to_string()));
            }
            if let Some(code) = feature_code.filter(|c| !c.is_empty()) {
                query.push(("featureCode", code.to_string()));
            }
            query.push(("username", self.user.clone()));
            query.push(("lang", self.language.clone()));

            self.get("findNearbyJSON", &query)
        }

        fn feature(&self, geoname_id: u64) -> Result<Value> {
            let query = [
                ("geonameId", geoname_id.to_string()),
                ("username", self.user.clone()),
                ("style", "full".to_string()),
                ("lang", self.language.clone()),
            ];
            self.get("getJSON", &query)
        }
    }

}
