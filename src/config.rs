//! Configuration for geocoding and clustering.

use crate::error::Result;
use serde::de::Error;
use std::path::Path;

/// Scanner configuration consumed by the geocoder and the cluster reducer.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GeoNames account name sent with every request
    #[serde(default)]
    pub geonames_user: String,

    /// Language for place names returned by the geocoder
    #[serde(default = "Config::default_geonames_language")]
    pub geonames_language: String,

    /// Base URL of the GeoNames web services
    #[serde(default = "Config::default_geonames_api_url")]
    pub geonames_api_url: String,

    /// Stands in for any `*_code` field the geocoder leaves out
    #[serde(default = "Config::default_unspecified_geonames_code")]
    pub unspecified_geonames_code: String,

    /// Largest number of media allowed in one virtual folder
    #[serde(default = "Config::default_big_virtual_folders_threshold")]
    pub big_virtual_folders_threshold: usize,

    /// Two coordinates closer than this share a cached geocoder answer
    #[serde(default = "Config::default_cache_max_distance_meters")]
    pub cache_max_distance_meters: f64,
}

impl Config {
    fn default_geonames_language() -> String {
        "en".to_string()
    }

    fn default_geonames_api_url() -> String {
        "http://api.geonames.org/".to_string()
    }

    fn default_unspecified_geonames_code() -> String {
        "-".to_string()
    }

    const fn default_big_virtual_folders_threshold() -> usize {
        150
    }

    const fn default_cache_max_distance_meters() -> f64 {
        50.0
    }

    pub fn with_geonames_user(mut self, user: impl Into<String>) -> Self {
        self.geonames_user = user.into();
        self
    }

    pub fn with_geonames_language(mut self, language: impl Into<String>) -> Self {
        self.geonames_language = language.into();
        self
    }

    pub fn with_geonames_api_url(mut self, url: impl Into<String>) -> Self {
        self.geonames_api_url = url.into();
        self
    }

    pub fn with_unspecified_geonames_code(mut self, code: impl Into<String>) -> Self {
        self.unspecified_geonames_code = code.into();
        self
    }

    pub fn with_big_virtual_folders_threshold(mut self, threshold: usize) -> Self {
        assert!(threshold > 0, "Virtual folder threshold must be greater than zero");

        if threshold == 1 {
            log::warn!(
                "A virtual folder threshold of 1 puts every media item in its own folder"
            );
        }

        self.big_virtual_folders_threshold = threshold;
        self
    }

    pub fn with_cache_max_distance(mut self, meters: f64) -> Self {
        assert!(
            meters.is_finite() && meters > 0.0,
            "Cache distance must be a positive number of meters"
        );
        self.cache_max_distance_meters = meters;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.big_virtual_folders_threshold == 0 {
            return Err("Virtual folder threshold must be greater than zero".to_string());
        }

        if !(self.cache_max_distance_meters.is_finite() && self.cache_max_distance_meters > 0.0) {
            return Err(format!(
                "Cache distance must be positive, got {}",
                self.cache_max_distance_meters
            ));
        }

        if self.geonames_api_url.is_empty() {
            return Err("GeoNames API URL must not be empty".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a config file, picking the format from its extension.
    ///
    /// `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Ok(Self::from_toml(&contents)?),
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(crate::error::GeoError::InvalidConfig(format!(
                "{} is a TOML file but the `toml` feature is disabled",
                path.display()
            ))),
            _ => Ok(Self::from_json(&contents)?),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geonames_user: String::new(),
            geonames_language: Self::default_geonames_language(),
            geonames_api_url: Self::default_geonames_api_url(),
            unspecified_geonames_code: Self::default_unspecified_geonames_code(),
            big_virtual_folders_threshold: Self::default_big_virtual_folders_threshold(),
            cache_max_distance_meters: Self::default_cache_max_distance_meters(),
        }
    }
}
