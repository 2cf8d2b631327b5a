//! Error types for geocoding and clustering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoError>;

#[derive(Debug, Error)]
pub enum GeoError {
    /// The geocoder answered a feature lookup with an explicit status.
    #[error("Geonames: call returned status {value}")]
    ServiceStatus { value: String },

    #[error("Missing field in geocoder response: {0}")]
    MissingField(&'static str),

    #[error("Invalid geocoder response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_value() {
        let err = GeoError::ServiceStatus {
            value: "18".to_string(),
        };
        assert_eq!(err.to_string(), "Geonames: call returned status 18");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: GeoError = parse.unwrap_err().into();
        assert!(matches!(err, GeoError::Json(_)));
    }
}
