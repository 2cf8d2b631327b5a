use serde::{Deserialize, Serialize};

/// A reverse-geocoded place near some coordinates.
///
/// Every field is kept as a string, the way the geocoder reports it; numeric
/// values (coordinates, distance, place id) are stringified when decoded.
/// A record with all fields empty means the geocoder had nothing to say.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub country_name: String,
    pub country_code: String,
    pub region_name: String,
    pub region_code: String,
    pub place_name: String,
    pub place_code: String,
    pub latitude: String,
    pub longitude: String,
    pub distance: String,
}

impl PlaceRecord {
    /// Whether this is the empty record returned for "no result".
    pub fn is_empty(&self) -> bool {
        *self == PlaceRecord::default()
    }
}

/// A single geocoder feature looked up by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub geoname_id: String,
    pub name: String,
    pub country_name: String,
    pub country_code: String,
    pub region_name: String,
    pub region_code: String,
    pub toponym_name: String,
}
