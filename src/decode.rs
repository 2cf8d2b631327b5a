//! Decoding of raw geocoder responses into flat records.
//!
//! GeoNames is loose about its payloads: fields may be strings or numbers,
//! and places without an administrative region (the Vatican, for one) simply
//! omit those fields. Nearby-place decoding fills the gaps with defaults;
//! feature decoding treats a gap as an error.

use crate::error::{GeoError, Result};
use geocluster_types::place::{Feature, PlaceRecord};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: Option<Value>,
    #[serde(default)]
    geonames: Vec<RawGeoname>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeoname {
    country_name: Option<Value>,
    country_code: Option<Value>,
    #[serde(rename = "adminName1")]
    admin_name1: Option<Value>,
    #[serde(rename = "adminCode1")]
    admin_code1: Option<Value>,
    name: Option<Value>,
    geoname_id: Option<Value>,
    toponym_name: Option<Value>,
    lat: Option<Value>,
    lng: Option<Value>,
    distance: Option<Value>,
    status: Option<Value>,
}

fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn required(value: Option<Value>, field: &'static str) -> Result<String> {
    text(value).ok_or(GeoError::MissingField(field))
}

fn status_value(status: Value) -> String {
    match status {
        Value::Object(mut map) => match map.remove("value") {
            Some(value) => text(Some(value)).unwrap_or_default(),
            None => Value::Object(map).to_string(),
        },
        other => text(Some(other)).unwrap_or_default(),
    }
}

/// Decode a nearby-place response.
///
/// A response carrying a `status` or an empty result list decodes to the
/// empty record. Otherwise the first result is used; a missing code field
/// becomes `unspecified_code` and any other missing field an empty string.
pub fn decode_nearby_place(raw: Value, unspecified_code: &str) -> Result<PlaceRecord> {
    let response: NearbyResponse = serde_json::from_value(raw)
        .map_err(|e| GeoError::InvalidResponse(format!("nearby place: {}", e)))?;

    if response.status.is_some() {
        return Ok(PlaceRecord::default());
    }
    let Some(geoname) = response.geonames.into_iter().next() else {
        return Ok(PlaceRecord::default());
    };

    let code = |value: Option<Value>| text(value).unwrap_or_else(|| unspecified_code.to_string());
    let name = |value: Option<Value>| text(value).unwrap_or_default();

    Ok(PlaceRecord {
        country_name: name(geoname.country_name),
        country_code: code(geoname.country_code),
        region_name: name(geoname.admin_name1),
        region_code: code(geoname.admin_code1),
        place_name: name(geoname.name),
        place_code: code(geoname.geoname_id),
        latitude: name(geoname.lat),
        longitude: name(geoname.lng),
        distance: name(geoname.distance),
    })
}

/// Decode a single-feature response.
///
/// Any `status` in the response fails the lookup with
/// [`GeoError::ServiceStatus`]; there is no partial result.
pub fn decode_feature(raw: Value) -> Result<Feature> {
    let geoname: RawGeoname = serde_json::from_value(raw)
        .map_err(|e| GeoError::InvalidResponse(format!("feature: {}", e)))?;

    if let Some(status) = geoname.status {
        return Err(GeoError::ServiceStatus {
            value: status_value(status),
        });
    }

    Ok(Feature {
        geoname_id: required(geoname.geoname_id, "geonameId")?,
        name: required(geoname.name, "name")?,
        country_name: required(geoname.country_name, "countryName")?,
        country_code: required(geoname.country_code, "countryCode")?,
        region_name: required(geoname.admin_name1, "adminName1")?,
        region_code: required(geoname.admin_code1, "adminCode1")?,
        toponym_name: required(geoname.toponym_name, "toponymName")?,
    })
}
