//! Great-circle distance between geographic coordinates.
//!
//! All distances use the haversine formula on a sphere of radius 6371 km and
//! are returned in meters. Longitudes are not normalised to [-180, 180]
//! before the computation.

use geo::Point;
use geocluster_types::point::Geotagged;

/// Sphere radius used by every distance computation in this crate.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Calculate the distance in meters between two points given in decimal degrees.
///
/// # Examples
///
/// ```rust
/// use geocluster::distance::distance_between_coordinates;
///
/// let rome = (41.9028, 12.4964);
/// let milan = (45.4642, 9.1900);
/// let dist = distance_between_coordinates(rome.0, rome.1, milan.0, milan.1);
/// assert!(dist > 470_000.0 && dist < 490_000.0);
/// ```
pub fn distance_between_coordinates(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let r_lat1 = lat1.to_radians();
    let r_lat2 = lat2.to_radians();
    let d_lat = r_lat2 - r_lat1;
    let d_lon = lon2.to_radians() - lon1.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + r_lat1.cos() * r_lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Distance between two `geo` points (x = longitude, y = latitude).
pub fn distance_between_points(point1: &Point, point2: &Point) -> f64 {
    distance_between_coordinates(point1.y(), point1.x(), point2.y(), point2.x())
}

/// Distance between the positions of two geotagged items.
pub fn distance_between_media<A, B>(media1: &A, media2: &B) -> f64
where
    A: Geotagged + ?Sized,
    B: Geotagged + ?Sized,
{
    distance_between_coordinates(
        media1.latitude(),
        media1.longitude(),
        media2.latitude(),
        media2.longitude(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Distance, Haversine};
    use geocluster_types::point::{Coordinates, MediaPoint};

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_between_coordinates(45.0, 9.0, 45.0, 9.0), 0.0);
        assert_eq!(distance_between_coordinates(-89.9, 179.9, -89.9, 179.9), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let d1 = distance_between_coordinates(40.7128, -74.0060, 34.0522, -118.2437);
        let d2 = distance_between_coordinates(34.0522, -118.2437, 40.7128, -74.0060);
        assert_eq!(d1, d2);
        // ~3,936 km on a 6371 km sphere
        assert!(d1 > 3_900_000.0 && d1 < 4_000_000.0);
    }

    #[test]
    fn test_distance_grows_along_meridian() {
        let mut last = 0.0;
        for step in 1..=90 {
            let d = distance_between_coordinates(0.0, 0.0, step as f64, 0.0);
            assert!(d > last);
            last = d;
        }
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_between_coordinates(0.0, 0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_METERS * 1.0_f64.to_radians();
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_agrees_with_geo_haversine() {
        // geo uses the IUGG mean radius (6371008.8 m), so allow a small relative gap
        let p1 = Point::new(12.4964, 41.9028);
        let p2 = Point::new(9.1900, 45.4642);
        let ours = distance_between_points(&p1, &p2);
        let theirs = Haversine.distance(p1, p2);
        assert!(((ours - theirs) / theirs).abs() < 1e-5);
    }

    #[test]
    fn test_distance_between_media() {
        let a = MediaPoint::new(10.0, 20.0, "a");
        let b = Coordinates::new(10.00001, 20.00001);
        let d = distance_between_media(&a, &b);
        assert!(d > 0.0 && d < 2.0);
    }
}
