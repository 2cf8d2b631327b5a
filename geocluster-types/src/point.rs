use geo::Point;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Unlike `geo::Point`, fields are named by their geographic meaning, which
/// avoids the usual x/y versus lat/lon mixups at call sites.
///
/// # Examples
///
/// ```
/// use geocluster_types::point::Coordinates;
/// use geo::Point;
///
/// let milan = Coordinates::new(45.4642, 9.19);
/// let point: Point<f64> = milan.into();
/// assert_eq!(point.x(), 9.19);
/// assert_eq!(point.y(), 45.4642);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(c: Coordinates) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}

impl From<Point<f64>> for Coordinates {
    fn from(p: Point<f64>) -> Self {
        Coordinates::new(p.y(), p.x())
    }
}

/// Anything that carries a geographic position.
///
/// Clustering only ever looks at these two values; the rest of the item is
/// an opaque payload that is moved through untouched.
pub trait Geotagged {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;

    fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude(), self.longitude())
    }
}

impl Geotagged for Coordinates {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Geotagged for Point<f64> {
    fn latitude(&self) -> f64 {
        self.y()
    }

    fn longitude(&self) -> f64 {
        self.x()
    }
}

impl<T: Geotagged + ?Sized> Geotagged for &T {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }

    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
}

/// A geotagged media item with an arbitrary payload (file name, id, ...).
///
/// # Examples
///
/// ```
/// use geocluster_types::point::{Geotagged, MediaPoint};
///
/// let photo = MediaPoint::new(41.9028, 12.4964, "IMG_0001.jpg");
/// assert_eq!(photo.latitude(), 41.9028);
/// assert_eq!(photo.payload, "IMG_0001.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaPoint<T> {
    pub position: Coordinates,
    pub payload: T,
}

impl<T> MediaPoint<T> {
    pub fn new(latitude: f64, longitude: f64, payload: T) -> Self {
        Self {
            position: Coordinates::new(latitude, longitude),
            payload,
        }
    }

    /// Consume the media point and return its payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T> Geotagged for MediaPoint<T> {
    fn latitude(&self) -> f64 {
        self.position.latitude
    }

    fn longitude(&self) -> f64 {
        self.position.longitude
    }
}
