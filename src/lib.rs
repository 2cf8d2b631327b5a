//! Spatial clustering of geotagged media and proximity-tolerant reverse geocoding.
//!
//! ```rust
//! use geocluster::{ClusterReducer, MediaPoint};
//!
//! let photos = vec![
//!     MediaPoint::new(41.90280, 12.49640, "colosseum_1.jpg"),
//!     MediaPoint::new(41.90281, 12.49641, "colosseum_2.jpg"),
//!     MediaPoint::new(45.46420, 9.19000, "duomo.jpg"),
//! ];
//!
//! let folders = ClusterReducer::new(150).reduce_to_clusters(photos, 1000.0);
//! assert_eq!(folders.len(), 2);
//! ```

pub mod cache;
pub mod client;
pub mod cluster;
pub mod config;
pub mod decode;
pub mod distance;
pub mod error;
pub mod progress;
pub mod service;

pub use cache::{CacheKey, CacheStats, GeocodeCache};
pub use client::GeocodingClient;
pub use cluster::{ClusterReducer, ReductionStats, first_fit_clusters};
pub use config::Config;
pub use distance::{distance_between_coordinates, distance_between_media, distance_between_points};
pub use error::{GeoError, Result};
pub use progress::ProgressLog;
pub use service::GeocodingService;

#[cfg(feature = "http")]
pub use service::GeonamesHttpService;

pub use geocluster_types::cluster::Cluster;
pub use geocluster_types::place::{Feature, PlaceRecord};
pub use geocluster_types::point::{Coordinates, Geotagged, MediaPoint};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{
        ClusterReducer, Config, GeoError, GeocodeCache, GeocodingClient, GeocodingService, Result,
    };

    pub use crate::{Cluster, Coordinates, Geotagged, MediaPoint, PlaceRecord};
}
