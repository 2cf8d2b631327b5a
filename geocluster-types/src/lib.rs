//! # geocluster-types
//!
//! Core data types shared by the geocluster clustering and geocoding code.
//!
//! - **Point types**: `Coordinates`, `MediaPoint` and the `Geotagged` trait
//! - **Cluster types**: `Cluster`, a group of media with a running-mean center
//! - **Place types**: `PlaceRecord` and `Feature`, decoded geocoder results
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's `Point`.
//!
//! ## Examples
//!
//! ```rust
//! use geocluster_types::cluster::Cluster;
//! use geocluster_types::point::MediaPoint;
//!
//! let mut cluster = Cluster::new(MediaPoint::new(45.0, 9.0, "a.jpg"));
//! cluster.push(MediaPoint::new(45.0002, 9.0002, "b.jpg"));
//! assert_eq!(cluster.len(), 2);
//! ```

pub mod cluster;
pub mod place;
pub mod point;
