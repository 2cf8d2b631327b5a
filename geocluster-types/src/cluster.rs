use crate::point::{Coordinates, Geotagged};
use serde::{Deserialize, Serialize};

/// Incrementally update a mean with `new_len` values whose mean is `new_value`.
///
/// # Examples
///
/// ```
/// use geocluster_types::cluster::recalculate_mean;
///
/// assert_eq!(recalculate_mean(2.0, 2, 5.0, 1), 3.0);
/// ```
pub fn recalculate_mean(old_mean: f64, old_len: usize, new_value: f64, new_len: usize) -> f64 {
    (old_mean * old_len as f64 + new_value * new_len as f64) / (old_len + new_len) as f64
}

/// A group of media items sharing a running-mean center.
///
/// The center is the planar mean of the members' latitudes and longitudes,
/// updated on every `push` and never recomputed from the member list. This is
/// not a geodesic centroid; it is only meaningful for groups spanning a few
/// tens of meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster<M> {
    center: Coordinates,
    members: Vec<M>,
}

impl<M: Geotagged> Cluster<M> {
    /// Open a singleton cluster centered on `first`.
    pub fn new(first: M) -> Self {
        Self {
            center: first.coordinates(),
            members: vec![first],
        }
    }

    /// Append a member and move the center towards it.
    pub fn push(&mut self, media: M) {
        let n = self.members.len();
        self.center.latitude = recalculate_mean(self.center.latitude, n, media.latitude(), 1);
        self.center.longitude = recalculate_mean(self.center.longitude, n, media.longitude(), 1);
        self.members.push(media);
    }
}

impl<M> Cluster<M> {
    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn members(&self) -> &[M] {
        &self.members
    }

    pub fn into_members(self) -> Vec<M> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
