//! Size-bounded spatial clustering of geotagged media.
//!
//! Virtual folders group photos by place, but a single spot (a stadium, a
//! wedding venue) can collect thousands of them. [`ClusterReducer`] splits
//! such a list into groups of at most `threshold` items by clustering at
//! ever smaller radii.
//!
//! Each pass assigns media first-fit: a point joins the *earliest created*
//! cluster whose center is within range, even when a later cluster is
//! closer. The result therefore depends on input order, and the same input
//! order always yields the same output.
//!
//! # Examples
//!
//! ```rust
//! use geocluster::cluster::ClusterReducer;
//! use geocluster::MediaPoint;
//!
//! let media: Vec<_> = (0..6)
//!     .map(|i| MediaPoint::new(45.0 + i as f64 * 1e-5, 9.0, i))
//!     .collect();
//!
//! let groups = ClusterReducer::new(2).reduce(media, 100.0);
//! assert!(groups.iter().all(|g| g.len() <= 2));
//! assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), 6);
//! ```

use crate::config::Config;
use crate::distance::distance_between_media;
use crate::progress::ProgressLog;
use geocluster_types::cluster::Cluster;
use geocluster_types::point::Geotagged;

/// Group `media` first-fit into clusters whose centers are the running mean
/// of their members.
///
/// A point joins the first cluster (in creation order) whose current center
/// is strictly closer than `max_distance` meters; otherwise it opens a new
/// cluster. Members keep their input order.
pub fn first_fit_clusters<M: Geotagged>(media: Vec<M>, max_distance: f64) -> Vec<Cluster<M>> {
    let mut clusters: Vec<Cluster<M>> = Vec::new();

    for item in media {
        let target = clusters
            .iter()
            .position(|c| distance_between_media(&item, &c.center()) < max_distance);
        match target {
            Some(i) => clusters[i].push(item),
            None => clusters.push(Cluster::new(item)),
        }
    }

    clusters
}

/// Group count and largest group size of a reduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReductionStats {
    pub groups: usize,
    pub biggest: usize,
}

impl ReductionStats {
    pub fn of<M>(groups: &[Vec<M>]) -> Self {
        Self {
            groups: groups.len(),
            biggest: groups.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}

enum Work<M> {
    Emit(Vec<M>),
    Reduce {
        media: Vec<M>,
        max_distance: f64,
        depth: usize,
    },
}

/// Splits media lists into spatial groups of bounded size.
#[derive(Debug)]
pub struct ClusterReducer {
    threshold: usize,
    progress: ProgressLog,
}

impl ClusterReducer {
    /// # Panics
    ///
    /// Panics if `threshold` is zero.
    pub fn new(threshold: usize) -> Self {
        assert!(threshold > 0, "Cluster threshold must be greater than zero");
        Self {
            threshold,
            progress: ProgressLog::new(),
        }
    }

    /// Reducer using `big_virtual_folders_threshold`.
    ///
    /// # Panics
    ///
    /// Panics if the configured threshold is zero. [`Config::validate`]
    /// reports the same problem as an error.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.big_virtual_folders_threshold)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Split `media` into groups of at most `threshold` items.
    ///
    /// Media are clustered first-fit at `max_distance` meters. Every cluster
    /// larger than the threshold is clustered again at half the distance.
    /// Once the distance is down to a meter or less, an oversized cluster
    /// gives up its first `threshold - 1` members (at least one) as a group
    /// of their own and the remainder is clustered again. Groups come out in
    /// depth-first order: the pieces of an oversized cluster take its place
    /// in the sequence.
    ///
    /// Every input item ends up in exactly one group.
    ///
    /// # Panics
    ///
    /// Panics if `max_distance` is infinite, since halving it never ends.
    pub fn reduce<M: Geotagged>(&self, media: Vec<M>, max_distance: f64) -> Vec<Vec<M>> {
        assert!(
            !max_distance.is_infinite(),
            "Cluster distance must be finite"
        );

        let mut groups = Vec::new();
        let mut stack = vec![Work::Reduce {
            media,
            max_distance,
            depth: 0,
        }];

        while let Some(work) = stack.pop() {
            let (media, max_distance, depth) = match work {
                Work::Emit(group) => {
                    groups.push(group);
                    continue;
                }
                Work::Reduce {
                    media,
                    max_distance,
                    depth,
                } => (media, max_distance, depth),
            };

            self.progress.emit_at(
                depth,
                &format!("big list found, {} photos", media.len()),
                &format!("reducing with max_distance={}", max_distance),
                5,
            );

            let clusters = first_fit_clusters(media, max_distance);
            let mut pending = Vec::with_capacity(clusters.len());
            for cluster in clusters {
                let mut members = cluster.into_members();
                if members.len() <= self.threshold {
                    pending.push(Work::Emit(members));
                } else if max_distance > 1.0 {
                    pending.push(Work::Reduce {
                        media: members,
                        max_distance: max_distance / 2.0,
                        depth: depth + 1,
                    });
                } else {
                    let rest = members.split_off(self.threshold.saturating_sub(1).max(1));
                    pending.push(Work::Emit(members));
                    pending.push(Work::Reduce {
                        media: rest,
                        max_distance: max_distance / 2.0,
                        depth: depth + 1,
                    });
                }
            }
            stack.extend(pending.into_iter().rev());
        }

        let stats = ReductionStats::of(&groups);
        self.progress.emit(
            &format!("reduced to {}", stats.groups),
            &format!("biggest size is {}", stats.biggest),
            5,
        );
        groups
    }

    /// Like [`reduce`](Self::reduce), but returns each group as a
    /// [`Cluster`] whose center is the running mean of its members.
    pub fn reduce_to_clusters<M: Geotagged>(
        &self,
        media: Vec<M>,
        max_distance: f64,
    ) -> Vec<Cluster<M>> {
        self.reduce(media, max_distance)
            .into_iter()
            .filter_map(|group| {
                let mut members = group.into_iter();
                let mut cluster = Cluster::new(members.next()?);
                for item in members {
                    cluster.push(item);
                }
                Some(cluster)
            })
            .collect()
    }
}
