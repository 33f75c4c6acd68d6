//! Streaming insertion for `TDigest`.
//!
//! Each observation is either **absorbed** by one existing cluster or becomes a **new** cluster
//! at its sorted position. The decision is made in two steps:
//!
//! 1. **Nearest search**: the cluster(s) whose mean is closest to the value
//!    (see `nearest.rs`; an exact tie yields both brackets).
//! 2. **Capacity check**: a candidate may absorb only while its weight is strictly below the
//!    scale family's bound at the candidate's *capacity quantile*
//!    `(weight before it + floor((w − 1)/2)) / N`, i.e. the rank of its middle unit sample.
//!    The absorbing cluster must also stay between its sorted neighbours afterwards; that is
//!    checked, not assumed. The first candidate passing both checks wins.
//!
//! Clusters are never split or dropped, so the total weight is conserved exactly.

use tracing::{debug, trace};

use crate::tdigest::cluster::{weight_of, Cluster};
use crate::tdigest::nearest::nearest;
use crate::tdigest::TDigest;
use crate::{TdError, TdResult};

impl TDigest {
    /// Fold one weighted observation into the digest.
    ///
    /// - `value` must be finite, `weight` must be `>= 1`.
    /// - A rejected observation leaves the digest untouched.
    pub fn insert(&mut self, value: f64, weight: u64) -> TdResult<()> {
        if !value.is_finite() {
            debug!(value, "rejecting non-finite observation");
            return Err(TdError::NonFiniteInput {
                context: "sample value",
            });
        }
        if weight == 0 {
            debug!(value, "rejecting zero-weight observation");
            return Err(TdError::InvalidWeight {
                context: "sample weight",
            });
        }
        let new_total = self
            .total_weight
            .checked_add(weight)
            .ok_or(TdError::WeightOverflow)?;

        match self.find_add_target(value, weight) {
            Some(idx) => {
                let c = &mut self.clusters[idx];
                c.absorb(value, weight);
                trace!(
                    idx,
                    value,
                    mean = c.mean(),
                    weight = c.weight(),
                    "merged into cluster"
                );
            }
            None => {
                let idx = self.clusters.partition_point(|c| c.mean() <= value);
                self.clusters.insert(idx, Cluster::new(value, weight));
                trace!(idx, value, weight, clusters = self.clusters.len(), "new cluster");
            }
        }
        self.total_weight = new_total;

        debug_assert!(self.invariants_hold(), "insert broke digest invariants");
        Ok(())
    }

    /// Insert a single observation with weight 1.
    #[inline]
    pub fn add(&mut self, value: f64) -> TdResult<()> {
        self.insert(value, 1)
    }

    /// Insert each value with weight 1, stopping at the first rejected value.
    /// Values before the offending one remain inserted.
    pub fn add_many<I>(&mut self, values: I) -> TdResult<()>
    where
        I: IntoIterator<Item = f64>,
    {
        for v in values {
            self.insert(v, 1)?;
        }
        Ok(())
    }

    /// Index of a cluster that may absorb `weight` at `value`, or `None` when a new cluster is
    /// needed (always the case for an empty digest).
    pub(crate) fn find_add_target(&self, value: f64, weight: u64) -> Option<usize> {
        nearest(&self.clusters, value).indices().find(|&idx| {
            self.has_capacity(idx) && self.absorb_keeps_order(idx, value, weight)
        })
    }

    /// Whether cluster `idx` is still strictly below its size bound.
    fn has_capacity(&self, idx: usize) -> bool {
        let q = self.capacity_quantile(idx);
        let bound = self
            .scale()
            .max_weight(q, self.total_weight, self.compression());
        (self.clusters[idx].weight() as f64) < bound
    }

    /// Whether cluster `idx` would still sit between its neighbours after absorbing.
    fn absorb_keeps_order(&self, idx: usize, value: f64, weight: u64) -> bool {
        let m = self.clusters[idx].mean_after(value, weight);
        let after_prev = idx == 0 || self.clusters[idx - 1].mean() <= m;
        let before_next = self
            .clusters
            .get(idx + 1)
            .map_or(true, |next| m <= next.mean());
        after_prev && before_next
    }

    /// Rank-based quantile of cluster `idx`: weight strictly before it plus the rank of its
    /// middle unit sample, over the total weight.
    pub(crate) fn capacity_quantile(&self, idx: usize) -> f64 {
        let c = &self.clusters[idx];
        let mid_rank = (c.weight() - 1) / 2;
        (self.weight_before(idx) + mid_rank) as f64 / self.total_weight as f64
    }

    /// Sum of weights of clusters `[0, idx)`, summing whichever side of `idx` is shorter.
    fn weight_before(&self, idx: usize) -> u64 {
        if idx <= self.clusters.len() / 2 {
            weight_of(&self.clusters[..idx])
        } else {
            self.total_weight - weight_of(&self.clusters[idx..])
        }
    }
}
