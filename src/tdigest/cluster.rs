use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A cluster collapses one or more observations into a single weighted point.
///
/// `mean` is the weighted average of everything folded in so far and `weight` the total
/// observation weight. A live cluster always has `weight >= 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    mean: OrderedFloat<f64>,
    weight: u64,
}

impl PartialOrd for Cluster {
    fn partial_cmp(&self, other: &Cluster) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Cluster {
    fn cmp(&self, other: &Cluster) -> Ordering {
        // Equal means are legal, so break ties by weight to stay consistent with `Eq`.
        self.mean
            .cmp(&other.mean)
            .then_with(|| self.weight.cmp(&other.weight))
    }
}

impl Cluster {
    #[inline]
    pub fn new(mean: f64, weight: u64) -> Self {
        debug_assert!(weight >= 1);
        Cluster {
            mean: OrderedFloat::from(mean),
            weight,
        }
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean.into_inner()
    }
    #[inline]
    pub fn weight(&self) -> u64 {
        self.weight
    }
    #[inline]
    pub(crate) fn weight_f64(&self) -> f64 {
        self.weight as f64
    }

    /// The mean this cluster would have after absorbing `weight` at `value`.
    ///
    /// The weighted average is clamped to the closed interval between the current mean and
    /// `value`; rounding can otherwise nudge it a few ulps past `value` and out of sort order.
    #[inline]
    pub(crate) fn mean_after(&self, value: f64, weight: u64) -> f64 {
        let m0 = self.mean();
        let w0 = self.weight_f64();
        let w = weight as f64;
        let total = w0 + w;
        // Convex combination: never overflows for finite inputs, unlike `(m0·w0 + v·w) / total`.
        let m = m0 * (w0 / total) + value * (w / total);
        let (lo, hi) = if m0 <= value { (m0, value) } else { (value, m0) };
        m.clamp(lo, hi)
    }

    /// Fold `weight` at `value` into this cluster.
    #[inline]
    pub(crate) fn absorb(&mut self, value: f64, weight: u64) {
        self.mean = OrderedFloat::from(self.mean_after(value, weight));
        self.weight += weight;
    }
}

/// Non-strictly increasing by mean (allows equal means).
#[inline]
pub fn is_sorted_by_mean(cs: &[Cluster]) -> bool {
    cs.windows(2).all(|w| w[0].mean <= w[1].mean)
}

/// Sum of weights over a slice.
#[inline]
pub(crate) fn weight_of(cs: &[Cluster]) -> u64 {
    cs.iter().map(Cluster::weight).sum()
}
