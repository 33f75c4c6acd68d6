//! Nearest-cluster search over a slice sorted by mean.
//!
//! Pure and allocation-free: one binary search locates the clusters bracketing the probe.
//! An exact distance tie between the two brackets reports both.

use crate::tdigest::cluster::Cluster;

/// Indices of the cluster(s) closest to a probe value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nearest {
    /// No clusters at all.
    Empty,
    /// A single closest cluster.
    One(usize),
    /// Both bracketing clusters are exactly equidistant; `lower < upper`.
    Tie(usize, usize),
}

impl Nearest {
    /// Candidate indices in ascending order.
    pub(crate) fn indices(self) -> impl Iterator<Item = usize> {
        let (a, b) = match self {
            Nearest::Empty => (None, None),
            Nearest::One(i) => (Some(i), None),
            Nearest::Tie(lo, hi) => (Some(lo), Some(hi)),
        };
        a.into_iter().chain(b)
    }
}

/// Find the cluster(s) whose mean is closest to `value`.
///
/// - `value <= mean[0]` → the first cluster.
/// - `value >= mean[last]` → the last cluster.
/// - Otherwise `lower` is the last cluster with `mean < value` and `upper` the first with
///   `mean >= value`. Within a run of equal means this selects the run member adjacent to
///   `value`, which is the only member that can move toward `value` without crossing a
///   neighbour.
pub(crate) fn nearest(clusters: &[Cluster], value: f64) -> Nearest {
    let n = clusters.len();
    if n == 0 {
        return Nearest::Empty;
    }
    if value <= clusters[0].mean() {
        return Nearest::One(0);
    }
    if value >= clusters[n - 1].mean() {
        return Nearest::One(n - 1);
    }

    // 0 < upper < n thanks to the edge checks above.
    let upper = clusters.partition_point(|c| c.mean() < value);
    let lower = upper - 1;
    let d_lower = value - clusters[lower].mean();
    let d_upper = clusters[upper].mean() - value;

    if d_lower == d_upper {
        Nearest::Tie(lower, upper)
    } else if d_lower < d_upper {
        Nearest::One(lower)
    } else {
        Nearest::One(upper)
    }
}
