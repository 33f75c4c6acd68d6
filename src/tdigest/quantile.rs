//! Quantile evaluation for `TDigest`.
//!
//! Each cluster's mean is placed at its **center of mass** on the cumulative-weight axis,
//! `q_i = (cumBefore_i + w_i/2) / N`. The points `(q_i, mean_i)` form a non-decreasing
//! piecewise-linear function of `q`:
//!
//! - **Interior**: `q_i <= q <= q_{i+1}` → linear interpolation between clusters `i` and `i+1`.
//! - **Left tail**: `q <= q_0` → the segment through clusters `0` and `1`, extended.
//! - **Right tail**: `q >= q_{n-1}` → the segment through clusters `n-2` and `n-1`, extended.
//!
//! Probes outside `[0, 1]` are **not** clamped; they follow the tail segments and should be
//! treated as rough extrapolations.
//!
//! # Edge cases
//! - **Empty digest** → `Err(EmptyDigest)`.
//! - **Non-finite `q`** → `Err(NonFiniteInput)`.
//! - **Single cluster** → its mean for every `q`.

use crate::tdigest::TDigest;
use crate::{TdError, TdResult};

/// One point of the interpolation polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Knot {
    q: f64,
    mean: f64,
}

/// Point on the line through `a` and `b` at `q`.
///
/// Knots are returned bit-exact. Means of opposite sign whose difference overflows are
/// combined as `a·(1−t) + b·t` instead; both terms then share a sign, so the result is finite
/// between the knots and at worst ±inf beyond them, never NaN.
#[inline]
fn lerp(a: Knot, b: Knot, q: f64) -> f64 {
    // Past 2^53 total weight, neighbouring knots can round to the same q.
    if b.q == a.q {
        return b.mean;
    }
    let t = (q - a.q) / (b.q - a.q);
    if t == 0.0 {
        return a.mean;
    }
    if t == 1.0 {
        return b.mean;
    }
    let span = b.mean - a.mean;
    if span.is_finite() {
        a.mean + span * t
    } else {
        a.mean * (1.0 - t) + b.mean * t
    }
}

impl TDigest {
    /// Estimate the value at quantile `q`.
    pub fn quantile(&self, q: f64) -> TdResult<f64> {
        if !q.is_finite() {
            return Err(TdError::NonFiniteInput {
                context: "quantile probe",
            });
        }
        match self.clusters.len() {
            0 => Err(TdError::EmptyDigest),
            1 => Ok(self.clusters[0].mean()),
            _ => Ok(self.interpolate(q)),
        }
    }

    /// Estimate several quantiles; fails on the first invalid probe.
    pub fn quantiles(&self, qs: &[f64]) -> TdResult<Vec<f64>> {
        qs.iter().map(|&q| self.quantile(q)).collect()
    }

    /// `quantile(0.5)`.
    #[inline]
    pub fn median(&self) -> TdResult<f64> {
        self.quantile(0.5)
    }

    /// Center-of-mass knots, one per cluster. Lazily computed in a single pass.
    fn knots(&self) -> impl Iterator<Item = Knot> + '_ {
        let n = self.total_weight as f64;
        let mut cum = 0.0_f64;
        self.clusters.iter().map(move |c| {
            let w = c.weight_f64();
            let k = Knot {
                q: (cum + w / 2.0) / n,
                mean: c.mean(),
            };
            cum += w;
            k
        })
    }

    /// Piecewise-linear evaluation; requires at least two clusters.
    fn interpolate(&self, q: f64) -> f64 {
        debug_assert!(self.clusters.len() >= 2);
        let mut knots = self.knots();
        let (Some(mut lo), Some(mut hi)) = (knots.next(), knots.next()) else {
            return f64::NAN;
        };
        if q <= lo.q {
            return lerp(lo, hi, q);
        }
        while q > hi.q {
            match knots.next() {
                Some(next) => {
                    lo = hi;
                    hi = next;
                }
                // Past the last knot: extend the final segment.
                None => break,
            }
        }
        lerp(lo, hi, q)
    }
}
