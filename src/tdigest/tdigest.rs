// src/tdigest/tdigest.rs
use serde::{Deserialize, Serialize};

use crate::tdigest::cluster::{is_sorted_by_mean, Cluster};
use crate::tdigest::scale::ScaleFamily;
use crate::{TdError, TdResult};

/// Default compression when none is configured.
pub const DEFAULT_COMPRESSION: f64 = 100.0;

/// Streaming t-digest: a sorted, weighted set of clusters plus the running total weight.
///
/// - `clusters` is non-decreasing by mean at all times (equal means are allowed).
/// - `total_weight` always equals the sum of cluster weights; it is maintained incrementally.
/// - `compression` and `scale` are fixed at construction.
///
/// The digest is a plain owned value. Mutation goes through `&mut self`, so sharing it between
/// writers requires the caller's own lock around the whole digest.
#[derive(Debug, PartialEq, Clone)]
pub struct TDigest {
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) total_weight: u64,
    compression: f64,
    scale: ScaleFamily,
}

/* =============================================================================
 * Options / Builder
 * ============================================================================= */

/// Serializable digest configuration. Missing fields fall back to the defaults, so the struct
/// can be embedded in a caller's own config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestOptions {
    pub compression: f64,
    pub scale: ScaleFamily,
}
impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            compression: DEFAULT_COMPRESSION,
            scale: ScaleFamily::default(),
        }
    }
}

/// Builder for [`TDigest`].
///
/// Use the builder when you want to:
/// - construct an empty digest with a chosen compression and scale family, or
/// - seed a digest with *existing clusters* (e.g. decoded by some external format).
#[derive(Debug, Clone, Default)]
pub struct TDigestBuilder {
    opts: DigestOptions,
    init_clusters: Option<Vec<Cluster>>,
}
impl TDigestBuilder {
    /// Create a new builder with defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression parameter. Higher means more, smaller clusters.
    #[inline]
    pub fn compression(mut self, c: f64) -> Self {
        self.opts.compression = c;
        self
    }

    /// Choose the scale family bounding cluster weights.
    #[inline]
    pub fn scale(mut self, s: ScaleFamily) -> Self {
        self.opts.scale = s;
        self
    }

    /// Take compression and scale from a loaded options struct.
    #[inline]
    pub fn options(mut self, opts: DigestOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Seed with clusters, which must be sorted by mean, finite, and of weight >= 1.
    pub fn with_clusters(mut self, clusters: Vec<Cluster>) -> Self {
        self.init_clusters = Some(clusters);
        self
    }

    /// Validate the configuration (and seed, if any) and build the digest.
    pub fn build(self) -> TdResult<TDigest> {
        let compression = self.opts.compression;
        if !compression.is_finite() || compression <= 0.0 {
            return Err(TdError::InvalidCompression);
        }
        let clusters = self.init_clusters.unwrap_or_default();
        let total_weight = validate_clusters(&clusters)?;
        Ok(TDigest {
            clusters,
            total_weight,
            compression,
            scale: self.opts.scale,
        })
    }
}

/// Check seed clusters and return their total weight.
fn validate_clusters(clusters: &[Cluster]) -> TdResult<u64> {
    let mut total = 0u64;
    for (i, c) in clusters.iter().enumerate() {
        if !c.mean().is_finite() {
            return Err(TdError::NonFiniteInput {
                context: "seed mean",
            });
        }
        if c.weight() == 0 {
            return Err(TdError::InvalidWeight {
                context: "seed cluster",
            });
        }
        if i > 0 && clusters[i - 1].mean() > c.mean() {
            return Err(TdError::UnsortedClusters { index: i });
        }
        total = total
            .checked_add(c.weight())
            .ok_or(TdError::WeightOverflow)?;
    }
    Ok(total)
}

/* =============================================================================
 * Digest
 * ============================================================================= */

impl TDigest {
    /// Empty digest with the given compression and the default scale family.
    pub fn new(compression: f64) -> TdResult<TDigest> {
        Self::builder().compression(compression).build()
    }

    /// Empty digest from a full options struct.
    pub fn with_options(opts: DigestOptions) -> TdResult<TDigest> {
        Self::builder().options(opts).build()
    }

    /// Entry point for fluent construction.
    #[inline]
    pub fn builder() -> TDigestBuilder {
        TDigestBuilder::default()
    }

    /// The configured compression parameter.
    #[inline]
    pub fn compression(&self) -> f64 {
        self.compression
    }

    /// The configured scale family.
    #[inline]
    pub fn scale(&self) -> ScaleFamily {
        self.scale
    }

    #[inline]
    pub fn options(&self) -> DigestOptions {
        DigestOptions {
            compression: self.compression,
            scale: self.scale,
        }
    }

    /// Total weight (∑w) of everything inserted so far.
    #[inline]
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Number of clusters.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Borrow the clusters, sorted by mean.
    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Structural invariants; cheap enough for `debug_assert!` after every mutation.
    pub(crate) fn invariants_hold(&self) -> bool {
        is_sorted_by_mean(&self.clusters)
            && self.clusters.iter().all(|c| c.weight() >= 1)
            && self.clusters.iter().map(Cluster::weight).sum::<u64>() == self.total_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_digest_is_empty() {
        let td = TDigest::new(100.0).unwrap();
        assert!(td.is_empty());
        assert_eq!(td.len(), 0);
        assert_eq!(td.total_weight(), 0);
        assert_eq!(td.compression(), 100.0);
        assert_eq!(td.scale(), ScaleFamily::Quadratic);
    }

    #[test]
    fn compression_must_be_finite_and_positive() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(TDigest::new(bad), Err(TdError::InvalidCompression), "{bad}");
        }
        assert!(TDigest::new(0.5).is_ok());
    }

    #[test]
    fn builder_seeds_clusters_and_total() {
        let td = TDigest::builder()
            .compression(1.0)
            .scale(ScaleFamily::Arcsine)
            .with_clusters(vec![
                Cluster::new(0.5, 3),
                Cluster::new(1.0, 1),
                Cluster::new(1.0, 2),
            ])
            .build()
            .unwrap();
        assert_eq!(td.len(), 3);
        assert_eq!(td.total_weight(), 6);
        assert_eq!(td.scale(), ScaleFamily::Arcsine);
        assert!(td.invariants_hold());
    }

    #[test]
    fn builder_rejects_bad_seeds() {
        let unsorted = vec![Cluster::new(1.0, 1), Cluster::new(2.0, 1), Cluster::new(0.0, 1)];
        assert_eq!(
            TDigest::builder().with_clusters(unsorted).build(),
            Err(TdError::UnsortedClusters { index: 2 })
        );

        let non_finite = vec![Cluster::new(f64::NAN, 1)];
        assert!(matches!(
            TDigest::builder().with_clusters(non_finite).build(),
            Err(TdError::NonFiniteInput { .. })
        ));

        let overflow = vec![Cluster::new(0.0, u64::MAX), Cluster::new(1.0, 1)];
        assert_eq!(
            TDigest::builder().with_clusters(overflow).build(),
            Err(TdError::WeightOverflow)
        );
    }

    #[test]
    fn options_round_trip_through_serde_with_defaults() {
        let opts: DigestOptions = serde_json::from_str(r#"{"scale":"arcsine"}"#).unwrap();
        assert_eq!(opts.compression, DEFAULT_COMPRESSION);
        assert_eq!(opts.scale, ScaleFamily::Arcsine);

        let td = TDigest::with_options(opts).unwrap();
        assert_eq!(td.options(), opts);

        let json = serde_json::to_string(&td.options()).unwrap();
        let back: DigestOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }
}
