pub mod cluster;
pub mod quantile;
pub mod scale;
pub mod test_helpers;

// Internal building blocks
mod insert;
mod nearest;
mod tdigest;

// Public surface
pub use cluster::{is_sorted_by_mean, Cluster};
pub use scale::{parse_scale_str, scale_to_str, ParseScaleError, ScaleFamily};
pub use tdigest::{DigestOptions, TDigest, TDigestBuilder, DEFAULT_COMPRESSION};
