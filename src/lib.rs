//! Streaming t-digest.
//!
//! Observations arrive one at a time as `(value, weight)` pairs and are folded into a small,
//! sorted set of weighted clusters. Any quantile can then be estimated by interpolating over
//! the clusters' centers of mass. Clusters near the tails are kept small, so p99-style queries
//! stay accurate while memory stays bounded.
//!
//! ```
//! use stream_tdigest::tdigest::TDigest;
//!
//! let mut td = TDigest::new(100.0)?;
//! for i in 0..10_000 {
//!     td.insert(i as f64, 1)?;
//! }
//! let p99 = td.quantile(0.99)?;
//! assert!((p99 - 9_900.0).abs() < 100.0);
//! # Ok::<(), stream_tdigest::TdError>(())
//! ```

mod error;
pub mod tdigest;

pub use error::{TdError, TdResult};
