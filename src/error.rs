// src/error.rs
use core::fmt;

/// Library-wide error for stream-tdigest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TdError {
    /// NaN/±inf where a finite number is required.
    /// `context` pinpoints where it came from (e.g., "sample value", "quantile probe", "seed mean").
    NonFiniteInput { context: &'static str },

    /// A weight of zero was supplied (observations and clusters carry weight >= 1).
    InvalidWeight { context: &'static str },

    /// Compression must be finite and strictly positive.
    InvalidCompression,

    /// Quantile requested from a digest that holds no observations.
    EmptyDigest,

    /// The running total weight would exceed `u64::MAX`.
    WeightOverflow,

    /// Seed clusters are not non-decreasing by mean; `index` is the first offender.
    UnsortedClusters { index: usize },
}

impl fmt::Display for TdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TdError::NonFiniteInput { context } => write!(
                f,
                "tdigest: non-finite values are not allowed ({}). \
hint: clean your data or drop NaN/±inf before inserting",
                context
            ),
            TdError::InvalidWeight { context } => write!(
                f,
                "tdigest: weight must be >= 1 ({}). hint: drop zero-weight observations",
                context
            ),
            TdError::InvalidCompression => write!(
                f,
                "tdigest: invalid compression. hint: compression must be finite and > 0"
            ),
            TdError::EmptyDigest => write!(
                f,
                "tdigest: no data. hint: insert at least one observation before querying"
            ),
            TdError::WeightOverflow => {
                write!(f, "tdigest: total weight overflowed u64")
            }
            TdError::UnsortedClusters { index } => write!(
                f,
                "tdigest: seed clusters must be sorted by mean (violation at index {})",
                index
            ),
        }
    }
}

impl std::error::Error for TdError {}

pub type TdResult<T> = Result<T, TdError>;
