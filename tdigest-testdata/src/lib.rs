//! tdigest-testdata
//! Synthetic observation streams shared by benches and tests.
//! Every stream is produced from an explicit seed; nothing reads ambient randomness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Zipf};

/// Upper end of the Zipf support (`1..=ZIPF_N`).
pub const ZIPF_N: u64 = 1 << 20;

/// Zipf exponent used for the heavy-tailed stream.
pub const ZIPF_S: f64 = 1.2;

/// Available synthetic streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistKind {
    /// Strictly increasing `1, 2, 3, ...` (seed is ignored).
    Ordered,
    /// Uniform in \[0,1)
    Uniform,
    /// Standard normal, unclamped.
    Normal,
    /// Zipf over `1..=ZIPF_N` with exponent `ZIPF_S`; heavy right tail and many repeats.
    Zipf,
}

impl DistKind {
    pub const ALL: [DistKind; 4] = [
        DistKind::Ordered,
        DistKind::Uniform,
        DistKind::Normal,
        DistKind::Zipf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DistKind::Ordered => "ordered",
            DistKind::Uniform => "uniform",
            DistKind::Normal => "normal",
            DistKind::Zipf => "zipf",
        }
    }
}

/// Generate `n` observations for the chosen stream.
pub fn gen_dataset(kind: DistKind, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);

    match kind {
        DistKind::Ordered => {
            out.extend((1..=n).map(|i| i as f64));
        }
        DistKind::Uniform => {
            for _ in 0..n {
                out.push(rng.random::<f64>());
            }
        }
        DistKind::Normal => {
            let normal = Normal::new(0.0, 1.0).unwrap();
            for _ in 0..n {
                out.push(normal.sample(&mut rng));
            }
        }
        DistKind::Zipf => {
            let zipf = Zipf::new(ZIPF_N as f64, ZIPF_S).unwrap();
            for _ in 0..n {
                let x: f64 = zipf.sample(&mut rng);
                out.push(x.round());
            }
        }
    }
    out
}

/// Exact order statistic at quantile `q` using the nearest-rank rule on a **sorted** slice.
pub fn exact_quantile(sorted: &[f64], q: f64) -> f64 {
    assert!(!sorted.is_empty(), "exact_quantile() requires data");
    let n = sorted.len();
    let rank = (q.clamp(0.0, 1.0) * n as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(n - 1)]
}
