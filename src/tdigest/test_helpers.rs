//! Assertion helpers shared by unit and integration tests.

pub fn assert_exact(label: &str, expected: f64, got: f64) {
    assert!(
        expected == got,
        "{}: expected exactly {:.9}, got {:.9}",
        label,
        expected,
        got
    );
}

pub fn assert_rel_close(label: &str, expected: f64, got: f64, rtol: f64) {
    let denom = expected.abs().max(1e-300);
    let rel = ((expected - got).abs()) / denom;
    assert!(
        rel < rtol,
        "{}: expected ~= {:.9}, got {:.9}, rel_err={:.6e}, rtol={:.6e}",
        label,
        expected,
        got,
        rel,
        rtol
    );
}

pub fn assert_monotone_chain(label: &str, values: &[f64]) {
    for i in 1..values.len() {
        assert!(
            values[i] >= values[i - 1],
            "{}: non-monotone at i={}: {} < {}",
            label,
            i,
            values[i],
            values[i - 1]
        );
    }
}

/// Sorted by mean, no zero weights, and the running total matches both the clusters and the
/// weight the caller inserted.
pub fn assert_sorted_and_conserved(td: &crate::tdigest::TDigest, inserted_weight: u64) {
    let cs = td.clusters();
    for (i, w) in cs.windows(2).enumerate() {
        assert!(
            w[0].mean() <= w[1].mean(),
            "clusters out of order at {}: {} > {}",
            i + 1,
            w[0].mean(),
            w[1].mean()
        );
    }
    assert!(cs.iter().all(|c| c.weight() >= 1), "zero-weight cluster");
    let sum: u64 = cs.iter().map(|c| c.weight()).sum();
    assert_eq!(sum, td.total_weight(), "total_weight drifted from clusters");
    assert_eq!(sum, inserted_weight, "weight was lost or invented");
}
