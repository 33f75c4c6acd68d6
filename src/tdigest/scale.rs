use serde::{Deserialize, Serialize};

/// Scale families define the `q → max cluster weight` bound that decides whether a cluster
/// may still absorb an observation.
///
/// Every family is largest at the median and shrinks toward `q = 0` and `q = 1`, so tail
/// clusters stay small and tail quantiles stay sharp. All bounds scale with the total weight
/// and inversely with `compression`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")] // accept "quadratic", "arcsine"
#[derive(Default)]
pub enum ScaleFamily {
    /// `2·N·q·(1−q) / compression` (DEFAULT). Zero at the extremes.
    #[default]
    Quadratic,
    /// `N·sqrt(q·(1−q)) / compression`. Same median budget as `Quadratic`, wider shoulders.
    Arcsine,
}

impl ScaleFamily {
    /// Largest weight a cluster sitting at quantile `q` may hold.
    ///
    /// `q` is clamped to `[0, 1]`; `total_weight` is the digest's current weight.
    #[inline]
    pub fn max_weight(self, q: f64, total_weight: u64, compression: f64) -> f64 {
        let q = q.clamp(0.0, 1.0);
        let n = total_weight as f64;
        let spread = q * (1.0 - q);
        match self {
            ScaleFamily::Quadratic => 2.0 * n * spread / compression,
            ScaleFamily::Arcsine => n * spread.sqrt() / compression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScaleError(pub String);

impl std::fmt::Display for ParseScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid scale: {} (expected 'quadratic' or 'arcsine')",
            self.0
        )
    }
}
impl std::error::Error for ParseScaleError {}

/// Parse a free-form scale name. `None` selects the default family.
pub fn parse_scale_str(raw: Option<&str>) -> Result<ScaleFamily, ParseScaleError> {
    match raw.map(|x| x.trim().to_ascii_lowercase().replace(['_', ' ', '-'], "")) {
        None => Ok(ScaleFamily::default()),
        Some(ref v) if v == "quadratic" || v == "quad" => Ok(ScaleFamily::Quadratic),
        Some(ref v) if v == "arcsine" || v == "asin" => Ok(ScaleFamily::Arcsine),
        Some(v) => Err(ParseScaleError(v)),
    }
}

pub fn scale_to_str(s: ScaleFamily) -> &'static str {
    match s {
        ScaleFamily::Quadratic => "quadratic",
        ScaleFamily::Arcsine => "arcsine",
    }
}
