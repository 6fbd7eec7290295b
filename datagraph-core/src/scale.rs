//! Color and opacity scales
//!
//! Pure data-to-style mappings with no drawing dependency. The color scale
//! partitions the observed sqrt(ratio) domain into 9 equal-population bins
//! over a fixed diverging palette; opacity ramps linearly over the observed
//! weight extent.

/// 9-step diverging palette (RdBu), reversed: low values map to blue,
/// high values to red.
pub const PALETTE: [&str; 9] = [
    "#2166ac", "#4393c3", "#92c5de", "#d1e5f0", "#f7f7f7", "#fddbc7", "#f4a582", "#d6604d",
    "#b2182b",
];

/// Outline color for circles whose ratio is absent
pub const NULL_STROKE: &str = "#151515";

/// Dash pattern applied to every circle outline
pub const DASH_PATTERN: &str = "2,2";

/// Minimum and maximum of the finite values in `values`, or `None` when
/// there are none
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut result: Option<(f64, f64)> = None;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        result = Some(match result {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    result
}

/// Equal-population binning of a continuous domain into `PALETTE.len()` bins.
///
/// Thresholds are R-7 quantiles of the sorted sample at i/bins. Inputs below
/// the first threshold land in bin 0 and inputs at or above the last land in
/// the final bin, so out-of-domain values clamp to the palette ends.
#[derive(Debug, Clone)]
pub struct QuantileScale {
    thresholds: Vec<f64>,
}

impl QuantileScale {
    /// Build a scale from a domain sample; non-finite entries are dropped.
    /// An empty sample yields a scale that maps everything to bin 0.
    pub fn new(sample: &[f64], bins: usize) -> QuantileScale {
        let mut sorted: Vec<f64> = sample.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        let thresholds = if sorted.is_empty() || bins < 2 {
            Vec::new()
        } else {
            (1..bins)
                .map(|i| quantile(&sorted, i as f64 / bins as f64))
                .collect()
        };
        QuantileScale { thresholds }
    }

    /// Bin index for `x`: the number of thresholds at or below it
    pub fn bin(&self, x: f64) -> usize {
        self.thresholds.iter().filter(|t| **t <= x).count()
    }

    /// Inner bin boundaries, non-decreasing
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }
}

/// R-7 sample quantile of a sorted, non-empty slice
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let i = h.floor() as usize;
    let v = sorted[i];
    let e = h - i as f64;
    if e > 0.0 {
        v + e * (sorted[i + 1] - v)
    } else {
        v
    }
}

/// Fill color for a leaf: `None` is the unfilled sentinel for an absent
/// ratio; otherwise sqrt(ratio) is binned against the scale.
pub fn color_for(ratio: Option<f64>, scale: &QuantileScale) -> Option<&'static str> {
    ratio.map(|r| PALETTE[scale.bin(r.sqrt()).min(PALETTE.len() - 1)])
}

/// Opacity ramp over the observed weight extent: 0.6 at the minimum,
/// growing linearly (deliberately not clamped above 1.0, matching the
/// source behavior). A missing or zero-width extent yields exactly 1.0.
pub fn opacity_for(weight: f64, value_extent: Option<(f64, f64)>) -> f64 {
    match value_extent {
        Some((lo, hi)) if hi > lo => 0.6 + (weight - lo) / (hi - lo),
        _ => 1.0,
    }
}
