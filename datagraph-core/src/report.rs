//! Dataset inspection and output generation
//!
//! Global invariants enforced:
//! - Deterministic output
//! - Identical input yields byte-for-byte identical output

use crate::config::{DEFAULT_DIAMETER, DEFAULT_PADDING};
use crate::dataset::Dataset;
use crate::{pack, scale};
use serde::Serialize;

/// Shape and extent summary of a loaded dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub source: String,
    pub nodes: usize,
    pub leaves: usize,
    /// Min/max of the measured ratios across leaves, if any are present
    pub ratio_extent: Option<(f64, f64)>,
    /// Min/max of the packing weights across leaves
    pub weight_extent: Option<(f64, f64)>,
}

/// Summarize a validated dataset under the default layout settings
pub fn summarize(dataset: &Dataset, source: &str) -> DatasetSummary {
    let layout = pack::pack_dataset(dataset, DEFAULT_DIAMETER, DEFAULT_PADDING);
    DatasetSummary {
        source: source.to_string(),
        nodes: dataset.node_count(),
        leaves: dataset.leaf_count(),
        ratio_extent: scale::extent(layout.leaves().filter_map(|n| n.ratio)),
        weight_extent: scale::extent(layout.leaves().map(|n| n.weight)),
    }
}

/// Render a summary as aligned text output
pub fn render_text(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source:  {}\n", summary.source));
    out.push_str(&format!("Nodes:   {}\n", summary.nodes));
    out.push_str(&format!("Leaves:  {}\n", summary.leaves));
    out.push_str(&format!("Ratios:  {}\n", format_extent(summary.ratio_extent)));
    out.push_str(&format!(
        "Weights: {}\n",
        format_extent(summary.weight_extent)
    ));
    out
}

/// Render a summary as JSON output
pub fn render_json(summary: &DatasetSummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}

fn format_extent(extent: Option<(f64, f64)>) -> String {
    match extent {
        Some((lo, hi)) => format!("{:.4} .. {:.4}", lo, hi),
        None => "none".to_string(),
    }
}
