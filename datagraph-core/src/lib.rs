//! Datagraph core library - circle-packed bubble charts for hierarchical datasets

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Rendering is a pure function of (dataset, config)
// - No global mutable state, no randomness, no threads
// - Sibling input order is preserved; the layout never sorts
// - Identical input yields byte-for-byte identical output

pub mod config;
pub mod dataset;
pub mod error;
pub mod html;
pub mod pack;
pub mod render;
pub mod report;
pub mod scale;
pub mod svg;

pub use config::{DatagraphConfig, ResolvedConfig};
pub use dataset::{Dataset, Node};
pub use error::{GraphError, Result};
pub use html::{render_html_report, ReportInfo};
pub use render::render_graph;
pub use report::DatasetSummary;
pub use svg::{SceneNode, SvgScene};

/// Load the dataset at `path` and render the visualization selected by
/// `kind`. The load is the only I/O; the rest of the render runs to
/// completion synchronously.
pub fn render_file(kind: &str, path: &std::path::Path, config: &ResolvedConfig) -> Result<SvgScene> {
    let dataset = Dataset::from_path(path)?;
    render_graph(kind, &dataset, config)
}
