//! Visualization dispatch and the bubble pipeline
//!
//! Rendering is a pure function of (dataset, config): there is no shared
//! mutable state between invocations, so overlapping render requests are
//! serialized by construction.

use crate::config::ResolvedConfig;
use crate::dataset::Dataset;
use crate::error::{GraphError, Result};
use crate::pack;
use crate::scale::{self, QuantileScale, NULL_STROKE, PALETTE};
use crate::svg::{SceneNode, SvgScene};

/// Render the visualization selected by `kind` into a fresh scene.
///
/// `"bubble"` is implemented; `"hex"` is declared but unbuilt and reports
/// as such; anything else is an unrecognized option.
pub fn render_graph(kind: &str, dataset: &Dataset, config: &ResolvedConfig) -> Result<SvgScene> {
    match kind {
        "bubble" => render_bubble(dataset, config),
        "hex" => Err(GraphError::NotImplemented("hex".to_string())),
        other => Err(GraphError::UnrecognizedKind(other.to_string())),
    }
}

fn render_bubble(dataset: &Dataset, config: &ResolvedConfig) -> Result<SvgScene> {
    dataset.validate()?;

    let layout = pack::pack_dataset(dataset, config.diameter, config.padding);

    // Both extents are taken over the root's direct children, not the
    // drawn leaves (a quirk of the source system, preserved deliberately).
    let color_domain: Vec<f64> = layout
        .root_children()
        .filter_map(|n| n.ratio)
        .map(f64::sqrt)
        .collect();
    let color_scale = QuantileScale::new(&color_domain, PALETTE.len());
    let weight_extent = scale::extent(layout.root_children().map(|n| n.weight));

    let mut scene = SvgScene::new(config.diameter, config.diameter);
    for leaf in layout.leaves() {
        let fill = scale::color_for(leaf.ratio, &color_scale);
        let opacity = if leaf.ratio.is_some() {
            scale::opacity_for(leaf.weight, weight_extent)
        } else {
            1.0
        };
        scene.push(SceneNode {
            id: leaf.acc.clone(),
            x: leaf.x,
            y: leaf.y,
            r: leaf.r,
            fill,
            stroke: if leaf.ratio.is_none() {
                Some(NULL_STROKE)
            } else {
                None
            },
            opacity,
            title: node_title(&leaf.acc, leaf.ratio, leaf.pval),
        });
    }
    Ok(scene)
}

fn node_title(acc: &str, ratio: Option<f64>, pval: Option<f64>) -> String {
    format!(
        "{} - ratio: {} pval: {}",
        acc,
        fmt4(ratio),
        fmt4(pval)
    )
}

/// Four-decimal formatting for the tooltip; an absent value prints as `none`
fn fmt4(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "none".to_string(),
    }
}
