//! SVG scene construction
//!
//! The scene is an explicit render target handed to the renderer, not a
//! page-global surface. It holds one positioned, styled circle per drawn
//! leaf and serializes to a standalone SVG document.

use crate::scale::DASH_PATTERN;

/// One drawn leaf: a translated group with a tooltip title and a circle
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    /// `None` is the unfilled sentinel for an absent ratio
    pub fill: Option<&'static str>,
    /// Outline color; `None` means no stroke
    pub stroke: Option<&'static str>,
    pub opacity: f64,
    pub title: String,
}

/// A complete bubble scene sized to the configured diameter
#[derive(Debug)]
pub struct SvgScene {
    width: f64,
    height: f64,
    nodes: Vec<SceneNode>,
}

impl SvgScene {
    pub fn new(width: f64, height: f64) -> SvgScene {
        SvgScene {
            width,
            height,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Serialize to a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" class="bubble">"#,
            self.width, self.height
        ));
        out.push('\n');
        for node in &self.nodes {
            out.push_str(&format!(
                r#"  <g class="node" id="{}" transform="translate({},{})">"#,
                xml_escape(&node.id),
                node.x,
                node.y
            ));
            out.push('\n');
            out.push_str(&format!("    <title>{}</title>\n", xml_escape(&node.title)));
            out.push_str(&format!(
                r#"    <circle r="{}" style="fill: {}; stroke: {}; stroke-dasharray: {}; opacity: {}"/>"#,
                node.r,
                node.fill.unwrap_or("none"),
                node.stroke.unwrap_or("none"),
                DASH_PATTERN,
                node.opacity
            ));
            out.push_str("\n  </g>\n");
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Escape text for use in XML content and attribute values
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
