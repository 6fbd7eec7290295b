//! HTML report generation
//!
//! Generates a self-contained report page with embedded CSS and the
//! rendered SVG scene. No external assets; the page works offline.

use crate::svg::{xml_escape, SvgScene};

/// Facts shown in the report header
#[derive(Debug, Clone)]
pub struct ReportInfo {
    /// Display name of the dataset resource
    pub source: String,
    pub node_count: usize,
    pub leaf_count: usize,
}

/// Render a scene as a self-contained HTML report page.
///
/// The chart lives in the `graph` container, whose height is synchronized
/// to the scene's configured diameter.
pub fn render_html_report(scene: &SvgScene, info: &ReportInfo) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dataset visualization - {source}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {header}
        {preamble}
        <div id="graph" style="height: {height}px">
{svg}        </div>
        {footer}
    </div>
</body>
</html>"#,
        source = xml_escape(&info.source),
        css = inline_css(),
        header = render_header(info),
        preamble = render_preamble(),
        height = scene.height(),
        svg = indent(&scene.to_svg(), 8),
        footer = render_footer(),
    )
}

fn render_header(info: &ReportInfo) -> String {
    format!(
        r#"<header>
    <h1>Dataset visualization</h1>
    <div class="meta">
        <span>Source: <code class="monospace">{source}</code></span> &#8226;
        <span>Nodes: <strong>{nodes}</strong></span> &#8226;
        <span>Drawn: <strong>{leaves}</strong></span>
    </div>
</header>"#,
        source = xml_escape(&info.source),
        nodes = info.node_count,
        leaves = info.leaf_count,
    )
}

fn render_preamble() -> String {
    r#"<p class="preamble">The bubble graph gives an intuitive overview of the dataset.
The coloring of the bubbles denotes the ratios (or lack thereof), whereas the size and
opacity show the significance of a particular data point in the dataset.</p>"#
        .to_string()
}

fn render_footer() -> String {
    format!(
        r#"<footer>
    <p>Generated by datagraph v{}</p>
</footer>"#,
        env!("CARGO_PKG_VERSION")
    )
}

fn inline_css() -> &'static str {
    r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    margin: 0;
    color: #111827;
    background: #f9fafb;
}
.container {
    max-width: 1080px;
    margin: 0 auto;
    padding: 24px;
}
header h1 {
    margin-bottom: 4px;
}
.meta {
    color: #6b7280;
    font-size: 14px;
}
.monospace {
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
}
.preamble {
    color: #374151;
    max-width: 720px;
}
#graph {
    background: #ffffff;
    border: 1px solid #e5e7eb;
    border-radius: 6px;
    overflow: auto;
}
footer {
    margin-top: 16px;
    color: #9ca3af;
    font-size: 13px;
}
"#
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(&pad);
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SceneNode;

    fn sample_scene() -> SvgScene {
        let mut scene = SvgScene::new(960.0, 960.0);
        scene.push(SceneNode {
            id: "P1".to_string(),
            x: 480.0,
            y: 480.0,
            r: 100.0,
            fill: Some("#b2182b"),
            stroke: None,
            opacity: 0.6,
            title: "P1 - ratio: 2.0000 pval: 0.0100".to_string(),
        });
        scene
    }

    #[test]
    fn report_embeds_the_scene_and_facts() {
        let info = ReportInfo {
            source: "datagraph.json".to_string(),
            node_count: 3,
            leaf_count: 1,
        };
        let html = render_html_report(&sample_scene(), &info);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("datagraph.json"));
        assert!(html.contains("Nodes: <strong>3</strong>"));
        assert!(html.contains("Drawn: <strong>1</strong>"));
        assert!(html.contains(r#"id="P1""#));
        // container height tracks the diameter
        assert!(html.contains(r#"<div id="graph" style="height: 960px">"#));
        // self-contained: no external stylesheet or script references
        assert!(!html.contains("<link"));
        assert!(!html.contains("src="));
    }

    #[test]
    fn report_escapes_the_source_name() {
        let info = ReportInfo {
            source: "a<b>.json".to_string(),
            node_count: 1,
            leaf_count: 1,
        };
        let html = render_html_report(&sample_scene(), &info);
        assert!(html.contains("a&lt;b&gt;.json"));
    }
}
