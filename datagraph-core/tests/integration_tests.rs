//! Integration tests for the render pipeline

use datagraph_core::scale::PALETTE;
use datagraph_core::{
    render_file, render_graph, render_html_report, Dataset, GraphError, ReportInfo,
    ResolvedConfig,
};
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn renders_every_leaf_from_the_fixture() {
    let config = ResolvedConfig::default();
    let scene = render_file("bubble", &fixture_path("datagraph.json"), &config).unwrap();

    assert_eq!(scene.nodes().len(), 7);
    assert_eq!(scene.width(), 960.0);
    assert_eq!(scene.height(), 960.0);

    for node in scene.nodes() {
        assert!(node.r > 0.0);
        assert!(node.x - node.r >= -1e-6 && node.x + node.r <= 960.0 + 1e-6);
        assert!(node.y - node.r >= -1e-6 && node.y + node.r <= 960.0 + 1e-6);
    }
}

#[test]
fn fixture_styling_follows_the_ratio() {
    let config = ResolvedConfig::default();
    let scene = render_file("bubble", &fixture_path("datagraph.json"), &config).unwrap();

    // P02768 has a null ratio: unfilled, outlined, opaque
    let albumin = scene.nodes().iter().find(|n| n.id == "P02768").unwrap();
    assert_eq!(albumin.fill, None);
    assert_eq!(albumin.stroke, Some("#151515"));
    assert_eq!(albumin.opacity, 1.0);

    // everything else gets a palette fill and no stroke
    for node in scene.nodes().iter().filter(|n| n.id != "P02768") {
        let fill = node.fill.expect("measured ratios are filled");
        assert!(PALETTE.contains(&fill));
        assert_eq!(node.stroke, None);
    }

    // most significant point packs largest
    let insulin = scene.nodes().iter().find(|n| n.id == "P01308").unwrap();
    for node in scene.nodes().iter().filter(|n| n.id != "P01308") {
        assert!(insulin.r > node.r, "{} out-sized insulin", node.id);
    }
}

#[test]
fn svg_document_round_trips_the_scene() {
    let config = ResolvedConfig::default();
    let scene = render_file("bubble", &fixture_path("datagraph.json"), &config).unwrap();
    let svg = scene.to_svg();

    assert!(svg.contains(r#"width="960" height="960" class="bubble""#));
    assert_eq!(svg.matches("<circle ").count(), 7);
    assert_eq!(svg.matches("<title>").count(), 7);
    assert!(svg.contains("P04406 - ratio: 1.7342 pval: 0.0021"));
    assert!(svg.contains("P02768 - ratio: none pval: 1.0000"));
}

#[test]
fn html_report_embeds_the_chart() {
    let config = ResolvedConfig::default();
    let dataset = Dataset::from_path(&fixture_path("datagraph.json")).unwrap();
    let scene = render_graph("bubble", &dataset, &config).unwrap();
    let html = render_html_report(
        &scene,
        &ReportInfo {
            source: "datagraph.json".to_string(),
            node_count: dataset.node_count(),
            leaf_count: dataset.leaf_count(),
        },
    );

    assert!(html.contains("Nodes: <strong>7</strong>"));
    assert!(html.contains("Drawn: <strong>7</strong>"));
    assert!(html.contains(r#"<div id="graph" style="height: 960px">"#));
    assert!(html.contains(r#"class="bubble""#));
}

#[test]
fn hex_reports_not_implemented_without_drawing() {
    let config = ResolvedConfig::default();
    let err = render_file("hex", &fixture_path("datagraph.json"), &config).unwrap_err();
    assert!(matches!(err, GraphError::NotImplemented(_)));
    assert_eq!(err.to_string(), "visualization not implemented: hex");
}

#[test]
fn unknown_kind_reports_the_option_by_name() {
    let config = ResolvedConfig::default();
    let err = render_file("scatter", &fixture_path("datagraph.json"), &config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unrecognized visualization option: scatter"
    );
}

#[test]
fn missing_dataset_surfaces_a_read_error() {
    let config = ResolvedConfig::default();
    let err = render_file("bubble", &fixture_path("no-such.json"), &config).unwrap_err();
    assert!(matches!(err, GraphError::Read { .. }));
}

#[test]
fn malformed_dataset_surfaces_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"children\": [{{\"acc\": ").unwrap();
    let config = ResolvedConfig::default();
    let err = render_file("bubble", file.path(), &config).unwrap_err();
    assert!(matches!(err, GraphError::Parse { .. }));
}

#[test]
fn invalid_leaf_aborts_the_render_with_its_accession() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"children":[{{"acc":"GOOD","ratio":1,"pval":0.5}},{{"acc":"BAD","ratio":1,"pval":2.0}}]}}"#
    )
    .unwrap();
    let config = ResolvedConfig::default();
    let err = render_file("bubble", file.path(), &config).unwrap_err();
    match err {
        GraphError::InvalidNode { acc, .. } => assert_eq!(acc, "BAD"),
        other => panic!("expected InvalidNode, got {other:?}"),
    }
}
