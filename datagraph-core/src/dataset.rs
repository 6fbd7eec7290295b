//! Dataset model and loading
//!
//! The dataset is a rooted hierarchy read once from a JSON document and
//! immutable for the lifetime of a render. Leaves carry the measurements
//! (`ratio`, `pval`); internal nodes only group their children.

use crate::error::{GraphError, Result};
use serde::Deserialize;
use std::path::Path;

/// One record in the hierarchy.
///
/// The on-disk document may carry extra per-node attributes (`name`, `sym`,
/// `uid`, `alt_ids`, ...); those are tolerated and ignored. The `value`
/// attribute is parsed but superseded by the packing weight computed from
/// `pval` (see [`crate::pack`]).
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub acc: String,
    #[serde(default)]
    pub ratio: Option<f64>,
    #[serde(default)]
    pub pval: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// True for nodes with no children; only these are drawn
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Accession for error reporting, with a placeholder for unnamed nodes
    pub fn display_acc(&self) -> &str {
        if self.acc.is_empty() {
            "<unnamed>"
        } else {
            &self.acc
        }
    }
}

/// The root of the hierarchy plus its full descendant tree
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Dataset {
    /// Load and validate a dataset from a JSON file
    pub fn from_path(path: &Path) -> Result<Dataset> {
        let resource = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| GraphError::Read {
            resource: resource.clone(),
            source,
        })?;
        Self::parse(&text, &resource)
    }

    /// Parse and validate a dataset from in-memory JSON text
    pub fn from_json(text: &str) -> Result<Dataset> {
        Self::parse(text, "<inline>")
    }

    fn parse(text: &str, resource: &str) -> Result<Dataset> {
        let dataset: Dataset =
            serde_json::from_str(text).map_err(|source| GraphError::Parse {
                resource: resource.to_string(),
                source,
            })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check the structural invariants the layout relies on.
    ///
    /// Rejects a childless root, leaves without a usable `pval`
    /// (finite, in (0, 1]), and negative or non-finite ratios. A missing
    /// or null `ratio` is legal and renders as the unfilled sentinel.
    pub fn validate(&self) -> Result<()> {
        if self.children.is_empty() {
            return Err(GraphError::EmptyDataset);
        }
        for child in &self.children {
            validate_node(child)?;
        }
        Ok(())
    }

    /// Total number of nodes in the tree, excluding the root itself
    pub fn node_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.children.iter().map(count).sum()
    }

    /// Number of leaves, the set of drawn circles
    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            if node.is_leaf() {
                1
            } else {
                node.children.iter().map(count).sum()
            }
        }
        self.children.iter().map(count).sum()
    }
}

fn validate_node(node: &Node) -> Result<()> {
    let invalid = |reason: String| GraphError::InvalidNode {
        acc: node.display_acc().to_string(),
        reason,
    };

    if let Some(ratio) = node.ratio {
        if !ratio.is_finite() {
            return Err(invalid(format!("ratio is not finite: {}", ratio)));
        }
        if ratio < 0.0 {
            return Err(invalid(format!("ratio is negative: {}", ratio)));
        }
    }

    if node.is_leaf() {
        let pval = node
            .pval
            .ok_or_else(|| invalid("leaf is missing pval".to_string()))?;
        if !pval.is_finite() || pval <= 0.0 || pval > 1.0 {
            return Err(invalid(format!("pval outside (0, 1]: {}", pval)));
        }
    } else {
        for child in &node.children {
            validate_node(child)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leaves_with_extra_fields() {
        let dataset = Dataset::from_json(
            r#"{"children":[
                {"acc":"P1","uid":"X_HUMAN","sym":"X","ratio":0.5,"pval":0.01},
                {"acc":"P2","ratio":null,"pval":1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(dataset.node_count(), 2);
        assert_eq!(dataset.leaf_count(), 2);
        assert_eq!(dataset.children[0].ratio, Some(0.5));
        assert_eq!(dataset.children[1].ratio, None);
    }

    #[test]
    fn counts_skip_internal_nodes() {
        let dataset = Dataset::from_json(
            r#"{"children":[
                {"acc":"grp","children":[
                    {"acc":"P1","ratio":0.5,"pval":0.01},
                    {"acc":"P2","ratio":2.0,"pval":0.02}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(dataset.node_count(), 3);
        assert_eq!(dataset.leaf_count(), 2);
    }

    #[test]
    fn rejects_childless_root() {
        let err = Dataset::from_json(r#"{"children":[]}"#).unwrap_err();
        assert!(matches!(err, GraphError::EmptyDataset));
    }

    #[test]
    fn rejects_leaf_without_pval() {
        let err = Dataset::from_json(r#"{"children":[{"acc":"P1","ratio":0.5}]}"#).unwrap_err();
        match err {
            GraphError::InvalidNode { acc, .. } => assert_eq!(acc, "P1"),
            other => panic!("expected InvalidNode, got {other:?}"),
        }
    }

    #[test]
    fn rejects_pval_of_zero() {
        let err =
            Dataset::from_json(r#"{"children":[{"acc":"P1","ratio":0.5,"pval":0.0}]}"#)
                .unwrap_err();
        assert!(matches!(err, GraphError::InvalidNode { .. }));
    }

    #[test]
    fn rejects_negative_ratio() {
        let err =
            Dataset::from_json(r#"{"children":[{"acc":"P1","ratio":-1.0,"pval":0.5}]}"#)
                .unwrap_err();
        assert!(matches!(err, GraphError::InvalidNode { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Dataset::from_json("{\"children\": [").unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Dataset::from_path(Path::new("/no/such/datagraph.json")).unwrap_err();
        match err {
            GraphError::Read { resource, .. } => {
                assert!(resource.contains("datagraph.json"));
            }
            other => panic!("expected Read, got {other:?}"),
        }
    }
}
