//! Configuration file support for Datagraph
//!
//! Loads render settings from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.datagraphrc.json` in the working directory
//! 3. `datagraph.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DIAMETER: f64 = 960.0;
pub const DEFAULT_PADDING: f64 = 1.5;
pub const DEFAULT_KIND: &str = "bubble";

const CONFIG_FILENAMES: &[&str] = &[".datagraphrc.json", "datagraph.config.json"];

/// Datagraph configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatagraphConfig {
    /// Canvas side length in pixels (default: 960)
    #[serde(default)]
    pub diameter: Option<f64>,

    /// Inter-circle padding in canvas units (default: 1.5)
    #[serde(default)]
    pub padding: Option<f64>,

    /// Visualization kind (default: "bubble")
    #[serde(default)]
    pub kind: Option<String>,
}

impl DatagraphConfig {
    /// Load configuration from an explicit file path
    pub fn load(path: &Path) -> Result<DatagraphConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: DatagraphConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Discover a config file in `dir`, trying the well-known names in order
    pub fn discover(dir: &Path) -> Result<Option<DatagraphConfig>> {
        for name in CONFIG_FILENAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
        }
        Ok(None)
    }
}

/// Fully resolved render settings after merging defaults, config file,
/// and CLI overrides
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub diameter: f64,
    pub padding: f64,
    pub kind: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            diameter: DEFAULT_DIAMETER,
            padding: DEFAULT_PADDING,
            kind: DEFAULT_KIND.to_string(),
        }
    }
}

/// Merge a config file (if any) with CLI overrides; CLI wins
pub fn resolve(
    file: Option<DatagraphConfig>,
    diameter: Option<f64>,
    padding: Option<f64>,
    kind: Option<String>,
) -> Result<ResolvedConfig> {
    let file = file.unwrap_or_default();
    let resolved = ResolvedConfig {
        diameter: diameter.or(file.diameter).unwrap_or(DEFAULT_DIAMETER),
        padding: padding.or(file.padding).unwrap_or(DEFAULT_PADDING),
        kind: kind.or(file.kind).unwrap_or_else(|| DEFAULT_KIND.to_string()),
    };
    if !resolved.diameter.is_finite() || resolved.diameter <= 0.0 {
        bail!("diameter must be positive, got {}", resolved.diameter);
    }
    if !resolved.padding.is_finite() || resolved.padding < 0.0 {
        bail!("padding must be non-negative, got {}", resolved.padding);
    }
    Ok(resolved)
}
