//! Raw lens source datasets
//!
//! A source dataset groups the lenses of one manufacturer and mount. The
//! per-lens records do not repeat the manufacturer and mount; the catalog
//! normalizer tags every lens with the values of its dataset.
//!
//! Datasets are read from local JSON files. A file may hold a single dataset
//! object or an array of datasets.
//!
//! ```json
//! {
//!   "manufacturer": "Nikon",
//!   "mount": "Z",
//!   "lenses": [
//!     {
//!       "id": 1,
//!       "model": "NIKKOR Z 70-200mm f/2.8 VR S",
//!       "teleconverters": [1.4, 2],
//!       "data": [
//!         { "focalLength": 70, "aperture": 2.8, "minFocus": 0.5, "magnification": -1 },
//!         { "focalLength": 200, "aperture": 2.8, "minFocus": 1.0, "magnification": 0.2 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::catalog::LensSpecification;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One lens as it appears inside a source dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensRecord {
    pub id: u32,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_factor: Option<f64>,
    #[serde(default)]
    pub teleconverters: Vec<f64>,
    pub data: Vec<LensSpecification>,
}

impl LensRecord {
    pub fn new(id: u32, model: impl Into<String>, data: Vec<LensSpecification>) -> Self {
        Self {
            id,
            model: model.into(),
            short_name: None,
            weight: None,
            length: None,
            filter: None,
            crop_factor: None,
            teleconverters: Vec::new(),
            data,
        }
    }

    pub fn with_teleconverters(mut self, teleconverters: Vec<f64>) -> Self {
        self.teleconverters = teleconverters;
        self
    }

    pub fn with_crop_factor(mut self, crop_factor: f64) -> Self {
        self.crop_factor = Some(crop_factor);
        self
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Lenses of one manufacturer and mount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDataset {
    pub manufacturer: String,
    pub mount: String,
    pub lenses: Vec<LensRecord>,
}

impl SourceDataset {
    pub fn new(
        manufacturer: impl Into<String>,
        mount: impl Into<String>,
        lenses: Vec<LensRecord>,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            mount: mount.into(),
            lenses,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceFile {
    Many(Vec<SourceDataset>),
    One(SourceDataset),
}

/// Parse datasets from a JSON string holding one dataset or an array of them
pub fn parse_sources(content: &str) -> Result<Vec<SourceDataset>> {
    let file: SourceFile = serde_json::from_str(content)
        .map_err(|e| anyhow!("Failed to parse lens source dataset: {}", e))?;
    Ok(match file {
        SourceFile::Many(datasets) => datasets,
        SourceFile::One(dataset) => vec![dataset],
    })
}

/// Load all datasets from a JSON file
pub fn load_source_file(path: &Path) -> Result<Vec<SourceDataset>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading lens source {}", path.display()))?;
    let datasets =
        parse_sources(&content).with_context(|| format!("loading {}", path.display()))?;
    debug!(
        "loaded {} dataset(s) from {}",
        datasets.len(),
        path.display()
    );
    Ok(datasets)
}

/// Load datasets from every file in `paths`, preserving the given order
pub fn load_source_files(paths: &[PathBuf]) -> Result<Vec<SourceDataset>> {
    let mut datasets = Vec::new();
    for path in paths {
        datasets.extend(load_source_file(path)?);
    }
    info!(
        "loaded {} lens source dataset(s) from {} file(s)",
        datasets.len(),
        paths.len()
    );
    Ok(datasets)
}

/// List `*.json` files in `dir`, sorted by file name
///
/// A missing directory yields an empty list.
pub fn discover_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("listing sources in {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
