//! Catalog exporters
//!
//! Render a lens selection as a CSV sheet (one row per specification entry) or
//! as a timestamped JSON document, and write either to disk.

mod csv;
mod json;

pub use self::csv::{escape_csv_value, to_csv, CSV_HEADERS};
pub use self::json::{to_json, to_json_at, ExportDocument};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::catalog::Lens;

/// File format for exports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Conventional file name for this format
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Csv => "lens-data.csv",
            Self::Json => "lens-data.json",
        }
    }

    /// Render `lenses` in this format
    pub fn render<'a, I>(&self, lenses: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a Lens>,
    {
        match self {
            Self::Csv => Ok(to_csv(lenses)),
            Self::Json => to_json(lenses),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Unknown export format '{}'. Valid formats: csv, json",
                s
            )),
        }
    }
}

/// Render `lenses` and write them to `path`, returning the number of lenses
pub fn export_to_file<'a, I>(lenses: I, format: ExportFormat, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a Lens>,
{
    let lenses: Vec<&Lens> = lenses.into_iter().collect();
    let content = format.render(lenses.iter().copied())?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    info!(
        "exported {} lenses as {} to {}",
        lenses.len(),
        format,
        path.display()
    );
    Ok(lenses.len())
}
