pub mod calc;
pub mod compare;
pub mod config;
pub mod export;
pub mod facets;
pub mod list;
pub mod quality;
pub mod show;
pub mod teleconverter;

use anyhow::{anyhow, Result};
use glassbook::datasets::load_source_files;
use glassbook::{Catalog, GlassbookConfig, OutputFormat};
use serde::Serialize;

/// Load every configured dataset file and build the catalog
pub(crate) fn load_catalog(config: &GlassbookConfig) -> Result<Catalog> {
    let paths = config.source_paths()?;
    if paths.is_empty() {
        return Err(anyhow!(
            "no lens datasets found; add *.json files to {} or set `sources` in {}",
            config.sources_dir(),
            GlassbookConfig::config_file_path()
        ));
    }
    let sources = load_source_files(&paths)?;
    Ok(Catalog::build(sources)?)
}

/// Print `value` for the JSON output formats
///
/// `items` is used for JSON Lines so each element lands on its own line.
pub(crate) fn print_json<T: Serialize, I: Serialize>(
    value: &T,
    items: &[I],
    output_format: OutputFormat,
) {
    match output_format {
        OutputFormat::JsonPretty => match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        },
        OutputFormat::JsonLine => {
            for item in items {
                match serde_json::to_string(item) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
                }
            }
        }
        _ => match serde_json::to_string(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        },
    }
}
