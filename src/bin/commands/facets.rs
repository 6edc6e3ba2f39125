use glassbook::{Catalog, OutputFormat, QueryEngine};
use itertools::Itertools;
use serde::Serialize;

use super::print_json;

#[derive(Debug, Serialize)]
struct Facets {
    manufacturers: Vec<String>,
    mounts: Vec<String>,
}

pub fn run(catalog: &Catalog, output_format: OutputFormat) {
    let engine = QueryEngine::new(catalog);
    let facets = Facets {
        manufacturers: engine.distinct_manufacturers(),
        mounts: engine.distinct_mounts(),
    };

    match output_format {
        OutputFormat::Json | OutputFormat::JsonPretty | OutputFormat::JsonLine => {
            print_json(&facets, &[&facets], output_format);
        }
        OutputFormat::Psv | OutputFormat::Csv => {
            let sep = if output_format == OutputFormat::Psv { "|" } else { "," };
            println!("kind{}value", sep);
            for m in &facets.manufacturers {
                println!("manufacturer{}{}", sep, m);
            }
            for m in &facets.mounts {
                println!("mount{}{}", sep, m);
            }
        }
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("Manufacturers: {}", facets.manufacturers.iter().join(", "));
            println!("Mounts:        {}", facets.mounts.iter().join(", "));
        }
    }
}
