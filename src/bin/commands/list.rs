use clap::Args;
use glassbook::query::sort_by_max_focal_length;
use glassbook::{Catalog, FilterCriteria, OutputFormat, QueryEngine};

/// Arguments for the List command
#[derive(Args)]
pub struct ListArgs {
    #[clap(flatten)]
    pub criteria: FilterCriteria,

    /// Sort by longest focal length instead of catalog order
    #[clap(long)]
    pub sort_by_focal: bool,

    /// Show full model names in tables
    #[clap(long)]
    pub full_name: bool,
}

pub fn run(catalog: &Catalog, args: ListArgs, output_format: OutputFormat) {
    let ListArgs {
        criteria,
        sort_by_focal,
        full_name,
    } = args;

    if let Err(e) = criteria.validate() {
        eprintln!("ERROR: {}", e);
        return;
    }

    let engine = QueryEngine::new(catalog);
    let mut lenses = engine.filter(&criteria);
    if sort_by_focal {
        sort_by_max_focal_length(&mut lenses);
    }

    if lenses.is_empty() && !output_format.is_json() {
        eprintln!("No lenses match the given filters");
        return;
    }

    println!("{}", engine.format_results(&lenses, output_format, !full_name));
}
