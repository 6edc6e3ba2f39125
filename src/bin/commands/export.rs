use clap::Args;
use glassbook::export::{export_to_file, ExportFormat};
use glassbook::{Catalog, FilterCriteria, QueryEngine};
use std::path::PathBuf;

/// Arguments for the Export command
#[derive(Args)]
pub struct ExportArgs {
    #[clap(flatten)]
    pub criteria: FilterCriteria,

    /// Export file format
    #[clap(short = 'e', long, value_enum, default_value_t)]
    pub export_format: ExportFormat,

    /// Output file path, by default lens-data.csv or lens-data.json
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[clap(long)]
    pub stdout: bool,
}

pub fn run(catalog: &Catalog, args: ExportArgs) {
    let ExportArgs {
        criteria,
        export_format,
        output,
        stdout,
    } = args;

    if let Err(e) = criteria.validate() {
        eprintln!("ERROR: {}", e);
        return;
    }

    let engine = QueryEngine::new(catalog);
    let lenses = engine.filter(&criteria);

    if stdout {
        match export_format.render(lenses.iter().copied()) {
            Ok(content) => println!("{}", content),
            Err(e) => eprintln!("ERROR: {}", e),
        }
        return;
    }

    let path = output.unwrap_or_else(|| PathBuf::from(export_format.default_file_name()));
    match export_to_file(lenses.iter().copied(), export_format, &path) {
        Ok(count) => eprintln!("Exported {} lenses to {}", count, path.display()),
        Err(e) => eprintln!("ERROR: {:#}", e),
    }
}
