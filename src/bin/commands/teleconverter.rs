use clap::Args;
use glassbook::optics::{calculate_teleconverter_data, teleconverter_view};
use glassbook::query::SpecRow;
use glassbook::{Catalog, DomainError, LensSpecification, OutputFormat, QueryEngine};
use tabled::settings::Style;
use tabled::Table;

use super::print_json;

/// Arguments for the Teleconverter command
#[derive(Args)]
pub struct TeleconverterArgs {
    /// Lens id
    pub id: u32,

    /// Project through this multiplier instead of the lens's supported teleconverters
    #[clap(short = 'x', long)]
    pub factor: Option<f64>,
}

pub fn run(catalog: &Catalog, args: TeleconverterArgs, output_format: OutputFormat) {
    let TeleconverterArgs { id, factor } = args;

    let engine = QueryEngine::new(catalog);
    let lens = match engine.get(id) {
        Some(l) => l,
        None => {
            eprintln!("ERROR: no lens with id {}", id);
            return;
        }
    };

    let rows: Result<Vec<LensSpecification>, DomainError> = match factor {
        Some(tc) => lens
            .data
            .iter()
            .map(|spec| calculate_teleconverter_data(spec, tc))
            .collect(),
        None => {
            if !lens.supports_teleconverters() {
                eprintln!(
                    "{} does not list any compatible teleconverters; use --factor to project anyway",
                    lens.model
                );
            }
            teleconverter_view(lens)
        }
    };

    let rows = match rows {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    format_output(&rows, output_format);
}

fn format_output(specs: &[LensSpecification], output_format: OutputFormat) {
    let rows: Vec<SpecRow> = specs.iter().map(SpecRow::from).collect();
    match output_format {
        OutputFormat::Table => println!("{}", Table::new(&rows).with(Style::rounded())),
        OutputFormat::Markdown => println!("{}", Table::new(&rows).with(Style::markdown())),
        OutputFormat::Json | OutputFormat::JsonPretty | OutputFormat::JsonLine => {
            print_json(&specs, specs, output_format);
        }
        OutputFormat::Psv | OutputFormat::Csv => {
            let sep = if output_format == OutputFormat::Psv { "|" } else { "," };
            println!(
                "focal_length{0}aperture{0}min_focus{0}magnification{0}teleconverter",
                sep
            );
            for r in &rows {
                println!(
                    "{1}{0}{2}{0}{3}{0}{4}{0}{5}",
                    sep, r.focal_length, r.aperture, r.min_focus, r.magnification, r.teleconverter
                );
            }
        }
    }
}
