use clap::Args;
use glassbook::query::{get_max_magnification_with_focal_length, SpecRow};
use glassbook::utils::format_teleconverters;
use glassbook::{Catalog, Lens, OutputFormat, QueryEngine};
use tabled::settings::Style;
use tabled::Table;

use super::print_json;

/// Arguments for the Show command
#[derive(Args)]
pub struct ShowArgs {
    /// Lens id
    pub id: u32,
}

pub fn run(catalog: &Catalog, args: ShowArgs, output_format: OutputFormat) {
    let engine = QueryEngine::new(catalog);
    let lens = match engine.get(args.id) {
        Some(l) => l,
        None => {
            eprintln!("ERROR: no lens with id {}", args.id);
            return;
        }
    };

    format_output(lens, output_format);
}

fn header_lines(lens: &Lens) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", lens.manufacturer, lens.model),
        format!("Mount:          {}", lens.mount),
        format!("Format:         {}", lens.format()),
        format!("Focal Range:    {}", lens.focal_range()),
        format!(
            "Teleconverters: {}",
            format_teleconverters(&lens.teleconverters)
        ),
    ];
    if let Some(weight) = lens.weight {
        lines.push(format!("Weight:         {}g", weight));
    }
    if let Ok(max) = get_max_magnification_with_focal_length(lens) {
        lines.push(format!(
            "Max Magnification: {}x at {}mm",
            max.magnification, max.focal_length
        ));
    }
    lines
}

fn format_output(lens: &Lens, output_format: OutputFormat) {
    let rows: Vec<SpecRow> = lens.data.iter().map(SpecRow::from).collect();
    match output_format {
        OutputFormat::Table => {
            println!("{}", header_lines(lens).join("\n"));
            println!("{}", Table::new(&rows).with(Style::rounded()));
        }
        OutputFormat::Markdown => {
            println!("## {} {}\n", lens.manufacturer, lens.model);
            println!("{}", Table::new(&rows).with(Style::markdown()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty | OutputFormat::JsonLine => {
            print_json(lens, &lens.data, output_format);
        }
        OutputFormat::Psv => {
            println!("focal_length|aperture|min_focus|magnification|ratio");
            for r in &rows {
                println!(
                    "{}|{}|{}|{}|{}",
                    r.focal_length, r.aperture, r.min_focus, r.magnification, r.ratio
                );
            }
        }
        OutputFormat::Csv => println!("{}", glassbook::export::to_csv([lens])),
    }
}
