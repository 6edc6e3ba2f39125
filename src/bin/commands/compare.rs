use clap::Args;
use glassbook::query::{compare, Comparison, ComparisonRow};
use glassbook::{Catalog, OutputFormat, QueryEngine};
use tabled::settings::Style;
use tabled::Table;

use super::print_json;

/// Arguments for the Compare command
#[derive(Args)]
pub struct CompareArgs {
    /// Lens ids to compare
    #[clap(required = true)]
    pub ids: Vec<u32>,

    /// Show full model names in tables
    #[clap(long)]
    pub full_name: bool,
}

pub fn run(catalog: &Catalog, args: CompareArgs, output_format: OutputFormat) {
    let CompareArgs { ids, full_name } = args;

    let engine = QueryEngine::new(catalog);
    let lenses = engine.by_ids(&ids);
    for id in ids.iter().filter(|id| engine.get(**id).is_none()) {
        eprintln!("WARNING: no lens with id {}", id);
    }
    if lenses.is_empty() {
        eprintln!("ERROR: nothing to compare");
        return;
    }

    let comparison = compare(lenses.iter().copied());
    format_output(&comparison, output_format, !full_name);
}

fn best_lines(comparison: &Comparison) -> Vec<String> {
    let name = |id: Option<u32>| {
        id.and_then(|id| comparison.entries.iter().find(|e| e.id == id))
            .map(|e| e.model.clone())
            .unwrap_or_else(|| "-".to_string())
    };
    vec![
        format!(
            "Highest magnification: {}",
            name(comparison.highest_magnification)
        ),
        format!("Longest reach:         {}", name(comparison.longest_reach)),
        format!("Lightest:              {}", name(comparison.lightest)),
    ]
}

fn format_output(comparison: &Comparison, output_format: OutputFormat, truncate: bool) {
    let rows: Vec<ComparisonRow> = comparison
        .entries
        .iter()
        .map(|e| ComparisonRow::from_entry(e, truncate))
        .collect();
    match output_format {
        OutputFormat::Table => {
            println!("{}", Table::new(&rows).with(Style::rounded()));
            println!("{}", best_lines(comparison).join("\n"));
        }
        OutputFormat::Markdown => {
            println!("{}\n", Table::new(&rows).with(Style::markdown()));
            for line in best_lines(comparison) {
                println!("- {}", line);
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty | OutputFormat::JsonLine => {
            print_json(comparison, &comparison.entries, output_format);
        }
        OutputFormat::Psv | OutputFormat::Csv => {
            let sep = if output_format == OutputFormat::Psv { "|" } else { "," };
            println!(
                "{}",
                [
                    "id",
                    "model",
                    "focal_range",
                    "widest_aperture",
                    "max_magnification",
                    "ratio",
                    "macro",
                    "weight"
                ]
                .join(sep)
            );
            for r in &rows {
                let model = if sep == "," {
                    glassbook::export::escape_csv_value(&r.model)
                } else {
                    r.model.clone()
                };
                println!(
                    "{}",
                    [
                        r.id.to_string(),
                        model,
                        r.focal_range.clone(),
                        r.widest_aperture.clone(),
                        r.max_magnification.clone(),
                        r.ratio.clone(),
                        r.macro_capable.clone(),
                        r.weight.clone(),
                    ]
                    .join(sep)
                );
            }
        }
    }
}
