use glassbook::{Catalog, OutputFormat, UnresolvedEntry};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::print_json;

#[derive(Tabled, Serialize)]
struct QualityRow {
    lens_id: u32,
    model: String,
    focal_length: f64,
    field: String,
}

impl From<&UnresolvedEntry> for QualityRow {
    fn from(entry: &UnresolvedEntry) -> Self {
        Self {
            lens_id: entry.lens_id,
            model: entry.model.clone(),
            focal_length: entry.focal_length,
            field: entry.field.to_string(),
        }
    }
}

pub fn run(catalog: &Catalog, output_format: OutputFormat) {
    let quality = catalog.quality();

    if output_format.is_json() {
        print_json(quality, quality.unresolved(), output_format);
        return;
    }

    if quality.is_clean() {
        println!("All {} lenses are fully resolved", catalog.len());
        return;
    }

    let rows: Vec<QualityRow> = quality.unresolved().iter().map(QualityRow::from).collect();
    match output_format {
        OutputFormat::Markdown => println!("{}", Table::new(&rows).with(Style::markdown())),
        OutputFormat::Psv | OutputFormat::Csv => {
            let sep = if output_format == OutputFormat::Psv { "|" } else { "," };
            println!("lens_id{0}model{0}focal_length{0}field", sep);
            for r in &rows {
                println!("{1}{0}{2}{0}{3}{0}{4}", sep, r.lens_id, r.model, r.focal_length, r.field);
            }
        }
        _ => println!("{}", Table::new(&rows).with(Style::rounded())),
    }
    eprintln!(
        "{} value(s) unresolved across {} lens(es)",
        rows.len(),
        quality.affected_lens_ids().len()
    );
}
