use clap::Subcommand;
use glassbook::optics::{
    calculate_aperture_at_focal_length, calculate_magnification,
    calculate_magnification_across_focal_lengths, calculate_min_focus_for_magnification,
    format_magnification_ratio, is_macro_capable, round_to_standard_f_stop,
};
use glassbook::{DomainError, OutputFormat};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::print_json;

#[derive(Subcommand)]
pub enum CalcCommands {
    /// Magnification from focal length (mm) and minimum focus distance (m)
    Magnification {
        focal_length: f64,
        min_focus: f64,
    },

    /// Minimum focus distance (m) needed for a target magnification
    MinFocus {
        focal_length: f64,
        magnification: f64,
    },

    /// Project a known magnification onto another focal length
    Project {
        /// Focal length (mm) to compute the magnification for
        target_focal_length: f64,
        /// Minimum focus distance (m) at the target focal length
        target_min_focus: f64,
        /// Focal length (mm) with a known magnification
        reference_focal_length: f64,
        /// Minimum focus distance (m) at the reference focal length
        reference_min_focus: f64,
        /// Known magnification at the reference focal length
        reference_magnification: f64,
    },

    /// Interpolate the maximum aperture between two known points of a zoom
    Aperture {
        focal_length: f64,
        min_focal_length: f64,
        max_focal_length: f64,
        aperture_at_min: f64,
        aperture_at_max: f64,
        /// Round the result to the nearest standard f-stop
        #[clap(long)]
        standard: bool,
    },

    /// Round an f-number to the nearest standard f-stop
    FStop { value: f64 },
}

#[derive(Debug, Serialize, Tabled)]
struct CalcResult {
    quantity: &'static str,
    value: f64,
    note: String,
}

fn magnification_result(magnification: f64) -> CalcResult {
    let mut note = format_magnification_ratio(magnification);
    if is_macro_capable(magnification) {
        note.push_str(" (macro)");
    }
    CalcResult {
        quantity: "magnification",
        value: magnification,
        note,
    }
}

fn compute(command: CalcCommands) -> Result<CalcResult, DomainError> {
    let result = match command {
        CalcCommands::Magnification {
            focal_length,
            min_focus,
        } => magnification_result(calculate_magnification(focal_length, min_focus)?),
        CalcCommands::MinFocus {
            focal_length,
            magnification,
        } => CalcResult {
            quantity: "min_focus",
            value: calculate_min_focus_for_magnification(focal_length, magnification)?,
            note: "meters".to_string(),
        },
        CalcCommands::Project {
            target_focal_length,
            target_min_focus,
            reference_focal_length,
            reference_min_focus,
            reference_magnification,
        } => magnification_result(calculate_magnification_across_focal_lengths(
            target_focal_length,
            target_min_focus,
            reference_focal_length,
            reference_min_focus,
            reference_magnification,
        )?),
        CalcCommands::Aperture {
            focal_length,
            min_focal_length,
            max_focal_length,
            aperture_at_min,
            aperture_at_max,
            standard,
        } => {
            let computed = calculate_aperture_at_focal_length(
                focal_length,
                min_focal_length,
                max_focal_length,
                aperture_at_min,
                aperture_at_max,
            )?;
            if standard {
                CalcResult {
                    quantity: "aperture",
                    value: round_to_standard_f_stop(computed),
                    note: format!("standard stop for f/{}", computed),
                }
            } else {
                CalcResult {
                    quantity: "aperture",
                    value: computed,
                    note: "interpolated".to_string(),
                }
            }
        }
        CalcCommands::FStop { value } => CalcResult {
            quantity: "aperture",
            value: round_to_standard_f_stop(value),
            note: format!("standard stop for f/{}", value),
        },
    };
    Ok(result)
}

pub fn run(command: CalcCommands, output_format: OutputFormat) {
    let result = match compute(command) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    match output_format {
        OutputFormat::Table => println!("{}", Table::new([&result]).with(Style::rounded())),
        OutputFormat::Markdown => println!("{}", Table::new([&result]).with(Style::markdown())),
        OutputFormat::Json | OutputFormat::JsonPretty | OutputFormat::JsonLine => {
            print_json(&result, &[&result], output_format);
        }
        OutputFormat::Psv => {
            println!("quantity|value|note");
            println!("{}|{}|{}", result.quantity, result.value, result.note);
        }
        OutputFormat::Csv => {
            println!("quantity,value,note");
            println!("{},{},{}", result.quantity, result.value, result.note);
        }
    }
}
