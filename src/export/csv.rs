//! CSV exporter

use crate::catalog::{Lens, SpecValue};
use crate::utils::format_teleconverters;

pub const CSV_HEADERS: [&str; 8] = [
    "Manufacturer",
    "Mount",
    "Model",
    "Focal Length (mm)",
    "Max Aperture",
    "Min Focus Distance (m)",
    "Max Magnification",
    "Teleconverters",
];

/// Quote a field if it contains a comma, quote, or newline
pub fn escape_csv_value(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn spec_field(value: SpecValue) -> String {
    value.known().map(|v| v.to_string()).unwrap_or_default()
}

/// Render one row per (lens, specification entry) under [`CSV_HEADERS`]
///
/// Rows are joined by `\n` with no trailing newline. Lenses without data
/// contribute no rows.
pub fn to_csv<'a, I>(lenses: I) -> String
where
    I: IntoIterator<Item = &'a Lens>,
{
    let mut rows = vec![CSV_HEADERS.join(",")];

    for lens in lenses {
        let teleconverters = escape_csv_value(&format_teleconverters(&lens.teleconverters));
        for spec in &lens.data {
            let row = [
                escape_csv_value(&lens.manufacturer),
                escape_csv_value(&lens.mount),
                escape_csv_value(&lens.model),
                spec.focal_length.to_string(),
                spec_field(spec.aperture),
                spec.min_focus.to_string(),
                spec_field(spec.magnification),
                teleconverters.clone(),
            ];
            rows.push(row.join(","));
        }
    }

    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LensSpecification;

    fn lens(model: &str, teleconverters: Vec<f64>, data: Vec<LensSpecification>) -> Lens {
        Lens {
            id: 1,
            manufacturer: "Sony".to_string(),
            mount: "E".to_string(),
            model: model.to_string(),
            short_name: None,
            weight: None,
            length: None,
            filter: None,
            crop_factor: None,
            teleconverters,
            data,
        }
    }

    #[test]
    fn test_escape_csv_value() {
        assert_eq!(escape_csv_value("plain"), "plain");
        assert_eq!(escape_csv_value("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_value("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_value("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_to_csv_rows() {
        let zoom = lens(
            "FE 70-200mm F2.8 GM OSS II",
            vec![1.4, 2.0],
            vec![
                LensSpecification::new(70.0, 2.8, 0.4, 0.1),
                LensSpecification::new(200.0, 2.8, 0.4, 0.3),
            ],
        );
        let csv = to_csv([&zoom]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Manufacturer,Mount,Model,Focal Length (mm),Max Aperture,Min Focus Distance (m),Max Magnification,Teleconverters"
        );
        assert_eq!(lines[1], "Sony,E,FE 70-200mm F2.8 GM OSS II,70,2.8,0.4,0.1,1.4x;2x");
        assert_eq!(lines[2], "Sony,E,FE 70-200mm F2.8 GM OSS II,200,2.8,0.4,0.3,1.4x;2x");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_to_csv_quotes_and_unresolved() {
        let odd = lens(
            "Macro, \"Special\"",
            vec![],
            vec![LensSpecification::new(90.0, SpecValue::Derive, 0.28, SpecValue::Derive)],
        );
        let csv = to_csv([&odd]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "Sony,E,\"Macro, \"\"Special\"\"\",90,,0.28,,None");
    }

    #[test]
    fn test_to_csv_empty() {
        let empty = lens("Empty", vec![], vec![]);
        assert_eq!(to_csv([&empty]), CSV_HEADERS.join(","));
        assert_eq!(to_csv(std::iter::empty()), CSV_HEADERS.join(","));
    }
}
