//! Catalog queries
//!
//! [`QueryEngine`] borrows a built [`Catalog`] and answers read-only
//! questions about it: facet values, criteria filters, id lookups, and the
//! derived views in [`views`]. Results are returned in catalog order unless an
//! operation says otherwise.

pub mod args;
pub mod types;
pub mod views;

pub use args::FilterCriteria;
pub use types::{ComparisonRow, LensRow, SpecRow};
pub use views::{
    best_magnification_at_focal_length, compare, get_max_focal_length, get_max_magnification,
    get_max_magnification_with_focal_length, get_widest_aperture, sort_by_max_focal_length,
    BestMagnification, Comparison, ComparisonEntry, MaxMagnification,
};

use itertools::Itertools;

use crate::catalog::{Catalog, Lens};
use crate::utils::OutputFormat;

#[cfg(feature = "display")]
use tabled::settings::Style;
#[cfg(feature = "display")]
use tabled::Table;

/// Read-only query interface over a catalog
pub struct QueryEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Every lens, in catalog order
    pub fn all(&self) -> Vec<&'a Lens> {
        self.catalog.iter().collect()
    }

    /// Sorted distinct manufacturer names
    pub fn distinct_manufacturers(&self) -> Vec<String> {
        self.catalog
            .iter()
            .map(|l| l.manufacturer.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// Sorted distinct mount names
    pub fn distinct_mounts(&self) -> Vec<String> {
        self.catalog
            .iter()
            .map(|l| l.mount.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// Lenses matching every non-empty field of `criteria`
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&'a Lens> {
        self.catalog.iter().filter(|l| criteria.matches(l)).collect()
    }

    /// Lenses whose id is in `ids`, in catalog order
    ///
    /// Unknown ids are ignored.
    pub fn by_ids(&self, ids: &[u32]) -> Vec<&'a Lens> {
        self.catalog
            .iter()
            .filter(|l| ids.contains(&l.id))
            .collect()
    }

    /// Lens with the given id
    pub fn get(&self, id: u32) -> Option<&'a Lens> {
        self.catalog.iter().find(|l| l.id == id)
    }

    /// Format a lens list for output
    pub fn format_results(&self, lenses: &[&Lens], format: OutputFormat, truncate: bool) -> String {
        let rows: Vec<LensRow> = lenses
            .iter()
            .map(|l| LensRow::from_lens(l, truncate))
            .collect();

        match format {
            OutputFormat::Json | OutputFormat::JsonPretty | OutputFormat::JsonLine => {
                self.format_json(lenses, format)
            }
            OutputFormat::Psv => {
                let mut lines = vec!["id|manufacturer|mount|model|format|focal_range|teleconverters"
                    .to_string()];
                for r in &rows {
                    lines.push(format!(
                        "{}|{}|{}|{}|{}|{}|{}",
                        r.id,
                        r.manufacturer,
                        r.mount,
                        r.model,
                        r.format,
                        r.focal_range,
                        r.teleconverters
                    ));
                }
                lines.join("\n")
            }
            OutputFormat::Csv => crate::export::to_csv(lenses.iter().copied()),
            #[cfg(feature = "display")]
            OutputFormat::Table => Table::new(&rows).with(Style::rounded()).to_string(),
            #[cfg(feature = "display")]
            OutputFormat::Markdown => Table::new(&rows).with(Style::markdown()).to_string(),
            #[cfg(not(feature = "display"))]
            OutputFormat::Table | OutputFormat::Markdown => {
                self.format_json(lenses, OutputFormat::JsonPretty)
            }
        }
    }

    /// Format full lens records as JSON
    pub fn format_json(&self, lenses: &[&Lens], format: OutputFormat) -> String {
        match format {
            OutputFormat::JsonLine => lenses
                .iter()
                .filter_map(|l| serde_json::to_string(l).ok())
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(lenses).unwrap_or_default(),
            _ => serde_json::to_string(lenses).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FormatClass, LensSpecification};
    use crate::datasets::{LensRecord, SourceDataset};

    fn record(id: u32, model: &str, focal: f64) -> LensRecord {
        LensRecord::new(
            id,
            model,
            vec![LensSpecification::new(focal, 2.8, 0.3, 0.25)],
        )
    }

    fn catalog() -> Catalog {
        Catalog::build(vec![
            SourceDataset::new(
                "Sony",
                "E",
                vec![
                    record(1, "FE 24mm F1.4 GM", 24.0),
                    record(2, "FE 135mm F1.8 GM", 135.0).with_teleconverters(vec![1.4, 2.0]),
                ],
            ),
            SourceDataset::new(
                "Fujifilm",
                "X",
                vec![record(3, "XF 56mm F1.2", 56.0).with_crop_factor(1.5)],
            ),
            SourceDataset::new("Canon", "RF", vec![record(4, "RF 85mm F2 Macro", 85.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_filter_returns_whole_catalog() {
        let catalog = catalog();
        let engine = QueryEngine::new(&catalog);
        let all = engine.filter(&FilterCriteria::default());
        assert_eq!(all.len(), catalog.len());
        let ids: Vec<u32> = all.iter().map(|l| l.id).collect();
        let expected: Vec<u32> = catalog.iter().map(|l| l.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_filter_is_subset_in_catalog_order() {
        let catalog = catalog();
        let engine = QueryEngine::new(&catalog);
        let sony = engine.filter(&FilterCriteria::new().manufacturer("sony"));
        let ids: Vec<u32> = sony.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(sony.iter().all(|l| l.manufacturer == "Sony"));

        let crop = engine.filter(&FilterCriteria::new().format(FormatClass::Crop));
        assert_eq!(crop.len(), 1);
        assert_eq!(crop[0].id, 3);

        let tc = engine.filter(&FilterCriteria::new().teleconverter_compatible(true));
        assert_eq!(tc.len(), 1);
        assert_eq!(tc[0].id, 2);
    }

    #[test]
    fn test_facets_sorted_distinct() {
        let catalog = catalog();
        let engine = QueryEngine::new(&catalog);
        assert_eq!(
            engine.distinct_manufacturers(),
            vec!["Canon", "Fujifilm", "Sony"]
        );
        assert_eq!(engine.distinct_mounts(), vec!["E", "RF", "X"]);
    }

    #[test]
    fn test_by_ids_keeps_catalog_order() {
        let catalog = catalog();
        let engine = QueryEngine::new(&catalog);
        let lenses = engine.by_ids(&[4, 99, 1, 4]);
        let ids: Vec<u32> = lenses.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(engine.by_ids(&[]).is_empty());
        assert!(engine.get(99).is_none());
        assert_eq!(engine.get(3).map(|l| l.model.as_str()), Some("XF 56mm F1.2"));
    }

    #[test]
    fn test_format_results() {
        let catalog = catalog();
        let engine = QueryEngine::new(&catalog);
        let lenses = engine.all();

        let psv = engine.format_results(&lenses, OutputFormat::Psv, false);
        let lines: Vec<&str> = psv.lines().collect();
        assert_eq!(lines.len(), lenses.len() + 1);
        assert!(lines[0].starts_with("id|manufacturer"));

        let jsonl = engine.format_results(&lenses, OutputFormat::JsonLine, false);
        assert_eq!(jsonl.lines().count(), lenses.len());

        let json = engine.format_results(&lenses, OutputFormat::Json, false);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(lenses.len()));
    }
}
