//! Per-lens aggregates and selection comparisons
//!
//! Aggregates only look at known values. Unresolved entries are skipped, never
//! read as numbers.

use serde::Serialize;

use crate::catalog::{Lens, SpecValue};
use crate::error::DomainError;
use crate::optics::{format_magnification_ratio, is_macro_capable};

/// A lens's highest magnification and where in the zoom range it occurs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxMagnification {
    pub magnification: f64,
    pub focal_length: f64,
}

/// The best magnification at one focal length across a selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestMagnification<'a> {
    pub lens: &'a Lens,
    pub magnification: f64,
}

fn ensure_data(lens: &Lens) -> Result<(), DomainError> {
    if lens.data.is_empty() {
        Err(DomainError::EmptyData { lens_id: lens.id })
    } else {
        Ok(())
    }
}

/// Highest known magnification of `lens`
pub fn get_max_magnification(lens: &Lens) -> Result<f64, DomainError> {
    get_max_magnification_with_focal_length(lens).map(|m| m.magnification)
}

/// Highest known magnification of `lens`, paired with the focal length of the
/// first entry reaching it
pub fn get_max_magnification_with_focal_length(
    lens: &Lens,
) -> Result<MaxMagnification, DomainError> {
    ensure_data(lens)?;

    let mut best: Option<MaxMagnification> = None;
    for spec in &lens.data {
        let SpecValue::Known(magnification) = spec.magnification else {
            continue;
        };
        if best.map_or(true, |b| magnification > b.magnification) {
            best = Some(MaxMagnification {
                magnification,
                focal_length: spec.focal_length,
            });
        }
    }

    best.ok_or(DomainError::Unresolved {
        lens_id: lens.id,
        field: "magnification",
    })
}

/// Longest focal length of `lens`
pub fn get_max_focal_length(lens: &Lens) -> Result<f64, DomainError> {
    lens.max_focal_length()
        .ok_or(DomainError::EmptyData { lens_id: lens.id })
}

/// Widest (smallest f-number) known aperture of `lens`
pub fn get_widest_aperture(lens: &Lens) -> Result<f64, DomainError> {
    ensure_data(lens)?;
    lens.data
        .iter()
        .filter_map(|d| d.aperture.known())
        .reduce(f64::min)
        .ok_or(DomainError::Unresolved {
            lens_id: lens.id,
            field: "aperture",
        })
}

/// Lens with the strictly greatest known magnification at exactly
/// `focal_length`
///
/// Lenses without an entry at that focal length are skipped. The first lens
/// in iteration order wins ties.
pub fn best_magnification_at_focal_length<'a, I>(
    lenses: I,
    focal_length: f64,
) -> Option<BestMagnification<'a>>
where
    I: IntoIterator<Item = &'a Lens>,
{
    let mut best: Option<BestMagnification<'a>> = None;
    for lens in lenses {
        for spec in lens.data.iter().filter(|d| d.focal_length == focal_length) {
            let SpecValue::Known(magnification) = spec.magnification else {
                continue;
            };
            if best.map_or(true, |b| magnification > b.magnification) {
                best = Some(BestMagnification {
                    lens,
                    magnification,
                });
            }
        }
    }
    best
}

/// Sort lenses by ascending max focal length, keeping order on ties
pub fn sort_by_max_focal_length(lenses: &mut [&Lens]) {
    lenses.sort_by(|a, b| {
        let a = a.max_focal_length().unwrap_or(f64::INFINITY);
        let b = b.max_focal_length().unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
}

/// One row of a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub id: u32,
    pub manufacturer: String,
    pub model: String,
    pub focal_range: String,
    pub widest_aperture: Option<f64>,
    pub max_magnification: Option<MaxMagnification>,
    pub magnification_ratio: Option<String>,
    pub macro_capable: bool,
    pub weight: Option<f64>,
}

/// Side-by-side summary of a lens selection plus the best pick per aspect
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub entries: Vec<ComparisonEntry>,
    /// Id of the lens with the highest magnification
    pub highest_magnification: Option<u32>,
    /// Id of the lens with the longest focal length
    pub longest_reach: Option<u32>,
    /// Id of the lightest lens with a known weight
    pub lightest: Option<u32>,
}

/// Compare a selection of lenses
///
/// Lenses with empty or unresolved data still get a row; they are simply not
/// eligible for the aspects they lack values for. Ties go to the first lens.
pub fn compare<'a, I>(lenses: I) -> Comparison
where
    I: IntoIterator<Item = &'a Lens>,
{
    let mut entries = Vec::new();
    let mut highest: Option<(u32, f64)> = None;
    let mut longest: Option<(u32, f64)> = None;
    let mut lightest: Option<(u32, f64)> = None;

    for lens in lenses {
        let max_magnification = get_max_magnification_with_focal_length(lens).ok();
        if let Some(m) = max_magnification {
            if highest.map_or(true, |(_, best)| m.magnification > best) {
                highest = Some((lens.id, m.magnification));
            }
        }
        if let Ok(focal) = get_max_focal_length(lens) {
            if longest.map_or(true, |(_, best)| focal > best) {
                longest = Some((lens.id, focal));
            }
        }
        if let Some(weight) = lens.weight {
            if lightest.map_or(true, |(_, best)| weight < best) {
                lightest = Some((lens.id, weight));
            }
        }

        entries.push(ComparisonEntry {
            id: lens.id,
            manufacturer: lens.manufacturer.clone(),
            model: lens.model.clone(),
            focal_range: lens.focal_range(),
            widest_aperture: get_widest_aperture(lens).ok(),
            max_magnification,
            magnification_ratio: max_magnification
                .map(|m| format_magnification_ratio(m.magnification)),
            macro_capable: max_magnification.is_some_and(|m| is_macro_capable(m.magnification)),
            weight: lens.weight,
        });
    }

    Comparison {
        entries,
        highest_magnification: highest.map(|(id, _)| id),
        longest_reach: longest.map(|(id, _)| id),
        lightest: lightest.map(|(id, _)| id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LensSpecification;

    fn lens(id: u32, data: Vec<LensSpecification>) -> Lens {
        Lens {
            id,
            manufacturer: "Canon".to_string(),
            model: format!("lens {}", id),
            mount: "RF".to_string(),
            short_name: None,
            weight: None,
            length: None,
            filter: None,
            crop_factor: None,
            teleconverters: vec![],
            data,
        }
    }

    fn zoom_24_105() -> Lens {
        lens(
            1,
            vec![
                LensSpecification::new(24.0, 4.0, 0.2, 0.24),
                LensSpecification::new(50.0, 4.0, 0.45, 0.31),
                LensSpecification::new(105.0, 4.0, 0.45, 0.31),
            ],
        )
    }

    #[test]
    fn test_get_max_magnification() {
        let lens = zoom_24_105();
        assert_eq!(get_max_magnification(&lens).unwrap(), 0.31);

        let max = get_max_magnification_with_focal_length(&lens).unwrap();
        assert_eq!(max.magnification, 0.31);
        // first entry reaching the maximum
        assert_eq!(max.focal_length, 50.0);
    }

    #[test]
    fn test_get_max_magnification_empty_data() {
        let lens = lens(9, vec![]);
        assert_eq!(
            get_max_magnification(&lens).unwrap_err(),
            DomainError::EmptyData { lens_id: 9 }
        );
        assert!(get_max_focal_length(&lens).is_err());
    }

    #[test]
    fn test_get_max_magnification_skips_unresolved() {
        let lens = lens(
            3,
            vec![
                LensSpecification::new(70.0, 2.8, 0.55, SpecValue::Derive),
                LensSpecification::new(200.0, 2.8, 0.55, 0.2),
            ],
        );
        assert_eq!(get_max_magnification(&lens).unwrap(), 0.2);

        let unresolved = self::lens(
            4,
            vec![LensSpecification::new(70.0, 2.8, 0.55, SpecValue::Derive)],
        );
        assert!(matches!(
            get_max_magnification(&unresolved).unwrap_err(),
            DomainError::Unresolved { .. }
        ));
    }

    #[test]
    fn test_get_max_focal_length_and_aperture() {
        let lens = zoom_24_105();
        assert_eq!(get_max_focal_length(&lens).unwrap(), 105.0);
        assert_eq!(get_widest_aperture(&lens).unwrap(), 4.0);
    }

    #[test]
    fn test_best_magnification_at_focal_length() {
        let a = zoom_24_105();
        let b = lens(2, vec![LensSpecification::new(105.0, 2.8, 0.3, 1.0)]);
        let c = lens(3, vec![LensSpecification::new(100.0, 2.8, 0.3, 1.4)]);
        let all = vec![a, b, c];

        let best = best_magnification_at_focal_length(&all, 105.0).unwrap();
        assert_eq!(best.lens.id, 2);
        assert_eq!(best.magnification, 1.0);

        // no exact match: nothing is interpolated
        assert!(best_magnification_at_focal_length(&all, 85.0).is_none());
    }

    #[test]
    fn test_best_magnification_tie_keeps_first() {
        let a = lens(1, vec![LensSpecification::new(100.0, 2.8, 0.3, 1.0)]);
        let b = lens(2, vec![LensSpecification::new(100.0, 2.8, 0.3, 1.0)]);
        let all = vec![a, b];
        let best = best_magnification_at_focal_length(&all, 100.0).unwrap();
        assert_eq!(best.lens.id, 1);
    }

    #[test]
    fn test_best_magnification_empty() {
        let none: Vec<Lens> = vec![];
        assert!(best_magnification_at_focal_length(&none, 50.0).is_none());
    }

    #[test]
    fn test_sort_by_max_focal_length() {
        let a = zoom_24_105();
        let b = lens(2, vec![LensSpecification::new(50.0, 1.2, 0.4, 0.19)]);
        let c = lens(3, vec![LensSpecification::new(105.0, 2.8, 0.3, 1.0)]);
        let mut refs = vec![&a, &b, &c];
        sort_by_max_focal_length(&mut refs);
        let ids: Vec<u32> = refs.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_compare() {
        let mut a = zoom_24_105();
        a.weight = Some(700.0);
        let mut b = lens(2, vec![LensSpecification::new(100.0, 2.8, 0.26, 1.4)]);
        b.weight = Some(730.0);
        let c = lens(3, vec![]);

        let comparison = compare([&a, &b, &c]);
        assert_eq!(comparison.entries.len(), 3);
        assert_eq!(comparison.highest_magnification, Some(2));
        assert_eq!(comparison.longest_reach, Some(1));
        assert_eq!(comparison.lightest, Some(1));

        let macro_entry = &comparison.entries[1];
        assert!(macro_entry.macro_capable);
        assert_eq!(macro_entry.magnification_ratio.as_deref(), Some("1.4:1"));

        let empty_entry = &comparison.entries[2];
        assert!(empty_entry.max_magnification.is_none());
        assert_eq!(empty_entry.focal_range, "-");
    }
}
