//! Source validation and sentinel resolution
//!
//! Turns tagged source datasets into normalized [`Lens`] records. Validation
//! failures abort the build; values that cannot be derived stay
//! [`SpecValue::Derive`] and are picked up by the quality report.

use super::types::{Lens, LensSpecification, SpecValue};
use crate::datasets::{LensRecord, SourceDataset};
use crate::error::CatalogError;
use crate::optics::{calculate_aperture_at_focal_length, calculate_magnification_across_focal_lengths};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Validate every dataset before anything is flattened
pub(crate) fn validate_sources(sources: &[SourceDataset]) -> Result<(), CatalogError> {
    let mut seen: HashMap<u32, String> = HashMap::new();

    for (index, source) in sources.iter().enumerate() {
        let source_context = format!("source #{}", index);
        if source.manufacturer.trim().is_empty() {
            return Err(CatalogError::MissingField {
                field: "manufacturer",
                context: source_context,
            });
        }
        if source.mount.trim().is_empty() {
            return Err(CatalogError::MissingField {
                field: "mount",
                context: source_context,
            });
        }

        for record in &source.lenses {
            validate_record(record)?;
            if let Some(first) = seen.insert(record.id, record.model.clone()) {
                return Err(CatalogError::DuplicateId {
                    id: record.id,
                    first,
                    second: record.model.clone(),
                });
            }
        }
    }

    Ok(())
}

fn validate_record(record: &LensRecord) -> Result<(), CatalogError> {
    let context = format!("lens {}", record.id);

    if record.model.trim().is_empty() {
        return Err(CatalogError::MissingField {
            field: "model",
            context,
        });
    }

    for &tc in &record.teleconverters {
        if !tc.is_finite() || tc <= 0.0 {
            return Err(invalid("teleconverters", &context, tc));
        }
    }

    for spec in &record.data {
        if !spec.focal_length.is_finite() || spec.focal_length <= 0.0 {
            return Err(invalid("focalLength", &context, spec.focal_length));
        }
        if !spec.min_focus.is_finite() || spec.min_focus <= 0.0 {
            return Err(invalid("minFocus", &context, spec.min_focus));
        }
        if let SpecValue::Known(aperture) = spec.aperture {
            if !aperture.is_finite() || aperture <= 0.0 {
                return Err(invalid("aperture", &context, aperture));
            }
        }
        if let SpecValue::Known(magnification) = spec.magnification {
            if !magnification.is_finite() || magnification < 0.0 {
                return Err(invalid("magnification", &context, magnification));
            }
        }
    }

    Ok(())
}

fn invalid(field: &'static str, context: &str, value: f64) -> CatalogError {
    CatalogError::InvalidValue {
        field,
        context: context.to_string(),
        value,
    }
}

/// Attach the dataset's manufacturer and mount to a raw record
pub(crate) fn tag_record(source: &SourceDataset, record: LensRecord) -> Lens {
    Lens {
        id: record.id,
        manufacturer: source.manufacturer.clone(),
        model: record.model,
        mount: source.mount.clone(),
        short_name: record.short_name,
        weight: record.weight,
        length: record.length,
        filter: record.filter,
        crop_factor: record.crop_factor,
        teleconverters: record.teleconverters,
        data: record.data,
    }
}

/// Resolve the derivable values of one lens in place
pub(crate) fn resolve_lens(lens: &mut Lens) {
    resolve_magnifications(lens);
    resolve_apertures(lens);
}

/// Entry with the highest known positive magnification, first found on ties
fn reference_point(data: &[LensSpecification]) -> Option<(f64, f64, f64)> {
    let mut best: Option<(f64, f64, f64)> = None;
    for spec in data {
        if let SpecValue::Known(m) = spec.magnification {
            if m > 0.0 && best.map_or(true, |(_, _, best_m)| m > best_m) {
                best = Some((spec.focal_length, spec.min_focus, m));
            }
        }
    }
    best
}

fn resolve_magnifications(lens: &mut Lens) {
    if !lens.data.iter().any(|d| d.magnification.is_derive()) {
        return;
    }

    let Some((ref_focal, ref_focus, ref_magnification)) = reference_point(&lens.data) else {
        debug!(
            "lens {} has no positive magnification to anchor on; leaving values unresolved",
            lens.id
        );
        return;
    };

    for spec in lens.data.iter_mut().filter(|d| d.magnification.is_derive()) {
        match calculate_magnification_across_focal_lengths(
            spec.focal_length,
            spec.min_focus,
            ref_focal,
            ref_focus,
            ref_magnification,
        ) {
            Ok(m) => spec.magnification = SpecValue::Known(m),
            Err(e) => warn!(
                "lens {} at {}mm: magnification left unresolved: {}",
                lens.id, spec.focal_length, e
            ),
        }
    }
}

fn resolve_apertures(lens: &mut Lens) {
    if !lens.data.iter().any(|d| d.aperture.is_derive()) {
        return;
    }

    let mut min_anchor: Option<(f64, f64)> = None;
    let mut max_anchor: Option<(f64, f64)> = None;
    let mut known = 0usize;

    for spec in &lens.data {
        let SpecValue::Known(aperture) = spec.aperture else {
            continue;
        };
        known += 1;
        if min_anchor.map_or(true, |(focal, _)| spec.focal_length < focal) {
            min_anchor = Some((spec.focal_length, aperture));
        }
        if max_anchor.map_or(true, |(focal, _)| spec.focal_length > focal) {
            max_anchor = Some((spec.focal_length, aperture));
        }
    }

    let (Some((min_focal, min_aperture)), Some((max_focal, max_aperture))) =
        (min_anchor, max_anchor)
    else {
        debug!("lens {} has no known aperture; leaving values unresolved", lens.id);
        return;
    };

    if known < 2 || min_focal == max_focal {
        debug!(
            "lens {} lacks two distinct aperture anchors; leaving values unresolved",
            lens.id
        );
        return;
    }

    for spec in lens.data.iter_mut().filter(|d| d.aperture.is_derive()) {
        match calculate_aperture_at_focal_length(
            spec.focal_length,
            min_focal,
            max_focal,
            min_aperture,
            max_aperture,
        ) {
            Ok(aperture) => spec.aperture = SpecValue::Known(aperture),
            Err(e) => warn!(
                "lens {} at {}mm: aperture left unresolved: {}",
                lens.id, spec.focal_length, e
            ),
        }
    }
}
