//! Teleconverter projection
//!
//! A teleconverter with multiplier `tc` scales focal length and magnification
//! by `tc` and the f-number by `tc` (snapped to a marked stop). The minimum
//! focus distance is the lens's designed close-focus distance and does not
//! change.

use super::aperture::round_to_standard_f_stop;
use crate::catalog::{Lens, LensSpecification};
use crate::error::DomainError;

/// Effective specification of `spec` behind a `teleconverter` multiplier
///
/// Unresolved aperture or magnification values stay unresolved.
pub fn calculate_teleconverter_data(
    spec: &LensSpecification,
    teleconverter: f64,
) -> Result<LensSpecification, DomainError> {
    if !teleconverter.is_finite() || teleconverter <= 0.0 {
        return Err(DomainError::InvalidTeleconverter(teleconverter));
    }

    Ok(LensSpecification {
        focal_length: spec.focal_length * teleconverter,
        aperture: spec
            .aperture
            .map(|aperture| round_to_standard_f_stop(aperture * teleconverter)),
        min_focus: spec.min_focus,
        magnification: spec.magnification.map(|m| m * teleconverter),
        teleconverter: Some(teleconverter),
    })
}

/// Native rows of `lens` followed by the rows projected through each
/// supported teleconverter, in the order the teleconverters are listed
pub fn teleconverter_view(lens: &Lens) -> Result<Vec<LensSpecification>, DomainError> {
    let mut rows = lens.data.clone();
    for &tc in &lens.teleconverters {
        for spec in &lens.data {
            rows.push(calculate_teleconverter_data(spec, tc)?);
        }
    }
    Ok(rows)
}
