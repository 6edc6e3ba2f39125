//! Magnification formulas
//!
//! Close-focus magnification is approximated from the thin lens equation:
//! `M = f / (d - f)` with the focal length `f` and the focus distance `d` both
//! in millimeters.

use super::round_to;
use crate::error::DomainError;

/// Magnification at minimum focus distance
///
/// `M = f / (d*1000 - f)`, returned as `abs(round(M, 2))`.
///
/// # Errors
///
/// [`DomainError::DivisionByZero`] when the focus distance equals the focal
/// length.
pub fn calculate_magnification(focal_length: f64, min_focus: f64) -> Result<f64, DomainError> {
    let min_focus_mm = min_focus * 1000.0;
    let denominator = min_focus_mm - focal_length;
    if denominator == 0.0 {
        return Err(DomainError::DivisionByZero {
            formula: "magnification",
        });
    }

    let magnification = focal_length / denominator;
    Ok(round_to(magnification, 2).abs())
}

/// Minimum focus distance (meters) needed to reach `target_magnification`
///
/// Inverse of [`calculate_magnification`]: `d = f * (1 + 1/M)`, rounded to two
/// decimals.
pub fn calculate_min_focus_for_magnification(
    focal_length: f64,
    target_magnification: f64,
) -> Result<f64, DomainError> {
    if target_magnification == 0.0 {
        return Err(DomainError::DivisionByZero {
            formula: "min focus for magnification",
        });
    }

    let min_focus_mm = focal_length * (1.0 + 1.0 / target_magnification);
    Ok(round_to(min_focus_mm / 1000.0, 2))
}

/// Project a known magnification onto another focal length
///
/// `M1 = M2 * (f1/f2) * ((u2 - f2) / (u1 - f1))` where `f1`/`u1` describe the
/// target and `f2`/`u2`/`M2` the reference. Focus distances are given in meters
/// and converted to millimeters. The result is `abs(round(M1, 3))`.
pub fn calculate_magnification_across_focal_lengths(
    target_focal_length: f64,
    target_focus_distance: f64,
    reference_focal_length: f64,
    reference_focus_distance: f64,
    reference_magnification: f64,
) -> Result<f64, DomainError> {
    let u1 = target_focus_distance * 1000.0;
    let u2 = reference_focus_distance * 1000.0;
    let f1 = target_focal_length;
    let f2 = reference_focal_length;

    if f2 == 0.0 || u1 - f1 == 0.0 {
        return Err(DomainError::DivisionByZero {
            formula: "magnification across focal lengths",
        });
    }

    let focal_ratio = f1 / f2;
    let focus_ratio = (u2 - f2) / (u1 - f1);
    let magnification = reference_magnification * focal_ratio * focus_ratio;

    Ok(round_to(magnification, 3).abs())
}

/// Render a magnification ratio, e.g. `0.25` as `1:4` and `1.5` as `1.5:1`
///
/// Non-positive or non-finite ratios render as `0:1`.
pub fn format_magnification_ratio(magnification: f64) -> String {
    if !magnification.is_finite() || magnification <= 0.0 {
        return "0:1".to_string();
    }

    if magnification >= 1.0 {
        format!("{:.1}:1", magnification)
    } else {
        let ratio = round_to(1.0 / magnification, 0);
        format!("1:{}", ratio)
    }
}

/// 1:1 or greater counts as macro
pub fn is_macro_capable(magnification: f64) -> bool {
    magnification >= 1.0
}
