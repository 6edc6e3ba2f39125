//! Optical formula library
//!
//! Pure numeric functions over lens specifications: magnification from focus
//! distance and its inverse, magnification projection across focal lengths,
//! aperture interpolation, f-stop standardization, and teleconverter
//! projection.
//!
//! Every function here is deterministic and free of side effects, so all of
//! them can be called concurrently from any number of threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use glassbook::optics::{calculate_magnification, format_magnification_ratio};
//!
//! let m = calculate_magnification(105.0, 0.31)?;
//! println!("{}", format_magnification_ratio(m));
//! ```

pub mod aperture;
pub mod magnification;
pub mod teleconverter;

pub use aperture::{calculate_aperture_at_focal_length, round_to_standard_f_stop, STANDARD_F_STOPS};
pub use magnification::{
    calculate_magnification, calculate_magnification_across_focal_lengths,
    calculate_min_focus_for_magnification, format_magnification_ratio, is_macro_capable,
};
pub use teleconverter::{calculate_teleconverter_data, teleconverter_view};

/// Round half-up to `decimals` places
///
/// Halves always move toward positive infinity, so `-2.345` rounds to `-2.34`
/// at two places. The magnification formulas take the absolute value after
/// rounding and rely on this behavior for negative intermediates.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_half_up() {
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(0.0510416, 3), 0.051);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(-0.4, 0), 0.0);
        assert_eq!(round_to(1.0, 2), 1.0);
    }
}
