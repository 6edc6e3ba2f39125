//! Aperture interpolation and f-stop standardization

use crate::error::DomainError;

/// Marked f-stops in one-third stop increments, ascending
pub const STANDARD_F_STOPS: [f64; 37] = [
    1.0, 1.1, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3, 7.1, 8.0,
    9.0, 10.0, 11.0, 13.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 29.0, 32.0, 36.0, 40.0, 45.0, 51.0,
    57.0, 64.0,
];

/// Linear interpolation of the maximum aperture along a zoom range
///
/// `min_focal_known`/`max_focal_known` are the two focal lengths with known
/// apertures. Focal lengths outside that range extrapolate along the same line.
///
/// # Errors
///
/// [`DomainError::DegenerateInterpolation`] when both anchors share a focal
/// length.
pub fn calculate_aperture_at_focal_length(
    focal_length: f64,
    min_focal_known: f64,
    max_focal_known: f64,
    aperture_at_min: f64,
    aperture_at_max: f64,
) -> Result<f64, DomainError> {
    if min_focal_known == max_focal_known {
        return Err(DomainError::DegenerateInterpolation {
            focal_length: min_focal_known,
        });
    }

    let position = (focal_length - min_focal_known) / (max_focal_known - min_focal_known);
    Ok(aperture_at_min + position * (aperture_at_max - aperture_at_min))
}

/// Snap a computed f-number to the nearest marked f-stop
///
/// The table is scanned in ascending order and only a strictly smaller
/// difference replaces the current best, so an exact tie resolves to the
/// smaller stop.
pub fn round_to_standard_f_stop(computed: f64) -> f64 {
    let mut closest = STANDARD_F_STOPS[0];
    let mut min_diff = (computed - closest).abs();

    for &stop in STANDARD_F_STOPS.iter().skip(1) {
        let diff = (computed - stop).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = stop;
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_midpoint() {
        // 24-105mm f/4-5.6 style lens
        let aperture = calculate_aperture_at_focal_length(64.5, 24.0, 105.0, 4.0, 5.6).unwrap();
        assert!((aperture - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_at_anchors() {
        let at_min = calculate_aperture_at_focal_length(18.0, 18.0, 55.0, 3.5, 5.6).unwrap();
        let at_max = calculate_aperture_at_focal_length(55.0, 18.0, 55.0, 3.5, 5.6).unwrap();
        assert!((at_min - 3.5).abs() < 1e-9);
        assert!((at_max - 5.6).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_degenerate() {
        let err = calculate_aperture_at_focal_length(50.0, 50.0, 50.0, 1.8, 1.8).unwrap_err();
        assert!(matches!(err, DomainError::DegenerateInterpolation { .. }));
    }

    #[test]
    fn test_round_to_standard_f_stop() {
        assert_eq!(round_to_standard_f_stop(3.92), 4.0);
        assert_eq!(round_to_standard_f_stop(5.6), 5.6);
        assert_eq!(round_to_standard_f_stop(7.84), 8.0);
        assert_eq!(round_to_standard_f_stop(0.5), 1.0);
        assert_eq!(round_to_standard_f_stop(100.0), 64.0);
    }

    #[test]
    fn test_round_to_standard_f_stop_tie_prefers_smaller() {
        // exactly halfway between 10 and 11, and between 11 and 13
        assert_eq!(round_to_standard_f_stop(10.5), 10.0);
        assert_eq!(round_to_standard_f_stop(12.0), 11.0);
    }

    #[test]
    fn test_round_to_standard_f_stop_idempotent() {
        for stop in STANDARD_F_STOPS {
            assert_eq!(round_to_standard_f_stop(stop), stop);
        }
        for computed in [1.05, 2.66, 3.92, 4.76, 6.72, 11.2, 27.0, 60.0] {
            let once = round_to_standard_f_stop(computed);
            assert_eq!(round_to_standard_f_stop(once), once);
        }
    }
}
