//! Error types
//!
//! Two error families exist in glassbook:
//!
//! - [`CatalogError`]: validation failures that abort a catalog build. No
//!   partial catalog is ever published when one of these is returned.
//! - [`DomainError`]: a single optical computation cannot be carried out
//!   (division by zero, degenerate interpolation, empty lens data). These stay
//!   local to the computation that raised them.
//!
//! Values that could not be derived during normalization are not errors at
//! all; they are reported through [`crate::catalog::CatalogQuality`].

use thiserror::Error;

/// Errors raised while validating source datasets and building a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A required field is empty
    #[error("missing required field `{field}` in {context}")]
    MissingField { field: &'static str, context: String },

    /// The same lens id appears more than once across all sources
    #[error("duplicate lens id {id}: `{first}` and `{second}`")]
    DuplicateId {
        id: u32,
        first: String,
        second: String,
    },

    /// A numeric field is out of its valid range
    #[error("invalid value for `{field}` in {context}: {value}")]
    InvalidValue {
        field: &'static str,
        context: String,
        value: f64,
    },

    /// The source could not be read or decoded
    #[error("malformed source {source_name}: {reason}")]
    Malformed { source_name: String, reason: String },
}

/// Errors raised by a single optical computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The formula would divide by zero
    #[error("division by zero in {formula}")]
    DivisionByZero { formula: &'static str },

    /// Interpolation needs two distinct anchor focal lengths
    #[error("cannot interpolate aperture between identical focal lengths ({focal_length}mm)")]
    DegenerateInterpolation { focal_length: f64 },

    /// Teleconverter multipliers must be positive
    #[error("invalid teleconverter multiplier {0}")]
    InvalidTeleconverter(f64),

    /// The lens has no specification rows
    #[error("lens {lens_id} has no specification data")]
    EmptyData { lens_id: u32 },

    /// Every candidate value of the lens is still unresolved
    #[error("lens {lens_id} has no known {field} values")]
    Unresolved { lens_id: u32, field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::DuplicateId {
            id: 7,
            first: "Z 70-200mm".to_string(),
            second: "RF 70-200mm".to_string(),
        };
        assert!(err.to_string().contains("duplicate lens id 7"));

        let err = CatalogError::MissingField {
            field: "model",
            context: "lens 3".to_string(),
        };
        assert_eq!(err.to_string(), "missing required field `model` in lens 3");
    }

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::DivisionByZero {
            formula: "magnification",
        };
        assert!(err.to_string().contains("division by zero"));

        let err = DomainError::EmptyData { lens_id: 42 };
        assert_eq!(err.to_string(), "lens 42 has no specification data");
    }
}
