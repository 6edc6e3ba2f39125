//! Catalog record types
//!
//! The normalized records handed to the query engine and exporters.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw value meaning "not supplied; derive analytically"
pub const DERIVE_SENTINEL: f64 = -1.0;

/// A numeric specification that is either known or still to be derived
///
/// Source data marks derivable values with `-1`. On the wire `-1` and `null`
/// both decode to [`SpecValue::Derive`]; `Derive` always encodes as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SpecValue {
    Known(f64),
    #[default]
    Derive,
}

impl SpecValue {
    /// Map a raw number, treating the `-1` sentinel as [`SpecValue::Derive`]
    pub fn from_raw(value: f64) -> Self {
        if value == DERIVE_SENTINEL {
            SpecValue::Derive
        } else {
            SpecValue::Known(value)
        }
    }

    pub fn known(&self) -> Option<f64> {
        match self {
            SpecValue::Known(v) => Some(*v),
            SpecValue::Derive => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, SpecValue::Known(_))
    }

    pub fn is_derive(&self) -> bool {
        matches!(self, SpecValue::Derive)
    }

    /// Apply `f` to a known value; `Derive` stays `Derive`
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            SpecValue::Known(v) => SpecValue::Known(f(v)),
            SpecValue::Derive => SpecValue::Derive,
        }
    }
}

impl From<f64> for SpecValue {
    fn from(value: f64) -> Self {
        SpecValue::from_raw(value)
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecValue::Known(v) => write!(f, "{}", v),
            SpecValue::Derive => write!(f, "unknown"),
        }
    }
}

impl Serialize for SpecValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SpecValue::Known(v) => serializer.serialize_f64(*v),
            SpecValue::Derive => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for SpecValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SpecValueVisitor;

        impl<'de> Visitor<'de> for SpecValueVisitor {
            type Value = SpecValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, -1, or null")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SpecValue::from_raw(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SpecValue::from_raw(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SpecValue::Known(value as f64))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SpecValue::Derive)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SpecValue::Derive)
            }
        }

        deserializer.deserialize_any(SpecValueVisitor)
    }
}

/// One sample point along a lens's zoom/focus range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensSpecification {
    /// Focal length in millimeters
    pub focal_length: f64,
    /// Maximum aperture as an f-number
    pub aperture: SpecValue,
    /// Minimum focus distance in meters
    pub min_focus: f64,
    /// Maximum magnification ratio at minimum focus
    pub magnification: SpecValue,
    /// Multiplier of the teleconverter this row was projected through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teleconverter: Option<f64>,
}

impl LensSpecification {
    pub fn new(
        focal_length: f64,
        aperture: impl Into<SpecValue>,
        min_focus: f64,
        magnification: impl Into<SpecValue>,
    ) -> Self {
        Self {
            focal_length,
            aperture: aperture.into(),
            min_focus,
            magnification: magnification.into(),
            teleconverter: None,
        }
    }

    /// Whether any value of this row is still unresolved
    pub fn is_unresolved(&self) -> bool {
        self.aperture.is_derive() || self.magnification.is_derive()
    }
}

/// Sensor format a lens is designed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatClass {
    Full,
    Crop,
}

impl FormatClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatClass::Full => "Full",
            FormatClass::Crop => "Crop",
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["Full", "Crop"]
    }
}

impl fmt::Display for FormatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormatClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "full-frame" | "ff" => Ok(FormatClass::Full),
            "crop" | "aps-c" | "apsc" => Ok(FormatClass::Crop),
            _ => Err(format!(
                "Unknown format '{}'. Valid formats: {}",
                s,
                FormatClass::all_names().join(", ")
            )),
        }
    }
}

/// A normalized lens record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lens {
    pub id: u32,
    pub manufacturer: String,
    pub model: String,
    pub mount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Weight in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Length in millimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Filter thread in millimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_factor: Option<f64>,
    #[serde(default)]
    pub teleconverters: Vec<f64>,
    pub data: Vec<LensSpecification>,
}

impl Lens {
    pub fn format(&self) -> FormatClass {
        if self.crop_factor.is_some() {
            FormatClass::Crop
        } else {
            FormatClass::Full
        }
    }

    pub fn supports_teleconverters(&self) -> bool {
        !self.teleconverters.is_empty()
    }

    /// Smallest focal length in `data`, `None` when `data` is empty
    pub fn min_focal_length(&self) -> Option<f64> {
        self.data.iter().map(|d| d.focal_length).reduce(f64::min)
    }

    /// Largest focal length in `data`, `None` when `data` is empty
    pub fn max_focal_length(&self) -> Option<f64> {
        self.data.iter().map(|d| d.focal_length).reduce(f64::max)
    }

    /// Short display name, falling back to the model name
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.model)
    }

    /// Focal range for display, e.g. `70-200mm` or `50mm`
    pub fn focal_range(&self) -> String {
        match (self.min_focal_length(), self.max_focal_length()) {
            (Some(min), Some(max)) if min == max => format!("{}mm", min),
            (Some(min), Some(max)) => format!("{}-{}mm", min, max),
            _ => "-".to_string(),
        }
    }

    pub fn has_unresolved(&self) -> bool {
        self.data.iter().any(|d| d.is_unresolved())
    }
}
