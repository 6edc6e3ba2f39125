//! Row types for tabular output
//!
//! Each row flattens one record into display strings. Unresolved values show
//! as "unknown".

use serde::{Deserialize, Serialize};

use crate::catalog::{Lens, LensSpecification};
use crate::optics::format_magnification_ratio;
use crate::query::views::ComparisonEntry;
use crate::utils::{format_teleconverters, truncate_name, DEFAULT_NAME_MAX_LEN};

/// One lens per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct LensRow {
    pub id: u32,
    pub manufacturer: String,
    pub mount: String,
    pub model: String,
    pub format: String,
    pub focal_range: String,
    pub teleconverters: String,
}

impl LensRow {
    pub fn from_lens(lens: &Lens, truncate: bool) -> Self {
        let model = if truncate {
            truncate_name(&lens.model, DEFAULT_NAME_MAX_LEN)
        } else {
            lens.model.clone()
        };
        Self {
            id: lens.id,
            manufacturer: lens.manufacturer.clone(),
            mount: lens.mount.clone(),
            model,
            format: lens.format().to_string(),
            focal_range: lens.focal_range(),
            teleconverters: format_teleconverters(&lens.teleconverters),
        }
    }
}

/// One specification entry per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct SpecRow {
    pub focal_length: String,
    pub aperture: String,
    pub min_focus: String,
    pub magnification: String,
    pub ratio: String,
    pub teleconverter: String,
}

impl From<&LensSpecification> for SpecRow {
    fn from(spec: &LensSpecification) -> Self {
        Self {
            focal_length: format!("{}mm", spec.focal_length),
            aperture: match spec.aperture.known() {
                Some(ap) => format!("f/{}", ap),
                None => spec.aperture.to_string(),
            },
            min_focus: format!("{}m", spec.min_focus),
            magnification: spec.magnification.to_string(),
            ratio: spec
                .magnification
                .known()
                .map(format_magnification_ratio)
                .unwrap_or_else(|| "-".to_string()),
            teleconverter: spec
                .teleconverter
                .map(|tc| format!("{}x", tc))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// One compared lens per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct ComparisonRow {
    pub id: u32,
    pub model: String,
    pub focal_range: String,
    pub widest_aperture: String,
    pub max_magnification: String,
    pub ratio: String,
    #[cfg_attr(feature = "display", tabled(rename = "macro"))]
    pub macro_capable: String,
    pub weight: String,
}

impl ComparisonRow {
    pub fn from_entry(entry: &ComparisonEntry, truncate: bool) -> Self {
        let model = if truncate {
            truncate_name(&entry.model, DEFAULT_NAME_MAX_LEN)
        } else {
            entry.model.clone()
        };
        let dash = || "-".to_string();
        Self {
            id: entry.id,
            model,
            focal_range: entry.focal_range.clone(),
            widest_aperture: entry
                .widest_aperture
                .map(|ap| format!("f/{}", ap))
                .unwrap_or_else(dash),
            max_magnification: entry
                .max_magnification
                .map(|m| format!("{}x @ {}mm", m.magnification, m.focal_length))
                .unwrap_or_else(dash),
            ratio: entry.magnification_ratio.clone().unwrap_or_else(dash),
            macro_capable: if entry.macro_capable { "yes" } else { "no" }.to_string(),
            weight: entry
                .weight
                .map(|w| format!("{}g", w))
                .unwrap_or_else(dash),
        }
    }
}
