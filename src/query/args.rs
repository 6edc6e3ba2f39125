//! Query arguments
//!
//! [`FilterCriteria`] works in multiple contexts:
//! - CLI: with clap derives (when `cli` feature is enabled)
//! - JSON payloads: via serde, accepting a single value or a list per field
//! - Library: constructed programmatically with the builder methods

use serde::{Deserialize, Serialize};

use crate::catalog::{FormatClass, Lens};
use crate::utils::one_or_many;

/// Multi-criteria lens filter
///
/// A lens matches when it satisfies every non-empty field. Within a field the
/// listed values are alternatives, compared case-insensitively. Empty fields
/// impose no constraint, so `FilterCriteria::default()` matches every lens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Manufacturer names, e.g. "Sony" or "Canon" (repeatable)
    #[cfg_attr(feature = "cli", clap(short = 'M', long = "manufacturer"))]
    #[serde(default, deserialize_with = "one_or_many")]
    pub manufacturers: Vec<String>,

    /// Mount names, e.g. "E" or "RF" (repeatable)
    #[cfg_attr(feature = "cli", clap(short = 'm', long = "mount"))]
    #[serde(default, deserialize_with = "one_or_many")]
    pub mounts: Vec<String>,

    /// Sensor formats: "Full" or "Crop" (repeatable)
    #[cfg_attr(feature = "cli", clap(short = 'F', long = "sensor"))]
    #[serde(default, deserialize_with = "one_or_many")]
    pub formats: Vec<String>,

    /// Lens ids (repeatable)
    #[cfg_attr(feature = "cli", clap(long = "id"))]
    #[serde(default, deserialize_with = "one_or_many")]
    pub ids: Vec<u32>,

    /// Only lenses that do (true) or do not (false) support teleconverters
    #[cfg_attr(feature = "cli", clap(short = 't', long = "teleconverter"))]
    #[serde(default)]
    pub teleconverter_compatible: Option<bool>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturers.push(manufacturer.into());
        self
    }

    pub fn mount(mut self, mount: impl Into<String>) -> Self {
        self.mounts.push(mount.into());
        self
    }

    pub fn format(mut self, format: FormatClass) -> Self {
        self.formats.push(format.to_string());
        self
    }

    pub fn id(mut self, id: u32) -> Self {
        self.ids.push(id);
        self
    }

    pub fn teleconverter_compatible(mut self, compatible: bool) -> Self {
        self.teleconverter_compatible = Some(compatible);
        self
    }

    /// Check if no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
            && self.mounts.is_empty()
            && self.formats.is_empty()
            && self.ids.is_empty()
            && self.teleconverter_compatible.is_none()
    }

    /// Validate the arguments
    ///
    /// Returns an error message if a format label is not recognized.
    pub fn validate(&self) -> Result<(), String> {
        for format in &self.formats {
            format.parse::<FormatClass>()?;
        }
        Ok(())
    }

    /// Check whether `lens` satisfies every non-empty constraint
    pub fn matches(&self, lens: &Lens) -> bool {
        if !matches_any(&self.manufacturers, &lens.manufacturer) {
            return false;
        }

        if !matches_any(&self.mounts, &lens.mount) {
            return false;
        }

        if !self.formats.is_empty() {
            let format = lens.format();
            // unknown labels never match; `validate` reports them
            if !self
                .formats
                .iter()
                .any(|f| f.parse::<FormatClass>() == Ok(format))
            {
                return false;
            }
        }

        if !self.ids.is_empty() && !self.ids.contains(&lens.id) {
            return false;
        }

        if let Some(compatible) = self.teleconverter_compatible {
            if lens.supports_teleconverters() != compatible {
                return false;
            }
        }

        true
    }
}

/// Empty `candidates` match anything; otherwise one must equal `value`
/// ignoring case
fn matches_any(candidates: &[String], value: &str) -> bool {
    if candidates.is_empty() {
        return true;
    }
    let value = value.to_lowercase();
    candidates.iter().any(|c| c.to_lowercase() == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LensSpecification;

    fn lens(id: u32, manufacturer: &str, mount: &str) -> Lens {
        Lens {
            id,
            manufacturer: manufacturer.to_string(),
            model: format!("{} lens {}", manufacturer, id),
            mount: mount.to_string(),
            short_name: None,
            weight: None,
            length: None,
            filter: None,
            crop_factor: None,
            teleconverters: vec![],
            data: vec![LensSpecification::new(50.0, 1.8, 0.45, 0.12)],
        }
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&lens(1, "Sony", "E")));
    }

    #[test]
    fn test_manufacturer_case_insensitive_or() {
        let criteria = FilterCriteria::new().manufacturer("sony").manufacturer("CANON");
        assert!(criteria.matches(&lens(1, "Sony", "E")));
        assert!(criteria.matches(&lens(2, "Canon", "RF")));
        assert!(!criteria.matches(&lens(3, "Nikon", "Z")));
    }

    #[test]
    fn test_fields_combine_with_and() {
        let criteria = FilterCriteria::new().manufacturer("Sony").mount("FE");
        assert!(!criteria.matches(&lens(1, "Sony", "E")));
        assert!(criteria.matches(&lens(1, "Sony", "fe")));
    }

    #[test]
    fn test_format_and_teleconverter() {
        let mut crop = lens(1, "Fujifilm", "X");
        crop.crop_factor = Some(1.5);
        let mut tele = lens(2, "Sony", "E");
        tele.teleconverters = vec![1.4, 2.0];

        let crop_only = FilterCriteria::new().format(FormatClass::Crop);
        assert!(crop_only.matches(&crop));
        assert!(!crop_only.matches(&tele));

        let tc = FilterCriteria::new().teleconverter_compatible(true);
        assert!(tc.matches(&tele));
        assert!(!tc.matches(&crop));

        let no_tc = FilterCriteria::new().teleconverter_compatible(false);
        assert!(no_tc.matches(&crop));
        assert!(!no_tc.matches(&tele));
    }

    #[test]
    fn test_ids() {
        let criteria = FilterCriteria::new().id(2).id(5);
        assert!(criteria.matches(&lens(5, "Sony", "E")));
        assert!(!criteria.matches(&lens(3, "Sony", "E")));
    }

    #[test]
    fn test_validate_formats() {
        let criteria = FilterCriteria {
            formats: vec!["full".to_string(), "Crop".to_string()],
            ..Default::default()
        };
        assert!(criteria.validate().is_ok());

        let criteria = FilterCriteria {
            formats: vec!["medium".to_string()],
            ..Default::default()
        };
        assert!(criteria.validate().unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_deserialize_single_or_list() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"manufacturers": "Sony", "mounts": ["E", "FE"], "ids": 4, "teleconverterCompatible": true}"#,
        )
        .unwrap();
        assert_eq!(criteria.manufacturers, vec!["Sony"]);
        assert_eq!(criteria.mounts, vec!["E", "FE"]);
        assert_eq!(criteria.ids, vec![4]);
        assert_eq!(criteria.teleconverter_compatible, Some(true));

        let criteria: FilterCriteria = serde_json::from_str("{}").unwrap();
        assert!(criteria.is_empty());
    }
}
