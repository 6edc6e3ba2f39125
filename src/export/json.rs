//! JSON exporter

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::catalog::Lens;

/// Exported document: a timestamp, the lens count, and the lenses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub export_date: String,
    pub total_lenses: usize,
    pub lenses: Vec<&'a Lens>,
}

impl<'a> ExportDocument<'a> {
    pub fn new<I>(lenses: I, exported_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Lens>,
    {
        let lenses: Vec<&Lens> = lenses.into_iter().collect();
        Self {
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_lenses: lenses.len(),
            lenses,
        }
    }
}

/// Pretty-printed export document stamped with the current time
pub fn to_json<'a, I>(lenses: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Lens>,
{
    to_json_at(lenses, Utc::now())
}

/// Pretty-printed export document stamped with `exported_at`
pub fn to_json_at<'a, I>(lenses: I, exported_at: DateTime<Utc>) -> Result<String>
where
    I: IntoIterator<Item = &'a Lens>,
{
    let document = ExportDocument::new(lenses, exported_at);
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LensSpecification, SpecValue};
    use chrono::TimeZone;

    fn lens() -> Lens {
        Lens {
            id: 3,
            manufacturer: "Nikon".to_string(),
            mount: "Z".to_string(),
            model: "NIKKOR Z 70-200mm f/2.8 VR S".to_string(),
            short_name: Some("Z 70-200".to_string()),
            weight: None,
            length: None,
            filter: None,
            crop_factor: None,
            teleconverters: vec![1.4],
            data: vec![
                LensSpecification::new(70.0, 2.8, 0.5, SpecValue::Derive),
                LensSpecification::new(200.0, 2.8, 0.5, 0.2),
            ],
        }
    }

    #[test]
    fn test_to_json_at() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let lens = lens();
        let json = to_json_at([&lens], at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["exportDate"], "2024-03-01T12:30:05.000Z");
        assert_eq!(value["totalLenses"], 1);
        assert_eq!(value["lenses"][0]["shortName"], "Z 70-200");
        assert_eq!(value["lenses"][0]["data"][1]["focalLength"], 200.0);
        assert!(value["lenses"][0]["data"][0]["magnification"].is_null());
        // pretty-printed
        assert!(json.contains("\n  \"exportDate\""));
    }

    #[test]
    fn test_to_json_empty() {
        let json = to_json(std::iter::empty()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalLenses"], 0);
        assert!(value["lenses"].as_array().unwrap().is_empty());
        assert!(value["exportDate"].as_str().unwrap().ends_with('Z'));
    }
}
