//! Common utilities for presenting query results
//!
//! Shared output format handling, table-friendly string helpers, and lenient
//! deserializers for list-valued arguments.

use serde::de::{self, Deserializer, IntoDeserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default maximum length for model names in tables
pub const DEFAULT_NAME_MAX_LEN: usize = 32;

/// Unified output format for all glassbook commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Pretty table with borders (default)
    #[default]
    Table,
    /// Markdown table format
    Markdown,
    /// Compact JSON (single line)
    Json,
    /// Pretty-printed JSON with indentation
    JsonPretty,
    /// JSON Lines format (one JSON object per line)
    JsonLine,
    /// Pipe-separated values with header
    Psv,
    /// Comma-separated values, one row per specification entry
    Csv,
}

impl OutputFormat {
    /// Check if this is a JSON variant
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty | Self::JsonLine)
    }

    /// Check if this is a table variant
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table | Self::Markdown)
    }

    /// Get a list of all format names for help text
    pub fn all_names() -> &'static [&'static str] {
        &[
            "table",
            "markdown",
            "json",
            "json-pretty",
            "json-line",
            "psv",
            "csv",
        ]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
            Self::JsonPretty => write!(f, "json-pretty"),
            Self::JsonLine => write!(f, "json-line"),
            Self::Psv => write!(f, "psv"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "pretty" => Ok(Self::Table),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "json-pretty" | "jsonpretty" => Ok(Self::JsonPretty),
            "json-line" | "jsonline" | "jsonl" | "ndjson" => Ok(Self::JsonLine),
            "psv" | "pipe" => Ok(Self::Psv),
            "csv" => Ok(Self::Csv),
            _ => Err(format!(
                "Unknown output format '{}'. Valid formats: {}",
                s,
                Self::all_names().join(", ")
            )),
        }
    }
}

/// Truncate a string to the specified length, adding "..." if truncated
///
/// # Examples
///
/// ```
/// use glassbook::utils::truncate_name;
///
/// assert_eq!(truncate_name("Z 50mm", 20), "Z 50mm");
/// assert_eq!(truncate_name("NIKKOR Z 70-200mm f/2.8 VR S", 20), "NIKKOR Z 70-200mm...");
/// ```
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        let truncated: String = name.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Render teleconverter multipliers as `1.4x;2x`, or `None` when empty
pub fn format_teleconverters(teleconverters: &[f64]) -> String {
    if teleconverters.is_empty() {
        "None".to_string()
    } else {
        teleconverters
            .iter()
            .map(|tc| format!("{}x", tc))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Deserialize a single value or a sequence of values into a `Vec<T>`
///
/// Accepts `"Sony"`, `["Sony", "Canon"]`, and `null` alike, so query-style
/// inputs (`manufacturers=Sony`) and JSON bodies share one args type.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct OneOrMany<T>(std::marker::PhantomData<T>);

    impl<'de, T> Visitor<'de> for OneOrMany<T>
    where
        T: Deserialize<'de>,
    {
        type Value = Vec<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a value or an array of values")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            T::deserialize(value.into_deserializer()).map(|v| vec![v])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            T::deserialize(value.into_deserializer()).map(|v| vec![v])
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            T::deserialize(value.into_deserializer()).map(|v| vec![v])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(value) = seq.next_element()? {
                vec.push(value);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(OneOrMany(std::marker::PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(
            truncate_name("12345678901234567890", 20),
            "12345678901234567890"
        );
        assert_eq!(
            truncate_name("FE 70-200mm F2.8 GM OSS II", 20),
            "FE 70-200mm F2.8 ..."
        );
        assert_eq!(truncate_name("", 20), "");
        assert_eq!(truncate_name("Hello", 3), "...");
    }

    #[test]
    fn test_format_teleconverters() {
        assert_eq!(format_teleconverters(&[1.4, 2.0]), "1.4x;2x");
        assert_eq!(format_teleconverters(&[]), "None");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("md").unwrap(), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("json-pretty").unwrap(),
            OutputFormat::JsonPretty
        );
        assert_eq!(
            OutputFormat::from_str("ndjson").unwrap(),
            OutputFormat::JsonLine
        );
        assert_eq!(OutputFormat::from_str("pipe").unwrap(), OutputFormat::Psv);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for name in OutputFormat::all_names() {
            let format = OutputFormat::from_str(name).unwrap();
            assert_eq!(&format.to_string(), name);
        }
    }

    #[test]
    fn test_output_format_kinds() {
        assert!(OutputFormat::JsonLine.is_json());
        assert!(!OutputFormat::Csv.is_json());
        assert!(OutputFormat::Markdown.is_table());
        assert!(!OutputFormat::Psv.is_table());
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "one_or_many")]
        names: Vec<String>,
        #[serde(default, deserialize_with = "one_or_many")]
        ids: Vec<u32>,
    }

    #[test]
    fn test_one_or_many() {
        let h: Holder = serde_json::from_str(r#"{"names": "Sony", "ids": 3}"#).unwrap();
        assert_eq!(h.names, vec!["Sony"]);
        assert_eq!(h.ids, vec![3]);

        let h: Holder = serde_json::from_str(r#"{"names": ["Sony", "Canon"], "ids": [1, 2]}"#)
            .unwrap();
        assert_eq!(h.names, vec!["Sony", "Canon"]);
        assert_eq!(h.ids, vec![1, 2]);

        let h: Holder = serde_json::from_str(r#"{"names": null}"#).unwrap();
        assert!(h.names.is_empty());
        assert!(h.ids.is_empty());
    }
}
