use anyhow::{anyhow, Result};
use config::Config;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::datasets::discover_source_files;
use crate::utils::OutputFormat;

pub struct GlassbookConfig {
    /// Path to the directory holding glassbook's data
    pub data_dir: String,

    /// Explicit lens dataset files; empty means "discover under data_dir"
    pub sources: Vec<String>,

    /// Output format used when a command does not pass `--format`
    pub default_format: OutputFormat,
}

const EMPTY_CONFIG: &str = r#"### glassbook configuration file

### directory for lens data used by glassbook
### dataset files are discovered under {data_dir}/sources/*.json
# data_dir = "~/.glassbook"

### explicit list of lens dataset files (overrides discovery)
# sources = ["~/lenses/sony.json", "~/lenses/canon.json"]

### default output format: table, markdown, json, json-pretty, json-line, psv, csv
# default_format = "table"
"#;

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    data_dir: Option<String>,
    #[serde(default)]
    sources: Vec<String>,
    default_format: Option<String>,
}

impl Default for GlassbookConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.glassbook", home_dir),
            sources: vec![],
            default_format: OutputFormat::Table,
        }
    }
}

impl GlassbookConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<GlassbookConfig> {
        let mut builder = Config::builder();

        // By default use $HOME/.glassbook/glassbook.toml as the configuration file path
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        let glassbook_dir = format!("{}/.glassbook", home_dir.as_str());

        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(glassbook_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create glassbook directory: {}", e))?;
                let p = format!("{}/glassbook.toml", glassbook_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of GLASSBOOK)
        // E.g., `GLASSBOOK_SOURCES=a.json,b.json glassbook list` sets the dataset files
        builder = builder.add_source(
            config::Environment::with_prefix("GLASSBOOK")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("sources"),
        );

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let raw = settings
            .try_deserialize::<RawConfig>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        Self::from_raw(raw, &home_dir)
    }

    fn from_raw(raw: RawConfig, home_dir: &str) -> Result<GlassbookConfig> {
        let data_dir = match raw.data_dir {
            Some(p) => expand_home(&p, home_dir),
            None => format!("{}/.glassbook", home_dir),
        };

        let sources = raw
            .sources
            .iter()
            .map(|s| expand_home(s, home_dir))
            .collect();

        let default_format = match raw.default_format {
            Some(f) => f
                .parse::<OutputFormat>()
                .map_err(|e| anyhow!("Invalid default_format: {}", e))?,
            None => OutputFormat::default(),
        };

        Ok(GlassbookConfig {
            data_dir,
            sources,
            default_format,
        })
    }

    /// Directory scanned for dataset files when `sources` is empty
    pub fn sources_dir(&self) -> String {
        format!("{}/sources", self.data_dir.trim_end_matches('/'))
    }

    /// Dataset files to load, explicit or discovered
    pub fn source_paths(&self) -> Result<Vec<PathBuf>> {
        if self.sources.is_empty() {
            discover_source_files(Path::new(&self.sources_dir()))
        } else {
            Ok(self.sources.iter().map(PathBuf::from).collect())
        }
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Data Directory:     {}", self.data_dir),
            format!("Default Format:     {}", self.default_format),
        ];

        if self.sources.is_empty() {
            lines.push(format!("Sources Directory:  {}", self.sources_dir()));
        } else {
            lines.push(format!("Sources:            {}", self.sources.join(", ")));
        }

        lines.join("\n")
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.glassbook/glassbook.toml", home_dir)
    }
}

fn expand_home(path: &str, home_dir: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => format!("{}/{}", home_dir.trim_end_matches('/'), rest),
        None if path == "~" => home_dir.to_string(),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = GlassbookConfig::default();
        assert!(config.data_dir.ends_with(".glassbook"));
        assert!(config.sources.is_empty());
        assert_eq!(config.default_format, OutputFormat::Table);
    }

    #[test]
    fn test_from_raw() {
        let raw = RawConfig {
            data_dir: Some("~/lenses".to_string()),
            sources: vec!["~/a.json".to_string(), "/tmp/b.json".to_string()],
            default_format: Some("markdown".to_string()),
        };
        let config = GlassbookConfig::from_raw(raw, "/home/me").unwrap();
        assert_eq!(config.data_dir, "/home/me/lenses");
        assert_eq!(config.sources, vec!["/home/me/a.json", "/tmp/b.json"]);
        assert_eq!(config.default_format, OutputFormat::Markdown);

        let config = GlassbookConfig::from_raw(RawConfig::default(), "/home/me").unwrap();
        assert_eq!(config.data_dir, "/home/me/.glassbook");
        assert_eq!(config.sources_dir(), "/home/me/.glassbook/sources");
    }

    #[test]
    fn test_invalid_default_format() {
        let raw = RawConfig {
            default_format: Some("xml".to_string()),
            ..Default::default()
        };
        assert!(GlassbookConfig::from_raw(raw, "/home/me").is_err());
    }

    #[test]
    fn test_missing_file_writes_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("glassbook.toml");
        let path_str = path.to_string_lossy().to_string();

        let config = GlassbookConfig::new(&Some(path_str)).unwrap();
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# data_dir"));
        assert!(config.data_dir.ends_with(".glassbook"));
    }

    #[test]
    fn test_reads_config_file() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let path = dir.path().join("glassbook.toml");
        std::fs::write(
            &path,
            format!(
                "data_dir = \"{}\"\nsources = [\"one.json\", \"two.json\"]\ndefault_format = \"json\"\n",
                data_dir.display()
            ),
        )
        .unwrap();

        let config = GlassbookConfig::new(&Some(path.to_string_lossy().to_string())).unwrap();
        assert_eq!(config.data_dir, data_dir.to_string_lossy());
        assert_eq!(config.sources, vec!["one.json", "two.json"]);
        assert_eq!(config.default_format, OutputFormat::Json);

        let paths = config.source_paths().unwrap();
        assert_eq!(paths, vec![PathBuf::from("one.json"), PathBuf::from("two.json")]);
    }

    #[test]
    fn test_source_paths_discovery() {
        let dir = tempdir().unwrap();
        let sources = dir.path().join("sources");
        std::fs::create_dir_all(&sources).unwrap();
        std::fs::write(sources.join("b.json"), "[]").unwrap();
        std::fs::write(sources.join("a.json"), "[]").unwrap();
        std::fs::write(sources.join("notes.txt"), "").unwrap();

        let config = GlassbookConfig {
            data_dir: dir.path().to_string_lossy().to_string(),
            ..Default::default()
        };
        let paths = config.source_paths().unwrap();
        assert_eq!(paths, vec![sources.join("a.json"), sources.join("b.json")]);
        assert!(config.summary().contains("Sources Directory"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("~/x", "/h/"), "/h/x");
        assert_eq!(expand_home("~", "/h"), "/h");
        assert_eq!(expand_home("rel/x", "/h"), "rel/x");
    }
}
