use glassbook::{GlassbookConfig, OutputFormat};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    data_dir: String,
    sources_dir: String,
    sources: Vec<String>,
    default_format: String,
}

pub fn run(config: &GlassbookConfig, output_format: OutputFormat) {
    let resolved: Vec<String> = match config.source_paths() {
        Ok(paths) => paths
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect(),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            vec![]
        }
    };

    if output_format.is_json() {
        let info = ConfigInfo {
            config_file: GlassbookConfig::config_file_path(),
            data_dir: config.data_dir.clone(),
            sources_dir: config.sources_dir(),
            sources: resolved,
            default_format: config.default_format.to_string(),
        };
        let json = if output_format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(&info)
        } else {
            serde_json::to_string(&info)
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        }
        return;
    }

    println!("Config File:        {}", GlassbookConfig::config_file_path());
    println!("{}", config.summary());
    println!("Dataset Files:      {}", resolved.len());
    for path in &resolved {
        println!("  {}", path);
    }
}
