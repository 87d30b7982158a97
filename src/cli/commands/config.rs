//! Config Command
//!
//! Manage ReviewLens configuration.
//!
//! Usage:
//!   reviewlens [--config FILE] config show [-f json|yaml]
//!   reviewlens config path
//!   reviewlens config init [-g] [--force]

use std::path::Path;

use crate::cli::util::OutputFormat;
use crate::config::{Config, ConfigLoader};
use crate::types::{Result, ReviewError};

/// Show the effective configuration; `config_path` replaces the layered chain
pub fn show(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = ConfigLoader::load_effective(config_path)?;
    println!("{}", render(&config, format)?.trim_end());
    Ok(())
}

/// Text output is TOML, the same shape `config init` writes
fn render(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            toml::to_string_pretty(config).map_err(|e| ReviewError::Config(e.to_string()))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(config)?),
    }
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let dir = ConfigLoader::init_global(force)?;
    println!("✓ Initialized global configuration");
    println!("  Directory: {}", dir.display());
    if let Some(config_path) = ConfigLoader::global_config_path() {
        println!("  Config:    {}", config_path.display());
    }
    Ok(())
}

/// Initialize project configuration
pub fn init_project(force: bool) -> Result<()> {
    let dir = ConfigLoader::init_project(force)?;
    println!("✓ Initialized project configuration");
    println!("  Directory: {}", dir.display());
    println!(
        "  Config:    {}",
        ConfigLoader::project_config_path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_file_config_in_every_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[analysis]\nkeywords_per_aspect = 9\n").unwrap();
        let config = ConfigLoader::load_effective(Some(&path)).unwrap();

        let text = render(&config, OutputFormat::Text).unwrap();
        assert!(text.contains("keywords_per_aspect = 9"));

        let json: serde_json::Value =
            serde_json::from_str(&render(&config, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["analysis"]["keywords_per_aspect"], 9);

        let yaml = render(&config, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("keywords_per_aspect: 9"));
    }

    #[test]
    fn test_render_hides_secrets() {
        let mut config = Config::default();
        config.delivery.gemini.api_key = Some("top-secret".to_string());
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml] {
            let rendered = render(&config, format).unwrap();
            assert!(!rendered.contains("top-secret"));
        }
        assert!(render(&config, OutputFormat::Text).unwrap().contains("[delivery.gemini]"));
    }
}
