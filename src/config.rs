//! Layered configuration: built-in defaults, an optional TOML/JSON/YAML file,
//! then `WINDROSE_` environment variables (`WINDROSE_STATS__BINS=6`).

use crate::error::Result;
use crate::stats::StatsConfig;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WINDROSE";

/// Default output file of the rendered rose
pub const DEFAULT_OUTPUT_FILE: &str = "windrose.html";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindRoseConfig {
    pub stats: StatsConfig,
    pub render: RenderSettings,
}

/// Rendering options as written in configuration files.
///
/// Names are resolved (and validated) by the visualization crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Named color sequence, e.g. `Plasma`
    pub colors: String,
    /// Explicit colors (`#rrggbb` / `rgb(r,g,b)`); takes precedence over `colors`
    pub custom_colors: Vec<String>,
    /// Background theme, e.g. `plotly_dark`
    pub template: String,
    /// Reverse the color sequence before assigning it to speed bins
    pub colors_reversed: bool,
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Output file; `windrose.html` in the working directory when unset
    pub output: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            colors: "Plasma".to_string(),
            custom_colors: Vec::new(),
            template: "plotly_dark".to_string(),
            colors_reversed: true,
            title: None,
            width: 900,
            height: 900,
            output: None,
        }
    }
}

impl RenderSettings {
    /// Output path, falling back to `./windrose.html`
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }
}

impl WindRoseConfig {
    /// Load configuration from an optional file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            tracing::info!("Loading configuration from {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: WindRoseConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DEFAULT_BINS;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WindRoseConfig::default();
        assert_eq!(config.stats.bins, DEFAULT_BINS);
        assert!(config.stats.normalized);
        assert_eq!(config.render.template, "plotly_dark");
        assert_eq!(config.render.output_path(), PathBuf::from("windrose.html"));
    }

    #[test]
    fn test_from_toml_partial_override() {
        let config = WindRoseConfig::from_toml_str(
            r#"
            [stats]
            bins = 6
            normalized = false

            [stats.column_mapping]
            ws = "speed"
            wd = "direction"

            [render]
            colors = "Viridis"
            title = "Station 7"
            "#,
        )
        .unwrap();

        assert_eq!(config.stats.bins, 6);
        assert!(!config.stats.normalized);
        assert_eq!(config.stats.column_mapping.get("ws").map(String::as_str), Some("speed"));
        assert_eq!(config.render.colors, "Viridis");
        assert_eq!(config.render.title.as_deref(), Some("Station 7"));
        // untouched keys keep their defaults
        assert_eq!(config.render.width, 900);
        assert!(config.render.colors_reversed);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[render]\ntemplate = \"ggplot2\"\nwidth = 640").unwrap();

        let config = WindRoseConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.render.template, "ggplot2");
        assert_eq!(config.render.width, 640);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = WindRoseConfig::load(Some(Path::new("/nonexistent/windrose.toml")));
        assert!(result.is_err());
    }
}
