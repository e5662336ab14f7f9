//! Configuration loading from splitlens.toml
//!
//! Splitlens configuration can be specified in a `splitlens.toml` file. The
//! configuration is discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use splitlens_core::DEFAULT_PRECISION;
use splitlens_report::{ChartConfig, OutputFormat};
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name searched for by [`SplitlensConfig::discover`]
pub const CONFIG_FILE: &str = "splitlens.toml";

/// Splitlens configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SplitlensConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Duration text configuration
    #[serde(default)]
    pub codec: CodecConfig,
    /// Chart configuration
    #[serde(default)]
    pub charts: ChartsConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Directory receiving one sub-directory per input file
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Formats to write: "text", "csv", "json"
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            formats: default_formats(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}
fn default_formats() -> Vec<String> {
    OutputFormat::ALL.iter().map(|f| f.to_string()).collect()
}

/// Duration text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodecConfig {
    /// Fraction digits of rendered durations (0 to 6)
    #[serde(default = "default_precision")]
    pub precision: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_precision() -> u8 {
    DEFAULT_PRECISION
}

/// Chart configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartsConfig {
    /// Render SVG charts
    #[serde(default = "default_charts_enabled")]
    pub enabled: bool,
    /// Chart width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Chart height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            enabled: default_charts_enabled(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl ChartsConfig {
    /// Render size for the chart emitter
    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            width: self.width,
            height: self.height,
        }
    }
}

fn default_charts_enabled() -> bool {
    true
}
fn default_width() -> u32 {
    ChartConfig::default().width
}
fn default_height() -> u32 {
    ChartConfig::default().height
}

impl SplitlensConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        Self::discover_from(std::env::current_dir().ok()?)
    }

    /// Walk up from `start` looking for `splitlens.toml`
    ///
    /// The nearest file wins. If it does not parse, a warning is logged and
    /// `None` is returned.
    pub fn discover_from(start: impl Into<PathBuf>) -> Option<Self> {
        let mut dir = start.into();
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        warn!(
                            path = %config_path.display(),
                            "ignoring {}: {:#}",
                            CONFIG_FILE,
                            e
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Parsed output formats; unknown names are an error
    pub fn formats(&self) -> anyhow::Result<Vec<OutputFormat>> {
        self.output
            .formats
            .iter()
            .map(|f| f.parse().map_err(anyhow::Error::msg))
            .collect()
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Splitlens Configuration

[output]
# Directory receiving one folder per split file
directory = "."
# Formats to write: text, csv, json
formats = ["text", "csv", "json"]

[codec]
# Fraction digits of rendered durations (0 to 6)
precision = 2

[charts]
# Render SVG charts
enabled = true
# Chart dimensions
width = 1024
height = 768
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SplitlensConfig::default();
        assert_eq!(config.output.directory, ".");
        assert_eq!(config.codec.precision, 2);
        assert!(config.charts.enabled);
        assert_eq!(config.charts.chart_config(), ChartConfig::default());
        assert_eq!(
            config.formats().unwrap(),
            vec![OutputFormat::Text, OutputFormat::Csv, OutputFormat::Json]
        );
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [output]
            formats = ["json"]

            [charts]
            enabled = false
        "#;

        let config: SplitlensConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.formats().unwrap(), vec![OutputFormat::Json]);
        assert!(!config.charts.enabled);
        // Defaults should still apply
        assert_eq!(config.output.directory, ".");
        assert_eq!(config.charts.width, 1024);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let config: SplitlensConfig = toml::from_str("[output]\nformats = [\"pdf\"]").unwrap();
        assert!(config.formats().is_err());
    }

    #[test]
    fn test_default_toml_parses() {
        let config: SplitlensConfig = toml::from_str(&SplitlensConfig::default_toml()).unwrap();
        assert_eq!(config, SplitlensConfig::default());
    }

    #[test]
    fn test_discover_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE),
            "[codec]\nprecision = 4\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = SplitlensConfig::discover_from(&nested).unwrap();
        assert_eq!(config.codec.precision, 4);
    }

    #[test]
    fn test_discover_ignores_malformed_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE), "[codec\nprecision = ").unwrap();

        assert_eq!(SplitlensConfig::discover_from(root.path()), None);
    }
}
