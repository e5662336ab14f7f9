#![warn(missing_docs)]
//! Splitlens Report - Reporting and Visualization
//!
//! Generates the output artifacts of one run summary:
//! - Text (the familiar `_output.txt` layout)
//! - CSV (segment table and long-format history)
//! - JSON (machine-readable dump of the whole summary)
//! - SVG charts

mod charts;
mod error;
#[cfg(test)]
mod fixtures;
mod json;
mod tables;
mod text;

pub use charts::{ChartConfig, render_charts, sanitize_segment_name};
pub use error::ReportError;
pub use json::{JSON_SCHEMA, JSON_SCHEMA_VERSION, ReportSchema, generate_json_report};
pub use tables::{generate_history_csv, generate_segments_csv};
pub use text::{generate_text_report, generate_text_report_with};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Plain-text report
    Text,
    /// JSON dump of the summary
    Json,
    /// Segment and history CSV tables
    Csv,
}

impl OutputFormat {
    /// Every format, in write order
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Text, OutputFormat::Csv, OutputFormat::Json];
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "human" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
    }
}
