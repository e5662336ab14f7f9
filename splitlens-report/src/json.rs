//! JSON Output

use serde::Serialize;
use splitlens_core::RunSummary;

/// Envelope written around the summary
#[derive(Debug, Clone, Serialize)]
pub struct ReportSchema<'a> {
    /// Schema identifier
    pub schema: &'static str,
    /// Schema version
    pub version: u32,
    /// The summary itself
    pub summary: &'a RunSummary,
}

/// Schema identifier written into every JSON report
pub const JSON_SCHEMA: &str = "splitlens.run-summary";

/// Current JSON schema version
pub const JSON_SCHEMA_VERSION: u32 = 1;

/// Generate a prettified JSON report.
///
/// Durations are serialized as `HH:MM:SS.ffffff` strings, rates as tagged
/// objects (`{"kind": "percent", "value": 66.67}`).
pub fn generate_json_report(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ReportSchema {
        schema: JSON_SCHEMA,
        version: JSON_SCHEMA_VERSION,
        summary,
    })
}
