//! Per-file pipeline
//!
//! read → build summary → create `<output>/<stem>/` → write the selected
//! formats → render charts. Files are processed one at a time; only the
//! per-segment statistics inside the builder run in parallel.

use anyhow::Context;
use splitlens_core::{RunSummary, TimeCodec, build_run_summary_with};
use splitlens_lss::read_lss_file;
use splitlens_report::{
    ChartConfig, OutputFormat, generate_history_csv, generate_json_report, generate_segments_csv,
    generate_text_report_with, render_charts,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Parent of the per-file output directories
    pub output_dir: PathBuf,
    /// Formats to write, in order
    pub formats: Vec<OutputFormat>,
    /// Duration codec for text and CSV output
    pub codec: TimeCodec,
    /// Chart size, `None` to skip charts
    pub charts: Option<ChartConfig>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            formats: OutputFormat::ALL.to_vec(),
            codec: TimeCodec::default(),
            charts: Some(ChartConfig::default()),
        }
    }
}

/// Artifacts produced for one split file
#[derive(Debug)]
pub struct ProcessedFile {
    /// Directory the artifacts were written to
    pub directory: PathBuf,
    /// Every written file, in write order
    pub written: Vec<PathBuf>,
    /// The computed summary
    pub summary: RunSummary,
}

/// Run the whole pipeline for one `.lss` file
pub fn process_file(path: &Path, settings: &PipelineSettings) -> anyhow::Result<ProcessedFile> {
    let document =
        read_lss_file(path).with_context(|| format!("failed to read {}", path.display()))?;
    let summary = build_run_summary_with(document.input(), &document)
        .with_context(|| format!("failed to analyse {}", path.display()))?;
    debug!(
        game = %summary.game_name,
        category = %summary.category_name,
        segments = summary.segments.len(),
        "built run summary"
    );

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "splits".to_string());
    let directory = settings.output_dir.join(&stem);
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("failed to create {}", directory.display()))?;
    info!(path = %directory.display(), "created output directory");

    let mut written = Vec::new();
    for format in &settings.formats {
        match format {
            OutputFormat::Text => {
                let report = generate_text_report_with(&summary, &settings.codec);
                let name = format!("{stem}_output.txt");
                written.push(write_artifact(&directory, &name, &report)?);
            }
            OutputFormat::Csv => {
                let segments = generate_segments_csv(&summary, &settings.codec)?;
                let name = format!("{stem}_segments.csv");
                written.push(write_artifact(&directory, &name, &segments)?);

                let history = generate_history_csv(&summary, &settings.codec)?;
                let name = format!("{stem}_history.csv");
                written.push(write_artifact(&directory, &name, &history)?);
            }
            OutputFormat::Json => {
                let json = generate_json_report(&summary)?;
                written.push(write_artifact(&directory, &format!("{stem}.json"), &json)?);
            }
        }
    }

    if let Some(chart_config) = &settings.charts {
        let charts = render_charts(&summary, &directory, chart_config)?;
        info!(count = charts.len(), path = %directory.display(), "rendered charts");
        written.extend(charts);
    }

    Ok(ProcessedFile {
        directory,
        written,
        summary,
    })
}

fn write_artifact(directory: &Path, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = directory.join(name);
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote report");
    Ok(path)
}

/// Process every file in order; a failing file is logged and skipped.
/// Returns the number of failures.
pub fn process_files(inputs: &[PathBuf], settings: &PipelineSettings) -> usize {
    let mut failures = 0;
    for path in inputs {
        if let Err(e) = process_file(path, settings) {
            error!("{:#}", e);
            failures += 1;
        }
    }
    failures
}

/// Prompt for split files until `q`/`quit` or end of input
pub fn prompt_loop<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    settings: &PipelineSettings,
) -> anyhow::Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "Enter the path to a valid .lss file (or \"q\" to quit): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let entry = line.trim().trim_matches('"');
        if entry.is_empty() {
            continue;
        }
        if entry.eq_ignore_ascii_case("q") || entry.eq_ignore_ascii_case("quit") {
            break;
        }

        match process_file(Path::new(entry), settings) {
            Ok(processed) => writeln!(
                output,
                "Wrote {} files to {}",
                processed.written.len(),
                processed.directory.display()
            )?,
            Err(e) => writeln!(output, "Error: {:#}", e)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLITS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Run version="1.7.0">
  <GameName>Refunct</GameName>
  <CategoryName>Any%</CategoryName>
  <Offset>00:00:00</Offset>
  <AttemptHistory>
    <Attempt id="1" started="01/02/2023 10:00:00" ended="01/02/2023 10:05:00">
      <RealTime>00:04:10.0000000</RealTime>
    </Attempt>
    <Attempt id="2" started="01/02/2023 10:10:00" ended="01/02/2023 10:12:00" />
  </AttemptHistory>
  <Segments>
    <Segment>
      <Name>Start</Name>
      <SplitTimes><SplitTime name="Personal Best"><RealTime>00:02:00.0000000</RealTime></SplitTime></SplitTimes>
      <SegmentHistory>
        <Time id="1"><RealTime>00:02:00.0000000</RealTime></Time>
        <Time id="2"><RealTime>00:02:05.0000000</RealTime></Time>
      </SegmentHistory>
    </Segment>
    <Segment>
      <Name>End</Name>
      <SplitTimes><SplitTime name="Personal Best"><RealTime>00:04:10.0000000</RealTime></SplitTime></SplitTimes>
      <SegmentHistory>
        <Time id="1"><RealTime>00:02:10.0000000</RealTime></Time>
      </SegmentHistory>
    </Segment>
  </Segments>
</Run>
"#;

    fn write_splits(dir: &Path) -> PathBuf {
        let path = dir.join("refunct.lss");
        std::fs::write(&path, SPLITS).unwrap();
        path
    }

    fn settings(output_dir: &Path) -> PipelineSettings {
        PipelineSettings {
            output_dir: output_dir.to_path_buf(),
            charts: None,
            ..PipelineSettings::default()
        }
    }

    #[test]
    fn test_process_file_writes_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let splits = write_splits(dir.path());

        let processed = process_file(&splits, &settings(dir.path())).unwrap();
        assert_eq!(processed.directory, dir.path().join("refunct"));

        let names: Vec<String> = processed
            .written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "refunct_output.txt",
                "refunct_segments.csv",
                "refunct_history.csv",
                "refunct.json",
            ]
        );

        let text = std::fs::read_to_string(&processed.written[0]).unwrap();
        assert!(text.starts_with("Game Name:      Refunct\n"));
        assert_eq!(processed.summary.runs_finished, 1);
    }

    #[test]
    fn test_process_file_only_selected_formats() {
        let dir = tempfile::tempdir().unwrap();
        let splits = write_splits(dir.path());
        let settings = PipelineSettings {
            formats: vec![OutputFormat::Json],
            ..settings(dir.path())
        };

        let processed = process_file(&splits, &settings).unwrap();
        assert_eq!(processed.written.len(), 1);
        assert!(!dir.path().join("refunct").join("refunct_output.txt").exists());
    }

    #[test]
    fn test_process_files_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let splits = write_splits(dir.path());
        let missing = dir.path().join("missing.lss");

        let failures = process_files(&[missing, splits], &settings(dir.path()));
        assert_eq!(failures, 1);
        assert!(dir.path().join("refunct").join("refunct.json").exists());
    }

    #[test]
    fn test_prompt_loop_reports_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let splits = write_splits(dir.path());
        let script = format!("notes.txt\n\n\"{}\"\nquit\nignored.lss\n", splits.display());

        let mut output = Vec::new();
        prompt_loop(script.as_bytes(), &mut output, &settings(dir.path())).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Error: failed to read notes.txt: invalid file format"));
        assert!(output.contains("Wrote 4 files to"));
        assert!(!output.contains("ignored.lss"));
    }

    #[test]
    fn test_prompt_loop_stops_at_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        prompt_loop("".as_bytes(), &mut output, &settings(dir.path())).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("(or \"q\" to quit)"));
    }
}
