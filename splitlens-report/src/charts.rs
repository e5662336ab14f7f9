//! SVG Charts
//!
//! One duration-over-attempt line chart per reached segment, three bar
//! charts comparing segments, and a run-duration line chart. Every render
//! call takes its size from an explicit [`ChartConfig`].

use crate::error::ReportError;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use regex::Regex;
use splitlens_core::{History, RunSummary, Segment, TimeCodec};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// Chart dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartConfig {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Strip characters that are not allowed in Windows file names
pub fn sanitize_segment_name(name: &str) -> String {
    static RESERVED: OnceLock<Regex> = OnceLock::new();
    RESERVED
        .get_or_init(|| Regex::new(r#"[\\/:"*?<>|]+"#).expect("reserved character class is valid"))
        .replace_all(name, "")
        .into_owned()
}

/// Render every chart of `summary` into `dir`, returning the written paths
pub fn render_charts(
    summary: &RunSummary,
    dir: &Path,
    config: &ChartConfig,
) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();

    for (index, segment) in summary.segments.iter().enumerate() {
        if !segment.is_reached() {
            continue;
        }
        let path = dir.join(format!(
            "graph_segment{}_{}.svg",
            index,
            sanitize_segment_name(&segment.name)
        ));
        let line = LineChart {
            title: &segment.name,
            y_desc: "Segment Time",
            history: &segment.history,
            markers: false,
        };
        render(&path, |p| draw_line_chart(p, config, &line))?;
        written.push(path);
    }

    let reached: Vec<&Segment> = summary.segments.iter().filter(|s| s.is_reached()).collect();
    if !reached.is_empty() {
        let bars: [(&str, BarChart<'_>); 3] = [
            (
                "graph_stdev.svg",
                BarChart {
                    title: "Standard Deviation for Each Segment",
                    y_desc: "Standard Deviation",
                    segments: &reached,
                    value: |s| seconds(s.stats.std_dev),
                    color: BLUE,
                    percent: false,
                },
            ),
            (
                "graph_decent_segs.svg",
                BarChart {
                    title: "Rate of Above Average Segments",
                    y_desc: "Above Average Rate",
                    segments: &reached,
                    value: |s| s.stats.decent_rate.plot_value(),
                    color: GREEN,
                    percent: true,
                },
            ),
            (
                "graph_possible_time_save.svg",
                BarChart {
                    title: "Possible Time Save in PB",
                    y_desc: "Possible Time Save",
                    segments: &reached,
                    value: |s| seconds(s.possible_time_save),
                    color: BLUE,
                    percent: false,
                },
            ),
        ];

        for (file, chart) in &bars {
            let path = dir.join(file);
            render(&path, |p| draw_bar_chart(p, config, chart))?;
            written.push(path);
        }
    }

    if !summary.run_history.is_empty() {
        let path = dir.join("graph_runs_over_time.svg");
        let line = LineChart {
            title: "Run Duration Over Time",
            y_desc: "Real Time",
            history: &summary.run_history,
            markers: true,
        };
        render(&path, |p| draw_line_chart(p, config, &line))?;
        written.push(path);
    }

    Ok(written)
}

struct LineChart<'a> {
    title: &'a str,
    y_desc: &'a str,
    history: &'a History,
    markers: bool,
}

struct BarChart<'a> {
    title: &'a str,
    y_desc: &'a str,
    segments: &'a [&'a Segment],
    value: fn(&Segment) -> f64,
    color: RGBColor,
    percent: bool,
}

fn render(path: &Path, draw: impl FnOnce(&Path) -> DrawResult) -> Result<(), ReportError> {
    draw(path).map_err(|e| ReportError::Chart {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn seconds(time: Option<splitlens_core::SplitTime>) -> f64 {
    time.map_or(0.0, |t| t.as_secs_f64())
}

fn font(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
}

fn axis_time(seconds: f64) -> String {
    TimeCodec::new(0).format_seconds(seconds)
}

fn y_upper(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

fn draw_line_chart(path: &Path, config: &ChartConfig, line: &LineChart<'_>) -> DrawResult {
    let points: Vec<(f64, f64)> = line
        .history
        .iter()
        .map(|e| (e.attempt.0 as f64, e.time.as_secs_f64()))
        .collect();

    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = if x_min < x_max {
        (x_min, x_max)
    } else {
        (x_min - 1.0, x_min + 1.0)
    };
    let y_max = y_upper(points.iter().map(|p| p.1).fold(0.0, f64::max));

    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(line.title, font(24.0))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Run")
        .y_desc(line.y_desc)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| axis_time(*y))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    if line.markers {
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, 3, BLUE.filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

fn draw_bar_chart(path: &Path, config: &ChartConfig, bars: &BarChart<'_>) -> DrawResult {
    let names: Vec<String> = bars.segments.iter().map(|s| s.name.clone()).collect();
    let values: Vec<f64> = bars.segments.iter().map(|&s| (bars.value)(s)).collect();
    let y_max = if bars.percent {
        110.0
    } else {
        y_upper(values.iter().copied().fold(0.0, f64::max))
    };

    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(bars.title, font(24.0))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d((0..names.len()).into_segmented(), 0.0..y_max)?;

    let percent = bars.percent;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len())
        .x_desc("Segment")
        .y_desc(bars.y_desc)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => names.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|y| {
            if percent {
                format!("{:.0}%", y)
            } else {
                axis_time(*y)
            }
        })
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
        Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), v)],
            bars.color.filled(),
        )
    }))?;

    if percent {
        chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
            Text::new(
                format!("{:.2}", v),
                (SegmentValue::CenterOf(i), v + 1.0),
                font(14.0),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}
