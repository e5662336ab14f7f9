//! `.lss` XML extraction
//!
//! The layout read here:
//!
//! ```text
//! <Run version="1.7.0">
//!   <GameName/> <CategoryName/> <LayoutPath/> <Offset/>
//!   <AttemptHistory>
//!     <Attempt id="1" started="09/15/2022 03:47:14" ended="...">
//!       <RealTime>00:28:54.1230000</RealTime>        (finished runs only)
//!     </Attempt>
//!   </AttemptHistory>
//!   <Segments>
//!     <Segment>
//!       <Name/>
//!       <SplitTimes><SplitTime name="Personal Best"><RealTime/></SplitTime></SplitTimes>
//!       <BestSegmentTime><RealTime/></BestSegmentTime>
//!       <SegmentHistory><Time id="1"><RealTime/></Time></SegmentHistory>
//!     </Segment>
//!   </Segments>
//! </Run>
//! ```

use crate::document::LssDocument;
use crate::error::LssError;
use chrono::NaiveDateTime;
use roxmltree::{Document, Node};
use splitlens_core::{AttemptId, AttemptRecord, RunInput, RunMetadata, SegmentInput};
use std::path::Path;
use tracing::{debug, warn};

/// Timestamp layout of `started`/`ended` attributes
pub const DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Comparison holding the personal-best split times
pub const PERSONAL_BEST: &str = "Personal Best";

/// Read and parse a `.lss` file
pub fn read_lss_file(path: impl AsRef<Path>) -> Result<LssDocument, LssError> {
    let path = path.as_ref();
    let is_lss = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("lss"));
    if !is_lss {
        return Err(LssError::Extension(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| LssError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_lss(&text)?;
    debug!(
        path = %path.display(),
        segments = document.segment_count(),
        attempts = document.attempts_started(),
        "parsed split file"
    );
    Ok(document)
}

/// Parse `.lss` XML text
pub fn parse_lss(text: &str) -> Result<LssDocument, LssError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let xml = Document::parse(text)?;

    let run = xml.root_element();
    if !run.has_tag_name("Run") {
        return Err(LssError::MissingRun(run.tag_name().name().to_string()));
    }

    let metadata = RunMetadata {
        game_name: child_text(run, "GameName"),
        category_name: child_text(run, "CategoryName"),
        layout_path: child_text(run, "LayoutPath"),
        timer_offset: child_text(run, "Offset"),
    };

    let attempts = match child(run, "AttemptHistory") {
        Some(history) => elements(history, "Attempt")
            .map(read_attempt)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let segments = match child(run, "Segments") {
        Some(segments) => elements(segments, "Segment")
            .map(read_segment)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let input = RunInput {
        metadata,
        attempts,
        segments,
    };
    Ok(LssDocument::new(
        run.attribute("version").map(str::to_string),
        input,
    ))
}

fn read_attempt(node: Node<'_, '_>) -> Result<AttemptRecord, LssError> {
    let id = attempt_id(node)?;
    Ok(AttemptRecord {
        id,
        started: date_attribute(node, id, "started")?,
        ended: date_attribute(node, id, "ended")?,
        real_time: child(node, "RealTime").map(|n| n.text().unwrap_or_default().trim().to_string()),
    })
}

fn read_segment(node: Node<'_, '_>) -> Result<SegmentInput, LssError> {
    let name = child_text(node, "Name");
    let pb_split = child(node, "SplitTimes").and_then(|times| {
        elements(times, "SplitTime").find(|t| t.attribute("name") == Some(PERSONAL_BEST))
    });
    if pb_split.is_none() {
        warn!(segment = %name, "segment has no {} comparison", PERSONAL_BEST);
    }
    let pb_split_time = pb_split
        .map(|t| child_text(t, "RealTime"))
        .unwrap_or_default();

    let best_segment_time = child(node, "BestSegmentTime")
        .map(|b| child_text(b, "RealTime"))
        .unwrap_or_default();

    let history = match child(node, "SegmentHistory") {
        Some(history) => elements(history, "Time")
            .map(|time| -> Result<_, LssError> {
                Ok((attempt_id(time)?, child_text(time, "RealTime")))
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(SegmentInput {
        name,
        pb_split_time,
        best_segment_time,
        history,
    })
}

fn attempt_id(node: Node<'_, '_>) -> Result<AttemptId, LssError> {
    let raw = node.attribute("id").unwrap_or_default();
    raw.parse()
        .map_err(|_| LssError::AttemptId(raw.to_string()))
}

fn date_attribute(
    node: Node<'_, '_>,
    attempt: AttemptId,
    field: &'static str,
) -> Result<Option<NaiveDateTime>, LssError> {
    match node.attribute(field).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDateTime::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|source| LssError::Date {
                attempt,
                field,
                value: value.to_string(),
                source,
            }),
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.has_tag_name(name))
}

fn child_text(node: Node<'_, '_>, name: &str) -> String {
    child(node, name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}
