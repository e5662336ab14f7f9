//! Shared summary used by the emitter tests

use chrono::NaiveDate;
use splitlens_core::{
    AttemptId, AttemptRecord, RunInput, RunMetadata, RunSummary, SegmentInput, build_run_summary,
};

fn segment(name: &str, pb: &str, history: &[(i64, &str)]) -> SegmentInput {
    SegmentInput {
        name: name.to_string(),
        pb_split_time: pb.to_string(),
        best_segment_time: String::new(),
        history: history
            .iter()
            .map(|&(id, t)| (AttemptId(id), t.to_string()))
            .collect(),
    }
}

pub(crate) fn sample_summary() -> RunSummary {
    let day = NaiveDate::from_ymd_opt(2022, 9, 15).unwrap();
    let attempts = (1..=4)
        .map(|id| AttemptRecord {
            id: AttemptId(id),
            started: day.and_hms_opt(10 + id as u32, 0, 0),
            ended: day.and_hms_opt(10 + id as u32, 30, 0),
            real_time: (id % 2 == 0).then(|| format!("00:2{id}:00.00")),
        })
        .collect();

    let input = RunInput {
        metadata: RunMetadata {
            game_name: "Celeste".to_string(),
            category_name: "Any%".to_string(),
            layout_path: "celeste.lsl".to_string(),
            timer_offset: "00:00:00".to_string(),
        },
        attempts,
        segments: vec![
            segment(
                "Forsaken City",
                "00:10:00.00",
                &[(1, "00:10:30.00"), (2, "00:10:00.00"), (3, "00:11:00.00"), (4, "00:10:15.00")],
            ),
            segment("Old Site: A/B?", "00:24:00.00", &[(2, "00:14:00.00"), (4, "00:14:30.00")]),
            segment("Summit", "", &[]),
        ],
    };
    build_run_summary(&input).unwrap()
}
