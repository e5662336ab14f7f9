//! Text Report
//!
//! Plain-text summary in the layout LiveSplit users already know from the
//! `<name>_output.txt` files: a header block, two notes, then one numbered
//! entry per segment.

use splitlens_core::{RunSummary, Segment, TimeCodec, TimeRecord};

/// Render the text report with the default codec precision
pub fn generate_text_report(summary: &RunSummary) -> String {
    generate_text_report_with(summary, &TimeCodec::default())
}

/// Render the text report with an explicit codec
pub fn generate_text_report_with(summary: &RunSummary, codec: &TimeCodec) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Name:      {}\n", summary.game_name));
    output.push_str(&format!("Category Name:  {}\n", summary.category_name));
    output.push_str(&format!("Layout Path:    {}\n", summary.layout_path));
    output.push_str(&format!("Timer Offset:   {}\n", summary.timer_offset));
    output.push_str(&format!("Runs Started:   {}\n", summary.runs_started));
    output.push_str(&format!("Runs Finished:  {}\n", summary.runs_finished));
    output.push_str(&format!(
        "Total Runtime:  {}\n",
        codec.format(summary.total_runtime)
    ));
    output.push_str(&format!(
        "Total Playtime: {}\n",
        codec.format(summary.total_playtime)
    ));
    output.push_str(&format!(
        "Sum of Best:    {}\n",
        codec.format_optional(summary.sum_of_best())
    ));

    output.push_str("\nSegments\n");
    output.push_str(
        "\nNOTE: averages, medians, and standard deviations are more heavily weighted towards recent runs.\n",
    );
    output.push_str("\nNOTE: results may be incorrect if splits were rearranged/changed.\n");

    for (index, segment) in summary.segments.iter().enumerate() {
        push_segment(&mut output, index + 1, segment, codec);
    }

    output
}

fn push_segment(output: &mut String, number: usize, segment: &Segment, codec: &TimeCodec) {
    let stats = &segment.stats;

    output.push_str(&format!("{}. {}\n", number, segment.name));
    output.push_str(&format!(
        "    - Split Time (PB):    {}\n",
        codec.format_optional(segment.split_time_pb)
    ));
    output.push_str(&format!(
        "    - Segment Time (PB):  {}\n",
        codec.format_optional(segment.segment_pb)
    ));
    output.push_str(&format!(
        "    - Best Time:          {}\n",
        provenance(segment.gold.as_ref(), codec)
    ));
    output.push_str(&format!(
        "    - Worst Time:         {}\n",
        provenance(segment.worst.as_ref(), codec)
    ));
    output.push_str(&format!(
        "    - Average Time:       {}\n",
        codec.format_optional(stats.average)
    ));
    output.push_str(&format!(
        "    - Median Time:        {}\n",
        codec.format_optional(stats.median)
    ));
    output.push_str(&format!(
        "    - Std Deviation:      {}\n",
        codec.format_optional(stats.std_dev)
    ));
    output.push_str(&format!(
        "    - Possible Time Save: {}\n",
        codec.format_optional(segment.possible_time_save)
    ));
    output.push_str(&format!(
        "    - This segment is completed {} of the time.\n",
        stats.finished_rate
    ));
    output.push_str(&format!(
        "    - This segment is above average {} of the time.\n",
        stats.decent_rate
    ));

    if !stats.inflated_attempts.is_empty() {
        let ids: Vec<String> = stats
            .inflated_attempts
            .iter()
            .map(|id| id.to_string())
            .collect();
        output.push_str(&format!(
            "    - Inflated Attempts:  {}\n",
            ids.join(", ")
        ));
    }

    output.push('\n');
}

fn provenance(record: Option<&TimeRecord>, codec: &TimeCodec) -> String {
    match record {
        Some(r) => format!(
            "{}, on attempt {}, which started on {} at {}.",
            codec.format(r.time),
            r.attempt,
            r.run_date(),
            r.run_time()
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_summary;

    #[test]
    fn test_header_block() {
        let report = generate_text_report(&sample_summary());

        assert!(report.starts_with("Game Name:      Celeste\nCategory Name:  Any%\n"));
        assert!(report.contains("Runs Started:   4\n"));
        assert!(report.contains("Runs Finished:  2\n"));
        assert!(report.contains("Total Runtime:  02:00:00.00\n"));
        // Summit was never reached
        assert!(report.contains("Sum of Best:    \n"));
    }

    #[test]
    fn test_segment_entry() {
        let report = generate_text_report(&sample_summary());

        assert!(report.contains("1. Forsaken City\n"));
        assert!(report.contains(
            "    - Best Time:          00:10:00.00, on attempt 2, which started on 09/15/2022 at 12:00:00.\n"
        ));
        assert!(report.contains("    - Possible Time Save: 00:01:00.00\n"));
        assert!(report.contains("    - This segment is completed 100.00% of the time.\n"));
        assert!(report.contains("2. Old Site: A/B?\n"));
        assert!(report.contains("    - This segment is completed 50.00% of the time.\n"));
    }

    #[test]
    fn test_unreached_segment_entry() {
        let report = generate_text_report(&sample_summary());
        let summit = report.split("3. Summit\n").nth(1).unwrap();

        assert!(summit.contains("    - Best Time:          \n"));
        assert!(summit.contains("    - This segment is completed ? % of the time.\n"));
        assert!(summit.contains("    - This segment is above average 0 of the time.\n"));
    }

    #[test]
    fn test_precision_follows_codec() {
        let report = generate_text_report_with(&sample_summary(), &TimeCodec::new(3));
        assert!(report.contains("    - Split Time (PB):    00:10:00.000\n"));
    }
}
