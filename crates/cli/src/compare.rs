//! `salign diff`: word-level comparison of two sentences.

use scale_align::model::{DiffResult, DiffSegment, SegmentKind};
use scale_align::{text_similarity, word_diff};
use serde::Serialize;

use crate::CliError;

#[derive(Serialize)]
struct DiffOutput<'a> {
    source: &'a [DiffSegment],
    target: &'a [DiffSegment],
    similarity: f64,
}

/// Render segments inline, wrapping source-only runs in `[-…-]` and
/// target-only runs in `{+…+}`.
pub(crate) fn render_segments(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(|seg| match seg.kind {
            SegmentKind::Match => seg.text.clone(),
            SegmentKind::SourceOnly => format!("[-{}-]", seg.text),
            SegmentKind::TargetOnly => format!("{{+{}+}}", seg.text),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn print_diff(diff: &DiffResult, similarity: f64, indent: &str) {
    println!("{indent}- {}", render_segments(&diff.source));
    println!("{indent}+ {}", render_segments(&diff.target));
    println!("{indent}similarity: {similarity:.3}");
}

pub fn cmd_diff(source: &str, target: &str, json_output: bool) -> Result<(), CliError> {
    let diff = word_diff(source, target);
    let similarity = text_similarity(source, target);

    if json_output {
        let out = DiffOutput { source: &diff.source, target: &diff.target, similarity };
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else {
        print_diff(&diff, similarity, "");
    }
    Ok(())
}
