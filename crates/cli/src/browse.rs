//! `salign list` / `salign show`: read-only views over a built artifact.

use std::path::{Path, PathBuf};

use scale_align::browse::{visible_correspondences, BrowseQuery, Direction, Selection, SortBy};
use scale_align::model::{AlignmentType, CorrespondenceStats, DiffResult};
use scale_align::{text_similarity, word_diff, AlignmentArtifact, Correspondence};
use serde::Serialize;

use crate::compare::print_diff;
use crate::exit_codes::{EXIT_BROWSE_ARTIFACT, EXIT_BROWSE_EMPTY, EXIT_BROWSE_NOT_FOUND};
use crate::CliError;

fn load_artifact(path: &Path) -> Result<AlignmentArtifact, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(EXIT_BROWSE_ARTIFACT, format!("cannot read {}: {e}", path.display()))
            .with_hint("build one first with `salign build <config>`")
    })?;
    AlignmentArtifact::from_json(&content).map_err(CliError::align)
}

fn nothing_matches(search: &str) -> CliError {
    if search.trim().is_empty() {
        CliError::new(EXIT_BROWSE_EMPTY, "artifact has no correspondences")
    } else {
        CliError::new(EXIT_BROWSE_EMPTY, format!("no correspondence matches '{}'", search.trim()))
    }
}

#[derive(Serialize)]
struct ListRow<'a> {
    id: &'a str,
    source: &'a str,
    target: &'a str,
    stats: &'a CorrespondenceStats,
}

pub fn cmd_list(
    artifact_path: PathBuf,
    search: String,
    sort: SortBy,
    json_output: bool,
) -> Result<(), CliError> {
    let artifact = load_artifact(&artifact_path)?;
    let query = BrowseQuery::new(search, sort);
    let visible = visible_correspondences(&artifact.correspondences, &query);

    if visible.is_empty() {
        return Err(nothing_matches(&query.search));
    }

    if json_output {
        let rows: Vec<ListRow> = visible
            .iter()
            .map(|c| ListRow {
                id: &c.id,
                source: &c.source.code,
                target: &c.target.code,
                stats: &c.stats,
            })
            .collect();
        let json = serde_json::to_string_pretty(&rows)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    let id_width = visible.iter().map(|c| c.id.len()).max().unwrap_or(0).max(2);
    println!("{:<id_width$}  {:>7}  {:>5}", "ID", "ALIGNED", "AVG");
    for c in &visible {
        println!(
            "{:<id_width$}  {:>7}  {:>5.3}",
            c.id,
            format!("{}/{}", c.stats.aligned_count, c.stats.total_alignments),
            c.stats.avg_score,
        );
    }
    eprintln!(
        "{} of {} correspondences ({} -> {})",
        visible.len(),
        artifact.correspondences.len(),
        artifact.metadata.source.name,
        artifact.metadata.target.name,
    );
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlignmentView<'a> {
    #[serde(rename = "type")]
    kind: AlignmentType,
    score: f64,
    src_lines: &'a [usize],
    tgt_lines: &'a [usize],
    diff: DiffResult,
    similarity: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOutput<'a> {
    id: &'a str,
    source: &'a str,
    target: &'a str,
    stats: &'a CorrespondenceStats,
    alignments: Vec<AlignmentView<'a>>,
}

fn alignment_views(corr: &Correspondence) -> Vec<AlignmentView<'_>> {
    corr.alignments
        .iter()
        .map(|record| {
            let source = corr.source_lines_of(record).join(" ");
            let target = corr.target_lines_of(record).join(" ");
            AlignmentView {
                kind: record.kind(),
                score: record.score(),
                src_lines: record.source_lines(),
                tgt_lines: record.target_lines(),
                diff: word_diff(&source, &target),
                similarity: text_similarity(&source, &target),
            }
        })
        .collect()
}

fn fmt_lines(lines: &[usize]) -> String {
    let parts: Vec<String> = lines.iter().map(|n| n.to_string()).collect();
    format!("[{}]", parts.join(","))
}

pub fn cmd_show(
    artifact_path: PathBuf,
    id: Option<String>,
    step: Option<Direction>,
    search: String,
    sort: SortBy,
    json_output: bool,
) -> Result<(), CliError> {
    let artifact = load_artifact(&artifact_path)?;
    let query = BrowseQuery::new(search, sort);
    let visible = visible_correspondences(&artifact.correspondences, &query);

    let mut selection = Selection::new();
    if let Some(id) = id {
        if artifact.find(&id).is_none() {
            return Err(CliError::new(EXIT_BROWSE_NOT_FOUND, format!("no correspondence '{id}'"))
                .with_hint("run `salign list` to see available ids"));
        }
        selection.select(id);
    }

    match step {
        Some(direction) => selection.navigate(direction, &visible),
        None if selection.selected_id().is_none() => selection.navigate(Direction::Down, &visible),
        None => {}
    }

    let Some(corr) = selection.selected(&artifact.correspondences) else {
        return Err(nothing_matches(&query.search));
    };
    let views = alignment_views(corr);

    if json_output {
        let out = ShowOutput {
            id: &corr.id,
            source: &corr.source.code,
            target: &corr.target.code,
            stats: &corr.stats,
            alignments: views,
        };
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    let position = visible.iter().position(|c| c.id == corr.id);
    println!("{}  {} -> {}", corr.id, corr.source.code, corr.target.code);
    println!(
        "  {}/{} aligned, avg score {:.3}",
        corr.stats.aligned_count, corr.stats.total_alignments, corr.stats.avg_score
    );
    for view in &views {
        println!();
        println!(
            "  {:<9} {:.3}  {} -> {}",
            view.kind.as_str(),
            view.score,
            fmt_lines(view.src_lines),
            fmt_lines(view.tgt_lines),
        );
        print_diff(&view.diff, view.similarity, "    ");
    }

    match position {
        Some(idx) => eprintln!("{} of {} listed", idx + 1, visible.len()),
        None => eprintln!("not in the current listing"),
    }
    Ok(())
}
