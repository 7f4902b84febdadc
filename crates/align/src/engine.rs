use serde::Serialize;

use crate::aggregate::{build_correspondence, document_lines};
use crate::config::AlignConfig;
use crate::error::AlignError;
use crate::model::{AlignmentArtifact, ArtifactMeta, Correspondence};
use crate::natural::natural_cmp;
use crate::parse::parse_alignment_text;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One `[sourceCode, targetCode]` entry of the pair manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPair {
    pub source_code: String,
    pub target_code: String,
}

/// Parse the pair manifest: a JSON array of two-element code arrays.
pub fn parse_manifest(input: &str) -> Result<Vec<ManifestPair>, AlignError> {
    let pairs: Vec<(String, String)> =
        serde_json::from_str(input).map_err(|e| AlignError::ManifestParse(e.to_string()))?;
    Ok(pairs
        .into_iter()
        .map(|(source_code, target_code)| ManifestPair { source_code, target_code })
        .collect())
}

/// Pre-loaded file contents for one pair. `None` means the file could not
/// be read; ingestion substitutes an empty sequence and carries on.
#[derive(Debug, Clone)]
pub struct PairInput {
    pub source_code: String,
    pub target_code: String,
    pub alignment_text: Option<String>,
    pub source_text: Option<String>,
    pub target_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// What ingestion absorbed along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub pairs: usize,
    pub records: usize,
    pub skipped_lines: usize,
    /// `"{id}: {what}"` for every file that was unavailable.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct IngestOutput {
    pub artifact: AlignmentArtifact,
    pub report: IngestReport,
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run ingestion over pre-loaded pairs. Stamps the artifact with the current
/// time; everything else is a pure function of the inputs.
pub fn run(config: &AlignConfig, pairs: Vec<PairInput>) -> IngestOutput {
    let (correspondences, report) = build_correspondences(pairs);

    IngestOutput {
        artifact: AlignmentArtifact {
            metadata: ArtifactMeta {
                source: config.source.meta(),
                target: config.target.meta(),
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
            correspondences,
        },
        report,
    }
}

/// Build every correspondence, then order the collection by natural order
/// of the source code (stable, so manifest order breaks ties).
pub fn build_correspondences(pairs: Vec<PairInput>) -> (Vec<Correspondence>, IngestReport) {
    let mut report = IngestReport::default();
    let mut correspondences = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let corr = build_pair(pair, &mut report);
        log::info!(
            "{} <-> {}: {} alignments",
            corr.source.code,
            corr.target.code,
            corr.stats.total_alignments
        );
        correspondences.push(corr);
    }

    correspondences.sort_by(|a, b| natural_cmp(&a.source.code, &b.source.code));
    (correspondences, report)
}

fn build_pair(pair: PairInput, report: &mut IngestReport) -> Correspondence {
    let id = crate::model::correspondence_id(&pair.source_code, &pair.target_code);
    report.pairs += 1;

    let mut unavailable = |what: String| {
        log::warn!("{id}: {what} unavailable, using empty sequence");
        report.missing.push(format!("{id}: {what}"));
    };

    let source_text = match pair.source_text {
        Some(content) => document_lines(&content),
        None => {
            unavailable(format!("source document {}", pair.source_code));
            Vec::new()
        }
    };
    let target_text = match pair.target_text {
        Some(content) => document_lines(&content),
        None => {
            unavailable(format!("target document {}", pair.target_code));
            Vec::new()
        }
    };
    let parsed = match pair.alignment_text {
        Some(content) => parse_alignment_text(&content),
        None => {
            unavailable("alignment file".to_string());
            Default::default()
        }
    };

    if parsed.skipped > 0 {
        log::warn!("{id}: skipped {} malformed alignment line(s)", parsed.skipped);
    }
    report.records += parsed.records.len();
    report.skipped_lines += parsed.skipped;

    build_correspondence(
        &pair.source_code,
        &pair.target_code,
        parsed.records,
        source_text,
        target_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlignmentType;

    fn pair(src: &str, tgt: &str, align: Option<&str>) -> PairInput {
        PairInput {
            source_code: src.into(),
            target_code: tgt.into(),
            alignment_text: align.map(String::from),
            source_text: Some("Line zero.\nLine one.\n".into()),
            target_text: Some("Ligne zero.\nLine one.\n".into()),
        }
    }

    #[test]
    fn manifest_pairs() {
        let pairs = parse_manifest(r#"[["A0111","A01.11"],["A0112","A01.12"]]"#).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].source_code, "A0111");
        assert_eq!(pairs[1].target_code, "A01.12");
    }

    #[test]
    fn manifest_rejects_wrong_shape() {
        assert!(matches!(
            parse_manifest(r#"{"pairs": []}"#),
            Err(AlignError::ManifestParse(_))
        ));
        assert!(parse_manifest(r#"[["A", "B", "C"]]"#).is_err());
        assert!(parse_manifest("").is_err());
    }

    #[test]
    fn collection_sorted_naturally() {
        let pairs = vec![
            pair("A10", "X", Some("[0]:[0]:1")),
            pair("A2", "X", Some("[0]:[0]:1")),
            pair("A1", "X", Some("[0]:[0]:1")),
        ];
        let (corrs, report) = build_correspondences(pairs);
        let codes: Vec<&str> = corrs.iter().map(|c| c.source.code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "A2", "A10"]);
        assert_eq!(report.pairs, 3);
        assert_eq!(report.records, 3);
    }

    #[test]
    fn missing_files_degrade() {
        let input = PairInput {
            source_code: "A1".into(),
            target_code: "B1".into(),
            alignment_text: None,
            source_text: None,
            target_text: Some("only line".into()),
        };
        let (corrs, report) = build_correspondences(vec![input]);
        assert_eq!(corrs.len(), 1);
        let c = &corrs[0];
        assert!(c.source_text.is_empty());
        assert_eq!(c.target_text, vec!["only line"]);
        assert!(c.alignments.is_empty());
        assert_eq!(c.stats.total_alignments, 0);
        assert_eq!(report.missing.len(), 2);
        assert!(report.missing[0].contains("source document A1"));
        assert!(report.missing[1].contains("alignment file"));
    }

    #[test]
    fn malformed_lines_counted() {
        let (corrs, report) =
            build_correspondences(vec![pair("A1", "B1", Some("[1]:[1]:0.9\ngarbage\n[]:[0]:0\n"))]);
        assert_eq!(report.skipped_lines, 1);
        assert_eq!(report.records, 2);
        let c = &corrs[0];
        assert_eq!(c.alignments[0].kind(), AlignmentType::Unmatched);
        assert_eq!(c.alignments[1].kind(), AlignmentType::OneToOne);
        assert_eq!(c.stats.types.total(), c.stats.total_alignments);
    }

    #[test]
    fn rebuild_is_identical() {
        let make = || {
            vec![
                pair("B7", "Y", Some("[1,2]:[0]:0.8\n[0]:[1]:0.6")),
                pair("A3", "X", Some("[]:[2]:0\n[0]:[0,1]:0.91")),
            ]
        };
        let (first, _) = build_correspondences(make());
        let (second, _) = build_correspondences(make());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn byte_order_marks_do_not_cost_records() {
        let input = PairInput {
            source_code: "A1".into(),
            target_code: "B1".into(),
            alignment_text: Some("\u{feff}[0]:[0]:0.9\n[1]:[1]:0.8\n".into()),
            source_text: Some("\u{feff}Growing of rice.\nOther.\n".into()),
            target_text: Some("Growing of rice.\nOther.\n".into()),
        };
        let (corrs, report) = build_correspondences(vec![input]);
        assert_eq!(report.records, 2);
        assert_eq!(report.skipped_lines, 0);

        let c = &corrs[0];
        assert_eq!(c.source_text[0], "Growing of rice.");
        assert_eq!(c.source_text, c.target_text);
    }
}
