use crate::model::{
    correspondence_id, AlignmentRecord, CodeRef, Correspondence, CorrespondenceStats, TypeCounts,
};

impl CorrespondenceStats {
    /// Aggregate statistics over one pair's records.
    ///
    /// `avg_score` sums the scores of aligned records with a positive score
    /// and divides by the number of aligned records, so an aligned record
    /// scored 0 lowers the average. Rounded to 3 decimals.
    pub fn from_records(records: &[AlignmentRecord]) -> Self {
        let mut types = TypeCounts::default();
        let mut aligned_count = 0;
        let mut score_sum = 0.0;

        for r in records {
            types.increment(r.kind());
            if r.is_aligned() {
                aligned_count += 1;
                if r.score() > 0.0 {
                    score_sum += r.score();
                }
            }
        }

        let avg_score = if aligned_count > 0 {
            round3(score_sum / aligned_count as f64)
        } else {
            0.0
        };

        Self {
            total_alignments: records.len(),
            aligned_count,
            avg_score,
            types,
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Order records by sort key. Stable: equal keys keep input order.
pub fn sort_records(records: &mut [AlignmentRecord]) {
    records.sort_by_key(AlignmentRecord::sort_key);
}

/// Assemble one correspondence from parsed records and both documents.
pub fn build_correspondence(
    source_code: &str,
    target_code: &str,
    mut records: Vec<AlignmentRecord>,
    source_text: Vec<String>,
    target_text: Vec<String>,
) -> Correspondence {
    sort_records(&mut records);
    let stats = CorrespondenceStats::from_records(&records);

    Correspondence {
        id: correspondence_id(source_code, target_code),
        source: CodeRef { code: source_code.to_string() },
        target: CodeRef { code: target_code.to_string() },
        source_text,
        target_text,
        alignments: records,
        stats,
    }
}

/// Split a document into lines (`\n` or `\r\n`). A leading byte-order mark
/// and a trailing blank line are dropped; blank lines elsewhere keep their
/// index.
pub fn document_lines(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines: Vec<String> = content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}
