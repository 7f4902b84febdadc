//! Alignment-line parser.
//!
//! Each line of an alignment file has the form `[i1,i2,...]:[j1,j2,...]:score`
//! where either bracketed list may be empty. Lines that don't match are
//! dropped; they never fail the batch.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::AlignmentRecord;

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only
    RE.get_or_init(|| Regex::new(r"^\[([0-9,]*)\]:\[([0-9,]*)\]:([0-9.]+)$").unwrap())
}

/// Parse one alignment line. Returns `None` when the line is not parseable.
pub fn parse_alignment_line(line: &str) -> Option<AlignmentRecord> {
    let caps = line_regex().captures(line)?;

    let source_lines = parse_index_list(&caps[1])?;
    let target_lines = parse_index_list(&caps[2])?;

    let raw_score = &caps[3];
    let score = match leading_number(raw_score) {
        Some(s) => s,
        None => {
            log::warn!("alignment line {line:?}: non-numeric score {raw_score:?}, using 0");
            0.0
        }
    };

    let record = AlignmentRecord::new(source_lines, target_lines, score);
    if record.is_none() {
        log::debug!("alignment line {line:?}: no lines on either side, skipped");
    }
    record
}

/// `"1,2,3"` → `[1, 2, 3]`, `""` → `[]`. An empty element reads as line 0
/// (`"1,,2"` → `[1, 0, 2]`); an out-of-range integer makes the whole list
/// unparseable.
fn parse_index_list(list: &str) -> Option<Vec<usize>> {
    if list.is_empty() {
        return Some(Vec::new());
    }
    list.split(',')
        .map(|n| if n.is_empty() { Some(0) } else { n.parse::<usize>().ok() })
        .collect()
}

/// Value of the longest `digits[.digits]` prefix: `"1.2.3"` → 1.2,
/// `"0.87."` → 0.87. `None` when the prefix holds no digit (`"."`).
fn leading_number(raw: &str) -> Option<f64> {
    let int_end = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let mut end = int_end;
    if let Some(frac) = raw[int_end..].strip_prefix('.') {
        end += 1 + frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
    }
    let prefix = &raw[..end];
    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Line trim that also drops a byte-order mark.
fn trim_line(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Records parsed from one alignment file, in file order.
#[derive(Debug, Clone, Default)]
pub struct ParsedAlignments {
    pub records: Vec<AlignmentRecord>,
    /// Non-blank lines that did not parse.
    pub skipped: usize,
}

/// Parse every line of an alignment file. Lines are trimmed (including a
/// leading byte-order mark); blank lines are ignored and don't count as
/// skipped.
pub fn parse_alignment_text(content: &str) -> ParsedAlignments {
    let mut out = ParsedAlignments::default();

    for (idx, raw) in content.lines().enumerate() {
        let line = trim_line(raw);
        if line.is_empty() {
            continue;
        }
        match parse_alignment_line(line) {
            Some(record) => out.records.push(record),
            None => {
                log::debug!("line {}: not an alignment record: {line:?}", idx + 1);
                out.skipped += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlignmentType;

    #[test]
    fn many_to_one() {
        let r = parse_alignment_line("[1,2]:[3]:0.87").unwrap();
        assert_eq!(r.source_lines(), &[1, 2]);
        assert_eq!(r.target_lines(), &[3]);
        assert_eq!(r.score(), 0.87);
        assert_eq!(r.kind(), AlignmentType::ManyToOne);
        assert_eq!(r.sort_key(), 1);
    }

    #[test]
    fn unmatched_source_side() {
        let r = parse_alignment_line("[]:[4,5]:0").unwrap();
        assert_eq!(r.kind(), AlignmentType::Unmatched);
        assert_eq!(r.sort_key(), 4);
        assert_eq!(r.score(), 0.0);
    }

    #[test]
    fn one_to_many_and_many_to_many() {
        assert_eq!(
            parse_alignment_line("[0]:[0,1]:0.5").unwrap().kind(),
            AlignmentType::OneToMany
        );
        assert_eq!(
            parse_alignment_line("[2,3]:[4,5,6]:0.61").unwrap().kind(),
            AlignmentType::ManyToMany
        );
        assert_eq!(
            parse_alignment_line("[7]:[8]:1").unwrap().kind(),
            AlignmentType::OneToOne
        );
    }

    #[test]
    fn garbage_rejected() {
        assert!(parse_alignment_line("not-a-line").is_none());
        assert!(parse_alignment_line("[1, 2]:[3]:0.5").is_none());
        assert!(parse_alignment_line("[1]:[3]:-0.5").is_none());
        assert!(parse_alignment_line("[1]:[3]").is_none());
        assert!(parse_alignment_line("[a]:[3]:0.5").is_none());
        assert!(parse_alignment_line(" [1]:[3]:0.5").is_none());
    }

    #[test]
    fn both_sides_empty_rejected() {
        assert!(parse_alignment_line("[]:[]:0.3").is_none());
    }

    #[test]
    fn empty_list_element_reads_as_zero() {
        let r = parse_alignment_line("[1,,2]:[3]:0.5").unwrap();
        assert_eq!(r.source_lines(), &[1, 0, 2]);
        assert_eq!(r.kind(), AlignmentType::ManyToOne);

        let r = parse_alignment_line("[1,]:[3]:0.5").unwrap();
        assert_eq!(r.source_lines(), &[1, 0]);

        let r = parse_alignment_line("[,3]:[1]:0").unwrap();
        assert_eq!(r.source_lines(), &[0, 3]);
        assert_eq!(r.sort_key(), 0);
    }

    #[test]
    fn out_of_range_index_rejected() {
        assert!(parse_alignment_line("[99999999999999999999999]:[3]:0.5").is_none());
    }

    #[test]
    fn score_takes_numeric_prefix() {
        assert_eq!(parse_alignment_line("[1]:[2]:1.2.3").unwrap().score(), 1.2);
        assert_eq!(parse_alignment_line("[1]:[2]:0.87.").unwrap().score(), 0.87);
        assert_eq!(parse_alignment_line("[1]:[2]:.5").unwrap().score(), 0.5);
        assert_eq!(parse_alignment_line("[1]:[2]:3.").unwrap().score(), 3.0);
    }

    #[test]
    fn score_without_digits_becomes_zero() {
        assert_eq!(parse_alignment_line("[1]:[2]:.").unwrap().score(), 0.0);
        assert_eq!(parse_alignment_line("[1]:[2]:..").unwrap().score(), 0.0);
    }

    #[test]
    fn byte_order_mark_ignored() {
        let parsed = parse_alignment_text("\u{feff}[0]:[0]:0.9\n[1]:[1]:0.8\n");
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.records[0].score(), 0.9);
    }

    #[test]
    fn text_skips_bad_lines_keeps_order() {
        let content = "[0]:[0]:0.9\r\n\n  [1,2]:[1]:0.8  \nbogus\n[]:[2]:0\n[]:[]:0\n";
        let parsed = parse_alignment_text(content);
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.skipped, 2);
        assert_eq!(parsed.records[0].source_lines(), &[0]);
        assert_eq!(parsed.records[1].kind(), AlignmentType::ManyToOne);
        assert_eq!(parsed.records[2].kind(), AlignmentType::Unmatched);
    }

    #[test]
    fn empty_text() {
        let parsed = parse_alignment_text("");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 0);
    }
}
