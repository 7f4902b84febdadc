// Word-level diff between two aligned sentences.
// Pure functions: two strings in, tagged segments or a ratio out.
// Segments compare two parallel texts; neither side is "old" or "new".

use crate::lcs::lcs;
use crate::model::{DiffResult, DiffSegment, SegmentKind};
use crate::tokenize::tokenize;

/// Tag each token of both texts as matched or one-sided and merge runs.
pub fn word_diff(source: &str, target: &str) -> DiffResult {
    let src_tokens = tokenize(source);
    let tgt_tokens = tokenize(target);
    let matches = lcs(&src_tokens, &tgt_tokens);

    let mut src_matched = vec![false; src_tokens.len()];
    let mut tgt_matched = vec![false; tgt_tokens.len()];
    for &(i, j) in &matches {
        src_matched[i] = true;
        tgt_matched[j] = true;
    }

    DiffResult {
        source: merge_segments(&src_tokens, &src_matched, SegmentKind::SourceOnly),
        target: merge_segments(&tgt_tokens, &tgt_matched, SegmentKind::TargetOnly),
    }
}

/// Collapse consecutive tokens with the same tag into one space-joined
/// segment. Tokens keep their original spelling.
fn merge_segments(tokens: &[&str], matched: &[bool], unmatched_kind: SegmentKind) -> Vec<DiffSegment> {
    let mut merged: Vec<DiffSegment> = Vec::new();

    for (token, &is_match) in tokens.iter().zip(matched) {
        let kind = if is_match { SegmentKind::Match } else { unmatched_kind };
        if let Some(current) = merged.last_mut().filter(|s| s.kind == kind) {
            current.text.push(' ');
            current.text.push_str(token);
            continue;
        }
        merged.push(DiffSegment {
            text: (*token).to_string(),
            kind,
        });
    }

    merged
}

/// Dice-style ratio `2·|matches| / (|A| + |B|)` over tokens, in `[0, 1]`.
/// Two empty texts are identical (1); one empty text shares nothing (0).
pub fn text_similarity(source: &str, target: &str) -> f64 {
    let src_tokens = tokenize(source);
    let tgt_tokens = tokenize(target);

    match (src_tokens.is_empty(), tgt_tokens.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let matches = lcs(&src_tokens, &tgt_tokens);
    (2 * matches.len()) as f64 / (src_tokens.len() + tgt_tokens.len()) as f64
}
