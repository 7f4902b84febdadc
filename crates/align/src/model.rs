use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alignment records
// ---------------------------------------------------------------------------

/// Cardinality of an alignment: how many lines take part on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlignmentType {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "1:N")]
    OneToMany,
    #[serde(rename = "N:1")]
    ManyToOne,
    #[serde(rename = "N:M")]
    ManyToMany,
    #[serde(rename = "unmatched")]
    Unmatched,
}

impl AlignmentType {
    pub const ALL: [AlignmentType; 5] = [
        Self::OneToOne,
        Self::OneToMany,
        Self::ManyToOne,
        Self::ManyToMany,
        Self::Unmatched,
    ];

    /// Classify by line counts on each side.
    pub fn from_counts(source: usize, target: usize) -> Self {
        match (source, target) {
            (0, _) | (_, 0) => Self::Unmatched,
            (1, 1) => Self::OneToOne,
            (1, _) => Self::OneToMany,
            (_, 1) => Self::ManyToOne,
            _ => Self::ManyToMany,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToMany => "1:N",
            Self::ManyToOne => "N:1",
            Self::ManyToMany => "N:M",
            Self::Unmatched => "unmatched",
        }
    }
}

impl std::fmt::Display for AlignmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key for records that reference no line at all. Never produced by the
/// parser, which rejects such records, but kept so ordering stays total.
pub const UNORDERABLE: usize = usize::MAX;

/// One mapping between source-document lines and target-document lines.
///
/// The cardinality type is derived from the line lists at construction and
/// cannot be set independently. A record with both lists empty cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlignmentWire")]
pub struct AlignmentRecord {
    #[serde(rename = "srcLines")]
    source_lines: Vec<usize>,
    #[serde(rename = "tgtLines")]
    target_lines: Vec<usize>,
    score: f64,
    #[serde(rename = "type")]
    kind: AlignmentType,
}

impl AlignmentRecord {
    /// Build a record, or `None` when neither side references a line.
    pub fn new(source_lines: Vec<usize>, target_lines: Vec<usize>, score: f64) -> Option<Self> {
        if source_lines.is_empty() && target_lines.is_empty() {
            return None;
        }
        let kind = AlignmentType::from_counts(source_lines.len(), target_lines.len());
        Some(Self {
            source_lines,
            target_lines,
            score,
            kind,
        })
    }

    pub fn source_lines(&self) -> &[usize] {
        &self.source_lines
    }

    pub fn target_lines(&self) -> &[usize] {
        &self.target_lines
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn kind(&self) -> AlignmentType {
        self.kind
    }

    pub fn is_aligned(&self) -> bool {
        self.kind != AlignmentType::Unmatched
    }

    /// Approximate reading position in the source document: the smallest
    /// source line, falling back to the smallest target line for records
    /// with no source side.
    pub fn sort_key(&self) -> usize {
        self.source_lines
            .iter()
            .min()
            .or_else(|| self.target_lines.iter().min())
            .copied()
            .unwrap_or(UNORDERABLE)
    }
}

/// Serialized shape of a record. `type` is accepted but recomputed.
#[derive(Deserialize)]
struct AlignmentWire {
    #[serde(rename = "srcLines")]
    source_lines: Vec<usize>,
    #[serde(rename = "tgtLines")]
    target_lines: Vec<usize>,
    score: f64,
}

impl TryFrom<AlignmentWire> for AlignmentRecord {
    type Error = String;

    fn try_from(wire: AlignmentWire) -> Result<Self, Self::Error> {
        AlignmentRecord::new(wire.source_lines, wire.target_lines, wire.score)
            .ok_or_else(|| "alignment with no source and no target lines".to_string())
    }
}

// ---------------------------------------------------------------------------
// Correspondences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRef {
    pub code: String,
}

/// Per-type record counts. All five categories are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    #[serde(rename = "1:1")]
    pub one_to_one: usize,
    #[serde(rename = "1:N")]
    pub one_to_many: usize,
    #[serde(rename = "N:1")]
    pub many_to_one: usize,
    #[serde(rename = "N:M")]
    pub many_to_many: usize,
    #[serde(rename = "unmatched")]
    pub unmatched: usize,
}

impl TypeCounts {
    pub fn get(&self, kind: AlignmentType) -> usize {
        match kind {
            AlignmentType::OneToOne => self.one_to_one,
            AlignmentType::OneToMany => self.one_to_many,
            AlignmentType::ManyToOne => self.many_to_one,
            AlignmentType::ManyToMany => self.many_to_many,
            AlignmentType::Unmatched => self.unmatched,
        }
    }

    pub fn increment(&mut self, kind: AlignmentType) {
        let slot = match kind {
            AlignmentType::OneToOne => &mut self.one_to_one,
            AlignmentType::OneToMany => &mut self.one_to_many,
            AlignmentType::ManyToOne => &mut self.many_to_one,
            AlignmentType::ManyToMany => &mut self.many_to_many,
            AlignmentType::Unmatched => &mut self.unmatched,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        AlignmentType::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondenceStats {
    pub total_alignments: usize,
    pub aligned_count: usize,
    pub avg_score: f64,
    pub types: TypeCounts,
}

/// One compared code pair with its line-indexed documents and alignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correspondence {
    pub id: String,
    pub source: CodeRef,
    pub target: CodeRef,
    pub source_text: Vec<String>,
    pub target_text: Vec<String>,
    pub alignments: Vec<AlignmentRecord>,
    pub stats: CorrespondenceStats,
}

impl Correspondence {
    /// Source document lines referenced by `record`, in record order.
    /// Indices past the end of the document are skipped.
    pub fn source_lines_of(&self, record: &AlignmentRecord) -> Vec<&str> {
        lines_at(&self.source_text, record.source_lines())
    }

    /// Target document lines referenced by `record`, in record order.
    pub fn target_lines_of(&self, record: &AlignmentRecord) -> Vec<&str> {
        lines_at(&self.target_text, record.target_lines())
    }
}

fn lines_at<'a>(text: &'a [String], indices: &[usize]) -> Vec<&'a str> {
    indices
        .iter()
        .filter_map(|&i| text.get(i).map(String::as_str))
        .collect()
}

/// Stable correspondence identifier.
pub fn correspondence_id(source_code: &str, target_code: &str) -> String {
    format!("{source_code}_{target_code}")
}

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyMeta {
    pub name: String,
    pub folder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMeta {
    pub source: TaxonomyMeta,
    pub target: TaxonomyMeta,
    pub generated_at: String,
}

/// The single structured data file produced by ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentArtifact {
    pub metadata: ArtifactMeta,
    pub correspondences: Vec<Correspondence>,
}

impl AlignmentArtifact {
    pub fn from_json(input: &str) -> Result<Self, crate::AlignError> {
        serde_json::from_str(input).map_err(|e| crate::AlignError::ArtifactParse(e.to_string()))
    }

    pub fn find(&self, id: &str) -> Option<&Correspondence> {
        self.correspondences.iter().find(|c| c.id == id)
    }
}

// ---------------------------------------------------------------------------
// Word diff
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    Match,
    SourceOnly,
    TargetOnly,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::SourceOnly => write!(f, "source-only"),
            Self::TargetOnly => write!(f, "target-only"),
        }
    }
}

/// A run of consecutive tokens sharing one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SegmentKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub source: Vec<DiffSegment>,
    pub target: Vec<DiffSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_by_counts() {
        assert_eq!(AlignmentType::from_counts(0, 3), AlignmentType::Unmatched);
        assert_eq!(AlignmentType::from_counts(2, 0), AlignmentType::Unmatched);
        assert_eq!(AlignmentType::from_counts(1, 1), AlignmentType::OneToOne);
        assert_eq!(AlignmentType::from_counts(1, 4), AlignmentType::OneToMany);
        assert_eq!(AlignmentType::from_counts(3, 1), AlignmentType::ManyToOne);
        assert_eq!(AlignmentType::from_counts(2, 2), AlignmentType::ManyToMany);
    }

    #[test]
    fn both_sides_empty_rejected() {
        assert!(AlignmentRecord::new(vec![], vec![], 0.5).is_none());
    }

    #[test]
    fn sort_key_prefers_source_minimum() {
        let r = AlignmentRecord::new(vec![7, 3, 5], vec![1], 0.9).unwrap();
        assert_eq!(r.sort_key(), 3);
        let r = AlignmentRecord::new(vec![], vec![9, 4], 0.0).unwrap();
        assert_eq!(r.sort_key(), 4);
    }

    #[test]
    fn record_json_shape() {
        let r = AlignmentRecord::new(vec![1, 2], vec![3], 0.87).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["srcLines"], serde_json::json!([1, 2]));
        assert_eq!(v["tgtLines"], serde_json::json!([3]));
        assert_eq!(v["type"], "N:1");
        assert!(v.get("sortKey").is_none());
    }

    #[test]
    fn deserialized_type_is_recomputed() {
        let r: AlignmentRecord =
            serde_json::from_str(r#"{"srcLines":[1],"tgtLines":[2,3],"score":0.5,"type":"1:1"}"#)
                .unwrap();
        assert_eq!(r.kind(), AlignmentType::OneToMany);

        let err = serde_json::from_str::<AlignmentRecord>(
            r#"{"srcLines":[],"tgtLines":[],"score":0.5,"type":"unmatched"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn segment_kind_names() {
        let seg = DiffSegment { text: "cat sat".into(), kind: SegmentKind::SourceOnly };
        let v = serde_json::to_value(&seg).unwrap();
        assert_eq!(v["type"], "source-only");
        assert_eq!(SegmentKind::TargetOnly.to_string(), "target-only");
    }

    #[test]
    fn lines_out_of_range_skipped() {
        let record = AlignmentRecord::new(vec![0, 5], vec![1], 1.0).unwrap();
        let corr = Correspondence {
            id: correspondence_id("A01", "B01"),
            source: CodeRef { code: "A01".into() },
            target: CodeRef { code: "B01".into() },
            source_text: vec!["first".into(), "second".into()],
            target_text: vec!["one".into(), "two".into()],
            alignments: vec![record.clone()],
            stats: CorrespondenceStats {
                total_alignments: 1,
                aligned_count: 1,
                avg_score: 1.0,
                types: TypeCounts::default(),
            },
        };
        assert_eq!(corr.id, "A01_B01");
        assert_eq!(corr.source_lines_of(&record), vec!["first"]);
        assert_eq!(corr.target_lines_of(&record), vec!["two"]);
    }
}
