//! `scale-align`: line-alignment ingestion and word-level diff engine for
//! two parallel classification taxonomies.
//!
//! Pure engine crate: receives pre-loaded file contents, returns typed
//! correspondences and diff segments. No CLI dependencies.

pub mod aggregate;
pub mod browse;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod lcs;
pub mod model;
pub mod natural;
pub mod parse;
pub mod tokenize;

pub use config::AlignConfig;
pub use diff::{text_similarity, word_diff};
pub use engine::{run, PairInput};
pub use error::AlignError;
pub use model::{AlignmentArtifact, AlignmentRecord, AlignmentType, Correspondence, DiffResult};
pub use parse::parse_alignment_line;
