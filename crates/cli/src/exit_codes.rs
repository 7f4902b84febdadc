//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | build            | Ingestion codes                          |
//! | 10-19   | browse           | Artifact list/show codes                 |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use scale_align::AlignError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Build (3-9)
// =============================================================================

/// Config file unreadable, not TOML, or fails validation.
pub const EXIT_BUILD_INVALID_CONFIG: u8 = 3;

/// Pair manifest missing or not an array of code pairs. Fatal for the batch.
pub const EXIT_BUILD_MANIFEST: u8 = 4;

/// Artifact could not be serialized or written.
pub const EXIT_BUILD_OUTPUT: u8 = 5;

/// `--strict`: at least one file was missing or one line was skipped.
pub const EXIT_BUILD_DEGRADED: u8 = 6;

// =============================================================================
// Browse (10-19)
// =============================================================================

/// Artifact file unreadable or not a valid artifact.
pub const EXIT_BROWSE_ARTIFACT: u8 = 10;

/// Requested correspondence id does not exist.
pub const EXIT_BROWSE_NOT_FOUND: u8 = 11;

/// Search filter left nothing to show.
pub const EXIT_BROWSE_EMPTY: u8 = 12;

/// Map an engine error to its exit code.
pub fn align_exit_code(err: &AlignError) -> u8 {
    match err {
        AlignError::ConfigParse(_) | AlignError::ConfigValidation(_) => EXIT_BUILD_INVALID_CONFIG,
        AlignError::ManifestParse(_) => EXIT_BUILD_MANIFEST,
        AlignError::ArtifactParse(_) => EXIT_BROWSE_ARTIFACT,
    }
}
