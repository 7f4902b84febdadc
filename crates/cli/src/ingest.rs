//! `salign build` / `salign validate`: config-driven artifact ingestion.

use std::path::{Path, PathBuf};

use scale_align::engine::{parse_manifest, ManifestPair, PairInput};
use scale_align::AlignConfig;

use crate::exit_codes::{
    EXIT_BUILD_DEGRADED, EXIT_BUILD_INVALID_CONFIG, EXIT_BUILD_MANIFEST, EXIT_BUILD_OUTPUT,
};
use crate::CliError;

fn load_config(config_path: &Path) -> Result<AlignConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::new(
            EXIT_BUILD_INVALID_CONFIG,
            format!("cannot read config {}: {e}", config_path.display()),
        )
    })?;
    AlignConfig::from_toml(&config_str).map_err(CliError::align)
}

/// File paths in the config are relative to the config file's directory.
fn base_dir(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or_else(|| Path::new("."))
}

fn load_manifest(config: &AlignConfig, base: &Path) -> Result<Vec<ManifestPair>, CliError> {
    let path = config.manifest_path(base);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        CliError::new(EXIT_BUILD_MANIFEST, format!("cannot read manifest {}: {e}", path.display()))
            .with_hint("the manifest is a JSON array of [sourceCode, targetCode] pairs")
    })?;
    parse_manifest(&content).map_err(CliError::align)
}

/// Missing or unreadable files are not fatal: the engine substitutes an
/// empty sequence.
fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::debug!("could not load {}: {e}", path.display());
            None
        }
    }
}

fn load_pairs(config: &AlignConfig, base: &Path, manifest: Vec<ManifestPair>) -> Vec<PairInput> {
    manifest
        .into_iter()
        .map(|p| {
            let alignment_text =
                read_optional(&config.alignment_path(base, &p.source_code, &p.target_code));
            let source_text = read_optional(&config.source_text_path(base, &p.source_code));
            let target_text = read_optional(&config.target_text_path(base, &p.target_code));
            PairInput {
                source_code: p.source_code,
                target_code: p.target_code,
                alignment_text,
                source_text,
                target_text,
            }
        })
        .collect()
}

pub fn cmd_build(
    config_path: PathBuf,
    output: Option<PathBuf>,
    json_output: bool,
    strict: bool,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let base = base_dir(&config_path);

    let output_file = output.or_else(|| config.output_path(base));
    if output_file.is_none() && !json_output {
        return Err(CliError::args("nothing to write")
            .with_hint("pass --output FILE or --json, or set [output].json in the config"));
    }

    let manifest = load_manifest(&config, base)?;
    log::info!("processing {} correspondences", manifest.len());

    let pairs = load_pairs(&config, base, manifest);
    let out = scale_align::run(&config, pairs);

    let json_str = serde_json::to_string_pretty(&out.artifact)
        .map_err(|e| CliError::new(EXIT_BUILD_OUTPUT, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::new(EXIT_BUILD_OUTPUT, format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::new(EXIT_BUILD_OUTPUT, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let r = &out.report;
    eprintln!(
        "{} -> {}: {} correspondences, {} alignments, {} skipped lines, {} missing files",
        config.source.name,
        config.target.name,
        out.artifact.correspondences.len(),
        r.records,
        r.skipped_lines,
        r.missing.len(),
    );

    if strict && (r.skipped_lines > 0 || !r.missing.is_empty()) {
        for m in &r.missing {
            eprintln!("missing: {m}");
        }
        return Err(CliError::new(EXIT_BUILD_DEGRADED, "input incomplete (--strict)"));
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let base = base_dir(&config_path);
    let manifest = load_manifest(&config, base)?;

    eprintln!(
        "ok: {} -> {}, {} pairs in {}",
        config.source.name,
        config.target.name,
        manifest.len(),
        config.manifest_path(base).display(),
    );
    Ok(())
}
