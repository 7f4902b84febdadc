use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AlignError;
use crate::model::TaxonomyMeta;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Ingestion config: where the manifest, alignment files, and both
/// taxonomies' line-per-sentence documents live.
///
/// All paths are relative to `data_dir`, which is itself resolved against a
/// caller-supplied base directory (usually the config file's directory).
#[derive(Debug, Clone, Deserialize)]
pub struct AlignConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_manifest")]
    pub manifest: String,
    #[serde(default = "default_align_dir")]
    pub align_dir: String,
    pub source: TaxonomyConfig,
    pub target: TaxonomyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_data_dir() -> String {
    "data".into()
}

fn default_manifest() -> String {
    "correspondence.json".into()
}

fn default_align_dir() -> String {
    "align".into()
}

// ---------------------------------------------------------------------------
// Taxonomy + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyConfig {
    /// Display name, e.g. "ISIC5".
    pub name: String,
    /// Folder under `data_dir` holding one `{code}.txt` per code.
    pub folder: String,
}

impl TaxonomyConfig {
    pub fn meta(&self) -> TaxonomyMeta {
        TaxonomyMeta {
            name: self.name.clone(),
            folder: self.folder.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AlignConfig {
    pub fn from_toml(input: &str) -> Result<Self, AlignError> {
        let config: AlignConfig =
            toml::from_str(input).map_err(|e| AlignError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        for (side, tax) in [("source", &self.source), ("target", &self.target)] {
            if tax.name.trim().is_empty() {
                return Err(AlignError::ConfigValidation(format!("{side}.name must not be empty")));
            }
            if tax.folder.trim().is_empty() {
                return Err(AlignError::ConfigValidation(format!(
                    "{side}.folder must not be empty"
                )));
            }
        }

        if self.source.folder == self.target.folder {
            return Err(AlignError::ConfigValidation(format!(
                "source and target share folder '{}'",
                self.source.folder
            )));
        }

        if self.manifest.trim().is_empty() {
            return Err(AlignError::ConfigValidation("manifest must not be empty".into()));
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Paths
    // -----------------------------------------------------------------------

    pub fn data_path(&self, base: &Path) -> PathBuf {
        base.join(&self.data_dir)
    }

    pub fn manifest_path(&self, base: &Path) -> PathBuf {
        self.data_path(base).join(&self.manifest)
    }

    /// `{data_dir}/{align_dir}/{source}_{target}.txt`
    pub fn alignment_path(&self, base: &Path, source_code: &str, target_code: &str) -> PathBuf {
        self.data_path(base)
            .join(&self.align_dir)
            .join(format!("{source_code}_{target_code}.txt"))
    }

    pub fn source_text_path(&self, base: &Path, code: &str) -> PathBuf {
        self.data_path(base).join(&self.source.folder).join(format!("{code}.txt"))
    }

    pub fn target_text_path(&self, base: &Path, code: &str) -> PathBuf {
        self.data_path(base).join(&self.target.folder).join(format!("{code}.txt"))
    }

    pub fn output_path(&self, base: &Path) -> Option<PathBuf> {
        self.output.json.as_ref().map(|p| base.join(p))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
