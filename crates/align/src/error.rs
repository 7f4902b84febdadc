use std::fmt;

#[derive(Debug)]
pub enum AlignError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty taxonomy name, shared folder, etc.).
    ConfigValidation(String),
    /// Pair manifest is not a JSON array of `[source, target]` code pairs.
    ManifestParse(String),
    /// A previously generated artifact could not be read back.
    ArtifactParse(String),
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::ManifestParse(msg) => write!(f, "pair manifest error: {msg}"),
            Self::ArtifactParse(msg) => write!(f, "artifact parse error: {msg}"),
        }
    }
}

impl std::error::Error for AlignError {}
