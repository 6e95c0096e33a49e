use std::path::PathBuf;
use thiserror::Error;

/// Why the catalog could not be loaded from a candidate location.
///
/// Only the last cause is ever shown to the user, so every variant carries
/// the path it refers to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("could not read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    #[error("invalid JSON in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("invalid format in {}: expected a list of units", path.display())]
    InvalidFormat { path: PathBuf },
    #[error("no catalog location configured (apartments.json)")]
    NoCandidates,
}

/// Problems reading the optional settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}
