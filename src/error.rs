use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("landmark frame must have 21 points, got {0}")]
    LandmarkCount(usize),

    #[error("profile not found: {}", .0.display())]
    ProfileNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("home directory not found")]
    NoHomeDir,

    #[error("recording line {line}: {source}")]
    Recording {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
