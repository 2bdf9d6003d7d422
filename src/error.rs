//! Error types shared by the definition pipeline and its surrounding glue.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing, indexing, or searching definitions.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan {root}: {source}")]
    Scan {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("At least one keyword is required")]
    EmptyKeywords,

    #[error("Keyword #{0} is empty")]
    BlankKeyword(usize),

    #[error("Invalid keyword '{keyword}': {source}")]
    InvalidKeyword {
        keyword: String,
        #[source]
        source: regex::Error,
    },

    #[error("no such connection: {0}")]
    NoSuchConnection(usize),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Invalid definitions archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Attaches the offending path to an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
