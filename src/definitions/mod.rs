//! OpenVPN server definitions: scanning, indexing, and keyword search.
//!
//! The pipeline is linear: [`scanner::scan`] walks the definitions directory,
//! [`DefinitionIndex::build`] sorts and enumerates the result, and the index
//! can then be filtered and highlighted for display.

pub mod index;
pub mod matcher;
pub mod scanner;

use std::path::{Path, PathBuf};

pub use index::{DefinitionIndex, HighlightStyle, Listing};
pub use matcher::KeywordSet;

/// A single OpenVPN server definition on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    /// Directory the definition was found in.
    pub directory: PathBuf,
    /// File name, including the extension.
    pub file_name: String,
}

impl Definition {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Full path to the definition file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Directory as a string, used for ordering.
    #[must_use]
    pub fn directory_str(&self) -> std::borrow::Cow<'_, str> {
        self.directory.to_string_lossy()
    }
}

/// Returns true if `path` has one of `extensions` (leading dot, case sensitive).
#[must_use]
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|allowed| allowed.as_ref().strip_prefix('.') == Some(ext))
}
