//! Stable ordinal index over scanned definitions.
//!
//! Ordinals are 1-based and assigned once, in lexicographic order of
//! (directory, file name). Filtering keeps the original ordinals so the
//! number an operator sees in a search result is the one `--connect` takes.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::matcher::{self, KeywordSet};
use super::{scanner, Definition};
use crate::error::{Error, Result};

/// Markers wrapped around highlighted keyword matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightStyle {
    pub open: String,
    pub close: String,
}

impl HighlightStyle {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Ordered mapping from ordinal to definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinitionIndex {
    entries: BTreeMap<usize, Definition>,
}

/// One row of a rendered index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub ordinal: usize,
    pub directory: String,
    pub display: String,
}

/// Display view of an index, in ordinal order.
pub type Listing = Vec<ListingEntry>;

impl DefinitionIndex {
    /// Scans `root` and enumerates every definition found.
    ///
    /// # Errors
    ///
    /// Propagates scan failures.
    pub fn build<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Result<Self> {
        let definitions = scanner::scan(root, extensions)?;
        Ok(Self::from_definitions(definitions))
    }

    /// Sorts `definitions` and assigns ordinals `1..=N`.
    #[must_use]
    pub fn from_definitions(mut definitions: Vec<Definition>) -> Self {
        definitions.sort_by(|a, b| {
            a.directory_str()
                .cmp(&b.directory_str())
                .then_with(|| a.file_name.cmp(&b.file_name))
        });

        Self {
            entries: definitions.into_iter().enumerate().map(|(i, d)| (i + 1, d)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, ordinal: usize) -> Option<&Definition> {
        self.entries.get(&ordinal)
    }

    /// Looks up `ordinal`, treating a miss as [`Error::NoSuchConnection`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchConnection`] if no definition has that ordinal.
    pub fn resolve(&self, ordinal: usize) -> Result<&Definition> {
        self.get(ordinal).ok_or(Error::NoSuchConnection(ordinal))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Definition)> {
        self.entries.iter().map(|(ordinal, def)| (*ordinal, def))
    }

    /// Keeps definitions whose file name contains every keyword.
    ///
    /// The directory is never matched against.
    #[must_use]
    pub fn filter(&self, keywords: &KeywordSet) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, def)| keywords.matches_all(&def.file_name))
                .map(|(ordinal, def)| (*ordinal, def.clone()))
                .collect(),
        }
    }

    /// Plain display view.
    #[must_use]
    pub fn listing(&self) -> Listing {
        self.render(|name| name.to_string())
    }

    /// Display view with every keyword occurrence in the file name marked.
    #[must_use]
    pub fn highlight(&self, keywords: &KeywordSet, style: &HighlightStyle) -> Listing {
        self.render(|name| matcher::highlight(name, keywords, &style.open, &style.close))
    }

    fn render(&self, display: impl Fn(&str) -> String) -> Listing {
        self.iter()
            .map(|(ordinal, def)| ListingEntry {
                ordinal,
                directory: def.directory_str().into_owned(),
                display: display(&def.file_name),
            })
            .collect()
    }
}
