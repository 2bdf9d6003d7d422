//! Extraction of definitions from the provider's zip bundle.

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::definitions::has_extension;
use crate::error::{Error, Result};

/// Extracts every definition in `archive` into `target`.
///
/// Directory entries and files with other extensions are skipped. With
/// `flatten`, entries are written directly into `target` under their base
/// name; otherwise the archive's subdirectories are recreated. Returns the
/// number of definitions written.
///
/// # Errors
///
/// Returns [`Error::Archive`] for a malformed zip and [`Error::Io`] if a file
/// cannot be written.
pub fn extract_definitions<S: AsRef<str>>(
    archive: &[u8],
    target: &Path,
    extensions: &[S],
    flatten: bool,
) -> Result<usize> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive))?;
    let mut extracted = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let Some(relative) = entry_destination(entry.enclosed_name(), flatten) else {
            warn!(name = entry.name(), "skipping archive entry with unsafe name");
            continue;
        };
        if !has_extension(&relative, extensions) {
            debug!(name = entry.name(), "skipping non-definition entry");
            continue;
        }

        let outpath = target.join(&relative);
        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let mut outfile = File::create(&outpath).map_err(|e| Error::io(&outpath, e))?;
        io::copy(&mut entry, &mut outfile).map_err(|e| Error::io(&outpath, e))?;
        debug!(path = %outpath.display(), "extracted definition");
        extracted += 1;
    }

    info!(count = extracted, target = %target.display(), "extracted definitions");
    Ok(extracted)
}

fn entry_destination(enclosed: Option<PathBuf>, flatten: bool) -> Option<PathBuf> {
    let enclosed = enclosed?;
    if flatten {
        enclosed.file_name().map(PathBuf::from)
    } else {
        Some(enclosed)
    }
}
