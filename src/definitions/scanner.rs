//! Recursive definition discovery.

use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{has_extension, Definition};
use crate::error::{Error, Result};

/// Walks `root` and returns every file whose extension is in `extensions`.
///
/// Order is unspecified; callers sort. A missing `root` yields no definitions.
///
/// # Errors
///
/// Returns [`Error::Scan`] if the walk hits an unreadable entry.
pub fn scan<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Result<Vec<Definition>> {
    if !root.exists() {
        debug!(root = %root.display(), "definitions directory missing");
        return Ok(Vec::new());
    }

    let mut definitions = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| Error::Scan {
            root: root.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if entry.file_type().is_dir() || !path.is_file() || !has_extension(path, extensions) {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            warn!(path = %path.display(), "skipping definition with non UTF-8 name");
            continue;
        };
        let directory = path.parent().unwrap_or(root);

        definitions.push(Definition::new(directory, file_name));
    }

    debug!(count = definitions.len(), root = %root.display(), "scanned definitions");
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(mut defs: Vec<Definition>) -> Vec<String> {
        defs.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        defs.into_iter().map(|d| d.file_name).collect()
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let result = scan(&temp_dir.path().join("absent"), &[".ovpn"]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_filters_extensions() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.ovpn"), "").unwrap();
        fs::write(temp_dir.path().join("b.conf"), "").unwrap();
        fs::write(temp_dir.path().join("c.OVPN"), "").unwrap();
        fs::write(temp_dir.path().join("readme.txt"), "").unwrap();

        let result = scan(temp_dir.path(), &[".ovpn"]).unwrap();
        assert_eq!(names(result), vec!["a.ovpn"]);
    }

    #[test]
    fn test_scan_multiple_extensions() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.ovpn"), "").unwrap();
        fs::write(temp_dir.path().join("b.conf"), "").unwrap();

        let result = scan(temp_dir.path(), &[".ovpn", ".conf"]).unwrap();
        assert_eq!(names(result), vec!["a.ovpn", "b.conf"]);
    }

    #[test]
    fn test_scan_recurses_and_records_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("tcp").join("eu");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Poland-Warsaw.ovpn"), "").unwrap();
        fs::create_dir(temp_dir.path().join("dir.ovpn")).unwrap();

        let result = scan(temp_dir.path(), &[".ovpn"]).unwrap();
        assert_eq!(result, vec![Definition::new(nested, "Poland-Warsaw.ovpn")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_unreadable_directory_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        // Permission bits do not stop root.
        if crate::utils::is_root() {
            return;
        }

        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.ovpn"), "").unwrap();
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("b.ovpn"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = scan(temp_dir.path(), &[".ovpn"]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(Error::Scan { .. })));
    }
}
