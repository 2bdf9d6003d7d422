//! Removal of options the Linux OpenVPN client does not accept.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::definitions::scanner;
use crate::error::{Error, Result};

/// Drops every line of `content` that contains one of `broken_options`.
///
/// Returns `None` when nothing was dropped. Line endings are preserved.
#[must_use]
pub fn strip_broken_options<S: AsRef<str>>(content: &str, broken_options: &[S]) -> Option<String> {
    let mut changed = false;
    let mut fixed = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        if broken_options.iter().any(|option| line.contains(option.as_ref())) {
            changed = true;
        } else {
            fixed.push_str(line);
        }
    }

    changed.then_some(fixed)
}

/// Patches a single definition in place; the file is only rewritten if a
/// line was removed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read or written.
pub fn patch_definition<S: AsRef<str>>(path: &Path, broken_options: &[S]) -> Result<bool> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let Some(fixed) = strip_broken_options(&content, broken_options) else {
        return Ok(false);
    };

    fs::write(path, fixed).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), "patched definition");
    Ok(true)
}

/// Patches every definition under `root`, returning how many were changed.
///
/// # Errors
///
/// Propagates scan and IO failures.
pub fn patch_definitions<S: AsRef<str>, O: AsRef<str>>(
    root: &Path,
    extensions: &[S],
    broken_options: &[O],
) -> Result<usize> {
    let mut patched = 0;
    for definition in scanner::scan(root, extensions)? {
        if patch_definition(&definition.path(), broken_options)? {
            patched += 1;
        }
    }

    info!(count = patched, "patched broken definitions");
    Ok(patched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BROKEN: [&str; 1] = ["block-outside-dns"];

    #[test]
    fn test_strip_removes_matching_lines() {
        let config = "client\nsetenv opt block-outside-dns\ndev tun\n";
        assert_eq!(
            strip_broken_options(config, &BROKEN),
            Some("client\ndev tun\n".to_string())
        );
    }

    #[test]
    fn test_strip_untouched_returns_none() {
        assert_eq!(strip_broken_options("client\ndev tun\n", &BROKEN), None);
    }

    #[test]
    fn test_strip_preserves_crlf_and_missing_trailing_newline() {
        let config = "client\r\nblock-outside-dns\r\nremote pl 1194";
        assert_eq!(
            strip_broken_options(config, &BROKEN),
            Some("client\r\nremote pl 1194".to_string())
        );
    }

    #[test]
    fn test_patch_definition_rewrites_only_when_changed() {
        let temp_dir = TempDir::new().unwrap();
        let broken = temp_dir.path().join("a.ovpn");
        let clean = temp_dir.path().join("b.ovpn");
        fs::write(&broken, "client\nblock-outside-dns\n").unwrap();
        fs::write(&clean, "client\n").unwrap();

        assert!(patch_definition(&broken, &BROKEN).unwrap());
        assert!(!patch_definition(&clean, &BROKEN).unwrap());
        assert_eq!(fs::read_to_string(&broken).unwrap(), "client\n");
        assert_eq!(fs::read_to_string(&clean).unwrap(), "client\n");
    }

    #[test]
    fn test_patch_definitions_counts_changed_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.ovpn"), "block-outside-dns\n").unwrap();
        fs::write(temp_dir.path().join("b.ovpn"), "client\n").unwrap();
        fs::write(temp_dir.path().join("c.txt"), "block-outside-dns\n").unwrap();

        let patched = patch_definitions(temp_dir.path(), &[".ovpn"], &BROKEN).unwrap();
        assert_eq!(patched, 1);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("c.txt")).unwrap(),
            "block-outside-dns\n"
        );
    }

    #[test]
    fn test_patch_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = patch_definition(&temp_dir.path().join("gone.ovpn"), &BROKEN);
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
