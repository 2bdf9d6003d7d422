//! Process and user environment helpers.

use std::path::PathBuf;

/// The user the tool acts for: `SUDO_USER` when run through sudo, else `USER`.
#[must_use]
pub fn current_user() -> Option<String> {
    std::env::var("SUDO_USER")
        .or_else(|_| std::env::var("USER"))
        .ok()
        .filter(|user| !user.is_empty())
}

/// Whether the process runs with an effective uid of 0.
#[cfg(unix)]
#[must_use]
#[allow(unsafe_code)]
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe {
        libc::geteuid() == 0
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_root() -> bool {
    false
}

/// Home directory of `user`, looked up in the passwd database.
#[cfg(unix)]
#[must_use]
#[allow(unsafe_code)]
pub fn home_dir_of(user: &str) -> Option<PathBuf> {
    use std::ffi::{CStr, CString, OsStr};
    use std::os::unix::ffi::OsStrExt;

    let name = CString::new(user).ok()?;
    // SAFETY: `name` is a valid C string; the returned record is only read
    // before any other passwd call on this single-threaded path.
    unsafe {
        let entry = libc::getpwnam(name.as_ptr());
        if entry.is_null() || (*entry).pw_dir.is_null() {
            return None;
        }
        let dir = CStr::from_ptr((*entry).pw_dir);
        Some(PathBuf::from(OsStr::from_bytes(dir.to_bytes())))
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn home_dir_of(_user: &str) -> Option<PathBuf> {
    None
}

/// Home directory of the user the tool acts for, falling back to `$HOME`.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    current_user()
        .and_then(|user| home_dir_of(&user))
        .or_else(dirs::home_dir)
}
