//! Storage of the provider account used by `--auth-user-pass`.

use std::fs;
use std::io::{self, BufRead, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::info;

use crate::constants;
use crate::error::{Error, Result};

/// Writes the two-line credentials file OpenVPN expects and locks it down.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written or chmodded.
pub fn write_credentials(path: &Path, user_name: &str, user_pass: &str) -> Result<()> {
    fs::write(path, format!("{user_name}\n{user_pass}")).map_err(|e| Error::io(path, e))?;

    #[cfg(unix)]
    fs::set_permissions(
        path,
        fs::Permissions::from_mode(constants::CREDENTIALS_PERMISSIONS),
    )
    .map_err(|e| Error::io(path, e))?;

    info!(path = %path.display(), "saved credentials");
    Ok(())
}

/// Asks for user name and password on `input`, echoing prompts to `output`.
///
/// # Errors
///
/// Returns an IO error if reading or writing the terminal fails.
pub fn prompt_credentials<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<(String, String)> {
    let user_name = prompt(input, output, constants::PROMPT_USER_NAME)?;
    let user_pass = prompt(input, output, constants::PROMPT_USER_PASS)?;
    Ok((user_name, user_pass))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Removes saved credentials. Returns `false` if there were none.
///
/// # Errors
///
/// Returns [`Error::Io`] for any failure other than a missing file.
pub fn remove_credentials(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}
