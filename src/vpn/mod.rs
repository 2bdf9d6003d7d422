//! OpenVPN client invocation.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::info;

use crate::error::{Error, Result};

/// How the OpenVPN child process is attached to this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attachment {
    /// Inherit stdio and wait for the client to exit.
    Foreground,
    /// Discard output and return as soon as the client is spawned.
    Detached,
}

/// Outcome of [`connect`].
#[derive(Debug)]
pub enum Connection {
    /// Foreground client exited with this status.
    Exited(ExitStatus),
    /// Detached client is running with this pid.
    Spawned(u32),
}

/// Builds `openvpn --config <definition> --auth-user-pass <credentials>`.
#[must_use]
pub fn openvpn_command(
    binary: &str,
    definition: &Path,
    credentials: &Path,
    attachment: Attachment,
) -> Command {
    let mut command = Command::new(binary);
    command
        .arg("--config")
        .arg(definition)
        .arg("--auth-user-pass")
        .arg(credentials);

    if attachment == Attachment::Detached {
        command.stdout(Stdio::null()).stderr(Stdio::null());
    }

    command
}

/// Starts the OpenVPN client for `definition`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the client cannot be spawned or waited on.
pub fn connect(
    binary: &str,
    definition: &Path,
    credentials: &Path,
    attachment: Attachment,
) -> Result<Connection> {
    let mut child = openvpn_command(binary, definition, credentials, attachment)
        .spawn()
        .map_err(|e| Error::io(binary, e))?;

    info!(definition = %definition.display(), pid = child.id(), "openvpn started");

    match attachment {
        Attachment::Detached => Ok(Connection::Spawned(child.id())),
        Attachment::Foreground => {
            let status = child.wait().map_err(|e| Error::io(binary, e))?;
            info!(%status, "openvpn exited");
            Ok(Connection::Exited(status))
        }
    }
}
