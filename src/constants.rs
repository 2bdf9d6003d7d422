//! Application-wide constants and configuration defaults.
//!
//! This module defines the static values used throughout vpnonline,
//! including the provider endpoint, file layout, and user-facing messages.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

// === Provider ===

/// Zip bundle with every OpenVPN server definition offered by the provider.
pub const DEFINITIONS_URL: &str = "https://vpnonline.pl/download/OpenVPN_config_Linux.zip";
/// The provider's download endpoint refuses requests without a browser agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
/// Timeout for the definitions download in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Extension of an OpenVPN definition, including the leading dot.
pub const EXT_OVPN: &str = ".ovpn";

/// Options shipped in the provider's definitions that the Linux client rejects.
///
/// See <https://github.com/kylemanna/docker-openvpn/issues/330#issuecomment-346697599>.
pub const BROKEN_DEFINITION_OPTIONS: [&str; 1] = ["block-outside-dns"];

/// Name of the external OpenVPN client binary.
pub const OPENVPN_BINARY: &str = "openvpn";

// === Path Configuration ===

/// Name of the configuration directory inside the user's home.
pub const CONFIG_DIR_NAME: &str = ".vpnonline";
/// Name of the definitions subdirectory.
pub const DEFINITIONS_DIR_NAME: &str = "definitions";
/// Name of the saved credentials file.
pub const CREDENTIALS_FILE_NAME: &str = "credentials.txt";
/// Name of the optional settings file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the configuration directory.
pub const ENV_CONFIG_DIR: &str = "VPNONLINE_HOME";

/// Mode applied to the credentials file.
pub const CREDENTIALS_PERMISSIONS: u32 = 0o600;

// === Highlighting ===

/// Plain-text markers used when colour output is unavailable.
pub const HIGHLIGHT_PLAIN_OPEN: &str = "[";
pub const HIGHLIGHT_PLAIN_CLOSE: &str = "]";

// === Prompts ===

pub const PROMPT_USER_NAME: &str = "user-name: ";
pub const PROMPT_USER_PASS: &str = "user-pass: ";

// === Messages: CLI Output ===

pub const CLI_MSG_NEEDS_SUDO: &str = "has to be run with sudo";
pub const CLI_MSG_NO_SUCH_CONNECTION: &str = "no such connection: ";
pub const CLI_MSG_FETCHING: &str = "Fetching definitions...";
pub const CLI_MSG_NO_CREDENTIALS: &str = "No saved credentials to remove";

// === Error Messages ===

pub const ERR_HTTP_CLIENT_BUILD_FAILED: &str = "Failed to build HTTP client";
pub const ERR_NETWORK_REQUEST_FAILED: &str = "Network request failed";
pub const ERR_SERVER_ERROR: &str = "Server returned error: ";
pub const ERR_READ_CONTENT_FAILED: &str = "Failed to read content";
pub const ERR_EMPTY_CONTENT: &str = "Downloaded content is empty";
