//! Runtime configuration.
//!
//! Paths are derived from one configuration directory (by default
//! `~<user>/.vpnonline`) and an optional `config.toml` inside it overrides the
//! provider settings. A [`Config`] value is passed explicitly to every
//! operation so tests can point it at a temporary directory.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::constants;
use crate::error::{Error, Result};

/// Provider and client settings, overridable from `config.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// URL of the zip bundle with server definitions.
    pub definitions_url: String,
    /// Extensions (with leading dot) that identify a definition file.
    pub extensions: Vec<String>,
    /// Lines containing any of these are removed from fetched definitions.
    pub broken_options: Vec<String>,
    /// OpenVPN client executable.
    pub openvpn_binary: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            definitions_url: constants::DEFINITIONS_URL.to_string(),
            extensions: vec![constants::EXT_OVPN.to_string()],
            broken_options: constants::BROKEN_DEFINITION_OPTIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            openvpn_binary: constants::OPENVPN_BINARY.to_string(),
            user_agent: constants::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: constants::HTTP_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Parses and validates a `config.toml` document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or invalid values.
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.definitions_url)
            .map_err(|e| Error::Config(format!("definitions_url: {e}")))?;

        if self.extensions.is_empty() {
            return Err(Error::Config("extensions must not be empty".to_string()));
        }
        if let Some(bad) = self.extensions.iter().find(|ext| !is_single_extension(ext)) {
            return Err(Error::Config(format!(
                "extension '{bad}' must be a dot followed by one extension, like '.ovpn'"
            )));
        }
        if self.broken_options.iter().any(String::is_empty) {
            return Err(Error::Config("broken_options must not contain empty entries".to_string()));
        }
        Ok(())
    }
}

/// `.ovpn` is valid; `ovpn`, `.` and `.tar.gz` are not, since only the last
/// extension of a file name is ever compared.
fn is_single_extension(ext: &str) -> bool {
    ext.strip_prefix('.')
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('.'))
}

/// Where the configuration directory came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config-dir` or `VPNONLINE_HOME`.
    Explicit,
    /// `~<user>/.vpnonline`.
    Default,
}

/// Resolved configuration for one run.
#[derive(Clone, Debug)]
pub struct Config {
    pub config_dir: PathBuf,
    pub source: ConfigSource,
    pub settings: Settings,
}

impl Config {
    /// Configuration rooted at `config_dir` with default settings.
    pub fn new(config_dir: impl Into<PathBuf>, source: ConfigSource) -> Self {
        Self {
            config_dir: config_dir.into(),
            source,
            settings: Settings::default(),
        }
    }

    /// Resolves the configuration directory and loads `config.toml` if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no home directory can be determined or the
    /// settings file is invalid.
    pub fn load(explicit_dir: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_dir {
            Some(dir) => Self::new(dir, ConfigSource::Explicit),
            None => {
                let home = crate::utils::home_dir()
                    .ok_or_else(|| Error::Config("cannot determine home directory".to_string()))?;
                Self::new(home.join(constants::CONFIG_DIR_NAME), ConfigSource::Default)
            }
        };

        let settings_path = config.settings_file();
        if settings_path.is_file() {
            let content =
                fs::read_to_string(&settings_path).map_err(|e| Error::io(&settings_path, e))?;
            config.settings = Settings::from_toml(&content)?;
            debug!(path = %settings_path.display(), "loaded settings");
        }

        debug!(dir = %config.config_dir.display(), source = ?config.source, "configuration resolved");
        Ok(config)
    }

    #[must_use]
    pub fn definitions_dir(&self) -> PathBuf {
        self.config_dir.join(constants::DEFINITIONS_DIR_NAME)
    }

    #[must_use]
    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join(constants::CREDENTIALS_FILE_NAME)
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.extensions, vec![".ovpn"]);
        assert_eq!(settings.broken_options, vec!["block-outside-dns"]);
        assert_eq!(settings.openvpn_binary, "openvpn");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_layout() {
        let config = Config::new("/home/jan/.vpnonline", ConfigSource::Default);
        assert_eq!(
            config.definitions_dir(),
            PathBuf::from("/home/jan/.vpnonline/definitions")
        );
        assert_eq!(
            config.credentials_file(),
            PathBuf::from("/home/jan/.vpnonline/credentials.txt")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml("openvpn_binary = \"/usr/sbin/openvpn\"\n").unwrap();
        assert_eq!(settings.openvpn_binary, "/usr/sbin/openvpn");
        assert_eq!(settings.definitions_url, constants::DEFINITIONS_URL);
    }

    #[test]
    fn test_toml_rejects_bad_values() {
        assert!(Settings::from_toml("definitions_url = \"not a url\"").is_err());
        assert!(Settings::from_toml("extensions = []").is_err());
        assert!(Settings::from_toml("extensions = [\"ovpn\"]").is_err());
        assert!(Settings::from_toml("extensions = [\".\"]").is_err());
        assert!(Settings::from_toml("extensions = [\".tar.gz\"]").is_err());
        assert!(Settings::from_toml("extensions = [\".ovpn\", \".conf\"]").is_ok());
        assert!(Settings::from_toml("broken_options = [\"\"]").is_err());
        assert!(Settings::from_toml("unknown_key = 1").is_err());
    }

    #[test]
    fn test_load_explicit_dir_reads_settings() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "extensions = [\".ovpn\", \".conf\"]\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(Some(temp_dir.path())).unwrap();
        assert_eq!(config.source, ConfigSource::Explicit);
        assert_eq!(config.settings.extensions, vec![".ovpn", ".conf"]);
        assert_eq!(config.settings.timeout_secs, 5);
    }

    #[test]
    fn test_load_explicit_dir_without_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(Some(temp_dir.path())).unwrap();
        assert_eq!(config.settings, Settings::default());
    }
}
