//! CLI command handlers.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use tracing::{info, warn};

use super::args::Args;
use super::render;
use crate::config::Config;
use crate::constants;
use crate::core::{credentials, downloader, extractor, patcher};
use crate::definitions::{DefinitionIndex, KeywordSet};
use crate::error::Error;
use crate::vpn::{self, Attachment, Connection};

/// Exit code the process should terminate with.
pub type ExitCode = i32;

/// Dispatches parsed arguments; returns the process exit code.
///
/// # Errors
///
/// Returns an error for any fatal filesystem, network, or spawn failure.
pub fn run(args: &Args, config: &Config) -> Result<ExitCode> {
    if args.reset_definitions {
        reset_definitions(config)?;
        return Ok(0);
    }
    if args.reset_credentials {
        reset_credentials(config)?;
        return Ok(0);
    }
    if args.reset {
        reset_all(config)?;
        return Ok(0);
    }

    let fetched = ensure_definitions(config, prepare_definitions)?;
    if args.fetch && !fetched {
        refetch_definitions(config)?;
    }
    ensure_credentials(config)?;

    let index = DefinitionIndex::build(&config.definitions_dir(), &config.settings.extensions)
        .wrap_err("Failed to index definitions")?;
    info!(count = index.len(), "indexed definitions");
    if index.is_empty() {
        warn!(dir = %config.definitions_dir().display(), "no definitions found, try --fetch");
    }

    let color = !args.no_color && !args.json && render::stdout_is_tty();

    if args.list {
        print_index(&index, None, args.json, color)?;
    }

    if let Some(keywords) = &args.search {
        let keywords = if args.regex {
            KeywordSet::regex(keywords)?
        } else {
            KeywordSet::literal(keywords)?
        };
        print_index(&index.filter(&keywords), Some(&keywords), args.json, color)?;
    }

    if let Some(ordinal) = args.connect {
        let attachment = if args.detach {
            Attachment::Detached
        } else {
            Attachment::Foreground
        };
        return connect(&index, ordinal, config, attachment);
    }

    Ok(0)
}

fn print_index(
    index: &DefinitionIndex,
    keywords: Option<&KeywordSet>,
    json: bool,
    color: bool,
) -> Result<()> {
    let listing = match keywords {
        Some(keywords) if !json => index.highlight(keywords, &render::highlight_style(color)),
        _ => index.listing(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        render::write_json(&mut out, &listing)?;
    } else {
        render::write_listing(&mut out, &listing)?;
    }
    out.flush()?;
    Ok(())
}

fn connect(
    index: &DefinitionIndex,
    ordinal: usize,
    config: &Config,
    attachment: Attachment,
) -> Result<ExitCode> {
    let definition = match index.resolve(ordinal) {
        Ok(definition) => definition,
        Err(Error::NoSuchConnection(missing)) => {
            println!("{}{missing}", constants::CLI_MSG_NO_SUCH_CONNECTION);
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    };

    let connection = vpn::connect(
        &config.settings.openvpn_binary,
        &definition.path(),
        &config.credentials_file(),
        attachment,
    )
    .wrap_err("Failed to start openvpn")?;

    Ok(match connection {
        Connection::Spawned(pid) => {
            info!(pid, "openvpn detached");
            0
        }
        Connection::Exited(status) => exit_code(status),
    })
}

/// Child exit code, or `128 + signal` when the client was killed by a signal.
fn exit_code(status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    if let Some(signal) = status.signal() {
        warn!(signal, "openvpn terminated by signal");
        return 128 + signal;
    }

    1
}

/// Creates the configuration directory and, on first use, fetches definitions.
/// Returns whether a fetch happened.
fn ensure_definitions(
    config: &Config,
    prepare: impl FnOnce(&Config) -> Result<()>,
) -> Result<bool> {
    fs::create_dir_all(&config.config_dir).wrap_err_with(|| {
        format!("Failed to create {}", config.config_dir.display())
    })?;

    let definitions_dir = config.definitions_dir();
    if !definitions_dir.exists() {
        fs::create_dir(&definitions_dir)
            .wrap_err_with(|| format!("Failed to create {}", definitions_dir.display()))?;
        if let Err(e) = prepare(config) {
            // Leave no empty directory behind, or the next run would skip the fetch.
            if let Err(cleanup) = fs::remove_dir_all(&definitions_dir) {
                warn!(
                    dir = %definitions_dir.display(),
                    error = %cleanup,
                    "failed to remove definitions directory, remove it before retrying"
                );
            }
            return Err(e);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Downloads, extracts, and patches the provider's definitions.
///
/// # Errors
///
/// Returns an error if any of the three steps fails.
pub fn prepare_definitions(config: &Config) -> Result<()> {
    eprintln!("{}", constants::CLI_MSG_FETCHING);
    let archive = downloader::download_definitions(config)?;
    install_definitions(&archive, &config.definitions_dir(), config)
}

/// Extracts `archive` into `target` and strips broken options.
///
/// # Errors
///
/// Returns an error if the archive is invalid or a file cannot be written.
pub fn install_definitions(archive: &[u8], target: &Path, config: &Config) -> Result<()> {
    let settings = &config.settings;
    let extracted = extractor::extract_definitions(archive, target, &settings.extensions, true)?;
    if extracted == 0 {
        warn!("definitions archive contained no definitions");
    }
    patcher::patch_definitions(target, &settings.extensions, &settings.broken_options)?;
    Ok(())
}

fn refetch_definitions(config: &Config) -> Result<()> {
    let archive = downloader::download_definitions(config)?;
    let definitions_dir = config.definitions_dir();
    clear_directory(&definitions_dir)?;
    install_definitions(&archive, &definitions_dir, config)
}

fn ensure_credentials(config: &Config) -> Result<()> {
    let path = config.credentials_file();
    if path.exists() {
        return Ok(());
    }

    let stdin = io::stdin();
    let (user_name, user_pass) =
        credentials::prompt_credentials(&mut stdin.lock(), &mut io::stdout())
            .wrap_err("Failed to read credentials")?;
    credentials::write_credentials(&path, &user_name, &user_pass)?;
    Ok(())
}

fn reset_definitions(config: &Config) -> Result<()> {
    remove_dir_if_exists(&config.definitions_dir())
}

fn reset_credentials(config: &Config) -> Result<()> {
    if !credentials::remove_credentials(&config.credentials_file())? {
        println!("{}", constants::CLI_MSG_NO_CREDENTIALS);
    }
    Ok(())
}

fn reset_all(config: &Config) -> Result<()> {
    remove_dir_if_exists(&config.config_dir)
}

fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            info!(path = %path.display(), "removed");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).wrap_err_with(|| format!("Failed to remove {}", path.display())),
    }
}

/// Removes everything inside `path`, keeping the directory itself.
fn clear_directory(path: &Path) -> Result<()> {
    for entry in fs::read_dir(path).wrap_err_with(|| format!("Failed to read {}", path.display()))? {
        let entry_path = entry?.path();
        if entry_path.is_dir() {
            fs::remove_dir_all(&entry_path)?;
        } else {
            fs::remove_file(&entry_path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use std::io::Cursor;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn config(dir: &Path) -> Config {
        Config::new(dir, ConfigSource::Explicit)
    }

    fn bundle() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in [
            ("Linux/Poland-Warsaw.ovpn", "client\nblock-outside-dns\nremote pl 1194\n"),
            ("Linux/Poland-Krakow.ovpn", "client\nremote pl2 1194\n"),
            ("Linux/Germany-Berlin.ovpn", "client\nremote de 1194\n"),
            ("Linux/README.txt", "hello"),
        ] {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_install_definitions_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());
        let target = config.definitions_dir();
        fs::create_dir_all(&target).unwrap();

        install_definitions(&bundle(), &target, &config).unwrap();

        let index = DefinitionIndex::build(&target, &config.settings.extensions).unwrap();
        let names: Vec<_> = index.iter().map(|(i, d)| (i, d.file_name.clone())).collect();
        assert_eq!(
            names,
            vec![
                (1, "Germany-Berlin.ovpn".to_string()),
                (2, "Poland-Krakow.ovpn".to_string()),
                (3, "Poland-Warsaw.ovpn".to_string()),
            ]
        );
        assert_eq!(
            fs::read_to_string(target.join("Poland-Warsaw.ovpn")).unwrap(),
            "client\nremote pl 1194\n"
        );
    }

    #[test]
    fn test_connect_unknown_ordinal_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());
        let index = DefinitionIndex::default();
        let code = connect(&index, 9, &config, Attachment::Detached).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_failed_first_fetch_removes_definitions_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());

        let result = ensure_definitions(&config, |config| {
            fs::write(config.definitions_dir().join("partial.ovpn"), "client\n")?;
            Err(color_eyre::eyre::eyre!("network down"))
        });
        assert!(result.is_err());
        assert!(config.config_dir.is_dir());
        assert!(!config.definitions_dir().exists());

        let fetched = ensure_definitions(&config, |_| Ok(())).unwrap();
        assert!(fetched);
        assert!(config.definitions_dir().is_dir());

        let fetched = ensure_definitions(&config, |_| panic!("already prepared")).unwrap();
        assert!(!fetched);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_passes_through_child_code() {
        assert_eq!(exit_code(ExitStatus::from_raw(0)), 0);
        assert_eq!(exit_code(ExitStatus::from_raw(3 << 8)), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_for_signalled_child() {
        assert_eq!(exit_code(ExitStatus::from_raw(libc::SIGTERM)), 128 + libc::SIGTERM);
        assert_eq!(exit_code(ExitStatus::from_raw(libc::SIGKILL)), 128 + libc::SIGKILL);
    }

    #[test]
    fn test_reset_definitions() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(temp_dir.path());
        fs::create_dir_all(config.definitions_dir()).unwrap();
        fs::write(config.definitions_dir().join("a.ovpn"), "").unwrap();

        reset_definitions(&config).unwrap();
        assert!(!config.definitions_dir().exists());
        assert!(config.config_dir.exists());

        reset_definitions(&config).unwrap();
    }

    #[test]
    fn test_reset_all() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(".vpnonline");
        let config = config(&root);
        fs::create_dir_all(config.definitions_dir()).unwrap();
        fs::write(config.credentials_file(), "a\nb").unwrap();

        reset_all(&config).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_clear_directory_keeps_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("sub").join("a.ovpn"), "").unwrap();
        fs::write(temp_dir.path().join("b.ovpn"), "").unwrap();

        clear_directory(temp_dir.path()).unwrap();
        assert!(temp_dir.path().is_dir());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
