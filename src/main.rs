//! vpnonline - fetch, search and connect to VPNOnline OpenVPN servers.

mod cli;
mod config;
mod constants;
mod core;
mod definitions;
mod error;
mod utils;
mod vpn;

use clap::Parser;
use color_eyre::Result;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use cli::args::Args;
use config::Config;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    init_logging(args.verbose);

    if !utils::is_root() {
        println!("{} {}", constants::APP_NAME, constants::CLI_MSG_NEEDS_SUDO);
        return Ok(());
    }

    let config = Config::load(args.config_dir.as_deref())?;
    debug!(?args, "starting");

    let code = cli::commands::run(&args, &config)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
