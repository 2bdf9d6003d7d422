//! Command-line argument definitions.

use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

use crate::constants;

/// A tool for connecting to VPNOnline servers via OpenVPN
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .args(["reset_definitions", "reset_credentials", "reset", "list", "search", "connect", "fetch"])
        .multiple(false)
))]
pub struct Args {
    /// Remove fetched definitions
    #[arg(long)]
    pub reset_definitions: bool,

    /// Remove saved credentials
    #[arg(long)]
    pub reset_credentials: bool,

    /// Remove definitions and credentials (the whole configuration directory)
    #[arg(long)]
    pub reset: bool,

    /// Print enumerated list of available definitions
    #[arg(long)]
    pub list: bool,

    /// Print enumerated list of definitions containing all provided keywords
    #[arg(long, num_args = 1.., value_name = "KEYWORD")]
    pub search: Option<Vec<String>>,

    /// Establish connection described by the nth definition
    #[arg(long, value_name = "N")]
    pub connect: Option<usize>,

    /// Download definitions again, replacing the current ones
    #[arg(long)]
    pub fetch: bool,

    /// Don't capture output nor wait for the connection subprocess to finish
    #[arg(
        long,
        requires = "connect",
        conflicts_with_all = ["reset_definitions", "reset_credentials", "reset", "list", "search", "fetch"]
    )]
    pub detach: bool,

    /// Treat search keywords as regular expressions
    #[arg(
        long,
        requires = "search",
        conflicts_with_all = ["reset_definitions", "reset_credentials", "reset", "list", "connect", "fetch"]
    )]
    pub regex: bool,

    /// Print list/search results as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable coloured highlighting
    #[arg(long)]
    pub no_color: bool,

    /// Configuration directory (defaults to ~/.vpnonline of the invoking user)
    #[arg(long, env = constants::ENV_CONFIG_DIR, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
