//! Command line definition.
//!
//! Usage:
//!   serialguard                    Interactive scan loop
//!   serialguard add SERIAL...      Submit scans without the loop
//!   serialguard undo               Remove the last unique serial
//!   serialguard reset              Start a new pallet
//!   serialguard show               Print stats and lists
//!   serialguard export [-o FILE]   Comma-separated unique serials
//!   serialguard status             Counters only

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "serialguard",
    version,
    about = "Serial scan duplicate guard for pallet picking",
    long_about = "Serial Guard records the serial numbers scanned onto a pallet and \
                  flags any serial scanned twice.\n\n\
                  Run without a subcommand for the interactive scan loop; the \
                  scanner's Enter submits each serial."
)]
pub struct Cli {
    /// Config file (defaults to config.toml in the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file holding the current pallet
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Disable cue sounds
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log session activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit one or more scans
    Add {
        /// Raw serials as read by the scanner
        #[arg(required = true)]
        serials: Vec<String>,
    },

    /// Remove the last unique serial
    Undo,

    /// Clear the pallet
    Reset,

    /// Show stats, scanned serials and duplicates
    Show {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Export unique serials as one comma-separated line
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show counters only
    Status {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
