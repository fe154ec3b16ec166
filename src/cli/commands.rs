//! CLI command definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// numlog - keep named logs of timestamped numbers
#[derive(Parser, Debug)]
#[command(name = "numlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute (shows the current log when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the entries of the current log
    Show,

    /// List all logs
    Logs,

    /// Add a number to the current log
    Add {
        /// Value to log
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Make another log current (an index one past the end creates a new log)
    Select {
        /// Log index as shown by `logs`
        index: usize,
    },

    /// Create a new log and make it current
    New {
        /// Name for the new log
        name: Option<String>,
    },

    /// Rename the current log
    Rename {
        /// New name (blank cancels)
        name: String,
    },

    /// Delete the current log
    Delete {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the current log as <name>-<units>.tsv
    Export {
        /// Directory to write into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a .tsv file as a new log
    Import {
        /// File to import; its name gives the log name and units
        file: PathBuf,
    },
}
