//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to <config dir>/gitjira/config.toml)
    #[clap(short, long, value_parser, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to a daily rotating file in this directory instead of stderr
    #[clap(long, value_parser, global = true)]
    pub log_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the issue keys referenced in a commit message
    Extract {
        /// The commit message
        message: String,
    },

    /// Check connectivity and credentials against the JIRA server
    ServerInfo,

    /// Comment on every issue a commit references
    Link {
        /// Commit identifier
        #[clap(long)]
        commit: String,

        /// Commit message
        #[clap(short, long)]
        message: String,

        /// Link to the commit
        #[clap(long)]
        url: Option<String>,

        /// Commit author name
        #[clap(long)]
        author: Option<String>,
    },
}
