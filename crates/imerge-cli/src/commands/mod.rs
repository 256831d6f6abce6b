//! Command-line definitions and subcommand implementations.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub mod abort;
pub mod begin;
pub mod completions;
pub mod list;
pub mod status;
pub mod utils;

/// Incrementally merge two diverged lines of history.
#[derive(Debug, Parser)]
#[command(name = "imerge", version, about, long_about = None)]
pub struct Cli {
    /// Suppress informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging (overridden by `IMERGE_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a merge session of REVISION into the current HEAD.
    Begin {
        /// Branch, commit or other revision to merge.
        revision: String,
    },

    /// Abort the merge session and remove its references.
    Abort,

    /// List the session's references and the commits they point at.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show whether a merge session is in progress.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
