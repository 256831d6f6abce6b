//! imerge CLI - incremental, resumable merges of diverged branches.

use clap::Parser;

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Begin { revision } => commands::begin::run(&revision, cli.verbose),
        Commands::Abort => commands::abort::run(cli.verbose),
        Commands::List { json } => commands::list::run(json, cli.verbose),
        Commands::Status { json } => commands::status::run(json, cli.verbose),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
