//! Stagecheck CLI: the `stagecheck` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging(cli.verbose);

    match cli.command {
        Commands::Audit {
            config,
            out,
            json,
            fail_on_mismatch,
        } => commands::audit::run(commands::audit::Args {
            config,
            out,
            json,
            fail_on_mismatch,
        }),

        Commands::Extract { kind, path, json } => commands::extract::run(kind.into(), path, json),
    }
}
