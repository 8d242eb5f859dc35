//! Rearc CLI - import, edit and re-export archives from the command line.

mod cli;
mod commands;
mod error;
mod logger;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match cli.command {
        Some(cli::Commands::Ls(args)) => commands::list::execute(&args, cli.quiet),
        Some(cli::Commands::Create(args)) => commands::create::execute(&args, cli.quiet),
        Some(cli::Commands::Extract(args)) => commands::extract::execute(&args, cli.quiet),
        Some(cli::Commands::Add(args)) => commands::add::execute(&args, cli.quiet),
        Some(cli::Commands::Rm(args)) => commands::remove::execute(&args, cli.quiet),
        Some(cli::Commands::Completion(args)) => commands::completion::execute(&args),
        None => commands::shell::execute(cli.quiet),
    }
}
