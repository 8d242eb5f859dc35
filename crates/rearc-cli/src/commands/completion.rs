//! Shell completion generation command.

use crate::cli::Cli;
use crate::cli::CompletionArgs;
use anyhow::Result;
use clap::CommandFactory;
use std::io;

pub fn execute(args: &CompletionArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "rearc", &mut io::stdout());
    Ok(())
}
