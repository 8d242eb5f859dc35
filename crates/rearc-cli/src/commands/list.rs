//! `ls` command: import an archive and print its sorted entries.

use crate::cli::LsArgs;
use crate::error::with_archive_context;
use anyhow::Result;
use console::Term;
use console::style;

pub fn execute(args: &LsArgs, quiet: bool) -> Result<()> {
    let mut session = super::new_session(quiet)?;
    with_archive_context(
        session.import(&args.archive, args.password.as_deref()),
        &args.archive,
    )?;

    let entries = with_archive_context(session.list(""), &args.archive)?;

    let term = Term::stdout();
    term.write_line(&format!(
        "{}",
        style(format!("Files in {}:", args.archive.display())).green()
    ))?;
    if entries.is_empty() {
        term.write_line(" (empty)")?;
    }
    for entry in &entries {
        term.write_line(&format!(" - {entry}"))?;
    }

    with_archive_context(session.close(), &args.archive)?;
    Ok(())
}
