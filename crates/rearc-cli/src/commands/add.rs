//! `add` command: import, stage an extra file or directory, re-export.

use crate::cli::AddArgs;
use crate::error::with_archive_context;
use anyhow::Result;

pub fn execute(args: &AddArgs, quiet: bool) -> Result<()> {
    let mut session = super::new_session(quiet)?;
    with_archive_context(
        session.import(&args.archive, args.password.as_deref()),
        &args.archive,
    )?;
    with_archive_context(session.add(&args.source, &args.dest_path), &args.archive)?;

    // Passworded inputs stay passworded on the way back out.
    if let Some(password) = &args.password {
        with_archive_context(session.set_export_password(password), &args.archive)?;
    }

    let output = args.out.clone().unwrap_or_else(|| args.archive.clone());
    with_archive_context(session.export(&output, args.format), &output)?;
    with_archive_context(session.close(), &output)?;

    super::success(quiet, &format!("Archive updated: {}", output.display()));
    Ok(())
}
