//! `rm` command: import, remove an entry, re-export.

use crate::cli::RmArgs;
use crate::error::with_archive_context;
use anyhow::Result;

pub fn execute(args: &RmArgs, quiet: bool) -> Result<()> {
    let mut session = super::new_session(quiet)?;
    with_archive_context(
        session.import(&args.archive, args.password.as_deref()),
        &args.archive,
    )?;
    with_archive_context(session.remove(&args.target), &args.archive)?;

    if let Some(password) = &args.password {
        with_archive_context(session.set_export_password(password), &args.archive)?;
    }

    let output = args.out.clone().unwrap_or_else(|| args.archive.clone());
    with_archive_context(session.export(&output, args.format), &output)?;
    with_archive_context(session.close(), &output)?;

    super::success(quiet, &format!("Archive updated: {}", output.display()));
    Ok(())
}
