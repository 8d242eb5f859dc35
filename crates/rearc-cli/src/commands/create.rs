//! `create` command: stage a local file or directory and export it.

use crate::cli::CreateArgs;
use crate::error::with_archive_context;
use anyhow::Result;

pub fn execute(args: &CreateArgs, quiet: bool) -> Result<()> {
    let mut session = super::new_session(quiet)?;
    with_archive_context(session.add(&args.source, &args.dest_path), &args.archive)?;

    if let Some(password) = &args.password {
        with_archive_context(session.set_export_password(password), &args.archive)?;
    }

    with_archive_context(session.export(&args.archive, args.format), &args.archive)?;
    with_archive_context(session.close(), &args.archive)?;

    super::success(quiet, &format!("Archive created: {}", args.archive.display()));
    Ok(())
}
