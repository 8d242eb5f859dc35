//! `extract` command: import an archive and copy its tree to a directory.

use crate::cli::ExtractArgs;
use crate::error::with_archive_context;
use anyhow::Context;
use anyhow::Result;
use std::env;

pub fn execute(args: &ExtractArgs, quiet: bool) -> Result<()> {
    let dest = match &args.dest {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut session = super::new_session(quiet)?;
    with_archive_context(
        session.import(&args.archive, args.password.as_deref()),
        &args.archive,
    )?;

    std::fs::create_dir_all(&dest)
        .with_context(|| format!("failed to create destination '{}'", dest.display()))?;

    let entries = with_archive_context(session.list(""), &args.archive)?;
    let mut files = 0usize;
    for rel in &entries {
        let source = session.staging_root().join(rel);
        let target = dest.join(rel);
        if source.is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&source, &target)
                .with_context(|| format!("failed to write '{}'", target.display()))?;
            files += 1;
        }
    }

    with_archive_context(session.close(), &args.archive)?;

    super::success(
        quiet,
        &format!("Extracted {files} files to {}", dest.display()),
    );
    Ok(())
}
