//! Ephemeral staging directory for an archive's uncompressed contents.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::ArchiveError;
use crate::Result;

/// Exclusively-owned directory tree holding "the archive as it currently
/// stands" for the lifetime of one session.
///
/// Every path inside the tree is reachable only through [`resolve`], which
/// normalizes archive-relative input and rejects anything that would land
/// outside the root. The directory is removed when the staging area is
/// dropped or explicitly [`close`]d.
///
/// Not thread-safe: a staging area belongs to exactly one session and is
/// mutated by blocking, sequential operations.
///
/// [`resolve`]: StagingArea::resolve
/// [`close`]: StagingArea::close
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Creates a fresh, empty staging directory.
    pub fn new() -> Result<Self> {
        let dir = TempDir::with_prefix("rearc-")?;
        Ok(Self { dir })
    }

    /// Root of the staging tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Resolves an archive-relative path to an absolute path under the root.
    ///
    /// Leading separators are stripped and `.`/`..` components collapsed
    /// lexically before joining, so `"a/../b.txt"` resolves to `b.txt` at
    /// the root.
    ///
    /// # Errors
    ///
    /// Returns `PathEscape` for any input whose normalized form would leave
    /// the root, e.g. `"../../etc/passwd"`.
    pub fn resolve<P: AsRef<Path>>(&self, rel: P) -> Result<PathBuf> {
        let rel = rel.as_ref();
        let mut normalized = PathBuf::new();

        for component in rel.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::ParentDir => {
                    // Popping past the root is a containment violation,
                    // not something to silently clamp.
                    if !normalized.pop() {
                        return Err(ArchiveError::PathEscape {
                            path: rel.to_path_buf(),
                        });
                    }
                }
                // Leading slashes and drive prefixes are stripped; the
                // input is archive-relative by contract.
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }

        let resolved = self.root().join(&normalized);
        if !resolved.starts_with(self.root()) {
            return Err(ArchiveError::PathEscape {
                path: rel.to_path_buf(),
            });
        }
        Ok(resolved)
    }

    /// Removes every child of the root, keeping the root itself.
    ///
    /// Used before a decrypt retry so partial content from a failed import
    /// cannot contaminate the fresh attempt.
    pub fn wipe(&self) -> Result<()> {
        for entry in std::fs::read_dir(self.root())? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                std::fs::remove_dir_all(&path)?;
            } else {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Destroys the staging directory, reporting removal failure.
    ///
    /// Dropping the staging area also removes the tree; this variant exists
    /// so a deliberate close can surface the error instead of swallowing it.
    pub fn close(self) -> Result<()> {
        self.dir.close()?;
        Ok(())
    }
}
