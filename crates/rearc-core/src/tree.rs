//! Path-safe mutation and listing of the staging tree.

use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::ArchiveError;
use crate::Reporter;
use crate::Result;
use crate::StagingArea;

/// Copies a local file or directory into the staging tree.
///
/// A directory source is copied as a whole subtree under
/// `resolve(dest)/<source base name>`, with per-file progress. A file
/// source lands inside the resolved destination when that is an existing
/// directory (or the caller wrote a trailing separator); otherwise the
/// final path segment names the (possibly renamed) target and parent
/// directories are created as needed.
///
/// # Errors
///
/// - `SourceNotFound` when `source` does not exist.
/// - `PathEscape` when `dest` leaves the staging area.
/// - `DestinationExists` when the target path is already present.
pub fn add(
    staging: &StagingArea,
    source: &Path,
    dest: &str,
    reporter: &mut Reporter<'_>,
) -> Result<()> {
    if !source.exists() {
        return Err(ArchiveError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    let resolved = staging.resolve(dest)?;
    let base_name = source
        .file_name()
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    if source.is_dir() {
        let target = resolved.join(&base_name);
        if target.exists() {
            return Err(destination_exists(staging, &target));
        }
        copy_dir(source, &target, reporter)?;
    } else {
        let target = if resolved.is_dir() || dest.ends_with('/') {
            resolved.join(&base_name)
        } else {
            resolved
        };
        if target.exists() {
            return Err(destination_exists(staging, &target));
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, &target)?;
    }

    Ok(())
}

/// Recursive directory copy with per-file progress.
fn copy_dir(source: &Path, target: &Path, reporter: &mut Reporter<'_>) -> Result<()> {
    let entries: Vec<walkdir::DirEntry> = WalkDir::new(source)
        .into_iter()
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| std::io::Error::other(format!("walk failed: {e}")))?;
    let total = entries.iter().filter(|e| e.file_type().is_file()).count();

    let mut copied = 0;
    for entry in &entries {
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| std::io::Error::other(format!("walk produced foreign path: {e}")))?;
        let dest_path = target.join(rel);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path)?;
        } else {
            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &dest_path)?;
            copied += 1;
            reporter.progress.update(copied, total, "add");
        }
    }
    reporter.progress.finished("add");

    Ok(())
}

/// Removes a file or directory (recursively) from the staging tree.
///
/// # Errors
///
/// `PathNotFound` when the resolved path does not exist.
pub fn remove(staging: &StagingArea, rel: &str) -> Result<()> {
    let target = staging.resolve(rel)?;
    if !target.exists() {
        return Err(ArchiveError::PathNotFound {
            path: PathBuf::from(rel),
        });
    }

    if target.is_dir() {
        std::fs::remove_dir_all(&target)?;
    } else {
        std::fs::remove_file(&target)?;
    }
    Ok(())
}

/// Lists every descendant of `rel` as sorted archive-relative path strings.
///
/// Files and directories are both reported. A path that does not exist
/// yields an empty list, not an error.
pub fn list(staging: &StagingArea, rel: &str) -> Result<Vec<String>> {
    let target = staging.resolve(rel)?;
    if !target.exists() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(&target).min_depth(1) {
        let entry = entry.map_err(|e| std::io::Error::other(format!("walk failed: {e}")))?;
        let rel_path = entry
            .path()
            .strip_prefix(staging.root())
            .map_err(|e| std::io::Error::other(format!("walk produced foreign path: {e}")))?;
        paths.push(rel_path.to_string_lossy().into_owned());
    }
    paths.sort();
    Ok(paths)
}

fn destination_exists(staging: &StagingArea, target: &Path) -> ArchiveError {
    let shown = target
        .strip_prefix(staging.root())
        .map_or_else(|_| target.to_path_buf(), Path::to_path_buf);
    ArchiveError::DestinationExists { path: shown }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopLog;
    use crate::NoopProgress;
    use tempfile::TempDir;

    fn reporter_parts() -> (NoopProgress, NoopLog) {
        (NoopProgress, NoopLog)
    }

    #[test]
    fn test_add_file_to_root() {
        let staging = StagingArea::new().unwrap();
        let src_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("notes.txt");
        std::fs::write(&src, b"hello").unwrap();

        let (mut progress, log) = reporter_parts();
        let mut reporter = Reporter {
            progress: &mut progress,
            log: &log,
        };
        add(&staging, &src, "", &mut reporter).unwrap();

        assert_eq!(
            std::fs::read(staging.root().join("notes.txt")).unwrap(),
            b"hello"
        );
        assert_eq!(list(&staging, "").unwrap(), vec!["notes.txt"]);
    }

    #[test]
    fn test_add_file_renamed_target() {
        let staging = StagingArea::new().unwrap();
        let src_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("a.txt");
        std::fs::write(&src, b"x").unwrap();

        let (mut progress, log) = reporter_parts();
        let mut reporter = Reporter {
            progress: &mut progress,
            log: &log,
        };
        add(&staging, &src, "sub/dir/renamed.txt", &mut reporter).unwrap();

        assert!(staging.root().join("sub/dir/renamed.txt").is_file());
    }

    #[test]
    fn test_add_file_trailing_separator_keeps_name() {
        let staging = StagingArea::new().unwrap();
        let src_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("a.txt");
        std::fs::write(&src, b"x").unwrap();

        let (mut progress, log) = reporter_parts();
        let mut reporter = Reporter {
            progress: &mut progress,
            log: &log,
        };
        add(&staging, &src, "nested/", &mut reporter).unwrap();

        assert!(staging.root().join("nested/a.txt").is_file());
    }

    #[test]
    fn test_add_directory_subtree() {
        let staging = StagingArea::new().unwrap();
        let src_dir = TempDir::new().unwrap();
        let tree = src_dir.path().join("proj");
        std::fs::create_dir_all(tree.join("src")).unwrap();
        std::fs::write(tree.join("src/main.rs"), b"fn main() {}").unwrap();
        std::fs::write(tree.join("README.md"), b"# proj").unwrap();

        let (mut progress, log) = reporter_parts();
        let mut reporter = Reporter {
            progress: &mut progress,
            log: &log,
        };
        add(&staging, &tree, "", &mut reporter).unwrap();

        let listed = list(&staging, "").unwrap();
        assert_eq!(
            listed,
            vec!["proj", "proj/README.md", "proj/src", "proj/src/main.rs"]
        );
    }

    #[test]
    fn test_add_missing_source() {
        let staging = StagingArea::new().unwrap();
        let (mut progress, log) = reporter_parts();
        let mut reporter = Reporter {
            progress: &mut progress,
            log: &log,
        };
        let result = add(&staging, Path::new("/no/such/file"), "", &mut reporter);
        assert!(matches!(result, Err(ArchiveError::SourceNotFound { .. })));
    }

    #[test]
    fn test_add_collision_rejected() {
        let staging = StagingArea::new().unwrap();
        let src_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("a.txt");
        std::fs::write(&src, b"x").unwrap();

        let (mut progress, log) = reporter_parts();
        let mut reporter = Reporter {
            progress: &mut progress,
            log: &log,
        };
        add(&staging, &src, "", &mut reporter).unwrap();
        let result = add(&staging, &src, "", &mut reporter);
        assert!(matches!(result, Err(ArchiveError::DestinationExists { .. })));
    }

    #[test]
    fn test_remove_then_list_is_inverse_of_add() {
        let staging = StagingArea::new().unwrap();
        let src_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("a.txt");
        std::fs::write(&src, b"x").unwrap();

        let (mut progress, log) = reporter_parts();
        let mut reporter = Reporter {
            progress: &mut progress,
            log: &log,
        };

        let before = list(&staging, "").unwrap();
        add(&staging, &src, "", &mut reporter).unwrap();
        remove(&staging, "a.txt").unwrap();
        assert_eq!(list(&staging, "").unwrap(), before);
    }

    #[test]
    fn test_remove_missing_path() {
        let staging = StagingArea::new().unwrap();
        let result = remove(&staging, "ghost.txt");
        assert!(matches!(result, Err(ArchiveError::PathNotFound { .. })));
    }

    #[test]
    fn test_remove_directory_recursively() {
        let staging = StagingArea::new().unwrap();
        std::fs::create_dir_all(staging.root().join("d/e")).unwrap();
        std::fs::write(staging.root().join("d/e/f.txt"), b"x").unwrap();

        remove(&staging, "d").unwrap();
        assert!(list(&staging, "").unwrap().is_empty());
    }

    #[test]
    fn test_list_missing_path_is_empty() {
        let staging = StagingArea::new().unwrap();
        assert!(list(&staging, "not/there").unwrap().is_empty());
    }

    #[test]
    fn test_list_is_sorted() {
        let staging = StagingArea::new().unwrap();
        std::fs::write(staging.root().join("b.txt"), b"").unwrap();
        std::fs::write(staging.root().join("a.txt"), b"").unwrap();
        std::fs::create_dir(staging.root().join("c")).unwrap();

        assert_eq!(list(&staging, "").unwrap(), vec!["a.txt", "b.txt", "c"]);
    }
}
