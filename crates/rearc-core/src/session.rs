//! Session orchestration: one import/mutate/export lifecycle.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::EncryptionPolicy;
use crate::Format;
use crate::LogSink;
use crate::NoopLog;
use crate::NoopProgress;
use crate::ProgressSink;
use crate::Reporter;
use crate::Result;
use crate::StagingArea;
use crate::codec;
use crate::tree;

/// The stateful unit coordinating one import/mutate/export lifecycle.
///
/// A session owns exactly one staging area plus the encryption policy, and
/// sequences the format resolver and codec adapters. Operations are
/// synchronous and run to completion; the session is not thread-safe and
/// must not be shared across threads.
///
/// State moves through four shapes: empty, loaded (after a successful
/// import), load-failed-encrypted (import failed for lack of a password;
/// only [`retry_import_with_password`] leaves this usefully), and mutated
/// (after `add`/`remove`). `reset` returns to empty from anywhere;
/// `export` never changes in-memory state, so repeated exports are
/// allowed. A failed decode may leave partial content in the staging area;
/// the retry path wipes it before re-importing.
///
/// [`retry_import_with_password`]: Session::retry_import_with_password
pub struct Session {
    staging: StagingArea,
    policy: EncryptionPolicy,
    source: Option<PathBuf>,
    progress: Box<dyn ProgressSink>,
    log: Box<dyn LogSink>,
}

impl Session {
    /// Creates an empty session with no-op collaborators.
    pub fn new() -> Result<Self> {
        Self::with_collaborators(Box::new(NoopProgress), Box::new(NoopLog))
    }

    /// Creates an empty session reporting to the given collaborators.
    pub fn with_collaborators(
        progress: Box<dyn ProgressSink>,
        log: Box<dyn LogSink>,
    ) -> Result<Self> {
        let staging = StagingArea::new()?;
        Ok(Self {
            staging,
            policy: EncryptionPolicy::new(),
            source: None,
            progress,
            log,
        })
    }

    /// Root of the staging tree (the archive as it currently stands).
    #[must_use]
    pub fn staging_root(&self) -> &Path {
        self.staging.root()
    }

    /// Source archive path, if one was imported (or attempted).
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether an export password is currently configured.
    #[must_use]
    pub fn export_password_set(&self) -> bool {
        self.policy.export_password().is_some()
    }

    /// Whether the last import failed because the archive is encrypted.
    #[must_use]
    pub fn import_known_encrypted(&self) -> bool {
        self.policy.import_known_encrypted()
    }

    /// Imports an existing archive into the staging area.
    ///
    /// The format is resolved from the archive's file name. On a
    /// password-related failure the session records that the source is
    /// encrypted so [`retry_import_with_password`] becomes available; the
    /// error is re-raised unchanged either way.
    ///
    /// [`retry_import_with_password`]: Session::retry_import_with_password
    pub fn import(&mut self, archive: &Path, password: Option<&str>) -> Result<()> {
        if !archive.exists() {
            return Err(ArchiveError::SourceNotFound {
                path: archive.to_path_buf(),
            });
        }

        self.source = Some(archive.to_path_buf());
        let format = Format::from_name(&archive.to_string_lossy());
        if format == Format::Unknown {
            return Err(ArchiveError::FormatUnsupported {
                name: archive.to_string_lossy().into_owned(),
            });
        }

        let mut reporter = Reporter {
            progress: self.progress.as_mut(),
            log: self.log.as_ref(),
        };
        reporter.info(&format!(
            "importing '{}' (format: {format})",
            archive.display()
        ));

        let codec = codec::codec_for(format)?;
        match codec.decode(archive, &self.staging, password, &mut reporter) {
            Ok(entries) => {
                reporter.info(&format!("import successful ({entries} entries)"));
                Ok(())
            }
            Err(err) => {
                if err.is_password_related() {
                    self.policy.mark_import_encrypted();
                    reporter.warn(&format!("import failed (encrypted archive): {err}"));
                } else {
                    reporter.error(&format!("import failed: {err}"));
                }
                Err(err)
            }
        }
    }

    /// Retries the failed encrypted import with a password.
    ///
    /// Valid only after an import failed with a password-related error.
    /// The staging area is wiped first so partial content from the failed
    /// attempt cannot leak into the retry; the encrypted-import flag is
    /// cleared only when the retry succeeds.
    ///
    /// # Errors
    ///
    /// `InvalidState` when there is no prior failed encrypted import.
    pub fn retry_import_with_password(&mut self, password: &str) -> Result<()> {
        if !self.policy.import_known_encrypted() || self.source.is_none() {
            return Err(ArchiveError::InvalidState {
                reason: "no prior failed encrypted import to retry",
            });
        }

        let archive = self.source.clone().ok_or(ArchiveError::InvalidState {
            reason: "no prior failed encrypted import to retry",
        })?;

        self.staging.wipe()?;
        self.import(&archive, Some(password))?;
        self.policy.clear_import_encrypted();
        Ok(())
    }

    /// Copies a local file or directory into the staging tree.
    pub fn add(&mut self, source: &Path, dest: &str) -> Result<()> {
        let mut reporter = Reporter {
            progress: self.progress.as_mut(),
            log: self.log.as_ref(),
        };
        tree::add(&self.staging, source, dest, &mut reporter)?;
        reporter.info(&format!("added '{}'", source.display()));
        Ok(())
    }

    /// Removes a file or directory from the staging tree.
    pub fn remove(&mut self, rel: &str) -> Result<()> {
        tree::remove(&self.staging, rel)?;
        self.log
            .log(crate::LogLevel::Info, &format!("removed '{rel}'"));
        Ok(())
    }

    /// Lists every descendant of `rel` (pass `""` for the whole tree).
    pub fn list(&self, rel: &str) -> Result<Vec<String>> {
        tree::list(&self.staging, rel)
    }

    /// Enables password-protected export.
    pub fn set_export_password(&mut self, password: &str) -> Result<()> {
        self.policy.set_export_password(password)?;
        self.log
            .log(crate::LogLevel::Info, "export encryption enabled");
        Ok(())
    }

    /// Disables password-protected export; a notice is logged when no
    /// password had been set.
    pub fn clear_export_password(&mut self) {
        if self.policy.clear_export_password() {
            self.log
                .log(crate::LogLevel::Info, "export encryption disabled");
        } else {
            self.log
                .log(crate::LogLevel::Info, "export encryption was not enabled");
        }
    }

    /// Exports the staging tree to `output`.
    ///
    /// The format comes from `format_override` when given, otherwise from
    /// the output file name. In-memory state does not change, so the same
    /// session can export repeatedly.
    pub fn export(&mut self, output: &Path, format_override: Option<Format>) -> Result<()> {
        let format =
            format_override.unwrap_or_else(|| Format::from_name(&output.to_string_lossy()));
        if format == Format::Unknown {
            return Err(ArchiveError::FormatUnsupported {
                name: output.to_string_lossy().into_owned(),
            });
        }

        let mut reporter = Reporter {
            progress: self.progress.as_mut(),
            log: self.log.as_ref(),
        };
        reporter.info(&format!(
            "exporting to '{}' (format: {format})",
            output.display()
        ));

        let codec = codec::codec_for(format)?;
        let entries = codec.encode(
            &self.staging,
            output,
            self.policy.export_password(),
            &mut reporter,
        )?;
        reporter.info(&format!("export successful ({entries} entries)"));
        Ok(())
    }

    /// Returns the session to the empty state: fresh staging area, no
    /// source identity, no export password, no encrypted-import marker.
    pub fn reset(&mut self) -> Result<()> {
        let fresh = StagingArea::new()?;
        let old = std::mem::replace(&mut self.staging, fresh);
        old.close()?;
        self.policy = EncryptionPolicy::new();
        self.source = None;
        Ok(())
    }

    /// Destroys the session, reporting staging removal failure.
    ///
    /// Dropping the session also releases the staging area; this variant
    /// surfaces the error instead of swallowing it.
    pub fn close(self) -> Result<()> {
        self.staging.close()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_import_missing_archive() {
        let mut session = Session::new().unwrap();
        let result = session.import(Path::new("/no/such.zip"), None);
        assert!(matches!(result, Err(ArchiveError::SourceNotFound { .. })));
    }

    #[test]
    fn test_import_unknown_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"plain text").unwrap();

        let mut session = Session::new().unwrap();
        let result = session.import(&path, None);
        assert!(matches!(
            result,
            Err(ArchiveError::FormatUnsupported { .. })
        ));
    }

    #[test]
    fn test_retry_without_failed_import_is_invalid_state() {
        let mut session = Session::new().unwrap();
        let result = session.retry_import_with_password("pw");
        assert!(matches!(result, Err(ArchiveError::InvalidState { .. })));
    }

    #[test]
    fn test_export_unknown_format() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new().unwrap();
        let result = session.export(&dir.path().join("out.docx"), None);
        assert!(matches!(
            result,
            Err(ArchiveError::FormatUnsupported { .. })
        ));
    }

    #[test]
    fn test_reset_clears_state() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("f.txt");
        std::fs::write(&src, b"x").unwrap();

        let mut session = Session::new().unwrap();
        session.add(&src, "").unwrap();
        session.set_export_password("pw").unwrap();
        let old_root = session.staging_root().to_path_buf();

        session.reset().unwrap();

        assert!(!old_root.exists());
        assert!(session.list("").unwrap().is_empty());
        assert!(!session.export_password_set());
        assert!(session.source().is_none());
    }

    #[test]
    fn test_export_format_override_beats_extension() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("f.txt");
        std::fs::write(&src, b"x").unwrap();

        let mut session = Session::new().unwrap();
        session.add(&src, "").unwrap();

        // `.bin` resolves to Unknown; the override carries it.
        let out = dir.path().join("payload.bin");
        session.export(&out, Some(Format::Zip)).unwrap();

        let mut fresh = Session::new().unwrap();
        fresh.import(&out, None).unwrap_err(); // name still resolves Unknown
        let mut fresh = Session::new().unwrap();
        let renamed = dir.path().join("payload.zip");
        std::fs::rename(&out, &renamed).unwrap();
        fresh.import(&renamed, None).unwrap();
        assert_eq!(fresh.list("").unwrap(), vec!["f.txt"]);
    }
}
