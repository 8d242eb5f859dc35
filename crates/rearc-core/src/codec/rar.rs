//! RAR codec adapter (behind the `rar` feature).
//!
//! Decode-only: the RAR provider has no encoder, so `encode` always fails
//! with `UnsupportedOperation`. A listing pass runs before extraction so
//! the progress total is known up front. Passwords are supported on decode.

use std::path::Path;

use unrar::Archive;
use unrar::error::Code;
use unrar::error::UnrarError;

use crate::ArchiveError;
use crate::Reporter;
use crate::Result;
use crate::StagingArea;

use super::Codec;

/// RAR adapter.
pub struct RarCodec;

impl RarCodec {
    fn archive<'a>(path: &'a Path, password: Option<&'a str>) -> Archive<'a> {
        password.map_or_else(|| Archive::new(path), |pw| Archive::with_password(path, pw))
    }
}

impl Codec for RarCodec {
    fn decode(
        &self,
        archive: &Path,
        staging: &StagingArea,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize> {
        if !archive.exists() {
            return Err(ArchiveError::SourceNotFound {
                path: archive.to_path_buf(),
            });
        }

        // Listing pass for the progress total.
        let mut total = 0;
        let listing = Self::archive(archive, password)
            .open_for_listing()
            .map_err(|e| classify(&e, archive))?;
        for header in listing {
            header.map_err(|e| classify(&e, archive))?;
            total += 1;
        }

        let mut open = Self::archive(archive, password)
            .open_for_processing()
            .map_err(|e| classify(&e, archive))?;
        let mut completed = 0;
        while let Some(header) = open.read_header().map_err(|e| classify(&e, archive))? {
            let entry = header.entry();
            let dest = staging.resolve(&entry.filename)?;

            open = if entry.is_file() {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                header.extract_to(&dest).map_err(|e| classify(&e, archive))?
            } else {
                std::fs::create_dir_all(&dest)?;
                header.skip().map_err(|e| classify(&e, archive))?
            };
            completed += 1;
            reporter.progress.update(completed, total, "import rar");
        }
        reporter.progress.finished("import rar");

        Ok(total)
    }

    fn encode(
        &self,
        _staging: &StagingArea,
        _output: &Path,
        _password: Option<&str>,
        _reporter: &mut Reporter<'_>,
    ) -> Result<usize> {
        Err(ArchiveError::UnsupportedOperation {
            operation: "rar encoding".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "rar"
    }
}

/// Maps RAR provider errors onto the crate's error kinds.
fn classify(err: &UnrarError, archive: &Path) -> ArchiveError {
    match err.code {
        Code::MissingPassword | Code::BadPassword => ArchiveError::EncryptedArchive {
            archive: archive.to_path_buf(),
        },
        _ => ArchiveError::InvalidArchive(format!("rar: {err}")),
    }
}
