//! Error conversion utilities for the CLI.
//!
//! Converts rearc-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use rearc_core::ArchiveError;
use std::path::Path;

/// Converts `ArchiveError` to a user-friendly anyhow error with context.
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::FormatUnsupported { name } => {
            anyhow!(
                "Unsupported archive format: {name}\n\
                 HINT: Supported formats: zip, tar, tar.gz, tar.xz, 7z, rar."
            )
        }
        ArchiveError::EncryptedArchive { archive } => {
            anyhow!(
                "Archive '{}' is encrypted and the password is missing or wrong\n\
                 HINT: Pass --password, or use 'dec <password>' in the interactive shell.",
                archive.display()
            )
        }
        ArchiveError::MissingCodecProvider { provider } => {
            anyhow!(
                "Cannot process '{}': the {provider} codec provider is not available\n\
                 HINT: Rebuild with the matching cargo feature enabled (sevenz, rar, zip-aes).",
                archive.display()
            )
        }
        ArchiveError::UnsupportedOperation { operation } => {
            anyhow!(
                "Unsupported operation on '{}': {operation}\n\
                 HINT: RAR archives can be read but not written; export to another format.",
                archive.display()
            )
        }
        ArchiveError::PathEscape { path } => {
            anyhow!(
                "Path '{}' would escape the archive root\n\
                 HINT: Archive paths are relative to the archive root and may not contain '..'.",
                path.display()
            )
        }
        ArchiveError::DestinationExists { path } => {
            anyhow!(
                "Destination '{}' already exists in the archive\n\
                 HINT: Remove the existing entry first with 'rm'.",
                path.display()
            )
        }
        ArchiveError::SourceNotFound { path } => {
            anyhow!("Source not found: {}", path.display())
        }
        ArchiveError::PathNotFound { path } => {
            anyhow!("Path not found in archive: {}", path.display())
        }
        ArchiveError::InvalidState { reason } => {
            anyhow!(
                "Invalid session state: {reason}\n\
                 HINT: 'dec <password>' only retries an import that failed on encryption."
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {reason}\n\
                 HINT: The archive may be corrupted or malformed.",
                archive.display()
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {io_err}",
                archive.display()
            )
        }
        err @ ArchiveError::InvalidPassword => anyhow::Error::from(err),
    }
}

/// Adds archive context to a core result.
pub fn with_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}
