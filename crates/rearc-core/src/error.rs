//! Error types for archive staging and transcoding operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while importing, mutating or exporting an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File name does not map to a supported container format.
    #[error("unsupported archive format: {name}")]
    FormatUnsupported {
        /// The file name that failed to resolve.
        name: String,
    },

    /// A local source path handed to `add` does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// An archive-relative path does not exist in the staging area.
    #[error("path not found in archive: {path}")]
    PathNotFound {
        /// The missing archive-relative path.
        path: PathBuf,
    },

    /// An archive-relative path would resolve outside the staging area.
    #[error("path escapes the staging area: {path}")]
    PathEscape {
        /// The offending caller-supplied path.
        path: PathBuf,
    },

    /// The archive is encrypted and the password is missing or wrong.
    #[error("archive is encrypted (password required or wrong): {archive}")]
    EncryptedArchive {
        /// The archive that could not be decrypted.
        archive: PathBuf,
    },

    /// A codec provider needed for this operation was not compiled in.
    #[error("codec provider not available: {provider}")]
    MissingCodecProvider {
        /// Name of the absent provider.
        provider: &'static str,
    },

    /// The operation is not supported for this format.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Description of the rejected operation.
        operation: String,
    },

    /// An export password failed validation.
    #[error("password must be a non-empty string")]
    InvalidPassword,

    /// The session is not in a state that permits this operation.
    #[error("invalid session state: {reason}")]
    InvalidState {
        /// Why the operation was rejected.
        reason: &'static str,
    },

    /// The destination of an `add` already exists.
    #[error("destination already exists in archive: {path}")]
    DestinationExists {
        /// The colliding archive-relative path.
        path: PathBuf,
    },

    /// The container is corrupted or cannot be parsed.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
}

impl ArchiveError {
    /// Returns `true` if this error indicates a missing or wrong password.
    ///
    /// The session orchestrator uses this to set its "known encrypted"
    /// flag before re-raising a failed import.
    #[must_use]
    pub const fn is_password_related(&self) -> bool {
        matches!(self, Self::EncryptedArchive { .. })
    }
}
