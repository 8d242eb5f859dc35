//! Export-password and encrypted-import tracking.

use crate::ArchiveError;
use crate::Result;

/// Tracks whether export should be password-protected and whether the last
/// import failed for lack of a (correct) password.
#[derive(Debug, Default)]
pub struct EncryptionPolicy {
    export_password: Option<String>,
    import_encrypted: bool,
}

impl EncryptionPolicy {
    /// Creates a policy with no password and no pending encrypted import.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables password-protected export for subsequent `export` calls.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPassword` if `password` is empty.
    pub fn set_export_password(&mut self, password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(ArchiveError::InvalidPassword);
        }
        self.export_password = Some(password.to_string());
        Ok(())
    }

    /// Disables password-protected export.
    ///
    /// Idempotent; returns whether a password had been set so the caller
    /// can emit a notice when there was nothing to clear.
    pub fn clear_export_password(&mut self) -> bool {
        self.export_password.take().is_some()
    }

    /// Currently configured export password, if any.
    #[must_use]
    pub fn export_password(&self) -> Option<&str> {
        self.export_password.as_deref()
    }

    /// Records that an import failed with a password-related error.
    pub fn mark_import_encrypted(&mut self) {
        self.import_encrypted = true;
    }

    /// Clears the encrypted-import marker after a successful retry.
    pub fn clear_import_encrypted(&mut self) {
        self.import_encrypted = false;
    }

    /// Whether the last import is known to have failed on encryption.
    #[must_use]
    pub const fn import_known_encrypted(&self) -> bool {
        self.import_encrypted
    }
}
