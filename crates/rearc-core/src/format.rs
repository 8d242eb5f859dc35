//! Container format resolution from file names.

use std::fmt;
use std::path::Path;

/// Canonical tag for a supported container format.
///
/// Derived deterministically from a file name; never constructed from
/// archive content. `Unknown` is a valid resolver result — callers treat
/// it as a fatal "unsupported format" condition at the point of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// ZIP archive.
    Zip,
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// XZ-compressed tar archive.
    TarXz,
    /// 7z archive.
    SevenZ,
    /// RAR archive.
    Rar,
    /// Bare gzip stream (decoded through the tar adapter).
    Gz,
    /// Bare xz stream (decoded through the tar adapter).
    Xz,
    /// No resolution rule matched.
    Unknown,
}

impl Format {
    /// Resolves a format tag from a file name or path.
    ///
    /// Pure function of the final path segment, case-insensitive.
    /// Composite two-part suffixes (`.tar.gz`, `.tgz`, `.tar.xz`) are
    /// checked before falling back to the last single extension.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let base = Path::new(name)
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().to_ascii_lowercase());

        if base.ends_with(".tar.gz") || base.ends_with(".tgz") {
            return Self::TarGz;
        }
        if base.ends_with(".tar.xz") {
            return Self::TarXz;
        }

        match base.rsplit_once('.').map(|(_, ext)| ext) {
            Some("zip") => Self::Zip,
            Some("tar") => Self::Tar,
            Some("7z") => Self::SevenZ,
            Some("rar") => Self::Rar,
            Some("gz") => Self::Gz,
            Some("xz") => Self::Xz,
            _ => Self::Unknown,
        }
    }

    /// Parses a bare format tag such as `zip` or `tar.gz`.
    ///
    /// Accepts exactly the canonical tags (plus `tgz` as an alias);
    /// anything else is `Unknown`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "zip" => Self::Zip,
            "tar" => Self::Tar,
            "tar.gz" | "tgz" => Self::TarGz,
            "tar.xz" => Self::TarXz,
            "7z" => Self::SevenZ,
            "rar" => Self::Rar,
            "gz" => Self::Gz,
            "xz" => Self::Xz,
            _ => Self::Unknown,
        }
    }

    /// Returns the canonical lowercase tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarXz => "tar.xz",
            Self::SevenZ => "7z",
            Self::Rar => "rar",
            Self::Gz => "gz",
            Self::Xz => "xz",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
