//! Codec adapters: one per supported container format.
//!
//! Each adapter decodes an archive into the staging area and encodes the
//! staging area into an archive, reporting per-entry progress with the
//! total enumerated before processing begins. Optional providers (7z, RAR)
//! are compiled in behind cargo features; an absent provider surfaces as
//! `MissingCodecProvider` from [`codec_for`].

pub mod tar;
pub mod zip;

#[cfg(feature = "rar")]
pub mod rar;
#[cfg(feature = "sevenz")]
pub mod sevenz;

use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::ArchiveError;
use crate::Format;
use crate::Reporter;
use crate::Result;
use crate::StagingArea;

/// Translates between one container format and the staging area.
pub trait Codec {
    /// Decodes `archive` into `staging`, returning the entry count.
    ///
    /// Partial state written before a failing entry is not rolled back;
    /// callers wipe the staging area before retrying.
    fn decode(
        &self,
        archive: &Path,
        staging: &StagingArea,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize>;

    /// Encodes the staging tree into `output`, returning the entry count.
    fn encode(
        &self,
        staging: &StagingArea,
        output: &Path,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize>;

    /// Canonical format name for labels and messages.
    fn name(&self) -> &'static str;
}

/// Selects the codec adapter for a resolved format tag.
///
/// # Errors
///
/// - `FormatUnsupported` for `Unknown`.
/// - `MissingCodecProvider` when the matching provider feature is off.
pub fn codec_for(format: Format) -> Result<Box<dyn Codec>> {
    match format {
        Format::Zip => Ok(Box::new(zip::ZipCodec)),
        // Bare gz/xz streams run through the tar adapter, which sniffs the
        // compression from content on decode.
        Format::Tar | Format::TarGz | Format::TarXz | Format::Gz | Format::Xz => {
            Ok(Box::new(tar::TarCodec::new(format)))
        }
        #[cfg(feature = "sevenz")]
        Format::SevenZ => Ok(Box::new(sevenz::SevenZCodec)),
        #[cfg(not(feature = "sevenz"))]
        Format::SevenZ => Err(ArchiveError::MissingCodecProvider { provider: "7z" }),
        #[cfg(feature = "rar")]
        Format::Rar => Ok(Box::new(rar::RarCodec)),
        #[cfg(not(feature = "rar"))]
        Format::Rar => Err(ArchiveError::MissingCodecProvider { provider: "rar" }),
        Format::Unknown => Err(ArchiveError::FormatUnsupported {
            name: format.tag().to_string(),
        }),
    }
}

/// One staging-tree entry scheduled for encoding.
#[derive(Debug, Clone)]
pub(crate) struct StagedEntry {
    /// Absolute path under the staging root.
    pub abs: PathBuf,
    /// Archive-relative name with forward-slash separators.
    pub rel: String,
    /// Directory entries carry no content.
    pub is_dir: bool,
}

/// Enumerates the staging tree once, depth-first, directories included.
pub(crate) fn collect_entries(staging: &StagingArea) -> Result<Vec<StagedEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(staging.root()).min_depth(1) {
        let entry = entry.map_err(|e| std::io::Error::other(format!("walk failed: {e}")))?;
        let rel = entry
            .path()
            .strip_prefix(staging.root())
            .map_err(|e| std::io::Error::other(format!("walk produced foreign path: {e}")))?;
        entries.push(StagedEntry {
            abs: entry.path().to_path_buf(),
            rel: slash_name(rel),
            is_dir: entry.file_type().is_dir(),
        });
    }
    Ok(entries)
}

/// Converts a relative path to the forward-slash form archives expect.
pub(crate) fn slash_name(rel: &Path) -> String {
    let mut name = String::new();
    for component in rel.components() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}
