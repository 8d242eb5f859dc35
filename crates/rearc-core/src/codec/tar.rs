//! TAR family codec adapter (tar, tar.gz, tar.xz).
//!
//! Decode sniffs the compression from the archive's leading bytes instead
//! of trusting the file name, so a mislabeled `.tar` that is really gzipped
//! still imports; bare `gz`/`xz` tags route here for the same reason.
//! Encode picks the compression from the requested format tag. TAR has no
//! native encryption: a configured password is never applied on encode.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use crate::ArchiveError;
use crate::Format;
use crate::Reporter;
use crate::Result;
use crate::StagingArea;

use super::Codec;
use super::collect_entries;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const XZ_MAGIC: [u8; 6] = [0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];

/// Compression detected from archive content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compressed {
    None,
    Gzip,
    Xz,
}

/// TAR family adapter, parameterized by the resolved format tag.
pub struct TarCodec {
    format: Format,
}

impl TarCodec {
    /// Creates an adapter for one of the tar-family tags.
    #[must_use]
    pub fn new(format: Format) -> Self {
        Self { format }
    }
}

impl Codec for TarCodec {
    fn decode(
        &self,
        archive: &Path,
        staging: &StagingArea,
        _password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize> {
        let compression = sniff(archive)?;
        let label = format!("import {}", self.name());

        // First pass enumerates the entry list so the progress total is
        // known before any content lands in the staging area.
        let total = {
            let mut count = 0;
            let mut tar = open_tar(archive, compression)?;
            for entry in tar
                .entries()
                .map_err(|e| ArchiveError::InvalidArchive(format!("failed to read tar: {e}")))?
            {
                entry.map_err(|e| {
                    ArchiveError::InvalidArchive(format!("failed to read tar entry: {e}"))
                })?;
                count += 1;
            }
            count
        };

        let mut tar = open_tar(archive, compression)?;
        let mut completed = 0;
        for entry in tar
            .entries()
            .map_err(|e| ArchiveError::InvalidArchive(format!("failed to read tar: {e}")))?
        {
            let mut entry = entry.map_err(|e| {
                ArchiveError::InvalidArchive(format!("failed to read tar entry: {e}"))
            })?;
            let rel = entry
                .path()
                .map_err(|e| ArchiveError::InvalidArchive(format!("invalid tar path: {e}")))?
                .into_owned();
            let dest = staging.resolve(&rel)?;

            if entry.header().entry_type().is_dir() {
                std::fs::create_dir_all(&dest)?;
            } else {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                entry.unpack(&dest).map_err(|e| {
                    ArchiveError::InvalidArchive(format!("failed to unpack tar entry: {e}"))
                })?;
            }
            completed += 1;
            reporter.progress.update(completed, total, &label);
        }
        reporter.progress.finished(&label);

        Ok(total)
    }

    fn encode(
        &self,
        staging: &StagingArea,
        output: &Path,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize> {
        if password.is_some() {
            reporter.warn("tar has no native encryption; password not applied");
        }

        let entries = collect_entries(staging)?;
        let label = format!("export {}", self.name());
        let file = File::create(output)?;

        let total = match self.format {
            Format::TarGz => {
                let encoder = GzEncoder::new(file, Compression::default());
                let encoder = append_entries(encoder, &entries, &label, reporter)?;
                encoder.finish()?;
                entries.len()
            }
            Format::TarXz => {
                let encoder = XzEncoder::new(file, 6);
                let encoder = append_entries(encoder, &entries, &label, reporter)?;
                encoder.finish()?;
                entries.len()
            }
            Format::Tar => {
                let mut file = append_entries(file, &entries, &label, reporter)?;
                file.flush()?;
                entries.len()
            }
            other => {
                return Err(ArchiveError::FormatUnsupported {
                    name: other.tag().to_string(),
                });
            }
        };
        reporter.progress.finished(&label);

        Ok(total)
    }

    fn name(&self) -> &'static str {
        self.format.tag()
    }
}

/// Appends every staged entry to a tar builder over `writer`, returning the
/// inner writer for finalization.
fn append_entries<W: Write>(
    writer: W,
    entries: &[super::StagedEntry],
    label: &str,
    reporter: &mut Reporter<'_>,
) -> Result<W> {
    let mut builder = tar::Builder::new(writer);
    let total = entries.len();

    for (index, entry) in entries.iter().enumerate() {
        if entry.is_dir {
            builder.append_dir(&entry.rel, &entry.abs)?;
        } else {
            builder.append_path_with_name(&entry.abs, &entry.rel)?;
        }
        reporter.progress.update(index + 1, total, label);
    }

    builder.into_inner().map_err(ArchiveError::Io)
}

/// Reads the leading magic bytes to pick the decompression stack.
fn sniff(archive: &Path) -> Result<Compressed> {
    let mut file = File::open(archive)?;
    let mut magic = [0u8; 6];
    let read = file.read(&mut magic)?;

    if read >= 2 && magic[..2] == GZIP_MAGIC {
        Ok(Compressed::Gzip)
    } else if read >= 6 && magic == XZ_MAGIC {
        Ok(Compressed::Xz)
    } else {
        Ok(Compressed::None)
    }
}

/// Opens a tar reader over the appropriate decompressor.
fn open_tar(archive: &Path, compression: Compressed) -> Result<tar::Archive<Box<dyn Read>>> {
    let file = File::open(archive)?;
    let reader = BufReader::new(file);
    let reader: Box<dyn Read> = match compression {
        Compressed::None => Box::new(reader),
        Compressed::Gzip => Box::new(GzDecoder::new(reader)),
        Compressed::Xz => Box::new(XzDecoder::new(reader)),
    };
    Ok(tar::Archive::new(reader))
}
