//! ZIP codec adapter.
//!
//! Decode handles stored, deflated and (with the `zip-aes` feature)
//! AES-encrypted entries through one reader; password-related failures are
//! classified to `EncryptedArchive` so the session can arm its retry path.
//! Encode writes deflated entries and, when a password is set, AES-256
//! encrypts them if the capability is present — otherwise the archive is
//! written unencrypted and a degraded-capability warning is emitted.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::write::SimpleFileOptions;

use crate::ArchiveError;
use crate::Capabilities;
use crate::Reporter;
use crate::Result;
use crate::StagingArea;

use super::Codec;
use super::collect_entries;

/// ZIP adapter.
pub struct ZipCodec;

impl Codec for ZipCodec {
    fn decode(
        &self,
        archive: &Path,
        staging: &StagingArea,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize> {
        let file = File::open(archive)?;
        let mut reader = zip::ZipArchive::new(BufReader::new(file))
            .map_err(|e| ArchiveError::InvalidArchive(format!("failed to open zip: {e}")))?;

        let total = reader.len();
        for index in 0..total {
            let mut entry = match password {
                Some(pw) => reader
                    .by_index_decrypt(index, pw.as_bytes())
                    .map_err(|e| classify(e, archive))?,
                None => reader.by_index(index).map_err(|e| classify(e, archive))?,
            };

            let rel = entry
                .enclosed_name()
                .map(|p| p.to_path_buf())
                .ok_or_else(|| ArchiveError::PathEscape {
                    path: PathBuf::from(entry.name()),
                })?;
            let dest = staging.resolve(&rel)?;

            if entry.is_dir() {
                std::fs::create_dir_all(&dest)?;
            } else {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let mut out = File::create(&dest)?;
                std::io::copy(&mut entry, &mut out)?;
            }
            reporter.progress.update(index + 1, total, "import zip");
        }
        reporter.progress.finished("import zip");

        Ok(total)
    }

    fn encode(
        &self,
        staging: &StagingArea,
        output: &Path,
        password: Option<&str>,
        reporter: &mut Reporter<'_>,
    ) -> Result<usize> {
        let options = entry_options(password, reporter);

        let file = File::create(output)?;
        let mut writer = ZipWriter::new(file);

        let entries = collect_entries(staging)?;
        let total = entries.len();
        let mut buffer = vec![0u8; 64 * 1024];

        for (index, entry) in entries.iter().enumerate() {
            if entry.is_dir {
                writer
                    .add_directory(format!("{}/", entry.rel), options)
                    .map_err(|e| ArchiveError::InvalidArchive(format!("zip write: {e}")))?;
            } else {
                writer
                    .start_file(entry.rel.as_str(), options)
                    .map_err(|e| ArchiveError::InvalidArchive(format!("zip write: {e}")))?;
                let mut source = File::open(&entry.abs)?;
                loop {
                    let read = source.read(&mut buffer)?;
                    if read == 0 {
                        break;
                    }
                    std::io::Write::write_all(&mut writer, &buffer[..read])?;
                }
            }
            reporter.progress.update(index + 1, total, "export zip");
        }

        writer
            .finish()
            .map_err(|e| ArchiveError::InvalidArchive(format!("failed to finish zip: {e}")))?;
        reporter.progress.finished("export zip");

        Ok(total)
    }

    fn name(&self) -> &'static str {
        "zip"
    }
}

/// Builds per-entry write options, applying AES encryption when a password
/// is set and the capability is compiled in.
fn entry_options<'p>(password: Option<&'p str>, reporter: &Reporter<'_>) -> FileOptions<'p, ()> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    match password {
        None => options,
        Some(pw) => {
            if Capabilities::detect().zip_aes {
                aes_options(options, pw)
            } else {
                // Known gap: the export proceeds without the password.
                reporter.warn("AES zip provider unavailable; writing unencrypted archive");
                options
            }
        }
    }
}

#[cfg(feature = "zip-aes")]
fn aes_options<'p>(options: SimpleFileOptions, password: &'p str) -> FileOptions<'p, ()> {
    options.with_aes_encryption(zip::AesMode::Aes256, password)
}

#[cfg(not(feature = "zip-aes"))]
fn aes_options<'p>(options: SimpleFileOptions, _password: &'p str) -> FileOptions<'p, ()> {
    options
}

/// Maps zip reader errors onto the crate's error kinds.
///
/// Missing and wrong passwords both classify to `EncryptedArchive`; an AES
/// entry met without the AES capability classifies to
/// `MissingCodecProvider`.
fn classify(err: ZipError, archive: &Path) -> ArchiveError {
    match err {
        ZipError::InvalidPassword => ArchiveError::EncryptedArchive {
            archive: archive.to_path_buf(),
        },
        ZipError::UnsupportedArchive(message) => {
            let lower = message.to_ascii_lowercase();
            if lower.contains("password") || lower.contains("encrypt") {
                ArchiveError::EncryptedArchive {
                    archive: archive.to_path_buf(),
                }
            } else if lower.contains("aes") {
                ArchiveError::MissingCodecProvider { provider: "zip-aes" }
            } else {
                ArchiveError::InvalidArchive(format!("zip: {message}"))
            }
        }
        ZipError::Io(e) => ArchiveError::Io(e),
        other => ArchiveError::InvalidArchive(format!("zip: {other}")),
    }
}
